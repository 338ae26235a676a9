use crate::server::{
    data::member_tag::MemberTagRepository, error::AppError, model::member_tag::MemberTags,
};
use test_utils::{builder::TestBuilder, factory};

/// Tests saved lists round trip through the JSON columns.
#[tokio::test]
async fn save_and_find() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberTag)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = MemberTagRepository::new(db);

    let mut tags = MemberTags::empty(1, 2);
    tags.genres = vec!["House".to_string(), "Techno".to_string()];
    tags.daws = vec!["Ableton".to_string()];
    repo.save(tags).await?;

    let found = repo.find(1, 2).await?.unwrap();
    assert_eq!(found.genres, vec!["House", "Techno"]);
    assert_eq!(found.daws, vec!["Ableton"]);

    Ok(())
}

/// Tests listing is per guild and ordered by user.
#[tokio::test]
async fn get_all_by_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberTag)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_member_tag(db, "1", "3", &["Jazz"], &[]).await?;
    factory::create_member_tag(db, "1", "2", &["House"], &["FL Studio"]).await?;
    factory::create_member_tag(db, "9", "2", &["Rock"], &[]).await?;

    let members = MemberTagRepository::new(db).get_all_by_guild(1).await?;

    let users: Vec<u64> = members.iter().map(|m| m.user_id).collect();
    assert_eq!(users, vec![2, 3]);

    Ok(())
}

/// Tests deleting removes the row.
#[tokio::test]
async fn delete_removes_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberTag)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_member_tag(db, "1", "2", &["House"], &[]).await?;
    let repo = MemberTagRepository::new(db);

    assert!(repo.delete(1, 2).await?);
    assert!(repo.find(1, 2).await?.is_none());

    Ok(())
}

use super::*;
use test_utils::factory;

/// Tests finding an existing user.
///
/// Expected: Ok(Some(User))
#[tokio::test]
async fn finds_existing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id(555)
        .name("Found")
        .build()
        .await?;

    let user = UserRepository::new(db).find_by_discord_id(555).await?;

    assert_eq!(user.map(|u| u.name), Some("Found".to_string()));

    Ok(())
}

/// Tests looking up a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserRepository::new(db).find_by_discord_id(999).await?;

    assert!(user.is_none());

    Ok(())
}

use super::*;

/// Tests deleting reports whether a record existed.
///
/// Expected: true on the first delete, false on the second
#[tokio::test]
async fn reports_whether_record_existed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_member_xp(db, "1", "2", 50).await?;

    let repo = MemberXpRepository::new(db);

    assert!(repo.delete(1, 2).await?);
    assert!(!repo.delete(1, 2).await?);
    assert!(repo.find(1, 2).await?.is_none());

    Ok(())
}

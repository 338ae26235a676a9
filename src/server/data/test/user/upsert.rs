use super::*;

/// Tests creating a new user.
///
/// Expected: Ok with user created and admin status set to false
#[tokio::test]
async fn creates_new_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserRepository::new(db)
        .upsert(UpsertUserParam {
            discord_id: 123456789,
            name: "TestUser".to_string(),
            is_admin: None,
        })
        .await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.name, "TestUser");
    assert!(!user.admin);

    Ok(())
}

/// Tests a later login updates the name but keeps admin status.
///
/// Expected: Ok with the new name and admin still true
#[tokio::test]
async fn preserves_admin_when_not_specified() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = UserRepository::new(db);

    repo.upsert(UpsertUserParam {
        discord_id: 123456789,
        name: "OldName".to_string(),
        is_admin: Some(true),
    })
    .await?;

    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 123456789,
            name: "NewName".to_string(),
            is_admin: None,
        })
        .await?;

    assert_eq!(user.name, "NewName");
    assert!(user.admin);

    Ok(())
}

/// Tests admin status can be revoked explicitly.
///
/// Expected: Ok with admin false
#[tokio::test]
async fn updates_admin_when_specified() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = UserRepository::new(db);

    repo.upsert(UpsertUserParam {
        discord_id: 42,
        name: "User".to_string(),
        is_admin: Some(true),
    })
    .await?;

    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 42,
            name: "User".to_string(),
            is_admin: Some(false),
        })
        .await?;

    assert!(!user.admin);

    Ok(())
}

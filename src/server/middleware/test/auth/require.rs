use super::*;

/// Tests a request without a logged in user is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_missing_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let checker = StaticPermissionChecker::default();

    let result = AuthGuard::new(db, session, &checker).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a user that no longer exists.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_session_user_missing_from_database() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let checker = StaticPermissionChecker::default();

    AuthSession::new(session).set_user_id(42).await?;

    let result = AuthGuard::new(db, session, &checker).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(42)))
    ));

    Ok(())
}

/// Tests the admin permission is granted to site admins.
///
/// Expected: Ok(User) with admin=true
#[tokio::test]
async fn grants_admin_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let checker = StaticPermissionChecker::default();

    factory::user::UserFactory::new(db)
        .discord_id(123456789)
        .name("AdminUser")
        .admin()
        .build()
        .await?;
    AuthSession::new(session).set_user_id(123456789).await?;

    let user = AuthGuard::new(db, session, &checker)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.name, "AdminUser");
    assert!(user.admin);

    Ok(())
}

/// Tests a regular user is denied the admin permission.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_admin_to_regular_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let checker = StaticPermissionChecker::default();

    factory::user::UserFactory::new(db)
        .discord_id(987654321)
        .build()
        .await?;
    AuthSession::new(session).set_user_id(987654321).await?;

    let result = AuthGuard::new(db, session, &checker)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, 987654321);
            assert!(message.contains("admin"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other.map(|u| u.discord_id)),
    }

    Ok(())
}

/// Tests guild managers pass the manage permission for their guild only.
///
/// Expected: Ok for guild 10, AccessDenied for guild 20
#[tokio::test]
async fn checks_manage_guild_per_guild() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let checker = StaticPermissionChecker::default().allow(555, 10);

    factory::user::UserFactory::new(db)
        .discord_id(555)
        .build()
        .await?;
    AuthSession::new(session).set_user_id(555).await?;

    let guard = AuthGuard::new(db, session, &checker);

    assert!(guard.require(&[Permission::ManageGuild(10)]).await.is_ok());
    assert!(matches!(
        guard.require(&[Permission::ManageGuild(20)]).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(555, _)))
    ));

    Ok(())
}

/// Tests site admins bypass guild permission checks.
///
/// Expected: Ok(User) even though the checker allows nothing
#[tokio::test]
async fn admin_bypasses_manage_guild() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let checker = StaticPermissionChecker::default();

    factory::user::create_admin(db, 999).await?;
    AuthSession::new(session).set_user_id(999).await?;

    let result = AuthGuard::new(db, session, &checker)
        .require(&[Permission::ManageGuild(10), Permission::ManageGuild(20)])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests an empty permission list admits any logged in user.
///
/// Expected: Ok(User)
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let checker = StaticPermissionChecker::default();

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session)
        .set_user_id(user.discord_id.parse().unwrap())
        .await?;

    let returned = AuthGuard::new(db, session, &checker).require(&[]).await?;

    assert_eq!(returned.discord_id.to_string(), user.discord_id);

    Ok(())
}

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::{permission::GuildPermissionChecker, session::AuthSession},
    model::user::User,
};

pub enum Permission {
    /// Site administrator.
    Admin,
    /// Discord "Manage Server" (or Administrator) in the given guild.
    ManageGuild(u64),
}

/// Resolves the logged in user and checks their permissions.
///
/// Site admins pass every permission check.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
    guild_permissions: &'a dyn GuildPermissionChecker,
}

impl<'a> AuthGuard<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        session: &'a Session,
        guild_permissions: &'a dyn GuildPermissionChecker,
    ) -> Self {
        Self {
            db,
            session,
            guild_permissions,
        }
    }

    /// Requires a logged in user holding every listed permission.
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated user
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::UserNotInDatabase)` - Session points at a deleted user
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = user_repo.find_by_discord_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if user.admin {
            return Ok(user);
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    return Err(AuthError::AccessDenied(
                        user_id,
                        "User attempted to access an admin-only route without admin permissions"
                            .to_string(),
                    )
                    .into());
                }
                Permission::ManageGuild(guild_id) => {
                    if !self
                        .guild_permissions
                        .can_manage_guild(user_id, *guild_id)
                        .await?
                    {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            format!("User lacks manage access to guild {}", guild_id),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }
}

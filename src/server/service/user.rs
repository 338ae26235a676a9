//! Guild access for dashboard users.

use serenity::http::Http;

use crate::{
    model::user::ManageableGuildDto,
    server::{error::AppError, middleware::permission::GuildPermissionChecker, model::user::User},
};

pub struct UserGuildService<'a> {
    http: &'a Http,
    permissions: &'a dyn GuildPermissionChecker,
}

impl<'a> UserGuildService<'a> {
    pub fn new(http: &'a Http, permissions: &'a dyn GuildPermissionChecker) -> Self {
        Self { http, permissions }
    }

    /// Lists the bot's guilds the user may configure.
    ///
    /// Site admins see every guild the bot is in.
    pub async fn get_manageable_guilds(&self, user: &User) -> Result<Vec<ManageableGuildDto>, AppError> {
        let guilds = self.http.get_guilds(None, None).await?;
        let mut manageable = Vec::new();

        for guild in guilds {
            if !user.admin
                && !self
                    .permissions
                    .can_manage_guild(user.discord_id, guild.id.get())
                    .await?
            {
                continue;
            }

            manageable.push(ManageableGuildDto {
                guild_id: guild.id.get(),
                icon_url: guild.icon_url(),
                name: guild.name,
            });
        }

        Ok(manageable)
    }
}

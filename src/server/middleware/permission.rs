//! Guild management permission checks against Discord.

use std::{collections::HashMap, sync::Arc};

use serenity::{
    all::{GuildId, Permissions, Role, RoleId, UserId},
    async_trait,
    http::Http,
};

use crate::server::{error::AppError, util::discord::is_not_found};

/// Decides whether a Discord user may manage a guild's dashboard.
#[async_trait]
pub trait GuildPermissionChecker: Send + Sync {
    async fn can_manage_guild(&self, user_id: u64, guild_id: u64) -> Result<bool, AppError>;
}

/// Checks permissions live through the bot's Discord HTTP client.
///
/// A guild the bot is not in, or a user who is not a member, yields `false`.
pub struct DiscordPermissionChecker {
    http: Arc<Http>,
}

impl DiscordPermissionChecker {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl GuildPermissionChecker for DiscordPermissionChecker {
    async fn can_manage_guild(&self, user_id: u64, guild_id: u64) -> Result<bool, AppError> {
        let guild = match self.http.get_guild(GuildId::new(guild_id)).await {
            Ok(guild) => guild,
            Err(e) if is_not_found(&e) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        if guild.owner_id.get() == user_id {
            return Ok(true);
        }

        let member = match self
            .http
            .get_member(guild.id, UserId::new(user_id))
            .await
        {
            Ok(member) => member,
            Err(e) if is_not_found(&e) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        Ok(member_can_manage(guild.id, &guild.roles, &member.roles))
    }
}

/// Combines `@everyone` with the member's roles and checks for manage rights.
pub fn member_can_manage(
    guild_id: GuildId,
    guild_roles: &HashMap<RoleId, Role>,
    member_roles: &[RoleId],
) -> bool {
    let everyone = RoleId::new(guild_id.get());

    let permissions = std::iter::once(&everyone)
        .chain(member_roles.iter())
        .filter_map(|role_id| guild_roles.get(role_id))
        .fold(Permissions::empty(), |acc, role| acc | role.permissions);

    permissions.intersects(Permissions::ADMINISTRATOR | Permissions::MANAGE_GUILD)
}

use std::collections::HashSet;

use serenity::async_trait;

use crate::server::{error::AppError, middleware::permission::GuildPermissionChecker};

mod auth;
mod permission;

/// Permission checker answering from a fixed set of (user, guild) pairs.
#[derive(Default)]
pub struct StaticPermissionChecker {
    allowed: HashSet<(u64, u64)>,
}

impl StaticPermissionChecker {
    pub fn allow(mut self, user_id: u64, guild_id: u64) -> Self {
        self.allowed.insert((user_id, guild_id));
        self
    }
}

#[async_trait]
impl GuildPermissionChecker for StaticPermissionChecker {
    async fn can_manage_guild(&self, user_id: u64, guild_id: u64) -> Result<bool, AppError> {
        Ok(self.allowed.contains(&(user_id, guild_id)))
    }
}

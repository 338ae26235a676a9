use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct UserDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub discord_id: u64,
    pub name: String,
    pub admin: bool,
}

/// A guild the bot is in that the current user may configure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct ManageableGuildDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub guild_id: u64,
    pub name: String,
    pub icon_url: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChannelDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub id: u64,
    pub name: String,
    pub position: u16,
    pub announcement: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbedDto {
    pub title: Option<String>,
    pub description: Option<String>,
    /// RGB color, e.g. `0x5865F2`.
    pub color: Option<u32>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendMessageDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub channel_id: u64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub embed: Option<EmbedDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EditMessageDto {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SentMessageDto {
    pub id: i32,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub channel_id: u64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub message_id: u64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub author_id: u64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

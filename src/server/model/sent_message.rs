use chrono::{DateTime, Utc};

use crate::{
    model::messaging::SentMessageDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// Audit record of a message sent from the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl SentMessage {
    pub fn from_entity(entity: entity::sent_message::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            message_id: parse_u64_from_string(entity.message_id)?,
            author_id: parse_u64_from_string(entity.author_id)?,
            content: entity.content,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> SentMessageDto {
        SentMessageDto {
            id: self.id,
            channel_id: self.channel_id,
            message_id: self.message_id,
            author_id: self.author_id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

/// Parameters for recording a sent message.
#[derive(Debug, Clone)]
pub struct RecordSentMessageParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
    pub content: String,
}

//! Sending and editing bot messages from the dashboard.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{
        ChannelId, ChannelType, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage,
        GuildChannel, GuildId, MessageId,
    },
    http::Http,
};

use crate::{
    model::messaging::{ChannelDto, EmbedDto, SendMessageDto, SentMessageDto},
    server::{
        data::sent_message::SentMessageRepository,
        error::AppError,
        model::sent_message::{RecordSentMessageParam, SentMessage},
        util::discord::is_not_found,
    },
};

/// Discord's message content limit, in characters.
pub const MAX_CONTENT_CHARS: usize = 2000;
pub const HISTORY_LIMIT: u64 = 50;

/// Text and announcement channels ordered by position, then ID.
pub fn sendable_channels(channels: &HashMap<ChannelId, GuildChannel>) -> Vec<ChannelDto> {
    let mut sendable: Vec<ChannelDto> = channels
        .values()
        .filter(|channel| matches!(channel.kind, ChannelType::Text | ChannelType::News))
        .map(|channel| ChannelDto {
            id: channel.id.get(),
            name: channel.name.clone(),
            position: channel.position,
            announcement: channel.kind == ChannelType::News,
        })
        .collect();

    sendable.sort_by_key(|channel| (channel.position, channel.id));
    sendable
}

/// Checks message content against Discord's limit.
pub fn validate_content(content: &str) -> Result<(), AppError> {
    let length = content.chars().count();
    if length > MAX_CONTENT_CHARS {
        return Err(AppError::BadRequest(format!(
            "Message content is {} characters, the limit is {}",
            length, MAX_CONTENT_CHARS
        )));
    }

    Ok(())
}

/// Checks that a send request carries content or an embed, within limits.
pub fn validate_send(payload: &SendMessageDto) -> Result<(), AppError> {
    let content = payload
        .content
        .as_deref()
        .map(str::trim)
        .filter(|content| !content.is_empty());

    if content.is_none() && payload.embed.is_none() {
        return Err(AppError::BadRequest(
            "A message needs content or an embed".to_string(),
        ));
    }
    if let Some(content) = content {
        validate_content(content)?;
    }

    Ok(())
}

fn build_embed(dto: &EmbedDto) -> CreateEmbed {
    let mut embed = CreateEmbed::new();

    if let Some(title) = &dto.title {
        embed = embed.title(title);
    }
    if let Some(description) = &dto.description {
        embed = embed.description(description);
    }
    if let Some(color) = dto.color {
        embed = embed.color(color);
    }
    if let Some(footer) = &dto.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    embed
}

pub struct MessagingService<'a> {
    db: &'a DatabaseConnection,
    http: &'a Http,
}

impl<'a> MessagingService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: &'a Http) -> Self {
        Self { db, http }
    }

    pub async fn get_channels(&self, guild_id: u64) -> Result<Vec<ChannelDto>, AppError> {
        let channels = GuildId::new(guild_id).channels(self.http).await?;

        Ok(sendable_channels(&channels))
    }

    /// Ensures a channel belongs to the guild.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Channel is unknown or in another guild
    async fn require_guild_channel(&self, guild_id: u64, channel_id: u64) -> Result<(), AppError> {
        let channels = GuildId::new(guild_id).channels(self.http).await?;

        if !channels.contains_key(&ChannelId::new(channel_id)) {
            return Err(AppError::NotFound(format!(
                "Channel {} not found in guild {}",
                channel_id, guild_id
            )));
        }

        Ok(())
    }

    /// Sends a message as the bot and records it.
    pub async fn send(
        &self,
        guild_id: u64,
        author_id: u64,
        payload: SendMessageDto,
    ) -> Result<SentMessageDto, AppError> {
        validate_send(&payload)?;
        self.require_guild_channel(guild_id, payload.channel_id)
            .await?;

        let content = payload.content.unwrap_or_default();
        let mut message = CreateMessage::new();
        if !content.trim().is_empty() {
            message = message.content(&content);
        }
        if let Some(embed) = &payload.embed {
            message = message.embed(build_embed(embed));
        }

        let sent = ChannelId::new(payload.channel_id)
            .send_message(self.http, message)
            .await?;

        tracing::info!(
            "User {} sent message {} to channel {} in guild {}",
            author_id,
            sent.id,
            payload.channel_id,
            guild_id
        );

        let record = SentMessageRepository::new(self.db)
            .create(RecordSentMessageParam {
                guild_id,
                channel_id: payload.channel_id,
                message_id: sent.id.get(),
                author_id,
                content,
            })
            .await?;

        Ok(record.into_dto())
    }

    /// Replaces the content of a bot message.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Channel not in the guild, or Discord does not know
    ///   the message
    pub async fn edit(
        &self,
        guild_id: u64,
        channel_id: u64,
        message_id: u64,
        content: String,
    ) -> Result<(), AppError> {
        if content.trim().is_empty() {
            return Err(AppError::BadRequest("Message content is empty".to_string()));
        }
        validate_content(&content)?;
        self.require_guild_channel(guild_id, channel_id).await?;

        let edit = EditMessage::new().content(&content);
        match ChannelId::new(channel_id)
            .edit_message(self.http, MessageId::new(message_id), edit)
            .await
        {
            Ok(_) => {}
            Err(e) if is_not_found(&e) => {
                return Err(AppError::NotFound(format!(
                    "Message {} not found in channel {}",
                    message_id, channel_id
                )));
            }
            Err(e) => return Err(e.into()),
        }

        SentMessageRepository::new(self.db)
            .update_content(guild_id, message_id, content)
            .await
    }

    /// Latest messages sent from the dashboard, newest first.
    pub async fn history(&self, guild_id: u64) -> Result<Vec<SentMessage>, AppError> {
        SentMessageRepository::new(self.db)
            .get_latest_by_guild(guild_id, HISTORY_LIMIT)
            .await
    }
}

#[cfg(test)]
mod tests {
    use test_utils::serenity::channel::{create_test_channel, ANNOUNCEMENT, CATEGORY, TEXT, VOICE};

    use super::*;

    fn send(content: Option<&str>, embed: Option<EmbedDto>) -> SendMessageDto {
        SendMessageDto {
            channel_id: 10,
            content: content.map(str::to_string),
            embed,
        }
    }

    #[test]
    fn lists_text_and_announcement_channels_in_order() {
        let channels: HashMap<ChannelId, GuildChannel> = [
            create_test_channel(13, 1, "news", ANNOUNCEMENT, 1),
            create_test_channel(12, 1, "general", TEXT, 0),
            create_test_channel(14, 1, "Lounge", VOICE, 0),
            create_test_channel(15, 1, "Info", CATEGORY, 0),
        ]
        .into_iter()
        .map(|channel| (channel.id, channel))
        .collect();

        let sendable = sendable_channels(&channels);

        let names: Vec<&str> = sendable.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["general", "news"]);
        assert!(sendable[1].announcement);
    }

    #[test]
    fn requires_content_or_embed() {
        assert!(validate_send(&send(None, None)).is_err());
        assert!(validate_send(&send(Some("   "), None)).is_err());
        assert!(validate_send(&send(Some("hi"), None)).is_ok());

        let embed = EmbedDto {
            title: Some("Title".to_string()),
            description: None,
            color: None,
            footer: None,
        };
        assert!(validate_send(&send(None, Some(embed))).is_ok());
    }

    #[test]
    fn enforces_content_limit_in_characters() {
        let at_limit = "é".repeat(MAX_CONTENT_CHARS);
        let over_limit = "a".repeat(MAX_CONTENT_CHARS + 1);

        assert!(validate_content(&at_limit).is_ok());
        assert!(matches!(
            validate_content(&over_limit),
            Err(AppError::BadRequest(_))
        ));
    }
}

//! Creation of Discord scheduled events.

use std::sync::Arc;

use serenity::{
    all::{CreateScheduledEvent, GuildId, ScheduledEventType},
    async_trait,
    http::Http,
};

use crate::server::{
    error::AppError, plugin::events::sheet::SheetEvent, util::discord::to_discord_timestamp,
};

/// Publishes spreadsheet events to a guild.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Creates the event, returning its Discord ID.
    async fn publish(&self, guild_id: u64, event: &SheetEvent) -> Result<u64, AppError>;
}

/// Creates external scheduled events through the Discord API.
pub struct DiscordEventPublisher {
    http: Arc<Http>,
}

impl DiscordEventPublisher {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl EventPublisher for DiscordEventPublisher {
    async fn publish(&self, guild_id: u64, event: &SheetEvent) -> Result<u64, AppError> {
        let mut builder = CreateScheduledEvent::new(
            ScheduledEventType::External,
            &event.title,
            to_discord_timestamp(event.start)?,
        )
        .end_time(to_discord_timestamp(event.end)?)
        .location(&event.location);

        if let Some(description) = &event.description {
            builder = builder.description(description);
        }

        let created = GuildId::new(guild_id)
            .create_scheduled_event(&self.http, builder)
            .await?;

        Ok(created.id.get())
    }
}

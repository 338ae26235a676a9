//! Records of spreadsheet rows already turned into Discord scheduled events.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::server::error::AppError;

pub struct SyncedEventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SyncedEventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the source keys already synced for a guild.
    pub async fn get_keys_by_guild(&self, guild_id: u64) -> Result<HashSet<String>, AppError> {
        let entities = entity::prelude::SyncedEvent::find()
            .filter(entity::synced_event::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|model| model.source_key).collect())
    }

    pub async fn create(
        &self,
        guild_id: u64,
        source_key: String,
        discord_event_id: u64,
    ) -> Result<(), AppError> {
        entity::synced_event::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            source_key: ActiveValue::Set(source_key),
            discord_event_id: ActiveValue::Set(discord_event_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }
}

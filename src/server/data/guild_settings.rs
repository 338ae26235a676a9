//! Raw per-guild plugin settings storage.
//!
//! Settings are stored as JSON text keyed by `(guild_id, plugin)` and overwritten
//! wholesale on save. Decoding into typed settings happens in the settings service.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

pub struct GuildSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the stored settings JSON for a plugin in a guild.
    pub async fn get(&self, guild_id: u64, plugin: &str) -> Result<Option<String>, AppError> {
        let entity =
            entity::prelude::GuildSettings::find_by_id((guild_id.to_string(), plugin.to_string()))
                .one(self.db)
                .await?;

        Ok(entity.map(|model| model.settings))
    }

    /// Replaces the stored settings JSON for a plugin in a guild.
    pub async fn save(&self, guild_id: u64, plugin: &str, settings: String) -> Result<(), AppError> {
        entity::prelude::GuildSettings::insert(entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            plugin: ActiveValue::Set(plugin.to_string()),
            settings: ActiveValue::Set(settings),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                entity::guild_settings::Column::GuildId,
                entity::guild_settings::Column::Plugin,
            ])
            .update_columns([
                entity::guild_settings::Column::Settings,
                entity::guild_settings::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// Gets every guild that has stored settings for the plugin.
    ///
    /// # Returns
    /// - `Ok(Vec<(guild_id, settings_json)>)` - Stored settings per guild
    pub async fn get_all_for_plugin(&self, plugin: &str) -> Result<Vec<(u64, String)>, AppError> {
        let entities = entity::prelude::GuildSettings::find()
            .filter(entity::guild_settings::Column::Plugin.eq(plugin))
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|model| Ok((parse_u64_from_string(model.guild_id)?, model.settings)))
            .collect()
    }
}

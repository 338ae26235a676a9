//! Typed per-guild plugin settings.

use sea_orm::DatabaseConnection;
use serde::{de::DeserializeOwned, Serialize};

use crate::server::{data::guild_settings::GuildSettingsRepository, error::AppError};

/// Settings document owned by one plugin.
pub trait PluginSettings: Serialize + DeserializeOwned + Default + Send {
    /// Key the settings are stored under.
    const PLUGIN: &'static str;

    /// Rejects values the plugin cannot work with.
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct SettingsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads a guild's settings.
    ///
    /// Missing settings yield the defaults; so does an unreadable document, which is
    /// logged at warn.
    pub async fn load<S: PluginSettings>(&self, guild_id: u64) -> Result<S, AppError> {
        let Some(raw) = GuildSettingsRepository::new(self.db)
            .get(guild_id, S::PLUGIN)
            .await?
        else {
            return Ok(S::default());
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(
                    "Unreadable {} settings for guild {}, using defaults: {}",
                    S::PLUGIN,
                    guild_id,
                    e
                );
                Ok(S::default())
            }
        }
    }

    /// Validates and replaces a guild's settings.
    pub async fn save<S: PluginSettings>(&self, guild_id: u64, settings: &S) -> Result<(), AppError> {
        settings.validate()?;

        GuildSettingsRepository::new(self.db)
            .save(guild_id, S::PLUGIN, serde_json::to_string(settings)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leveling::LevelingSettings;
    use test_utils::{builder::TestBuilder, factory};

    #[tokio::test]
    async fn missing_settings_use_defaults() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildSettings)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let settings: LevelingSettings = SettingsService::new(db).load(1).await?;

        assert_eq!(settings, LevelingSettings::default());

        Ok(())
    }

    #[tokio::test]
    async fn unreadable_settings_use_defaults() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildSettings)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_guild_settings(db, "1", "leveling", "{not json").await?;

        let settings: LevelingSettings = SettingsService::new(db).load(1).await?;

        assert_eq!(settings, LevelingSettings::default());

        Ok(())
    }

    #[tokio::test]
    async fn partial_settings_fill_in_defaults() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildSettings)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_guild_settings(db, "1", "leveling", r#"{"xp_multiplier":2.0}"#).await?;

        let settings: LevelingSettings = SettingsService::new(db).load(1).await?;

        assert_eq!(settings.xp_multiplier, 2.0);
        assert!(settings.message_xp);

        Ok(())
    }

    #[tokio::test]
    async fn saved_settings_load_back() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildSettings)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = SettingsService::new(db);

        let settings = LevelingSettings {
            voice_xp: false,
            ignored_channel_ids: vec![55],
            ..Default::default()
        };
        service.save(1, &settings).await?;

        let loaded: LevelingSettings = service.load(1).await?;
        assert_eq!(loaded, settings);

        let other_guild: LevelingSettings = service.load(2).await?;
        assert_eq!(other_guild, LevelingSettings::default());

        Ok(())
    }
}

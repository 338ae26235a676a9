//! Guild settings factory for storing raw plugin settings.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Stores `settings` verbatim for the plugin in the guild.
///
/// Takes raw text so tests can also store malformed JSON.
pub async fn create_guild_settings(
    db: &DatabaseConnection,
    guild_id: &str,
    plugin: &str,
    settings: &str,
) -> Result<entity::guild_settings::Model, DbErr> {
    entity::guild_settings::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        plugin: ActiveValue::Set(plugin.to_string()),
        settings: ActiveValue::Set(settings.to_string()),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

//! Member tag factory for creating genre/DAW tag records.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a member tag row with the given genre and DAW lists.
///
/// Lists are stored verbatim; the application normalizes on its own write path.
pub async fn create_member_tag(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    genres: &[&str],
    daws: &[&str],
) -> Result<entity::member_tag::Model, DbErr> {
    entity::member_tag::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        genres: ActiveValue::Set(serde_json::json!(genres).to_string()),
        daws: ActiveValue::Set(serde_json::json!(daws).to_string()),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

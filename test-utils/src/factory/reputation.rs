//! Reputation factory for creating reputation records.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a reputation row for a member in the given category.
pub async fn create_reputation(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    category: &str,
    amount: i64,
) -> Result<entity::reputation::Model, DbErr> {
    entity::reputation::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        category: ActiveValue::Set(category.to_string()),
        amount: ActiveValue::Set(amount),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

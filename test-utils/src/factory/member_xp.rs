//! Member XP factory for creating leveling records.

use crate::factory::helpers::{level_for_xp, next_id};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating member XP rows.
///
/// The level column is always derived from the configured xp.
///
/// # Example
///
/// ```rust,ignore
/// let record = MemberXpFactory::new(&db, "100")
///     .user_id("42")
///     .xp(400)
///     .voice_minutes(12)
///     .build()
///     .await?;
/// assert_eq!(record.level, 2);
/// ```
pub struct MemberXpFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    xp: i64,
    voice_minutes: i64,
    reactions_given: i64,
    reactions_received: i64,
}

impl<'a> MemberXpFactory<'a> {
    /// Creates a factory for a fresh member of `guild_id` with zeroed stats.
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>) -> Self {
        Self {
            db,
            guild_id: guild_id.into(),
            user_id: next_id().to_string(),
            xp: 0,
            voice_minutes: 0,
            reactions_given: 0,
            reactions_received: 0,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn xp(mut self, xp: i64) -> Self {
        self.xp = xp;
        self
    }

    pub fn voice_minutes(mut self, minutes: i64) -> Self {
        self.voice_minutes = minutes;
        self
    }

    pub fn reactions(mut self, given: i64, received: i64) -> Self {
        self.reactions_given = given;
        self.reactions_received = received;
        self
    }

    /// Builds and inserts the member XP entity into the database.
    pub async fn build(self) -> Result<entity::member_xp::Model, DbErr> {
        entity::member_xp::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            xp: ActiveValue::Set(self.xp),
            level: ActiveValue::Set(level_for_xp(self.xp)),
            voice_minutes: ActiveValue::Set(self.voice_minutes),
            reactions_given: ActiveValue::Set(self.reactions_given),
            reactions_received: ActiveValue::Set(self.reactions_received),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a member XP row with the provided xp total.
pub async fn create_member_xp(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    xp: i64,
) -> Result<entity::member_xp::Model, DbErr> {
    MemberXpFactory::new(db, guild_id)
        .user_id(user_id)
        .xp(xp)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn derives_level_from_xp() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(MemberXp).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let record = create_member_xp(db, "1", "2", 10_000).await?;

        assert_eq!(record.level, 10);

        Ok(())
    }
}

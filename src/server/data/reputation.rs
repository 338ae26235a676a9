use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{error::AppError, model::reputation::Reputation};

pub struct ReputationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReputationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        guild_id: u64,
        user_id: u64,
        category: &str,
    ) -> Result<Option<Reputation>, AppError> {
        let entity = entity::prelude::Reputation::find_by_id((
            guild_id.to_string(),
            user_id.to_string(),
            category.to_string(),
        ))
        .one(self.db)
        .await?;

        entity.map(Reputation::from_entity).transpose()
    }

    /// Adds to a member's reputation in a category, creating the row on first write.
    ///
    /// The stored amount saturates at the `i64` bounds.
    pub async fn add(
        &self,
        guild_id: u64,
        user_id: u64,
        category: &str,
        amount: i64,
    ) -> Result<Reputation, AppError> {
        let current = self
            .find(guild_id, user_id, category)
            .await?
            .map(|reputation| reputation.amount)
            .unwrap_or(0);

        self.save(Reputation {
            guild_id,
            user_id,
            category: category.to_string(),
            amount: current.saturating_add(amount),
        })
        .await
    }

    /// Gets a guild's standings in one category, highest first.
    pub async fn get_by_category(
        &self,
        guild_id: u64,
        category: &str,
    ) -> Result<Vec<Reputation>, AppError> {
        let entities = entity::prelude::Reputation::find()
            .filter(entity::reputation::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::reputation::Column::Category.eq(category))
            .order_by_desc(entity::reputation::Column::Amount)
            .order_by_asc(entity::reputation::Column::UserId)
            .all(self.db)
            .await?;

        entities.into_iter().map(Reputation::from_entity).collect()
    }

    /// Replaces a guild's rows in one category with the given set.
    pub async fn replace_category(
        &self,
        guild_id: u64,
        category: &str,
        rows: Vec<Reputation>,
    ) -> Result<(), AppError> {
        entity::prelude::Reputation::delete_many()
            .filter(entity::reputation::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::reputation::Column::Category.eq(category))
            .exec(self.db)
            .await?;

        for row in rows {
            self.save(Reputation {
                guild_id,
                category: category.to_string(),
                ..row
            })
            .await?;
        }

        Ok(())
    }

    async fn save(&self, reputation: Reputation) -> Result<Reputation, AppError> {
        let entity = entity::prelude::Reputation::insert(entity::reputation::ActiveModel {
            guild_id: ActiveValue::Set(reputation.guild_id.to_string()),
            user_id: ActiveValue::Set(reputation.user_id.to_string()),
            category: ActiveValue::Set(reputation.category),
            amount: ActiveValue::Set(reputation.amount),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                entity::reputation::Column::GuildId,
                entity::reputation::Column::UserId,
                entity::reputation::Column::Category,
            ])
            .update_columns([
                entity::reputation::Column::Amount,
                entity::reputation::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Reputation::from_entity(entity)
    }
}

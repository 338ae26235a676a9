use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::server::{error::AppError, model::member_tag::MemberTags};

pub struct MemberTagRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberTagRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, guild_id: u64, user_id: u64) -> Result<Option<MemberTags>, AppError> {
        let entity =
            entity::prelude::MemberTag::find_by_id((guild_id.to_string(), user_id.to_string()))
                .one(self.db)
                .await?;

        entity.map(MemberTags::from_entity).transpose()
    }

    /// Gets every tagged member in a guild ordered by user ID.
    pub async fn get_all_by_guild(&self, guild_id: u64) -> Result<Vec<MemberTags>, AppError> {
        let entities = entity::prelude::MemberTag::find()
            .filter(entity::member_tag::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::member_tag::Column::UserId)
            .all(self.db)
            .await?;

        entities.into_iter().map(MemberTags::from_entity).collect()
    }

    /// Stores a member's already-normalized tag lists.
    pub async fn save(&self, tags: MemberTags) -> Result<MemberTags, AppError> {
        let entity = entity::prelude::MemberTag::insert(entity::member_tag::ActiveModel {
            guild_id: ActiveValue::Set(tags.guild_id.to_string()),
            user_id: ActiveValue::Set(tags.user_id.to_string()),
            genres: ActiveValue::Set(serde_json::to_string(&tags.genres)?),
            daws: ActiveValue::Set(serde_json::to_string(&tags.daws)?),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                entity::member_tag::Column::GuildId,
                entity::member_tag::Column::UserId,
            ])
            .update_columns([
                entity::member_tag::Column::Genres,
                entity::member_tag::Column::Daws,
                entity::member_tag::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        MemberTags::from_entity(entity)
    }

    pub async fn delete(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        let result =
            entity::prelude::MemberTag::delete_by_id((guild_id.to_string(), user_id.to_string()))
                .exec(self.db)
                .await?;

        Ok(result.rows_affected > 0)
    }
}

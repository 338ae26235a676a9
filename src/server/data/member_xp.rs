//! Leveling record storage.
//!
//! `apply_grant` is a read-modify-write. Callers run it inside a transaction so a
//! second writer that read the same row fails with `SQLITE_BUSY` instead of
//! overwriting the first grant. SQLite does not queue the second writer; its grant
//! is dropped with an error.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DeleteResult, EntityTrait, QueryFilter,
};

use crate::server::{
    error::AppError,
    model::member_xp::{MemberXp, XpChange, XpGrant},
    plugin::leveling::formula::{level_for_xp, MAX_XP},
};

pub struct MemberXpRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MemberXpRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find(&self, guild_id: u64, user_id: u64) -> Result<Option<MemberXp>, AppError> {
        let entity =
            entity::prelude::MemberXp::find_by_id((guild_id.to_string(), user_id.to_string()))
                .one(self.db)
                .await?;

        entity.map(MemberXp::from_entity).transpose()
    }

    /// Gets every leveling record in a guild, unordered.
    pub async fn get_all_by_guild(&self, guild_id: u64) -> Result<Vec<MemberXp>, AppError> {
        let entities = entity::prelude::MemberXp::find()
            .filter(entity::member_xp::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?;

        entities.into_iter().map(MemberXp::from_entity).collect()
    }

    /// Adds a grant to a member's record, creating it on first write.
    ///
    /// XP stays within `0..=MAX_XP`, counters saturate, and the level is recomputed
    /// from the new total.
    ///
    /// # Returns
    /// - `Ok(XpChange)` - Stored record plus the level held before the grant
    pub async fn apply_grant(
        &self,
        guild_id: u64,
        user_id: u64,
        grant: XpGrant,
    ) -> Result<XpChange, AppError> {
        let current = self
            .find(guild_id, user_id)
            .await?
            .unwrap_or_else(|| MemberXp::empty(guild_id, user_id));
        let previous_level = current.level;

        let xp = current.xp.saturating_add(grant.xp).clamp(0, MAX_XP);
        let member = self
            .save(MemberXp {
                xp,
                level: level_for_xp(xp),
                voice_minutes: current.voice_minutes.saturating_add(grant.voice_minutes),
                reactions_given: current.reactions_given.saturating_add(grant.reactions_given),
                reactions_received: current
                    .reactions_received
                    .saturating_add(grant.reactions_received),
                updated_at: Utc::now(),
                ..current
            })
            .await?;

        Ok(XpChange {
            member,
            previous_level,
        })
    }

    /// Overwrites a member's XP total, keeping their activity counters.
    pub async fn set_xp(&self, guild_id: u64, user_id: u64, xp: i64) -> Result<MemberXp, AppError> {
        let current = self
            .find(guild_id, user_id)
            .await?
            .unwrap_or_else(|| MemberXp::empty(guild_id, user_id));

        self.save(MemberXp {
            xp,
            level: level_for_xp(xp),
            updated_at: Utc::now(),
            ..current
        })
        .await
    }

    /// Deletes a member's record.
    ///
    /// # Returns
    /// - `Ok(true)` - A record was deleted
    /// - `Ok(false)` - The member had no record
    pub async fn delete(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        let result: DeleteResult =
            entity::prelude::MemberXp::delete_by_id((guild_id.to_string(), user_id.to_string()))
                .exec(self.db)
                .await?;

        Ok(result.rows_affected > 0)
    }

    /// Replaces all of a guild's records with the given set.
    pub async fn replace_guild(&self, guild_id: u64, members: Vec<MemberXp>) -> Result<(), AppError> {
        entity::prelude::MemberXp::delete_many()
            .filter(entity::member_xp::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        for member in members {
            self.save(MemberXp { guild_id, ..member }).await?;
        }

        Ok(())
    }

    async fn save(&self, member: MemberXp) -> Result<MemberXp, AppError> {
        let entity = entity::prelude::MemberXp::insert(entity::member_xp::ActiveModel {
            guild_id: ActiveValue::Set(member.guild_id.to_string()),
            user_id: ActiveValue::Set(member.user_id.to_string()),
            xp: ActiveValue::Set(member.xp),
            level: ActiveValue::Set(member.level),
            voice_minutes: ActiveValue::Set(member.voice_minutes),
            reactions_given: ActiveValue::Set(member.reactions_given),
            reactions_received: ActiveValue::Set(member.reactions_received),
            updated_at: ActiveValue::Set(member.updated_at),
        })
        .on_conflict(
            OnConflict::columns([
                entity::member_xp::Column::GuildId,
                entity::member_xp::Column::UserId,
            ])
            .update_columns([
                entity::member_xp::Column::Xp,
                entity::member_xp::Column::Level,
                entity::member_xp::Column::VoiceMinutes,
                entity::member_xp::Column::ReactionsGiven,
                entity::member_xp::Column::ReactionsReceived,
                entity::member_xp::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        MemberXp::from_entity(entity)
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::migration::{MigrationBackup, MigrationSystem},
};

pub struct MigrationBackupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MigrationBackupRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        guild_id: u64,
        system: MigrationSystem,
        snapshot: String,
        entry_count: i32,
    ) -> Result<MigrationBackup, AppError> {
        let entity = entity::migration_backup::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            system: ActiveValue::Set(system.as_str().to_string()),
            snapshot: ActiveValue::Set(snapshot),
            entry_count: ActiveValue::Set(entry_count),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        MigrationBackup::from_entity(entity)
    }

    /// Finds a backup belonging to the guild.
    pub async fn find(&self, guild_id: u64, backup_id: i32) -> Result<Option<MigrationBackup>, AppError> {
        let entity = entity::prelude::MigrationBackup::find_by_id(backup_id)
            .filter(entity::migration_backup::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(MigrationBackup::from_entity).transpose()
    }

    /// Gets a guild's backups, newest first.
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<MigrationBackup>, AppError> {
        let entities = entity::prelude::MigrationBackup::find()
            .filter(entity::migration_backup::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::migration_backup::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(MigrationBackup::from_entity).collect()
    }
}

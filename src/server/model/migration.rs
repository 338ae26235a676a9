//! Migration backups and the systems they cover.

use chrono::{DateTime, Utc};

use crate::{
    model::migration::MigrationBackupDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// External system whose data is imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationSystem {
    Leveling,
    Reputation,
}

impl MigrationSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationSystem::Leveling => "leveling",
            MigrationSystem::Reputation => "reputation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "leveling" => Some(MigrationSystem::Leveling),
            "reputation" => Some(MigrationSystem::Reputation),
            _ => None,
        }
    }
}

/// Pre-image of a guild's rows for one system, captured before a migration merges.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationBackup {
    pub id: i32,
    pub guild_id: u64,
    pub system: MigrationSystem,
    /// JSON array of the rows as they were.
    pub snapshot: String,
    pub entry_count: i32,
    pub created_at: DateTime<Utc>,
}

impl MigrationBackup {
    pub fn from_entity(entity: entity::migration_backup::Model) -> Result<Self, AppError> {
        let system = MigrationSystem::parse(&entity.system).ok_or_else(|| {
            AppError::InternalError(format!(
                "Backup {} has unknown system '{}'",
                entity.id, entity.system
            ))
        })?;

        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            system,
            snapshot: entity.snapshot,
            entry_count: entity.entry_count,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> MigrationBackupDto {
        MigrationBackupDto {
            id: self.id,
            system: self.system.as_str().to_string(),
            entry_count: self.entry_count,
            created_at: self.created_at,
        }
    }
}

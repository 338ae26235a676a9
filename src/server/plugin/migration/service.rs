//! Imports from external leveling and reputation bots.
//!
//! Imports merge additively into existing rows and are not idempotent: submitting the
//! same export twice counts it twice. Every import first snapshots the guild's rows for
//! that system into a backup in the same transaction, so a bad import can be undone
//! with [`MigrationService::restore`].

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::{
    model::migration::{
        LegacyLevelEntryDto, LegacyReputationEntryDto, MigrationReportDto, RestoreReportDto,
    },
    server::{
        data::{
            member_xp::MemberXpRepository, migration_backup::MigrationBackupRepository,
            reputation::ReputationRepository,
        },
        error::AppError,
        model::{
            member_xp::{MemberXp, XpGrant},
            migration::{MigrationBackup, MigrationSystem},
            reputation::{Reputation, LEGACY_CATEGORY},
        },
        plugin::{
            leveling::formula::level_for_xp,
            migration::convert::{
                converted_reputation, converted_xp, validate_level_entries,
                validate_reputation_entries,
            },
        },
        util::parse::parse_stored_json,
    },
};

#[derive(Debug, Serialize, Deserialize)]
struct MemberXpRow {
    user_id: u64,
    xp: i64,
    voice_minutes: i64,
    reactions_given: i64,
    reactions_received: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ReputationRow {
    user_id: u64,
    amount: i64,
}

fn entry_count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

pub struct MigrationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MigrationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds converted XP from an external leveling export.
    ///
    /// # Returns
    /// - `Ok(MigrationReportDto)` - Backup id and the XP added
    /// - `Err(AppError::BadRequest)` - An entry has a negative or out of range value;
    ///   nothing is written
    pub async fn migrate_leveling(
        &self,
        guild_id: u64,
        entries: Vec<LegacyLevelEntryDto>,
    ) -> Result<MigrationReportDto, AppError> {
        validate_level_entries(&entries)?;

        let txn = self.db.begin().await?;
        let xp_repo = MemberXpRepository::new(&txn);

        let rows: Vec<MemberXpRow> = xp_repo
            .get_all_by_guild(guild_id)
            .await?
            .into_iter()
            .map(|member| MemberXpRow {
                user_id: member.user_id,
                xp: member.xp,
                voice_minutes: member.voice_minutes,
                reactions_given: member.reactions_given,
                reactions_received: member.reactions_received,
            })
            .collect();
        let backup = MigrationBackupRepository::new(&txn)
            .create(
                guild_id,
                MigrationSystem::Leveling,
                serde_json::to_string(&rows)?,
                entry_count(rows.len()),
            )
            .await?;

        let mut total_added: i64 = 0;
        for entry in &entries {
            let xp = converted_xp(entry);
            xp_repo
                .apply_grant(guild_id, entry.user_id, XpGrant::xp(xp))
                .await?;
            total_added = total_added.saturating_add(xp);
        }

        txn.commit().await?;

        tracing::info!(
            "Migrated {} leveling entries into guild {} ({} XP, backup {})",
            entries.len(),
            guild_id,
            total_added,
            backup.id
        );

        Ok(MigrationReportDto {
            backup_id: backup.id,
            system: MigrationSystem::Leveling.as_str().to_string(),
            migrated: entries.len(),
            total_added,
        })
    }

    /// Adds legacy reputation from an external reputation export.
    pub async fn migrate_reputation(
        &self,
        guild_id: u64,
        entries: Vec<LegacyReputationEntryDto>,
    ) -> Result<MigrationReportDto, AppError> {
        validate_reputation_entries(&entries)?;

        let txn = self.db.begin().await?;
        let reputation_repo = ReputationRepository::new(&txn);

        let rows: Vec<ReputationRow> = reputation_repo
            .get_by_category(guild_id, LEGACY_CATEGORY)
            .await?
            .into_iter()
            .map(|reputation| ReputationRow {
                user_id: reputation.user_id,
                amount: reputation.amount,
            })
            .collect();
        let backup = MigrationBackupRepository::new(&txn)
            .create(
                guild_id,
                MigrationSystem::Reputation,
                serde_json::to_string(&rows)?,
                entry_count(rows.len()),
            )
            .await?;

        let mut total_added: i64 = 0;
        for entry in &entries {
            let amount = converted_reputation(entry);
            reputation_repo
                .add(guild_id, entry.user_id, LEGACY_CATEGORY, amount)
                .await?;
            total_added = total_added.saturating_add(amount);
        }

        txn.commit().await?;

        tracing::info!(
            "Migrated {} reputation entries into guild {} ({} total, backup {})",
            entries.len(),
            guild_id,
            total_added,
            backup.id
        );

        Ok(MigrationReportDto {
            backup_id: backup.id,
            system: MigrationSystem::Reputation.as_str().to_string(),
            migrated: entries.len(),
            total_added,
        })
    }

    pub async fn get_backups(&self, guild_id: u64) -> Result<Vec<MigrationBackup>, AppError> {
        MigrationBackupRepository::new(self.db)
            .get_by_guild(guild_id)
            .await
    }

    /// Replaces the guild's rows for the backup's system with the snapshot.
    ///
    /// Rows created after the backup are removed.
    pub async fn restore(&self, guild_id: u64, backup_id: i32) -> Result<RestoreReportDto, AppError> {
        let txn = self.db.begin().await?;

        let Some(backup) = MigrationBackupRepository::new(&txn)
            .find(guild_id, backup_id)
            .await?
        else {
            return Err(AppError::NotFound(format!(
                "Backup {} not found in guild {}",
                backup_id, guild_id
            )));
        };

        let restored = match backup.system {
            MigrationSystem::Leveling => {
                let rows: Vec<MemberXpRow> =
                    parse_stored_json("leveling backup", &backup.snapshot)?;
                let count = rows.len();
                let members = rows
                    .into_iter()
                    .map(|row| MemberXp {
                        guild_id,
                        user_id: row.user_id,
                        xp: row.xp,
                        level: level_for_xp(row.xp),
                        voice_minutes: row.voice_minutes,
                        reactions_given: row.reactions_given,
                        reactions_received: row.reactions_received,
                        updated_at: Utc::now(),
                    })
                    .collect();

                MemberXpRepository::new(&txn)
                    .replace_guild(guild_id, members)
                    .await?;
                count
            }
            MigrationSystem::Reputation => {
                let rows: Vec<ReputationRow> =
                    parse_stored_json("reputation backup", &backup.snapshot)?;
                let count = rows.len();
                let standings = rows
                    .into_iter()
                    .map(|row| Reputation {
                        guild_id,
                        user_id: row.user_id,
                        category: LEGACY_CATEGORY.to_string(),
                        amount: row.amount,
                    })
                    .collect();

                ReputationRepository::new(&txn)
                    .replace_category(guild_id, LEGACY_CATEGORY, standings)
                    .await?;
                count
            }
        };

        txn.commit().await?;

        tracing::info!(
            "Restored {} backup {} in guild {} ({} rows)",
            backup.system.as_str(),
            backup_id,
            guild_id,
            restored
        );

        Ok(RestoreReportDto {
            backup_id,
            system: backup.system.as_str().to_string(),
            restored,
        })
    }

    /// Legacy reputation standings, highest first.
    pub async fn get_legacy_reputation(&self, guild_id: u64) -> Result<Vec<Reputation>, AppError> {
        ReputationRepository::new(self.db)
            .get_by_category(guild_id, LEGACY_CATEGORY)
            .await
    }
}

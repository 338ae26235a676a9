use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One member's standing in the external leveling system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LegacyLevelEntryDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub level: i64,
    pub xp: i64,
}

/// One member's standing in the external reputation system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LegacyReputationEntryDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub reputation: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MigrateLevelingDto {
    pub entries: Vec<LegacyLevelEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MigrateReputationDto {
    pub entries: Vec<LegacyReputationEntryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MigrationReportDto {
    pub backup_id: i32,
    pub system: String,
    pub migrated: usize,
    pub total_added: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MigrationBackupDto {
    pub id: i32,
    pub system: String,
    pub entry_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestoreReportDto {
    pub backup_id: i32,
    pub system: String,
    pub restored: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReputationStandingDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub amount: i64,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-guild spreadsheet sync configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EventSyncSettings {
    /// Published CSV export URL of the spreadsheet; must be https.
    pub sheet_url: Option<String>,
    /// Used when a row has no location column value.
    pub default_location: String,
    /// Used when a row has no end time.
    pub default_duration_minutes: i64,
    /// Sync hourly without an admin pressing the button.
    pub auto_sync: bool,
}

impl Default for EventSyncSettings {
    fn default() -> Self {
        Self {
            sheet_url: None,
            default_location: "See event description".to_string(),
            default_duration_minutes: 60,
            auto_sync: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SheetEventDto {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RowErrorDto {
    /// 1-based spreadsheet row, counting the header.
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SheetPreviewDto {
    pub events: Vec<SheetEventDto>,
    pub errors: Vec<RowErrorDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SyncFailureDto {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SyncReportDto {
    pub created: usize,
    pub skipped: usize,
    pub failed: Vec<SyncFailureDto>,
    pub errors: Vec<RowErrorDto>,
}

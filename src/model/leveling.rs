use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-guild leveling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LevelingSettings {
    pub enabled: bool,
    pub message_xp: bool,
    pub voice_xp: bool,
    pub reaction_xp: bool,
    /// Applied to every grant, then rounded.
    pub xp_multiplier: f64,
    #[serde(with = "crate::model::snowflake::vec")]
    #[schema(value_type = Vec<String>)]
    pub ignored_channel_ids: Vec<u64>,
    pub announce_level_up: bool,
    /// Falls back to the channel the XP was earned in when unset.
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub announce_channel_id: Option<u64>,
    /// Supports `{user}` and `{level}` placeholders.
    pub level_up_message: String,
}

impl Default for LevelingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            message_xp: true,
            voice_xp: true,
            reaction_xp: true,
            xp_multiplier: 1.0,
            ignored_channel_ids: Vec::new(),
            announce_level_up: true,
            announce_channel_id: None,
            level_up_message: "GG {user}, you reached level {level}!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMetric {
    #[default]
    Xp,
    Voice,
    Reactions,
}

impl LeaderboardMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardMetric::Xp => "xp",
            LeaderboardMetric::Voice => "voice",
            LeaderboardMetric::Reactions => "reactions",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "xp" => Some(LeaderboardMetric::Xp),
            "voice" => Some(LeaderboardMetric::Voice),
            "reactions" => Some(LeaderboardMetric::Reactions),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LevelProgressDto {
    /// XP earned since reaching the current level.
    pub current: i64,
    /// XP between the current level and the next one.
    pub required: i64,
    /// Total XP at which the next level is reached.
    pub next_level_xp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberXpDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub xp: i64,
    pub level: i32,
    pub voice_minutes: i64,
    pub reactions_given: i64,
    pub reactions_received: i64,
    pub progress: LevelProgressDto,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryDto {
    pub rank: usize,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub value: i64,
    pub level: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardDto {
    pub metric: LeaderboardMetric,
    pub entries: Vec<LeaderboardEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetXpDto {
    pub xp: i64,
}

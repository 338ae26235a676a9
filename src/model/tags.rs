use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-guild genre discovery configuration.
///
/// Empty allow-lists accept any value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TagSettings {
    pub genres: Vec<String>,
    pub daws: Vec<String>,
    pub max_per_member: usize,
}

impl Default for TagSettings {
    fn default() -> Self {
        Self {
            genres: Vec::new(),
            daws: Vec::new(),
            max_per_member: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Genre,
    Daw,
}

impl TagKind {
    pub fn label(&self) -> &'static str {
        match self {
            TagKind::Genre => "genre",
            TagKind::Daw => "DAW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberTagsDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub genres: Vec<String>,
    pub daws: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateMemberTagsDto {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub daws: Vec<String>,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-guild blocked word configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct WordFilterSettings {
    pub enabled: bool,
    pub words: Vec<String>,
    pub delete_message: bool,
    pub warn_user: bool,
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub log_channel_id: Option<u64>,
    #[serde(with = "crate::model::snowflake::vec")]
    #[schema(value_type = Vec<String>)]
    pub exempt_role_ids: Vec<u64>,
}

impl Default for WordFilterSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            words: Vec::new(),
            delete_message: true,
            warn_user: true,
            log_channel_id: None,
            exempt_role_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckContentDto {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckResultDto {
    pub matched: Option<String>,
}

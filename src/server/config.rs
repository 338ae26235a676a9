use crate::server::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,
    pub discord_bot_token: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    pub app_url: String,
    pub bind_address: String,

    /// Discord users granted site admin on login.
    pub admin_discord_ids: Vec<u64>,
    /// Plugin ids to load; `None` loads every registered plugin.
    pub enabled_plugins: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            app_url: required("APP_URL")?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            admin_discord_ids: parse_id_list(
                "ADMIN_DISCORD_IDS",
                &std::env::var("ADMIN_DISCORD_IDS").unwrap_or_default(),
            )?,
            enabled_plugins: std::env::var("ENABLED_PLUGINS")
                .ok()
                .map(|value| parse_name_list(&value)),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Parses a comma separated list of Discord IDs, ignoring blank entries.
fn parse_id_list(name: &str, value: &str) -> Result<Vec<u64>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                reason: format!("'{}' is not a Discord ID: {}", entry, e),
            })
        })
        .collect()
}

fn parse_name_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|entry| entry.trim().to_ascii_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

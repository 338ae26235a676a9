//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through
//! Axum's state extraction. Every field is cheap to clone: the database handle is a
//! pool, reqwest and serenity clients are reference counted, and the plugin catalog
//! sits behind an `Arc`.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{middleware::permission::GuildPermissionChecker, plugin::PluginCatalog};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the SQLite database.
    pub db: DatabaseConnection,

    /// HTTP client for outbound requests, configured without redirects.
    pub http_client: reqwest::Client,

    /// HTTP client for spreadsheet downloads, following a few redirects.
    pub sheet_client: reqwest::Client,

    /// OAuth2 client for the Discord login flow.
    pub oauth_client: OAuth2Client,

    /// Discord REST client authenticated as the bot.
    pub discord_http: Arc<Http>,

    /// Decides whether a user may manage a given guild's dashboard.
    pub permissions: Arc<dyn GuildPermissionChecker>,

    /// Metadata and dashboard fragments of the plugins that loaded.
    pub catalog: Arc<PluginCatalog>,

    /// Discord users that are granted site admin on login.
    pub admin_discord_ids: Arc<Vec<u64>>,

    /// Application base URL, used for post-login redirects.
    pub app_url: String,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        sheet_client: reqwest::Client,
        oauth_client: OAuth2Client,
        discord_http: Arc<Http>,
        permissions: Arc<dyn GuildPermissionChecker>,
        catalog: Arc<PluginCatalog>,
        admin_discord_ids: Vec<u64>,
        app_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            sheet_client,
            oauth_client,
            discord_http,
            permissions,
            catalog,
            admin_discord_ids: Arc::new(admin_discord_ids),
            app_url,
        }
    }
}

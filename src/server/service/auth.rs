//! Discord OAuth2 login.

use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::all::User as DiscordUser;
use url::Url;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{UpsertUserParam, User},
    state::OAuth2Client,
};

const DISCORD_USER_URL: &str = "https://discord.com/api/users/@me";

pub struct DiscordAuthService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
        }
    }

    /// Builds the Discord authorize URL and the CSRF token to store in the session.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .url()
    }

    /// Exchanges the authorization code and upserts the Discord user.
    ///
    /// # Arguments
    /// - `authorization_code` - Code from the OAuth callback
    /// - `admin_discord_ids` - Users granted site admin; others keep their stored flag
    ///
    /// # Returns
    /// - `Ok(User)` - The logged in user
    /// - `Err(AuthError::TokenExchange)` - Discord rejected the code
    pub async fn callback(
        &self,
        authorization_code: String,
        admin_discord_ids: &[u64],
    ) -> Result<User, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let discord_user = self.fetch_discord_user(&token).await?;
        let discord_id = discord_user.id.get();

        let is_admin = admin_discord_ids.contains(&discord_id).then_some(true);

        let user = UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                discord_id,
                name: discord_user.name,
                is_admin,
            })
            .await?;

        tracing::info!("User {} ({}) logged in", user.name, user.discord_id);

        Ok(user)
    }

    /// Retrieves the Discord user owning the access token.
    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordUser, AppError> {
        let user = self
            .http_client
            .get(DISCORD_USER_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await?;

        Ok(user)
    }
}

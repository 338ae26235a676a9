//! Typed access to the session keys the dashboard uses.
//!
//! `AuthSession` holds the logged in Discord ID; `CsrfSession` holds the OAuth state
//! between `/login` and `/callback`. Both borrow the same underlying `Session`.

use tower_sessions::Session;

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Snowflakes are stored as strings, matching the database.
    pub async fn set_user_id(&self, user_id: u64) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_USER_ID, user_id.to_string())
            .await?;
        Ok(())
    }

    /// `None` when nobody is logged in.
    pub async fn get_user_id(&self) -> Result<Option<u64>, AppError> {
        self.session
            .get::<String>(SESSION_AUTH_USER_ID)
            .await?
            .map(parse_u64_from_string)
            .transpose()
    }

    /// Logs out by dropping every key, CSRF state included.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// One-time OAuth state token.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Removes the token while reading it; a replayed callback finds nothing.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        middleware::session::{AuthSession, CsrfSession},
        service::auth::DiscordAuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code from Discord for token exchange.
    pub code: String,
}

/// Redirect to Discord to log in.
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to Discord authorization"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client);

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().to_string())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Complete the Discord login and redirect back to the dashboard.
///
/// # Returns
/// - `307 Temporary Redirect` - Logged in, redirected to the app URL
/// - `400 Bad Request` - CSRF state missing or mismatched
/// - `500 Internal Server Error` - Token exchange or database error
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(
        ("state" = String, Query, description = "CSRF state"),
        ("code" = String, Query, description = "Authorization code")
    ),
    responses(
        (status = 307, description = "Logged in, redirect to dashboard"),
        (status = 400, description = "CSRF validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    validate_csrf(&session, &params.state).await?;

    let auth_service = DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client);
    let user = auth_service
        .callback(params.code, &state.admin_discord_ids)
        .await?;

    // Rotate the session id on privilege change
    session.cycle_id().await?;
    AuthSession::new(&session).set_user_id(user.discord_id).await?;

    Ok(Redirect::temporary(&state.app_url))
}

/// Log out and clear the session.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Logged out, redirect to dashboard")
    ),
)]
pub async fn logout(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    AuthSession::new(&session).clear().await;

    Redirect::temporary(&state.app_url)
}

/// Get the logged in user.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 404, description = "No user logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let Some(user_id) = AuthSession::new(&session).get_user_id().await? else {
        return Err(AppError::NotFound("Not logged in".to_string()));
    };

    let Some(user) = UserRepository::new(&state.db)
        .find_by_discord_id(user_id)
        .await?
    else {
        AuthSession::new(&session).clear().await;
        return Err(AppError::NotFound("Not logged in".to_string()));
    };

    Ok((StatusCode::OK, Json(user.into_dto())))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let Some(stored_state) = CsrfSession::new(session).take_token().await? else {
        return Err(AuthError::CsrfMissingValue.into());
    };

    if stored_state != csrf_state {
        return Err(AuthError::CsrfValidationFailed.into());
    }

    Ok(())
}

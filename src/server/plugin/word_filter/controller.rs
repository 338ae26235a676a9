use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        word_filter::{CheckContentDto, CheckResultDto, WordFilterSettings},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        plugin::word_filter::matcher::WordMatcher,
        service::settings::SettingsService,
        state::AppState,
    },
};

/// Tag for grouping word filter endpoints in OpenAPI documentation
pub static WORD_FILTER_TAG: &str = "word-filter";

#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/settings",
    tag = WORD_FILTER_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Word filter settings", body = WordFilterSettings),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_settings(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let settings: WordFilterSettings = SettingsService::new(&state.db).load(guild_id).await?;

    Ok((StatusCode::OK, Json(settings)))
}

#[utoipa::path(
    put,
    path = "/guilds/{guild_id}/settings",
    tag = WORD_FILTER_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = WordFilterSettings,
    responses(
        (status = 200, description = "Settings saved", body = WordFilterSettings),
        (status = 400, description = "Invalid settings", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_settings(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<WordFilterSettings>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    SettingsService::new(&state.db).save(guild_id, &payload).await?;

    tracing::info!(
        "User {} updated the word filter of guild {} ({} words)",
        user.discord_id,
        guild_id,
        payload.words.len()
    );

    Ok((StatusCode::OK, Json(payload)))
}

/// Test content against the guild's saved word list.
#[utoipa::path(
    post,
    path = "/guilds/{guild_id}/check",
    tag = WORD_FILTER_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = CheckContentDto,
    responses(
        (status = 200, description = "First blocked term found, if any", body = CheckResultDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CheckContentDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let settings: WordFilterSettings = SettingsService::new(&state.db).load(guild_id).await?;
    let matcher = WordMatcher::new(&settings.words)?;

    let result = CheckResultDto {
        matched: matcher.find(&payload.content).map(str::to_string),
    };

    Ok((StatusCode::OK, Json(result)))
}

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
        event_sync::{EventSyncSettings, SheetPreviewDto, SyncReportDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        plugin::events::{publisher::DiscordEventPublisher, service::EventSyncService},
        service::settings::SettingsService,
        state::AppState,
    },
};

/// Tag for grouping event sync endpoints in OpenAPI documentation
pub static EVENTS_TAG: &str = "events";

#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/settings",
    tag = EVENTS_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Event sync settings", body = EventSyncSettings),
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

    let settings: EventSyncSettings = SettingsService::new(&state.db).load(guild_id).await?;

    Ok((StatusCode::OK, Json(settings)))
}

/// Replace a guild's event sync settings.
///
/// # Returns
/// - `400 Bad Request` - Sheet URL is not https, or the default duration is not positive
#[utoipa::path(
    put,
    path = "/guilds/{guild_id}/settings",
    tag = EVENTS_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = EventSyncSettings,
    responses(
        (status = 200, description = "Settings saved", body = EventSyncSettings),
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
    Json(payload): Json<EventSyncSettings>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    SettingsService::new(&state.db).save(guild_id, &payload).await?;

    Ok((StatusCode::OK, Json(payload)))
}

/// Fetch and parse the configured spreadsheet without creating events.
#[utoipa::path(
    post,
    path = "/guilds/{guild_id}/preview",
    tag = EVENTS_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Parsed events and row errors", body = SheetPreviewDto),
        (status = 400, description = "No sheet configured or sheet unreadable", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn preview(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let publisher = DiscordEventPublisher::new(state.discord_http.clone());
    let preview = EventSyncService::new(&state.db, &state.sheet_client, &publisher)
        .preview(guild_id)
        .await?;

    Ok((StatusCode::OK, Json(preview)))
}

/// Create Discord scheduled events for new upcoming spreadsheet rows.
#[utoipa::path(
    post,
    path = "/guilds/{guild_id}/sync",
    tag = EVENTS_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Sync report", body = SyncReportDto),
        (status = 400, description = "No sheet configured or sheet unreadable", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sync(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let publisher = DiscordEventPublisher::new(state.discord_http.clone());
    let report = EventSyncService::new(&state.db, &state.sheet_client, &publisher)
        .sync(guild_id)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

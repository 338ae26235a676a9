use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        leveling::{LeaderboardDto, LeaderboardMetric, LevelingSettings, MemberXpDto, SetXpDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        plugin::leveling::service::{LevelingService, DEFAULT_LEADERBOARD_LIMIT},
        service::settings::SettingsService,
        state::AppState,
    },
};

/// Tag for grouping leveling endpoints in OpenAPI documentation
pub static LEVELING_TAG: &str = "leveling";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardParams {
    /// `xp`, `voice` or `reactions`; defaults to `xp`.
    pub metric: Option<LeaderboardMetric>,
    /// Defaults to 10.
    pub limit: Option<usize>,
}

/// Get a guild's leveling settings.
///
/// # Access Control
/// - `ManageGuild(guild_id)` - Site admins bypass
#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/settings",
    tag = LEVELING_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Leveling settings", body = LevelingSettings),
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

    let settings: LevelingSettings = SettingsService::new(&state.db).load(guild_id).await?;

    Ok((StatusCode::OK, Json(settings)))
}

/// Replace a guild's leveling settings.
///
/// # Access Control
/// - `ManageGuild(guild_id)` - Site admins bypass
#[utoipa::path(
    put,
    path = "/guilds/{guild_id}/settings",
    tag = LEVELING_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = LevelingSettings,
    responses(
        (status = 200, description = "Settings saved", body = LevelingSettings),
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
    Json(payload): Json<LevelingSettings>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    SettingsService::new(&state.db).save(guild_id, &payload).await?;

    Ok((StatusCode::OK, Json(payload)))
}

/// Get a guild's leaderboard.
///
/// # Access Control
/// - `ManageGuild(guild_id)` - Site admins bypass
#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/leaderboard",
    tag = LEVELING_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        LeaderboardParams
    ),
    responses(
        (status = 200, description = "Leaderboard, highest first", body = LeaderboardDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let board = LevelingService::new(&state.db)
        .leaderboard(
            guild_id,
            params.metric.unwrap_or_default(),
            params.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT),
        )
        .await?;

    Ok((StatusCode::OK, Json(board)))
}

/// Get a member's leveling record and progress towards the next level.
///
/// Members without a record are returned with zeroed stats.
#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/members/{user_id}",
    tag = LEVELING_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    responses(
        (status = 200, description = "Member record", body = MemberXpDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_member(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, user_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let member = LevelingService::new(&state.db)
        .get_member(guild_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}

/// Override a member's XP total. The level is recomputed.
#[utoipa::path(
    put,
    path = "/guilds/{guild_id}/members/{user_id}/xp",
    tag = LEVELING_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    request_body = SetXpDto,
    responses(
        (status = 200, description = "Updated record", body = MemberXpDto),
        (status = 400, description = "Negative XP", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_member_xp(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, user_id)): Path<(u64, u64)>,
    Json(payload): Json<SetXpDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let member = LevelingService::new(&state.db)
        .set_xp(guild_id, user_id, payload.xp)
        .await?;

    tracing::info!(
        "User {} set XP of {} in guild {} to {}",
        user.discord_id,
        user_id,
        guild_id,
        payload.xp
    );

    Ok((StatusCode::OK, Json(member.into_dto())))
}

/// Delete a member's leveling record.
#[utoipa::path(
    delete,
    path = "/guilds/{guild_id}/members/{user_id}",
    tag = LEVELING_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 404, description = "Member has no record", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_member(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, user_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    LevelingService::new(&state.db)
        .reset_member(guild_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

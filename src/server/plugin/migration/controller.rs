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
        migration::{
            MigrateLevelingDto, MigrateReputationDto, MigrationBackupDto, MigrationReportDto,
            ReputationStandingDto, RestoreReportDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        plugin::migration::service::MigrationService,
        state::AppState,
    },
};

/// Tag for grouping migration endpoints in OpenAPI documentation
pub static MIGRATION_TAG: &str = "migration";

/// Import an external leveling export.
///
/// Converted XP is added to existing records. Importing the same export twice adds it
/// twice; restore the returned backup to undo an import.
///
/// # Access Control
/// - `ManageGuild(guild_id)` - Site admins bypass
///
/// # Returns
/// - `200 OK` - Import report with the backup id
/// - `400 Bad Request` - Negative level or XP in the export
#[utoipa::path(
    post,
    path = "/guilds/{guild_id}/leveling",
    tag = MIGRATION_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = MigrateLevelingDto,
    responses(
        (status = 200, description = "Import report", body = MigrationReportDto),
        (status = 400, description = "Invalid entries", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn migrate_leveling(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<MigrateLevelingDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let report = MigrationService::new(&state.db)
        .migrate_leveling(guild_id, payload.entries)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

/// Import an external reputation export into the legacy category.
#[utoipa::path(
    post,
    path = "/guilds/{guild_id}/reputation",
    tag = MIGRATION_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = MigrateReputationDto,
    responses(
        (status = 200, description = "Import report", body = MigrationReportDto),
        (status = 400, description = "Invalid entries", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn migrate_reputation(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<MigrateReputationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let report = MigrationService::new(&state.db)
        .migrate_reputation(guild_id, payload.entries)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

/// Get legacy reputation standings, highest first.
#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/reputation",
    tag = MIGRATION_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Legacy reputation standings", body = Vec<ReputationStandingDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_legacy_reputation(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let standings: Vec<ReputationStandingDto> = MigrationService::new(&state.db)
        .get_legacy_reputation(guild_id)
        .await?
        .into_iter()
        .map(|reputation| reputation.into_standing_dto())
        .collect();

    Ok((StatusCode::OK, Json(standings)))
}

/// List a guild's import backups, newest first.
#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/backups",
    tag = MIGRATION_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Backups", body = Vec<MigrationBackupDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_backups(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let backups: Vec<MigrationBackupDto> = MigrationService::new(&state.db)
        .get_backups(guild_id)
        .await?
        .into_iter()
        .map(|backup| backup.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(backups)))
}

/// Roll a guild back to the state captured before an import.
///
/// Replaces every row of the backup's system in the guild with the snapshot,
/// including rows changed by activity since the import.
#[utoipa::path(
    post,
    path = "/guilds/{guild_id}/backups/{backup_id}/restore",
    tag = MIGRATION_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("backup_id" = i32, Path, description = "Backup ID")
    ),
    responses(
        (status = 200, description = "Restore report", body = RestoreReportDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 404, description = "Backup not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn restore_backup(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, backup_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let report = MigrationService::new(&state.db)
        .restore(guild_id, backup_id)
        .await?;

    tracing::info!(
        "User {} restored backup {} in guild {}",
        user.discord_id,
        backup_id,
        guild_id
    );

    Ok((StatusCode::OK, Json(report)))
}

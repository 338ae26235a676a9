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
        tags::{MemberTagsDto, TagKind, TagSettings, UpdateMemberTagsDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        plugin::tags::service::TagService,
        service::settings::SettingsService,
        state::AppState,
    },
};

/// Tag for grouping genre tag endpoints in OpenAPI documentation
pub static TAGS_TAG: &str = "tags";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    pub kind: TagKind,
    pub value: String,
}

#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/settings",
    tag = TAGS_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Tag settings", body = TagSettings),
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

    let settings: TagSettings = SettingsService::new(&state.db).load(guild_id).await?;

    Ok((StatusCode::OK, Json(settings)))
}

/// Replace a guild's tag allow-lists and limit.
///
/// Existing member tags are not revalidated; the new rules apply on their next write.
#[utoipa::path(
    put,
    path = "/guilds/{guild_id}/settings",
    tag = TAGS_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = TagSettings,
    responses(
        (status = 200, description = "Settings saved", body = TagSettings),
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
    Json(payload): Json<TagSettings>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    SettingsService::new(&state.db).save(guild_id, &payload).await?;

    Ok((StatusCode::OK, Json(payload)))
}

/// List every tagged member of a guild.
#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/members",
    tag = TAGS_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Tagged members", body = Vec<MemberTagsDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_members(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let members: Vec<MemberTagsDto> = TagService::new(&state.db)
        .get_all(guild_id)
        .await?
        .into_iter()
        .map(|tags| tags.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(members)))
}

#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/members/{user_id}",
    tag = TAGS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    responses(
        (status = 200, description = "Member tags, empty when untagged", body = MemberTagsDto),
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

    let tags = TagService::new(&state.db)
        .get_member(guild_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(tags.into_dto())))
}

/// Replace a member's tags. Values are normalized against the guild's settings.
#[utoipa::path(
    put,
    path = "/guilds/{guild_id}/members/{user_id}",
    tag = TAGS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    request_body = UpdateMemberTagsDto,
    responses(
        (status = 200, description = "Stored tags", body = MemberTagsDto),
        (status = 400, description = "Tag not allowed or too many tags", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_member(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, user_id)): Path<(u64, u64)>,
    Json(payload): Json<UpdateMemberTagsDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let tags = TagService::new(&state.db)
        .set_member(guild_id, user_id, payload.genres, payload.daws)
        .await?;

    Ok((StatusCode::OK, Json(tags.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/guilds/{guild_id}/members/{user_id}",
    tag = TAGS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    responses(
        (status = 204, description = "Tags deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 404, description = "Member has no tags", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_member(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, user_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    TagService::new(&state.db)
        .delete_member(guild_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Find members carrying a genre or DAW.
#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/search",
    tag = TAGS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        SearchParams
    ),
    responses(
        (status = 200, description = "Matching members", body = Vec<MemberTagsDto>),
        (status = 400, description = "Empty search value", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let members: Vec<MemberTagsDto> = TagService::new(&state.db)
        .search(guild_id, params.kind, &params.value)
        .await?
        .into_iter()
        .map(|tags| tags.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(members)))
}

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
        messaging::{ChannelDto, EditMessageDto, SendMessageDto, SentMessageDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        plugin::messaging::service::MessagingService,
        state::AppState,
    },
};

/// Tag for grouping message sending endpoints in OpenAPI documentation
pub static MESSAGING_TAG: &str = "messaging";

/// List the channels the bot can post to.
#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/channels",
    tag = MESSAGING_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Text and announcement channels", body = Vec<ChannelDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_channels(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let channels = MessagingService::new(&state.db, &state.discord_http)
        .get_channels(guild_id)
        .await?;

    Ok((StatusCode::OK, Json(channels)))
}

/// Send a message as the bot.
#[utoipa::path(
    post,
    path = "/guilds/{guild_id}/messages",
    tag = MESSAGING_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = SendMessageDto,
    responses(
        (status = 200, description = "Message sent", body = SentMessageDto),
        (status = 400, description = "Empty or oversized message", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 404, description = "Channel not in guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<SendMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let sent = MessagingService::new(&state.db, &state.discord_http)
        .send(guild_id, user.discord_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(sent)))
}

#[utoipa::path(
    get,
    path = "/guilds/{guild_id}/messages",
    tag = MESSAGING_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Latest dashboard messages, newest first", body = Vec<SentMessageDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_messages(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let messages: Vec<SentMessageDto> = MessagingService::new(&state.db, &state.discord_http)
        .history(guild_id)
        .await?
        .into_iter()
        .map(|message| message.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(messages)))
}

/// Replace the content of a message the bot sent.
#[utoipa::path(
    patch,
    path = "/guilds/{guild_id}/messages/{channel_id}/{message_id}",
    tag = MESSAGING_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("channel_id" = u64, Path, description = "Discord channel ID"),
        ("message_id" = u64, Path, description = "Discord message ID")
    ),
    request_body = EditMessageDto,
    responses(
        (status = 204, description = "Message edited"),
        (status = 400, description = "Empty or oversized content", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 404, description = "Channel or message not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn edit_message(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, channel_id, message_id)): Path<(u64, u64, u64)>,
    Json(payload): Json<EditMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    MessagingService::new(&state.db, &state.discord_http)
        .edit(guild_id, channel_id, message_id, payload.content)
        .await?;

    tracing::info!(
        "User {} edited message {} in channel {}",
        user.discord_id,
        message_id,
        channel_id
    );

    Ok(StatusCode::NO_CONTENT)
}

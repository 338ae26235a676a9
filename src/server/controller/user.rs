use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::ManageableGuildDto},
    server::{
        error::AppError, middleware::auth::AuthGuard, service::user::UserGuildService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// List the bot's guilds the current user can manage.
///
/// Site admins get every guild the bot is in.
#[utoipa::path(
    get,
    path = "/api/user/guilds",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Manageable guilds", body = Vec<ManageableGuildDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_guilds(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[])
        .await?;

    let guilds = UserGuildService::new(&state.discord_http, state.permissions.as_ref())
        .get_manageable_guilds(&user)
        .await?;

    Ok((StatusCode::OK, Json(guilds)))
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        plugin::{DashboardFragmentDto, PluginCatalogDto},
    },
    server::{error::AppError, middleware::auth::AuthGuard, state::AppState},
};

/// Tag for grouping plugin endpoints in OpenAPI documentation
pub static PLUGIN_TAG: &str = "plugin";

/// List loaded plugins and the ids of plugins that failed to load.
#[utoipa::path(
    get,
    path = "/api/plugins",
    tag = PLUGIN_TAG,
    responses(
        (status = 200, description = "Plugin catalog", body = PluginCatalogDto),
        (status = 401, description = "User not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_plugins(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(state.catalog.to_dto())))
}

/// Dashboard fragments of the loaded plugins in navigation order.
#[utoipa::path(
    get,
    path = "/api/plugins/dashboard",
    tag = PLUGIN_TAG,
    responses(
        (status = 200, description = "Dashboard fragments", body = Vec<DashboardFragmentDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session, state.permissions.as_ref())
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(state.catalog.fragments_dto())))
}

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, plugin, user},
    error::{config::ConfigError, AppError},
    plugin::registry::PluginRegistry,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(info(title = "guildboard", description = "Discord community dashboard API"))]
struct ApiDoc;

/// Core routes, every loaded plugin's routes, and the Swagger UI at `/api/docs`.
pub fn router(registry: &PluginRegistry) -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        .routes(routes!(user::get_user_guilds))
        .routes(routes!(plugin::get_plugins))
        .routes(routes!(plugin::get_dashboard))
        .merge(registry.router())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
}

/// Allows the dashboard origin to call the API with its session cookie.
pub fn cors_layer(app_url: &str) -> Result<CorsLayer, AppError> {
    let origin = app_url.trim_end_matches('/');
    let origin = HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidEnvVar {
        name: "APP_URL".to_string(),
        reason: e.to_string(),
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true))
}

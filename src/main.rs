mod model;
mod server;

use std::sync::Arc;

use serenity::http::Http;

use crate::server::{
    bot::{self, event::EventBus},
    config::Config,
    error::AppError,
    middleware::permission::DiscordPermissionChecker,
    plugin::{registrations, registry::PluginRegistry, PluginContext},
    router, scheduler, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let sheet_client = startup::setup_sheet_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;

    let bus = EventBus::new();
    let discord_http = Arc::new(Http::new(&config.discord_bot_token));

    let ctx = PluginContext {
        db: db.clone(),
        http: discord_http.clone(),
        bus: bus.clone(),
        sheet_client: sheet_client.clone(),
    };
    let registry = PluginRegistry::load(registrations(), &ctx, config.enabled_plugins.as_deref());
    if !registry.failures().is_empty() {
        tracing::warn!(
            "{} plugins failed to load, continuing without them",
            registry.failures().len()
        );
    }

    registry.spawn_subscribers(&bus);

    // Kept alive for the lifetime of the server.
    let _scheduler = scheduler::start_scheduler(registry.jobs()).await?;

    let bot_client = bot::start::init_bot(&config, bus, registry.commands()).await?;
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let state = AppState::new(
        db,
        http_client,
        sheet_client,
        oauth_client,
        discord_http.clone(),
        Arc::new(DiscordPermissionChecker::new(discord_http)),
        Arc::new(registry.catalog()),
        config.admin_discord_ids.clone(),
        config.app_url.clone(),
    );

    let app = router::router(&registry)
        .layer(session)
        .layer(router::cors_layer(&config.app_url)?)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

use serenity::all::{Client, CreateCommand, GatewayIntents};

use crate::server::{
    bot::{event::EventBus, handler::Handler},
    config::Config,
    error::AppError,
};

/// Builds the Discord client with the gateway handler installed.
///
/// # Arguments
/// - `config` - Application configuration providing the bot token
/// - `bus` - Event bus the handler publishes gateway events to
/// - `commands` - Slash commands registered once the bot is ready
pub async fn init_bot(
    config: &Config,
    bus: EventBus,
    commands: Vec<CreateCommand>,
) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_VOICE_STATES;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(bus, commands))
        .await?;

    Ok(client)
}

/// Runs the gateway connection until shutdown.
///
/// Call from within a spawned task since it does not return while connected.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}

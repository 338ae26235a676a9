//! Ready event handler.
//!
//! Fired once per gateway connection after the handshake. Registers the plugins'
//! slash commands globally; a registration failure is logged and the bot keeps running.

use serenity::all::{Command, Context, CreateCommand, Ready};

pub async fn handle_ready(ctx: Context, ready: Ready, commands: Vec<CreateCommand>) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    let count = commands.len();
    match Command::set_global_commands(&ctx.http, commands).await {
        Ok(registered) => tracing::info!(
            "Registered {} of {} slash commands",
            registered.len(),
            count
        ),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}

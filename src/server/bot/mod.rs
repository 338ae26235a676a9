//! Discord bot integration.
//!
//! The gateway handler does no feature work itself: it translates serenity callbacks
//! into `BotEvent`s and publishes them on the `EventBus`, where each plugin's
//! subscriber task picks them up. The handler also registers the plugins' slash
//! commands once the bot is ready.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild and channel availability
//! - `GUILD_MESSAGES` / `MESSAGE_CONTENT` - Message XP and the word filter
//! - `GUILD_MESSAGE_REACTIONS` - Reaction XP
//! - `GUILD_VOICE_STATES` - Voice XP
//!
//! `MESSAGE_CONTENT` is a privileged intent and must be enabled in the Discord
//! Developer Portal for the bot application.

pub mod event;
pub mod handler;
pub mod start;

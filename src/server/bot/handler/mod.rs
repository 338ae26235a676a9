use serenity::all::{
    Context, CreateCommand, EventHandler, Interaction, Message, Reaction, Ready, VoiceState,
};
use serenity::async_trait;

use crate::server::bot::event::{BotEvent, EventBus};

pub mod interaction;
pub mod message;
pub mod reaction;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub bus: EventBus,
    /// Slash commands contributed by the loaded plugins.
    pub commands: Vec<CreateCommand>,
}

impl Handler {
    pub fn new(bus: EventBus, commands: Vec<CreateCommand>) -> Self {
        Self { bus, commands }
    }

    fn publish(&self, event: BotEvent) {
        let delivered = self.bus.publish(event);
        if delivered == 0 {
            tracing::trace!("Dropped bot event with no subscribers");
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready, self.commands.clone()).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, _ctx: Context, message: Message) {
        if let Some(event) = message::to_event(message) {
            self.publish(event);
        }
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, _ctx: Context, reaction: Reaction) {
        if let Some(event) = reaction::to_event(reaction) {
            self.publish(event);
        }
    }

    /// Called when a member joins, leaves, or moves between voice channels
    async fn voice_state_update(&self, _ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        if let Some(event) = voice::to_event(old, new) {
            self.publish(event);
        }
    }

    /// Called when a user invokes a slash command or other interaction
    async fn interaction_create(&self, _ctx: Context, interaction: Interaction) {
        if let Some(event) = interaction::to_event(interaction) {
            self.publish(event);
        }
    }
}

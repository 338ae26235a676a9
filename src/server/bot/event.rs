//! Bot events and the broadcast bus that carries them to plugins.

use serenity::all::{CommandInteraction, Message, Reaction, VoiceState};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 1024;

/// A gateway event, or a plugin-originated notification, delivered to every plugin.
#[derive(Debug, Clone)]
pub enum BotEvent {
    Message(Box<Message>),
    ReactionAdd(Box<Reaction>),
    VoiceStateUpdate {
        old: Option<Box<VoiceState>>,
        new: Box<VoiceState>,
    },
    Command(Box<CommandInteraction>),
    LevelUp(LevelUp),
}

/// Published by leveling when a grant raises a member's level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUp {
    pub guild_id: u64,
    pub user_id: u64,
    pub level: i32,
    /// Where the XP was earned, used when no announcement channel is configured.
    pub channel_id: Option<u64>,
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BotEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to every current subscriber.
    ///
    /// Returns how many subscribers received it; zero when none are listening.
    pub fn publish(&self, event: BotEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BotEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

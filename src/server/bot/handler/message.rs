use serenity::all::Message;

use crate::server::bot::event::BotEvent;

/// Only guild messages are published; DMs have no guild to attribute XP or settings to.
pub fn to_event(message: Message) -> Option<BotEvent> {
    message.guild_id?;

    Some(BotEvent::Message(Box::new(message)))
}

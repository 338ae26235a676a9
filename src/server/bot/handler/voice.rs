use serenity::all::VoiceState;

use crate::server::bot::event::BotEvent;

pub fn to_event(old: Option<VoiceState>, new: VoiceState) -> Option<BotEvent> {
    new.guild_id?;

    Some(BotEvent::VoiceStateUpdate {
        old: old.map(Box::new),
        new: Box::new(new),
    })
}

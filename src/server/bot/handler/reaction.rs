use serenity::all::Reaction;

use crate::server::bot::event::BotEvent;

pub fn to_event(reaction: Reaction) -> Option<BotEvent> {
    reaction.guild_id?;
    reaction.user_id?;

    Some(BotEvent::ReactionAdd(Box::new(reaction)))
}

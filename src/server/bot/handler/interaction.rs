use serenity::all::Interaction;

use crate::server::bot::event::BotEvent;

/// Publishes guild slash commands; autocomplete and components are not used.
pub fn to_event(interaction: Interaction) -> Option<BotEvent> {
    match interaction {
        Interaction::Command(command) if command.guild_id.is_some() => {
            Some(BotEvent::Command(Box::new(command)))
        }
        _ => None,
    }
}

//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::GuildChannel;

/// Discord channel type numbers used by the factories.
pub const TEXT: u8 = 0;
pub const VOICE: u8 = 2;
pub const CATEGORY: u8 = 4;
pub const ANNOUNCEMENT: u8 = 5;

/// Creates a test Serenity GuildChannel.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `guild_id` - Guild the channel belongs to
/// - `name` - Channel name
/// - `kind` - Raw Discord channel type, see the constants in this module
/// - `position` - Sorting position in the channel list
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::channel::{create_test_channel, TEXT};
///
/// let channel = create_test_channel(10, 1, "general", TEXT, 0);
/// ```
pub fn create_test_channel(
    channel_id: u64,
    guild_id: u64,
    name: &str,
    kind: u8,
    position: u16,
) -> GuildChannel {
    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": kind,
        "name": name,
        "position": position,
        "permission_overwrites": [],
        "nsfw": false,
        "parent_id": null,
        "topic": null,
        "last_message_id": null,
        "rate_limit_per_user": 0,
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}

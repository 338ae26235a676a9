//! Test factory for creating Serenity Role objects.

use serenity::all::Role;

/// Creates a test Serenity Role with the given permission bits.
///
/// All other fields are set to defaults (not hoisted, not managed, not mentionable).
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake); use the guild ID for `@everyone`
/// - `name` - Role name
/// - `permissions` - Raw permission bitset
/// - `position` - Role position in the hierarchy
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use serenity::all::Permissions;
/// use test_utils::serenity::role::create_test_role;
///
/// let role = create_test_role(123456789, "Moderators", Permissions::MANAGE_GUILD.bits(), 3);
/// ```
pub fn create_test_role(role_id: u64, name: &str, permissions: u64, position: i16) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": 0,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": permissions.to_string(),
        "managed": false,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}

use std::collections::HashMap;

use serenity::all::{GuildId, Permissions, Role, RoleId};
use test_utils::serenity::create_test_role;

use crate::server::middleware::permission::member_can_manage;

const GUILD_ID: u64 = 1000;

fn roles(entries: &[(u64, Permissions)]) -> HashMap<RoleId, Role> {
    entries
        .iter()
        .map(|(id, permissions)| {
            (
                RoleId::new(*id),
                create_test_role(*id, "role", permissions.bits(), 1),
            )
        })
        .collect()
}

/// Tests a member role carrying Manage Server grants access.
#[test]
fn grants_manage_guild_role() {
    let guild_roles = roles(&[
        (GUILD_ID, Permissions::SEND_MESSAGES),
        (2000, Permissions::MANAGE_GUILD),
    ]);

    assert!(member_can_manage(
        GuildId::new(GUILD_ID),
        &guild_roles,
        &[RoleId::new(2000)]
    ));
}

/// Tests Administrator implies manage access.
#[test]
fn grants_administrator_role() {
    let guild_roles = roles(&[(2000, Permissions::ADMINISTRATOR)]);

    assert!(member_can_manage(
        GuildId::new(GUILD_ID),
        &guild_roles,
        &[RoleId::new(2000)]
    ));
}

/// Tests permissions granted to @everyone apply to every member.
#[test]
fn includes_everyone_role() {
    let guild_roles = roles(&[(GUILD_ID, Permissions::MANAGE_GUILD)]);

    assert!(member_can_manage(GuildId::new(GUILD_ID), &guild_roles, &[]));
}

/// Tests ordinary roles and unknown role ids do not grant access.
#[test]
fn denies_without_manage_permission() {
    let guild_roles = roles(&[
        (GUILD_ID, Permissions::SEND_MESSAGES),
        (2000, Permissions::MANAGE_MESSAGES | Permissions::KICK_MEMBERS),
    ]);

    assert!(!member_can_manage(
        GuildId::new(GUILD_ID),
        &guild_roles,
        &[RoleId::new(2000), RoleId::new(3000)]
    ));
}

//! SeaORM entity models for the guildboard database.

pub mod prelude;

pub mod guild_settings;
pub mod member_tag;
pub mod member_xp;
pub mod migration_backup;
pub mod reputation;
pub mod sent_message;
pub mod synced_event;
pub mod user;

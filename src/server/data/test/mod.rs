mod guild_settings;
mod member_tag;
mod member_xp;
mod migration_backup;
mod reputation;
mod sent_message;
mod synced_event;
mod user;

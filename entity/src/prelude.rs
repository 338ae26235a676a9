pub use super::guild_settings::Entity as GuildSettings;
pub use super::member_tag::Entity as MemberTag;
pub use super::member_xp::Entity as MemberXp;
pub use super::migration_backup::Entity as MigrationBackup;
pub use super::reputation::Entity as Reputation;
pub use super::sent_message::Entity as SentMessage;
pub use super::synced_event::Entity as SyncedEvent;
pub use super::user::Entity as User;

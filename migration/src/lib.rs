pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_guild_settings_table;
mod m20260302_000003_create_member_xp_table;
mod m20260302_000004_create_reputation_table;
mod m20260303_000005_create_migration_backup_table;
mod m20260304_000006_create_member_tag_table;
mod m20260305_000007_create_synced_event_table;
mod m20260306_000008_create_sent_message_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_guild_settings_table::Migration),
            Box::new(m20260302_000003_create_member_xp_table::Migration),
            Box::new(m20260302_000004_create_reputation_table::Migration),
            Box::new(m20260303_000005_create_migration_backup_table::Migration),
            Box::new(m20260304_000006_create_member_tag_table::Migration),
            Box::new(m20260305_000007_create_synced_event_table::Migration),
            Box::new(m20260306_000008_create_sent_message_table::Migration),
        ]
    }
}

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MigrationBackup::Table)
                    .if_not_exists()
                    .col(pk_auto(MigrationBackup::Id))
                    .col(string(MigrationBackup::GuildId))
                    .col(string(MigrationBackup::System))
                    .col(text(MigrationBackup::Snapshot))
                    .col(integer(MigrationBackup::EntryCount))
                    .col(timestamp(MigrationBackup::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_migration_backup_guild_id")
                    .table(MigrationBackup::Table)
                    .col(MigrationBackup::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_migration_backup_guild_id")
                    .table(MigrationBackup::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MigrationBackup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MigrationBackup {
    Table,
    Id,
    GuildId,
    System,
    Snapshot,
    EntryCount,
    CreatedAt,
}

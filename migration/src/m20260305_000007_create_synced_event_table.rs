use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SyncedEvent::Table)
                    .if_not_exists()
                    .col(string(SyncedEvent::GuildId))
                    .col(string(SyncedEvent::SourceKey))
                    .col(string(SyncedEvent::DiscordEventId))
                    .col(timestamp(SyncedEvent::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(SyncedEvent::GuildId)
                            .col(SyncedEvent::SourceKey),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SyncedEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SyncedEvent {
    Table,
    GuildId,
    SourceKey,
    DiscordEventId,
    CreatedAt,
}

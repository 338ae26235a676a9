use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildSettings::Table)
                    .if_not_exists()
                    .col(string(GuildSettings::GuildId))
                    .col(string(GuildSettings::Plugin))
                    .col(text(GuildSettings::Settings))
                    .col(timestamp(GuildSettings::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .col(GuildSettings::GuildId)
                            .col(GuildSettings::Plugin),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GuildSettings {
    Table,
    GuildId,
    Plugin,
    Settings,
    UpdatedAt,
}

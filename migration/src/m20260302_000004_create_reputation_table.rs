use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reputation::Table)
                    .if_not_exists()
                    .col(string(Reputation::GuildId))
                    .col(string(Reputation::UserId))
                    .col(string(Reputation::Category))
                    .col(big_integer(Reputation::Amount).default(0))
                    .col(timestamp(Reputation::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .col(Reputation::GuildId)
                            .col(Reputation::UserId)
                            .col(Reputation::Category),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reputation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reputation {
    Table,
    GuildId,
    UserId,
    Category,
    Amount,
    UpdatedAt,
}

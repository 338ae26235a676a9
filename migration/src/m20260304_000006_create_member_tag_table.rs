use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberTag::Table)
                    .if_not_exists()
                    .col(string(MemberTag::GuildId))
                    .col(string(MemberTag::UserId))
                    .col(text(MemberTag::Genres))
                    .col(text(MemberTag::Daws))
                    .col(timestamp(MemberTag::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .col(MemberTag::GuildId)
                            .col(MemberTag::UserId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MemberTag {
    Table,
    GuildId,
    UserId,
    Genres,
    Daws,
    UpdatedAt,
}

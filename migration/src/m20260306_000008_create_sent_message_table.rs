use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SentMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(SentMessage::Id))
                    .col(string(SentMessage::GuildId))
                    .col(string(SentMessage::ChannelId))
                    .col(string(SentMessage::MessageId))
                    .col(string(SentMessage::AuthorId))
                    .col(text(SentMessage::Content))
                    .col(timestamp(SentMessage::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sent_message_guild_id")
                    .table(SentMessage::Table)
                    .col(SentMessage::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_sent_message_guild_id")
                    .table(SentMessage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SentMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SentMessage {
    Table,
    Id,
    GuildId,
    ChannelId,
    MessageId,
    AuthorId,
    Content,
    CreatedAt,
}

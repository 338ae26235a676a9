use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberXp::Table)
                    .if_not_exists()
                    .col(string(MemberXp::GuildId))
                    .col(string(MemberXp::UserId))
                    .col(big_integer(MemberXp::Xp).default(0))
                    .col(integer(MemberXp::Level).default(0))
                    .col(big_integer(MemberXp::VoiceMinutes).default(0))
                    .col(big_integer(MemberXp::ReactionsGiven).default(0))
                    .col(big_integer(MemberXp::ReactionsReceived).default(0))
                    .col(timestamp(MemberXp::UpdatedAt))
                    .primary_key(Index::create().col(MemberXp::GuildId).col(MemberXp::UserId))
                    .to_owned(),
            )
            .await?;

        // Leaderboards always scan a single guild
        manager
            .create_index(
                Index::create()
                    .name("idx_member_xp_guild_id")
                    .table(MemberXp::Table)
                    .col(MemberXp::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_member_xp_guild_id")
                    .table(MemberXp::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MemberXp::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MemberXp {
    Table,
    GuildId,
    UserId,
    Xp,
    Level,
    VoiceMinutes,
    ReactionsGiven,
    ReactionsReceived,
    UpdatedAt,
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::sent_message::{RecordSentMessageParam, SentMessage},
};

pub struct SentMessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SentMessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: RecordSentMessageParam) -> Result<SentMessage, AppError> {
        let entity = entity::sent_message::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(param.message_id.to_string()),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            content: ActiveValue::Set(param.content),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        SentMessage::from_entity(entity)
    }

    /// Gets the guild's most recently sent messages, newest first.
    pub async fn get_latest_by_guild(
        &self,
        guild_id: u64,
        limit: u64,
    ) -> Result<Vec<SentMessage>, AppError> {
        let entities = entity::prelude::SentMessage::find()
            .filter(entity::sent_message::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::sent_message::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        entities.into_iter().map(SentMessage::from_entity).collect()
    }

    /// Updates the recorded content after an edit.
    ///
    /// Messages not sent from the dashboard have no record and are left alone.
    pub async fn update_content(
        &self,
        guild_id: u64,
        message_id: u64,
        content: String,
    ) -> Result<(), AppError> {
        entity::prelude::SentMessage::update_many()
            .filter(entity::sent_message::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::sent_message::Column::MessageId.eq(message_id.to_string()))
            .col_expr(
                entity::sent_message::Column::Content,
                sea_orm::sea_query::Expr::value(content),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }
}

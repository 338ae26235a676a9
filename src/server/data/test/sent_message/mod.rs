use crate::server::{
    data::sent_message::SentMessageRepository, error::AppError,
    model::sent_message::RecordSentMessageParam,
};
use test_utils::builder::TestBuilder;

fn param(guild_id: u64, message_id: u64, content: &str) -> RecordSentMessageParam {
    RecordSentMessageParam {
        guild_id,
        channel_id: 10,
        message_id,
        author_id: 20,
        content: content.to_string(),
    }
}

/// Tests the latest messages come back newest first and limited.
#[tokio::test]
async fn get_latest_by_guild_limits_and_orders() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SentMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = SentMessageRepository::new(db);

    for message_id in 100..105 {
        repo.create(param(1, message_id, "hello")).await?;
    }
    repo.create(param(2, 200, "elsewhere")).await?;

    let messages = repo.get_latest_by_guild(1, 3).await?;

    let ids: Vec<u64> = messages.iter().map(|m| m.message_id).collect();
    assert_eq!(ids, vec![104, 103, 102]);

    Ok(())
}

/// Tests editing updates the recorded content.
#[tokio::test]
async fn update_content_rewrites_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SentMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = SentMessageRepository::new(db);

    repo.create(param(1, 100, "before")).await?;
    repo.update_content(1, 100, "after".to_string()).await?;

    let messages = repo.get_latest_by_guild(1, 50).await?;
    assert_eq!(messages[0].content, "after");

    Ok(())
}

use crate::server::{data::synced_event::SyncedEventRepository, error::AppError};
use test_utils::builder::TestBuilder;

/// Tests recorded keys are returned for their guild only.
#[tokio::test]
async fn records_keys_per_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SyncedEvent)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = SyncedEventRepository::new(db);

    repo.create(1, "launch|1700000000".to_string(), 77).await?;
    repo.create(2, "other|1700000000".to_string(), 78).await?;

    let keys = repo.get_keys_by_guild(1).await?;

    assert_eq!(keys.len(), 1);
    assert!(keys.contains("launch|1700000000"));

    Ok(())
}

/// Tests the same key cannot be recorded twice for a guild.
#[tokio::test]
async fn rejects_duplicate_key() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SyncedEvent)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = SyncedEventRepository::new(db);

    repo.create(1, "launch|1700000000".to_string(), 77).await?;
    let result = repo.create(1, "launch|1700000000".to_string(), 79).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}

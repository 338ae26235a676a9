use crate::server::{
    data::migration_backup::MigrationBackupRepository, error::AppError,
    model::migration::MigrationSystem,
};
use test_utils::builder::TestBuilder;

/// Tests a created backup can be found within its guild only.
#[tokio::test]
async fn find_is_scoped_to_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MigrationBackup)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = MigrationBackupRepository::new(db);

    let backup = repo
        .create(1, MigrationSystem::Leveling, "[]".to_string(), 0)
        .await?;

    let found = repo.find(1, backup.id).await?.unwrap();
    assert_eq!(found.system, MigrationSystem::Leveling);
    assert!(repo.find(2, backup.id).await?.is_none());

    Ok(())
}

/// Tests backups are listed newest first.
#[tokio::test]
async fn get_by_guild_orders_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MigrationBackup)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = MigrationBackupRepository::new(db);

    let first = repo
        .create(1, MigrationSystem::Leveling, "[]".to_string(), 0)
        .await?;
    let second = repo
        .create(1, MigrationSystem::Reputation, "[]".to_string(), 0)
        .await?;
    repo.create(2, MigrationSystem::Leveling, "[]".to_string(), 0)
        .await?;

    let ids: Vec<i32> = repo.get_by_guild(1).await?.iter().map(|b| b.id).collect();

    assert_eq!(ids, vec![second.id, first.id]);

    Ok(())
}

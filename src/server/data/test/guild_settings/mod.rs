use crate::server::{data::guild_settings::GuildSettingsRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

/// Tests missing settings read as None.
#[tokio::test]
async fn get_returns_none_when_unset() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let settings = GuildSettingsRepository::new(db).get(1, "leveling").await?;

    assert!(settings.is_none());

    Ok(())
}

/// Tests saving twice overwrites the stored value.
///
/// Expected: the second value is returned
#[tokio::test]
async fn save_overwrites() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = GuildSettingsRepository::new(db);

    repo.save(1, "tags", r#"{"max_per_member":3}"#.to_string())
        .await?;
    repo.save(1, "tags", r#"{"max_per_member":5}"#.to_string())
        .await?;

    assert_eq!(
        repo.get(1, "tags").await?,
        Some(r#"{"max_per_member":5}"#.to_string())
    );

    Ok(())
}

/// Tests listing settings filters by plugin.
///
/// Expected: only the two events rows
#[tokio::test]
async fn get_all_for_plugin_filters() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_guild_settings(db, "1", "events", "{}").await?;
    factory::create_guild_settings(db, "2", "events", "{}").await?;
    factory::create_guild_settings(db, "1", "tags", "{}").await?;

    let mut guilds: Vec<u64> = GuildSettingsRepository::new(db)
        .get_all_for_plugin("events")
        .await?
        .into_iter()
        .map(|(guild_id, _)| guild_id)
        .collect();
    guilds.sort();

    assert_eq!(guilds, vec![1, 2]);

    Ok(())
}

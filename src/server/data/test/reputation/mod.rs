use crate::server::{
    data::reputation::ReputationRepository,
    error::AppError,
    model::reputation::{Reputation, LEGACY_CATEGORY},
};
use test_utils::{builder::TestBuilder, factory};

/// Tests adding to a missing row creates it.
///
/// Expected: Ok with amount equal to the addition
#[tokio::test]
async fn add_creates_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reputation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let reputation = ReputationRepository::new(db)
        .add(1, 2, LEGACY_CATEGORY, 7)
        .await?;

    assert_eq!(reputation.amount, 7);
    assert_eq!(reputation.category, "legacy");

    Ok(())
}

/// Tests adding merges into an existing amount and keeps categories apart.
///
/// Expected: legacy 10 + 5 = 15, other category untouched
#[tokio::test]
async fn add_is_additive_per_category() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reputation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_reputation(db, "1", "2", LEGACY_CATEGORY, 10).await?;
    factory::create_reputation(db, "1", "2", "helpful", 3).await?;

    let repo = ReputationRepository::new(db);
    let reputation = repo.add(1, 2, LEGACY_CATEGORY, 5).await?;

    assert_eq!(reputation.amount, 15);
    assert_eq!(repo.find(1, 2, "helpful").await?.unwrap().amount, 3);

    Ok(())
}

/// Tests additions past the integer range saturate.
///
/// Expected: Ok with amount i64::MAX
#[tokio::test]
async fn add_saturates() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reputation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_reputation(db, "1", "2", LEGACY_CATEGORY, 10).await?;

    let reputation = ReputationRepository::new(db)
        .add(1, 2, LEGACY_CATEGORY, i64::MAX)
        .await?;

    assert_eq!(reputation.amount, i64::MAX);

    Ok(())
}

/// Tests standings are ordered by amount, ties by user.
///
/// Expected: users 3, 2, 4 in that order
#[tokio::test]
async fn get_by_category_orders_descending() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reputation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_reputation(db, "1", "4", LEGACY_CATEGORY, 5).await?;
    factory::create_reputation(db, "1", "2", LEGACY_CATEGORY, 20).await?;
    factory::create_reputation(db, "1", "3", LEGACY_CATEGORY, 20).await?;
    factory::create_reputation(db, "1", "9", "helpful", 100).await?;

    let standings = ReputationRepository::new(db)
        .get_by_category(1, LEGACY_CATEGORY)
        .await?;

    let users: Vec<u64> = standings.iter().map(|r| r.user_id).collect();
    assert_eq!(users, vec![2, 3, 4]);

    Ok(())
}

/// Tests replacing a category drops rows absent from the new set.
///
/// Expected: only user 5 remains in legacy; helpful untouched
#[tokio::test]
async fn replace_category_swaps_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reputation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_reputation(db, "1", "2", LEGACY_CATEGORY, 20).await?;
    factory::create_reputation(db, "1", "2", "helpful", 1).await?;

    let repo = ReputationRepository::new(db);
    repo.replace_category(
        1,
        LEGACY_CATEGORY,
        vec![Reputation {
            guild_id: 1,
            user_id: 5,
            category: LEGACY_CATEGORY.to_string(),
            amount: 9,
        }],
    )
    .await?;

    let legacy = repo.get_by_category(1, LEGACY_CATEGORY).await?;
    assert_eq!(legacy.len(), 1);
    assert_eq!(legacy[0].user_id, 5);
    assert!(repo.find(1, 2, "helpful").await?.is_some());

    Ok(())
}

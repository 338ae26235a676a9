use super::*;

/// Tests the first grant creates the record.
///
/// Expected: Ok with xp=20, level 0, previous level 0
#[tokio::test]
async fn creates_record_on_first_grant() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let change = MemberXpRepository::new(db)
        .apply_grant(1, 2, XpGrant::xp(20))
        .await?;

    assert_eq!(change.member.xp, 20);
    assert_eq!(change.member.level, 0);
    assert_eq!(change.previous_level, 0);
    assert!(!change.leveled_up());

    Ok(())
}

/// Tests crossing a level boundary reports the level-up.
///
/// Expected: Ok with 390 + 15 = 405 xp, level 2 from 1
#[tokio::test]
async fn reports_level_up() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_member_xp(db, "1", "2", 390).await?;

    let change = MemberXpRepository::new(db)
        .apply_grant(1, 2, XpGrant::xp(15))
        .await?;

    assert_eq!(change.member.xp, 405);
    assert_eq!(change.previous_level, 1);
    assert_eq!(change.member.level, 2);
    assert!(change.leveled_up());

    Ok(())
}

/// Tests activity counters accumulate alongside xp.
///
/// Expected: Ok with every counter summed
#[tokio::test]
async fn accumulates_counters() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::member_xp::MemberXpFactory::new(db, "1")
        .user_id("2")
        .xp(100)
        .voice_minutes(5)
        .reactions(1, 2)
        .build()
        .await?;

    let change = MemberXpRepository::new(db)
        .apply_grant(
            1,
            2,
            XpGrant {
                xp: 10,
                voice_minutes: 1,
                reactions_given: 1,
                reactions_received: 0,
            },
        )
        .await?;

    assert_eq!(change.member.xp, 110);
    assert_eq!(change.member.voice_minutes, 6);
    assert_eq!(change.member.reactions_given, 2);
    assert_eq!(change.member.reactions_received, 2);

    Ok(())
}

/// Tests negative grants never take xp below zero.
///
/// Expected: Ok with xp=0
#[tokio::test]
async fn clamps_at_zero() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_member_xp(db, "1", "2", 50).await?;

    let change = MemberXpRepository::new(db)
        .apply_grant(1, 2, XpGrant::xp(-80))
        .await?;

    assert_eq!(change.member.xp, 0);
    assert_eq!(change.member.level, 0);

    Ok(())
}

/// Tests records are scoped per guild.
///
/// Expected: the grant in guild 1 leaves guild 3 untouched
#[tokio::test]
async fn scopes_by_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_member_xp(db, "3", "2", 500).await?;

    let repo = MemberXpRepository::new(db);
    repo.apply_grant(1, 2, XpGrant::xp(10)).await?;

    let other = repo.find(3, 2).await?.unwrap();
    assert_eq!(other.xp, 500);
    assert_eq!(repo.get_all_by_guild(1).await?.len(), 1);

    Ok(())
}

/// Tests oversized grants saturate instead of overflowing.
///
/// Expected: Ok with xp capped at MAX_XP and counters at i64::MAX
#[tokio::test]
async fn saturates_at_xp_ceiling() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::member_xp::MemberXpFactory::new(db, "1")
        .user_id("2")
        .xp(MAX_XP - 5)
        .voice_minutes(10)
        .reactions(1, 1)
        .build()
        .await?;

    let change = MemberXpRepository::new(db)
        .apply_grant(
            1,
            2,
            XpGrant {
                xp: i64::MAX,
                voice_minutes: i64::MAX,
                reactions_given: i64::MAX,
                reactions_received: i64::MAX,
            },
        )
        .await?;

    assert_eq!(change.member.xp, MAX_XP);
    assert_eq!(change.member.level, level_for_xp(MAX_XP));
    assert_eq!(change.member.voice_minutes, i64::MAX);
    assert_eq!(change.member.reactions_given, i64::MAX);
    assert_eq!(change.member.reactions_received, i64::MAX);

    Ok(())
}

/// Tests grants committed in separate transactions both land.
///
/// Expected: Ok with xp=25 after grants of 10 and 15
#[tokio::test]
async fn transactional_grants_accumulate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for xp in [10, 15] {
        let txn = db.begin().await?;
        MemberXpRepository::new(&txn)
            .apply_grant(1, 2, XpGrant::xp(xp))
            .await?;
        txn.commit().await?;
    }

    let member = MemberXpRepository::new(db).find(1, 2).await?.unwrap();
    assert_eq!(member.xp, 25);

    Ok(())
}

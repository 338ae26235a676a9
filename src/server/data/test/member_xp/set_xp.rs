use super::*;

/// Tests overriding xp recomputes the level and keeps counters.
///
/// Expected: Ok with xp=10000, level 10, voice minutes kept
#[tokio::test]
async fn recomputes_level_and_keeps_counters() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::member_xp::MemberXpFactory::new(db, "1")
        .user_id("2")
        .xp(50)
        .voice_minutes(30)
        .build()
        .await?;

    let member = MemberXpRepository::new(db).set_xp(1, 2, 10_000).await?;

    assert_eq!(member.xp, 10_000);
    assert_eq!(member.level, 10);
    assert_eq!(member.voice_minutes, 30);

    Ok(())
}

/// Tests overriding xp for an unknown member creates the record.
///
/// Expected: Ok with xp=400, level 2
#[tokio::test]
async fn creates_missing_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let member = MemberXpRepository::new(db).set_xp(1, 9, 400).await?;

    assert_eq!(member.level, 2);
    assert_eq!(member.reactions_given, 0);

    Ok(())
}

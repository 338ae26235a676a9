use super::*;

/// Tests replacing a guild's records drops rows missing from the new set.
///
/// Expected: only the replacement rows remain, other guilds untouched
#[tokio::test]
async fn replaces_only_target_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberXp)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_member_xp(db, "1", "2", 50).await?;
    factory::create_member_xp(db, "1", "3", 60).await?;
    factory::create_member_xp(db, "7", "3", 70).await?;

    let repo = MemberXpRepository::new(db);
    let mut keep = repo.find(1, 3).await?.unwrap();
    keep.xp = 10;

    repo.replace_guild(1, vec![keep]).await?;

    let remaining = repo.get_all_by_guild(1).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, 3);
    assert_eq!(remaining[0].xp, 10);
    assert_eq!(repo.get_all_by_guild(7).await?.len(), 1);

    Ok(())
}

//! Leveling business logic: granting XP, leaderboards and admin overrides.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::leveling::{LeaderboardDto, LeaderboardEntryDto, LeaderboardMetric, LevelingSettings},
    server::{
        data::member_xp::MemberXpRepository,
        error::AppError,
        model::member_xp::{MemberXp, XpChange, XpGrant},
        plugin::leveling::formula::MAX_XP,
        service::settings::PluginSettings,
    },
};

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Largest accepted guild XP multiplier.
pub const MAX_XP_MULTIPLIER: f64 = 100.0;

impl PluginSettings for LevelingSettings {
    const PLUGIN: &'static str = "leveling";

    fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=MAX_XP_MULTIPLIER).contains(&self.xp_multiplier) {
            return Err(AppError::BadRequest(format!(
                "XP multiplier must be between 0 and {}",
                MAX_XP_MULTIPLIER
            )));
        }

        Ok(())
    }
}

/// Scales an XP amount by the guild multiplier, rounding to the nearest point.
///
/// Results outside `i64` saturate.
pub fn scale_xp(amount: i64, multiplier: f64) -> i64 {
    (amount as f64 * multiplier).round() as i64
}

fn metric_value(member: &MemberXp, metric: LeaderboardMetric) -> i64 {
    match metric {
        LeaderboardMetric::Xp => member.xp,
        LeaderboardMetric::Voice => member.voice_minutes,
        LeaderboardMetric::Reactions => member
            .reactions_given
            .saturating_add(member.reactions_received),
    }
}

/// Orders members by a metric, highest first with ties broken by user ID, and keeps
/// the first `limit`.
pub fn rank_members(
    mut members: Vec<MemberXp>,
    metric: LeaderboardMetric,
    limit: usize,
) -> Vec<LeaderboardEntryDto> {
    members.sort_by(|a, b| {
        metric_value(b, metric)
            .cmp(&metric_value(a, metric))
            .then(a.user_id.cmp(&b.user_id))
    });

    members
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, member)| LeaderboardEntryDto {
            rank: index + 1,
            user_id: member.user_id,
            value: metric_value(&member, metric),
            level: member.level,
        })
        .collect()
}

pub struct LevelingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LevelingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a grant with the XP portion scaled by the multiplier.
    ///
    /// The read-modify-write runs in one transaction.
    pub async fn grant(
        &self,
        guild_id: u64,
        user_id: u64,
        grant: XpGrant,
        multiplier: f64,
    ) -> Result<XpChange, AppError> {
        let grant = XpGrant {
            xp: scale_xp(grant.xp, multiplier),
            ..grant
        };

        let txn = self.db.begin().await?;
        let change = MemberXpRepository::new(&txn)
            .apply_grant(guild_id, user_id, grant)
            .await?;
        txn.commit().await?;

        Ok(change)
    }

    /// Gets a member's record; members who never earned anything get an empty one.
    pub async fn get_member(&self, guild_id: u64, user_id: u64) -> Result<MemberXp, AppError> {
        let member = MemberXpRepository::new(self.db)
            .find(guild_id, user_id)
            .await?
            .unwrap_or_else(|| MemberXp::empty(guild_id, user_id));

        Ok(member)
    }

    /// Gets a member's 1-based XP rank, `None` without a record.
    pub async fn get_rank(&self, guild_id: u64, user_id: u64) -> Result<Option<usize>, AppError> {
        let members = MemberXpRepository::new(self.db)
            .get_all_by_guild(guild_id)
            .await?;
        let total = members.len();

        let rank = rank_members(members, LeaderboardMetric::Xp, total)
            .into_iter()
            .find(|entry| entry.user_id == user_id)
            .map(|entry| entry.rank);

        Ok(rank)
    }

    pub async fn leaderboard(
        &self,
        guild_id: u64,
        metric: LeaderboardMetric,
        limit: usize,
    ) -> Result<LeaderboardDto, AppError> {
        let members = MemberXpRepository::new(self.db)
            .get_all_by_guild(guild_id)
            .await?;

        Ok(LeaderboardDto {
            metric,
            entries: rank_members(members, metric, limit),
        })
    }

    /// Overrides a member's XP total; the level follows.
    pub async fn set_xp(&self, guild_id: u64, user_id: u64, xp: i64) -> Result<MemberXp, AppError> {
        if !(0..=MAX_XP).contains(&xp) {
            return Err(AppError::BadRequest(format!(
                "XP must be between 0 and {}",
                MAX_XP
            )));
        }

        MemberXpRepository::new(self.db)
            .set_xp(guild_id, user_id, xp)
            .await
    }

    /// Deletes a member's record.
    ///
    /// # Returns
    /// - `Ok(())` - Record deleted
    /// - `Err(AppError::NotFound)` - Member has no record
    pub async fn reset_member(&self, guild_id: u64, user_id: u64) -> Result<(), AppError> {
        let deleted = MemberXpRepository::new(self.db)
            .delete(guild_id, user_id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound(format!(
                "Member {} has no leveling record in guild {}",
                user_id, guild_id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    fn member(user_id: u64, xp: i64, voice_minutes: i64, reactions: (i64, i64)) -> MemberXp {
        MemberXp {
            xp,
            level: crate::server::plugin::leveling::formula::level_for_xp(xp),
            voice_minutes,
            reactions_given: reactions.0,
            reactions_received: reactions.1,
            updated_at: Utc::now(),
            ..MemberXp::empty(1, user_id)
        }
    }

    #[test]
    fn multiplier_rounds_to_nearest() {
        assert_eq!(scale_xp(15, 1.0), 15);
        assert_eq!(scale_xp(15, 1.5), 23);
        assert_eq!(scale_xp(3, 0.5), 2);
        assert_eq!(scale_xp(25, 0.0), 0);
    }

    #[test]
    fn rejects_negative_multiplier() {
        let settings = LevelingSettings {
            xp_multiplier: -1.0,
            ..Default::default()
        };

        assert!(matches!(settings.validate(), Err(AppError::BadRequest(_))));
        assert!(LevelingSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_unbounded_multipliers() {
        for xp_multiplier in [1e300, f64::INFINITY, f64::NAN, MAX_XP_MULTIPLIER + 0.5] {
            let settings = LevelingSettings {
                xp_multiplier,
                ..Default::default()
            };
            assert!(
                matches!(settings.validate(), Err(AppError::BadRequest(_))),
                "{} accepted",
                xp_multiplier
            );
        }

        let settings = LevelingSettings {
            xp_multiplier: MAX_XP_MULTIPLIER,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn scaling_saturates() {
        assert_eq!(scale_xp(10, 1e300), i64::MAX);
        assert_eq!(scale_xp(i64::MAX, MAX_XP_MULTIPLIER), i64::MAX);
    }

    #[test]
    fn ranks_descending_with_ties_by_user_id() {
        let members = vec![
            member(3, 500, 0, (0, 0)),
            member(1, 900, 0, (0, 0)),
            member(2, 500, 0, (0, 0)),
        ];

        let ranked = rank_members(members, LeaderboardMetric::Xp, 10);

        let order: Vec<(usize, u64)> = ranked.iter().map(|e| (e.rank, e.user_id)).collect();
        assert_eq!(order, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn ranks_by_voice_and_reaction_totals() {
        let members = vec![
            member(1, 900, 5, (1, 1)),
            member(2, 100, 50, (0, 0)),
            member(3, 0, 0, (4, 3)),
        ];

        let voice = rank_members(members.clone(), LeaderboardMetric::Voice, 1);
        assert_eq!(voice.len(), 1);
        assert_eq!((voice[0].user_id, voice[0].value), (2, 50));

        let reactions = rank_members(members, LeaderboardMetric::Reactions, 10);
        assert_eq!((reactions[0].user_id, reactions[0].value), (3, 7));
    }

    #[tokio::test]
    async fn grant_scales_xp_and_reports_level_up() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::MemberXp)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_member_xp(db, "1", "2", 90).await?;

        let change = LevelingService::new(db)
            .grant(1, 2, XpGrant::xp(10), 2.0)
            .await?;

        assert_eq!(change.member.xp, 110);
        assert_eq!(change.member.level, 1);
        assert!(change.leveled_up());

        Ok(())
    }

    #[tokio::test]
    async fn huge_multiplier_grant_stops_at_xp_ceiling() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::MemberXp)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_member_xp(db, "1", "2", 10).await?;

        let service = LevelingService::new(db);
        service.grant(1, 2, XpGrant::xp(15), 1e300).await?;
        let change = service.grant(1, 2, XpGrant::xp(15), 1e300).await?;

        assert_eq!(change.member.xp, MAX_XP);
        assert_eq!(change.member.level, 100_000);

        Ok(())
    }

    #[tokio::test]
    async fn leaderboard_defaults_are_bounded() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::MemberXp)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        for user in 1..=15 {
            factory::create_member_xp(db, "1", &user.to_string(), user * 10).await?;
        }

        let board = LevelingService::new(db)
            .leaderboard(1, LeaderboardMetric::Xp, DEFAULT_LEADERBOARD_LIMIT)
            .await?;

        assert_eq!(board.entries.len(), 10);
        assert_eq!(board.entries[0].user_id, 15);
        assert!(board.entries.windows(2).all(|w| w[0].value >= w[1].value));

        Ok(())
    }

    #[tokio::test]
    async fn rank_of_member_without_record_is_none() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::MemberXp)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_member_xp(db, "1", "5", 300).await?;
        factory::create_member_xp(db, "1", "6", 700).await?;

        let service = LevelingService::new(db);

        assert_eq!(service.get_rank(1, 5).await?, Some(2));
        assert_eq!(service.get_rank(1, 7).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn set_xp_rejects_negative_and_reset_requires_record() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::MemberXp)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = LevelingService::new(db);

        assert!(matches!(service.set_xp(1, 2, -1).await, Err(AppError::BadRequest(_))));
        assert!(matches!(
            service.set_xp(1, 2, i64::MAX).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(service.reset_member(1, 2).await, Err(AppError::NotFound(_))));

        let member = service.set_xp(1, 2, 400).await?;
        assert_eq!(member.level, 2);
        service.reset_member(1, 2).await?;

        Ok(())
    }
}

//! Conversion rates from external bots' numbers to ours.

use crate::{
    model::migration::{LegacyLevelEntryDto, LegacyReputationEntryDto},
    server::{
        error::AppError,
        plugin::leveling::formula::{xp_for_level, MAX_XP},
    },
};

/// Fraction of external XP carried over.
pub const LEVELING_XP_RATE: f64 = 0.25;
pub const REPUTATION_RATE: i64 = 1;

/// Highest external level accepted.
pub const MAX_LEGACY_LEVEL: i64 = 10_000;

/// Highest external XP accepted; a quarter of it stays under the XP ceiling.
pub const MAX_LEGACY_XP: i64 = MAX_XP;

/// Highest external reputation accepted per member.
pub const MAX_LEGACY_REPUTATION: i64 = 1_000_000_000;

/// XP granted for an external record: the scaled XP, but never less than what the
/// held level requires here.
pub fn converted_xp(entry: &LegacyLevelEntryDto) -> i64 {
    let scaled = (entry.xp as f64 * LEVELING_XP_RATE).round() as i64;
    scaled.max(xp_for_level(entry.level as i32))
}

pub fn converted_reputation(entry: &LegacyReputationEntryDto) -> i64 {
    entry.reputation * REPUTATION_RATE
}

pub fn validate_level_entries(entries: &[LegacyLevelEntryDto]) -> Result<(), AppError> {
    for entry in entries {
        if entry.xp < 0 || entry.level < 0 {
            return Err(AppError::BadRequest(format!(
                "Entry for user {} has negative level or XP",
                entry.user_id
            )));
        }
        if entry.level > MAX_LEGACY_LEVEL {
            return Err(AppError::BadRequest(format!(
                "Entry for user {} has level {} above {}",
                entry.user_id, entry.level, MAX_LEGACY_LEVEL
            )));
        }
        if entry.xp > MAX_LEGACY_XP {
            return Err(AppError::BadRequest(format!(
                "Entry for user {} has XP {} above {}",
                entry.user_id, entry.xp, MAX_LEGACY_XP
            )));
        }
    }

    Ok(())
}

pub fn validate_reputation_entries(entries: &[LegacyReputationEntryDto]) -> Result<(), AppError> {
    match entries
        .iter()
        .find(|entry| !(0..=MAX_LEGACY_REPUTATION).contains(&entry.reputation))
    {
        Some(entry) => Err(AppError::BadRequest(format!(
            "Entry for user {} has reputation outside 0..={}",
            entry.user_id, MAX_LEGACY_REPUTATION
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_entry(level: i64, xp: i64) -> LegacyLevelEntryDto {
        LegacyLevelEntryDto {
            user_id: 1,
            level,
            xp,
        }
    }

    #[test]
    fn scales_xp_by_a_quarter() {
        assert_eq!(converted_xp(&level_entry(0, 1000)), 250);
        assert_eq!(converted_xp(&level_entry(0, 10)), 3);
    }

    #[test]
    fn never_lands_below_held_level() {
        // Level 5 needs 2500 XP here; a quarter of 4000 is only 1000
        assert_eq!(converted_xp(&level_entry(5, 4000)), 2500);
    }

    #[test]
    fn reputation_is_carried_one_to_one() {
        let entry = LegacyReputationEntryDto {
            user_id: 1,
            reputation: 42,
        };

        assert_eq!(converted_reputation(&entry), 42);
    }

    #[test]
    fn rejects_negative_and_oversized_entries() {
        assert!(validate_level_entries(&[level_entry(1, -1)]).is_err());
        assert!(validate_level_entries(&[level_entry(-1, 0)]).is_err());
        assert!(validate_level_entries(&[level_entry(MAX_LEGACY_LEVEL + 1, 0)]).is_err());
        assert!(validate_level_entries(&[level_entry(0, MAX_LEGACY_XP + 1)]).is_err());
        assert!(validate_level_entries(&[level_entry(0, i64::MAX)]).is_err());
        assert!(validate_level_entries(&[level_entry(3, 900)]).is_ok());

        let negative = LegacyReputationEntryDto {
            user_id: 1,
            reputation: -5,
        };
        assert!(matches!(
            validate_reputation_entries(&[negative]),
            Err(AppError::BadRequest(_))
        ));

        let oversized = LegacyReputationEntryDto {
            user_id: 1,
            reputation: i64::MAX,
        };
        assert!(matches!(
            validate_reputation_entries(&[oversized]),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn largest_accepted_entry_stays_under_xp_ceiling() {
        let entry = level_entry(MAX_LEGACY_LEVEL, MAX_LEGACY_XP);

        assert!(validate_level_entries(std::slice::from_ref(&entry)).is_ok());
        assert!(converted_xp(&entry) <= MAX_XP);
    }
}

//! Level curve: reaching level `L` takes `L² × 100` total XP.

const XP_PER_LEVEL_UNIT: i64 = 100;

/// Ceiling on a member's XP total, level 100 000.
pub const MAX_XP: i64 = 1_000_000_000_000;

/// Level held at a total XP, `floor(sqrt(xp / 100))`.
///
/// Negative totals are treated as zero and totals above [`MAX_XP`] as `MAX_XP`.
pub fn level_for_xp(xp: i64) -> i32 {
    if xp <= 0 {
        return 0;
    }
    let xp = xp.min(MAX_XP);

    let mut level = ((xp as f64) / XP_PER_LEVEL_UNIT as f64).sqrt() as i64;

    // Float rounding can land one off near perfect squares
    while level > 0 && xp_for_level(level as i32) > xp {
        level -= 1;
    }
    while xp_for_level(level as i32 + 1) <= xp {
        level += 1;
    }

    level as i32
}

/// Total XP at which `level` is reached.
pub fn xp_for_level(level: i32) -> i64 {
    let level = level.max(0) as i64;
    level
        .saturating_mul(level)
        .saturating_mul(XP_PER_LEVEL_UNIT)
}

//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Level implied by an xp total, mirroring the application's leveling curve.
///
/// Factories use this so inserted rows honor the `level == floor(sqrt(xp / 100))`
/// invariant without depending on the application crate.
pub fn level_for_xp(xp: i64) -> i32 {
    let mut level: i64 = 0;
    while (level + 1) * (level + 1) * 100 <= xp {
        level += 1;
    }
    level as i32
}

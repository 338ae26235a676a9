//! In-memory activity state: message cooldowns and open voice sessions.

use chrono::{DateTime, Duration, Utc};
use dashmap::{mapref::entry::Entry, DashMap};

/// Minimum time between two XP-earning messages from one member in one guild.
pub const MESSAGE_COOLDOWN_SECONDS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
struct VoiceSession {
    channel_id: u64,
    /// Time up to which the session has been credited.
    credited_at: DateTime<Utc>,
}

/// Whole voice minutes owed to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceCredit {
    pub guild_id: u64,
    pub user_id: u64,
    pub channel_id: u64,
    pub minutes: i64,
}

#[derive(Default)]
pub struct ActivityTracker {
    cooldowns: DashMap<(u64, u64), DateTime<Utc>>,
    voice_sessions: DashMap<(u64, u64), VoiceSession>,
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the member's message cooldown.
    ///
    /// Returns `false` while a previous claim is less than a minute old.
    pub fn try_claim_message(&self, guild_id: u64, user_id: u64, now: DateTime<Utc>) -> bool {
        match self.cooldowns.entry((guild_id, user_id)) {
            Entry::Occupied(mut entry) => {
                if now - *entry.get() < Duration::seconds(MESSAGE_COOLDOWN_SECONDS) {
                    return false;
                }
                entry.insert(now);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    /// Opens a voice session, or moves an open one to another channel.
    pub fn join_voice(&self, guild_id: u64, user_id: u64, channel_id: u64, now: DateTime<Utc>) {
        self.voice_sessions
            .entry((guild_id, user_id))
            .and_modify(|session| session.channel_id = channel_id)
            .or_insert(VoiceSession {
                channel_id,
                credited_at: now,
            });
    }

    /// Closes a voice session, returning the uncredited whole minutes.
    pub fn leave_voice(&self, guild_id: u64, user_id: u64, now: DateTime<Utc>) -> Option<VoiceCredit> {
        let (_, session) = self.voice_sessions.remove(&(guild_id, user_id))?;
        let minutes = (now - session.credited_at).num_minutes();

        (minutes > 0).then_some(VoiceCredit {
            guild_id,
            user_id,
            channel_id: session.channel_id,
            minutes,
        })
    }

    /// Credits every open session with its elapsed whole minutes.
    ///
    /// Leftover seconds stay on the session for the next sweep.
    pub fn sweep_voice(&self, now: DateTime<Utc>) -> Vec<VoiceCredit> {
        let mut credits = Vec::new();

        for mut session in self.voice_sessions.iter_mut() {
            let minutes = (now - session.credited_at).num_minutes();
            if minutes <= 0 {
                continue;
            }

            session.credited_at += Duration::minutes(minutes);
            let (guild_id, user_id) = *session.key();
            credits.push(VoiceCredit {
                guild_id,
                user_id,
                channel_id: session.channel_id,
                minutes,
            });
        }

        credits
    }

    pub fn open_voice_sessions(&self) -> usize {
        self.voice_sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn message_cooldown_blocks_for_a_minute() {
        let tracker = ActivityTracker::new();

        assert!(tracker.try_claim_message(1, 2, at(0)));
        assert!(!tracker.try_claim_message(1, 2, at(59)));
        assert!(tracker.try_claim_message(1, 2, at(60)));
        assert!(!tracker.try_claim_message(1, 2, at(61)));
    }

    #[test]
    fn cooldown_is_per_guild_and_member() {
        let tracker = ActivityTracker::new();

        assert!(tracker.try_claim_message(1, 2, at(0)));
        assert!(tracker.try_claim_message(1, 3, at(1)));
        assert!(tracker.try_claim_message(9, 2, at(2)));
    }

    #[test]
    fn sweep_credits_whole_minutes_and_keeps_remainder() {
        let tracker = ActivityTracker::new();
        tracker.join_voice(1, 2, 10, at(0));

        assert!(tracker.sweep_voice(at(59)).is_empty());

        let credits = tracker.sweep_voice(at(150));
        assert_eq!(
            credits,
            vec![VoiceCredit {
                guild_id: 1,
                user_id: 2,
                channel_id: 10,
                minutes: 2
            }]
        );

        // 30 seconds left over from the sweep plus 40 more
        let settled = tracker.leave_voice(1, 2, at(190)).unwrap();
        assert_eq!(settled.minutes, 1);
        assert_eq!(tracker.open_voice_sessions(), 0);
    }

    #[test]
    fn moving_channels_keeps_session_open() {
        let tracker = ActivityTracker::new();
        tracker.join_voice(1, 2, 10, at(0));
        tracker.join_voice(1, 2, 11, at(120));

        let settled = tracker.leave_voice(1, 2, at(185)).unwrap();

        assert_eq!(settled.minutes, 3);
        assert_eq!(settled.channel_id, 11);
    }

    #[test]
    fn short_session_earns_nothing() {
        let tracker = ActivityTracker::new();
        tracker.join_voice(1, 2, 10, at(0));

        assert_eq!(tracker.leave_voice(1, 2, at(45)), None);
        assert_eq!(tracker.leave_voice(1, 2, at(500)), None);
    }
}

//! Leveling records and the grants applied to them.

use chrono::{DateTime, Utc};

use crate::{
    model::leveling::{LevelProgressDto, MemberXpDto},
    server::{
        error::AppError, plugin::leveling::formula, util::parse::parse_u64_from_string,
    },
};

/// A member's leveling record in one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberXp {
    pub guild_id: u64,
    pub user_id: u64,
    pub xp: i64,
    /// Always `formula::level_for_xp(xp)`.
    pub level: i32,
    pub voice_minutes: i64,
    pub reactions_given: i64,
    pub reactions_received: i64,
    pub updated_at: DateTime<Utc>,
}

impl MemberXp {
    /// Empty record for a member who has not earned anything yet.
    pub fn empty(guild_id: u64, user_id: u64) -> Self {
        Self {
            guild_id,
            user_id,
            xp: 0,
            level: 0,
            voice_minutes: 0,
            reactions_given: 0,
            reactions_received: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn from_entity(entity: entity::member_xp::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            xp: entity.xp,
            level: entity.level,
            voice_minutes: entity.voice_minutes,
            reactions_given: entity.reactions_given,
            reactions_received: entity.reactions_received,
            updated_at: entity.updated_at,
        })
    }

    pub fn progress(&self) -> LevelProgressDto {
        let floor = formula::xp_for_level(self.level);
        let next = formula::xp_for_level(self.level + 1);

        LevelProgressDto {
            current: self.xp - floor,
            required: next - floor,
            next_level_xp: next,
        }
    }

    pub fn into_dto(self) -> MemberXpDto {
        let progress = self.progress();

        MemberXpDto {
            user_id: self.user_id,
            xp: self.xp,
            level: self.level,
            voice_minutes: self.voice_minutes,
            reactions_given: self.reactions_given,
            reactions_received: self.reactions_received,
            progress,
            updated_at: self.updated_at,
        }
    }
}

/// Amounts added to a member's record in one atomic update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XpGrant {
    pub xp: i64,
    pub voice_minutes: i64,
    pub reactions_given: i64,
    pub reactions_received: i64,
}

impl XpGrant {
    pub fn xp(xp: i64) -> Self {
        Self {
            xp,
            ..Default::default()
        }
    }
}

/// Result of applying a grant: the stored record and the level it had before.
#[derive(Debug, Clone, PartialEq)]
pub struct XpChange {
    pub member: MemberXp,
    pub previous_level: i32,
}

impl XpChange {
    pub fn leveled_up(&self) -> bool {
        self.member.level > self.previous_level
    }
}

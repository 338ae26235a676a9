use crate::{
    model::migration::ReputationStandingDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// Category reserved for reputation imported from an external system.
pub const LEGACY_CATEGORY: &str = "legacy";

#[derive(Debug, Clone, PartialEq)]
pub struct Reputation {
    pub guild_id: u64,
    pub user_id: u64,
    pub category: String,
    pub amount: i64,
}

impl Reputation {
    pub fn from_entity(entity: entity::reputation::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            category: entity.category,
            amount: entity.amount,
        })
    }

    pub fn into_standing_dto(self) -> ReputationStandingDto {
        ReputationStandingDto {
            user_id: self.user_id,
            amount: self.amount,
        }
    }
}

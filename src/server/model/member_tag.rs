use chrono::{DateTime, Utc};

use crate::{
    model::tags::MemberTagsDto,
    server::{
        error::AppError,
        util::parse::{parse_stored_json, parse_u64_from_string},
    },
};

/// A member's self-declared genres and DAWs.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberTags {
    pub guild_id: u64,
    pub user_id: u64,
    pub genres: Vec<String>,
    pub daws: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl MemberTags {
    pub fn empty(guild_id: u64, user_id: u64) -> Self {
        Self {
            guild_id,
            user_id,
            genres: Vec::new(),
            daws: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn from_entity(entity: entity::member_tag::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            genres: parse_stored_json("member genres", &entity.genres)?,
            daws: parse_stored_json("member DAWs", &entity.daws)?,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> MemberTagsDto {
        MemberTagsDto {
            user_id: self.user_id,
            genres: self.genres,
            daws: self.daws,
        }
    }
}

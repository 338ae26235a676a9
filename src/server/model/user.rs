//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::user::UserDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// Dashboard user with Discord identity and site admin flag.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub discord_id: u64,
    pub name: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn into_dto(self) -> UserDto {
        UserDto {
            discord_id: self.discord_id,
            name: self.name,
            admin: self.admin,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored Discord ID is not a u64
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        Ok(Self {
            discord_id: parse_u64_from_string(entity.discord_id)?,
            name: entity.name,
            admin: entity.admin,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for upserting a user on login.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub discord_id: u64,
    pub name: String,
    /// `None` preserves the stored admin flag.
    pub is_admin: Option<bool>,
}

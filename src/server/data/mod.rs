//! Database repository layer for all domain entities.
//!
//! Repositories use SeaORM entity models internally and return domain models so the
//! service layer never handles stored string snowflakes. Repositories that take part in
//! multi-row updates are generic over `ConnectionTrait` so services can hand them a
//! transaction instead of the pool.

pub mod guild_settings;
pub mod member_tag;
pub mod member_xp;
pub mod migration_backup;
pub mod reputation;
pub mod sent_message;
pub mod synced_event;
pub mod user;

#[cfg(test)]
mod test;

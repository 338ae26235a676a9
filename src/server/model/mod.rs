//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Snowflake IDs are parsed from their
//! stored string form to `u64` here.

pub mod member_tag;
pub mod member_xp;
pub mod migration;
pub mod reputation;
pub mod sent_message;
pub mod user;

//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::user::create_user(&db).await?;
//!     let member = factory::member_xp::MemberXpFactory::new(&db, "1")
//!         .xp(450)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create dashboard user entities
//! - `member_xp` - Create leveling records (level is derived from xp)
//! - `member_tag` - Create genre/DAW tag records
//! - `reputation` - Create reputation records
//! - `guild_settings` - Store a plugin's settings JSON for a guild

pub mod guild_settings;
pub mod helpers;
pub mod member_tag;
pub mod member_xp;
pub mod reputation;
pub mod user;

pub use guild_settings::create_guild_settings;
pub use member_tag::create_member_tag;
pub use member_xp::create_member_xp;
pub use reputation::create_reputation;
pub use user::{create_admin, create_user};

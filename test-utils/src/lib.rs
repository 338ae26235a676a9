//! Guildboard Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the guildboard
//! application. This crate offers a builder pattern for creating test contexts with in-memory
//! SQLite databases and customizable table schemas.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and session
//! - **factory**: Entity factories inserting rows with sensible defaults
//! - **serenity**: Serenity API objects built from JSON the way Discord returns them
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::MemberXp;
//!
//! #[tokio::test]
//! async fn test_member_xp() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(MemberXp)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;

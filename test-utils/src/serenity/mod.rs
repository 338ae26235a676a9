//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity objects by deserializing JSON, simulating
//! what Discord's API would return.
//!
//! # Available Factories
//!
//! - `role::create_test_role` - Create Serenity Role objects with a permission set
//! - `channel::create_test_channel` - Create Serenity GuildChannel objects of any type

pub mod channel;
pub mod role;

pub use channel::create_test_channel;
pub use role::create_test_role;

//! Data transfer objects shared by the HTTP API.
//!
//! These types define the JSON contract of the dashboard API. Discord snowflakes are
//! serialized as strings so browser clients never lose precision on 64-bit IDs.

pub mod api;
pub mod event_sync;
pub mod leveling;
pub mod messaging;
pub mod migration;
pub mod plugin;
pub mod snowflake;
pub mod tags;
pub mod user;
pub mod word_filter;

//! Service layer for business logic and orchestration.
//!
//! Services sit between controllers and repositories. They work with domain models,
//! coordinate multiple repositories or external calls, and own transaction boundaries.
//! Plugin-specific services live next to their plugin under `plugin/`.

pub mod auth;
pub mod settings;
pub mod user;

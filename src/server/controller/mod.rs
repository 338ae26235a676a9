//! HTTP request handlers for the core application routes.
//!
//! Handlers authenticate through `AuthGuard`, call into services, and convert domain
//! models to DTOs. Plugin handlers live in each plugin's `controller` module.

pub mod auth;
pub mod plugin;
pub mod user;

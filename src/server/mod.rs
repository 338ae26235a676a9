//! Dashboard API, Discord bot and the plugins that run on both.
//!
//! # Layers
//!
//! - `controller/` - Core HTTP handlers: login, the user's guilds, the plugin catalog
//! - `service/` - Auth, settings storage and guild listing shared by every plugin
//! - `data/` - Repositories; snowflakes are parsed from their stored strings here
//! - `model/` - Domain types and the parameter structs passed to repositories
//! - `error/` - `AppError` and its mapping onto HTTP status codes
//! - `middleware/` - Session wrappers, `AuthGuard` and the guild permission checker
//!
//! # Runtime
//!
//! - `config` / `startup` - Environment, database, sessions, outbound clients
//! - `bot/` - Gateway handler publishing `BotEvent`s onto the `EventBus`
//! - `plugin/` - Feature plugins and the registry aggregating their routes, commands,
//!   jobs and dashboard fragments
//! - `scheduler/` - Runs the plugins' cron jobs
//! - `router` - Merges core and plugin routes and serves the OpenAPI docs
//!
//! A plugin keeps its controller, service and helpers together under `plugin/<id>/`.
//! Its handlers follow the same path as the core ones: `AuthGuard` first, then a
//! service call, then a DTO in the response.

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod plugin;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;

//! Feature plugins and the registry that wires them together.
//!
//! A plugin contributes any of: HTTP routes (nested under `/api/plugins/<id>`), a
//! dashboard fragment, slash commands, scheduled jobs, and a bot event handler. Plugins
//! are listed explicitly in [`registrations`] and receive their handles through
//! [`PluginContext`]; nothing is discovered at runtime.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{all::CreateCommand, async_trait, http::Http};
use tokio_cron_scheduler::Job;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    model::plugin::{DashboardFragmentDto, NavPlacementDto, PluginMetaDto},
    server::{bot::event::{BotEvent, EventBus}, error::AppError, state::AppState},
};

pub mod events;
pub mod leveling;
pub mod messaging;
pub mod migration;
pub mod registry;
pub mod tags;
pub mod word_filter;

pub use registry::PluginCatalog;

#[derive(Debug, Clone, PartialEq)]
pub struct PluginMeta {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
}

impl PluginMeta {
    pub fn into_dto(self) -> PluginMetaDto {
        PluginMetaDto {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            version: self.version.to_string(),
        }
    }
}

/// Where a fragment appears in the dashboard navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct NavPlacement {
    pub section: &'static str,
    pub order: i32,
}

/// UI markup a plugin contributes to the dashboard shell.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFragment {
    pub id: &'static str,
    pub name: &'static str,
    pub html: &'static str,
    pub script: &'static str,
    /// `None` renders the fragment without a navigation entry.
    pub nav: Option<NavPlacement>,
}

impl DashboardFragment {
    pub fn into_dto(self) -> DashboardFragmentDto {
        DashboardFragmentDto {
            id: self.id.to_string(),
            name: self.name.to_string(),
            html: self.html.to_string(),
            script: self.script.to_string(),
            nav: self.nav.map(|nav| NavPlacementDto {
                section: nav.section.to_string(),
                order: nav.order,
            }),
        }
    }
}

/// A slash command definition paired with its name.
///
/// The name is kept alongside the builder so the registry can detect collisions.
pub struct SlashCommand {
    pub name: &'static str,
    pub builder: CreateCommand,
}

impl SlashCommand {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            builder: CreateCommand::new(name).description(description),
        }
    }

    pub fn configure(mut self, f: impl FnOnce(CreateCommand) -> CreateCommand) -> Self {
        self.builder = f(self.builder);
        self
    }
}

/// Shared handles injected into every plugin constructor.
#[derive(Clone)]
pub struct PluginContext {
    pub db: DatabaseConnection,
    pub http: Arc<Http>,
    pub bus: EventBus,
    /// Shared client for outbound downloads such as spreadsheet exports.
    pub sheet_client: reqwest::Client,
}

#[async_trait]
pub trait Plugin: Send + Sync {
    fn meta(&self) -> PluginMeta;

    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
    }

    fn dashboard(&self) -> Option<DashboardFragment> {
        None
    }

    fn commands(&self) -> Vec<SlashCommand> {
        Vec::new()
    }

    fn jobs(&self) -> Result<Vec<Job>, AppError> {
        Ok(Vec::new())
    }

    /// Receives every event published on the bus, including ones meant for other plugins.
    async fn handle_event(&self, _event: &BotEvent) -> Result<(), AppError> {
        Ok(())
    }
}

pub type PluginConstructor = fn(&PluginContext) -> Result<Arc<dyn Plugin>, AppError>;

pub struct PluginRegistration {
    pub id: &'static str,
    pub build: PluginConstructor,
}

/// Every plugin shipped with the application, in load order.
pub fn registrations() -> Vec<PluginRegistration> {
    vec![
        leveling::registration(),
        migration::registration(),
        tags::registration(),
        events::registration(),
        messaging::registration(),
        word_filter::registration(),
    ]
}

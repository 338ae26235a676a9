//! One-shot imports from external leveling and reputation bots.

pub mod controller;
pub mod convert;
pub mod service;

use std::sync::Arc;

use serenity::async_trait;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    error::AppError,
    plugin::{
        DashboardFragment, NavPlacement, Plugin, PluginContext, PluginMeta, PluginRegistration,
    },
    state::AppState,
};

pub const PLUGIN_ID: &str = "migration";

pub fn registration() -> PluginRegistration {
    PluginRegistration {
        id: PLUGIN_ID,
        build,
    }
}

fn build(_ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
    Ok(Arc::new(MigrationPlugin))
}

pub struct MigrationPlugin;

#[async_trait]
impl Plugin for MigrationPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            id: PLUGIN_ID,
            name: "Migration",
            description: "Import XP and reputation from other bots",
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
            .routes(routes!(controller::migrate_leveling))
            .routes(routes!(
                controller::migrate_reputation,
                controller::get_legacy_reputation
            ))
            .routes(routes!(controller::get_backups))
            .routes(routes!(controller::restore_backup))
    }

    fn dashboard(&self) -> Option<DashboardFragment> {
        Some(DashboardFragment {
            id: PLUGIN_ID,
            name: "Migration",
            html: include_str!("dashboard.html"),
            script: include_str!("dashboard.js"),
            nav: Some(NavPlacement {
                section: "tools",
                order: 90,
            }),
        })
    }
}

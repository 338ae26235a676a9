//! Dashboard-composed messages and announcements posted by the bot.

pub mod controller;
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

pub const PLUGIN_ID: &str = "messaging";

pub fn registration() -> PluginRegistration {
    PluginRegistration {
        id: PLUGIN_ID,
        build,
    }
}

fn build(_ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
    Ok(Arc::new(MessagingPlugin))
}

pub struct MessagingPlugin;

#[async_trait]
impl Plugin for MessagingPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            id: PLUGIN_ID,
            name: "Messages",
            description: "Compose and edit bot messages and announcements",
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
            .routes(routes!(controller::get_channels))
            .routes(routes!(controller::send_message, controller::get_messages))
            .routes(routes!(controller::edit_message))
    }

    fn dashboard(&self) -> Option<DashboardFragment> {
        Some(DashboardFragment {
            id: PLUGIN_ID,
            name: "Messages",
            html: include_str!("dashboard.html"),
            script: include_str!("dashboard.js"),
            nav: Some(NavPlacement {
                section: "tools",
                order: 10,
            }),
        })
    }
}

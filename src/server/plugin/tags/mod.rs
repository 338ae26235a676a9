//! Genre and DAW tags members attach to themselves for discovery.

pub mod commands;
pub mod controller;
pub mod normalize;
pub mod service;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{async_trait, http::Http};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    bot::event::BotEvent,
    error::AppError,
    plugin::{
        DashboardFragment, NavPlacement, Plugin, PluginContext, PluginMeta, PluginRegistration,
        SlashCommand,
    },
    state::AppState,
};

pub const PLUGIN_ID: &str = "tags";

pub fn registration() -> PluginRegistration {
    PluginRegistration {
        id: PLUGIN_ID,
        build,
    }
}

fn build(ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
    Ok(Arc::new(TagsPlugin {
        db: ctx.db.clone(),
        http: ctx.http.clone(),
    }))
}

pub struct TagsPlugin {
    db: DatabaseConnection,
    http: Arc<Http>,
}

#[async_trait]
impl Plugin for TagsPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            id: PLUGIN_ID,
            name: "Genre Tags",
            description: "Members tag their genres and DAWs to find each other",
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
            .routes(routes!(controller::get_settings, controller::update_settings))
            .routes(routes!(controller::get_members))
            .routes(routes!(
                controller::get_member,
                controller::update_member,
                controller::delete_member
            ))
            .routes(routes!(controller::search))
    }

    fn dashboard(&self) -> Option<DashboardFragment> {
        Some(DashboardFragment {
            id: PLUGIN_ID,
            name: "Genre Tags",
            html: include_str!("dashboard.html"),
            script: include_str!("dashboard.js"),
            nav: Some(NavPlacement {
                section: "community",
                order: 20,
            }),
        })
    }

    fn commands(&self) -> Vec<SlashCommand> {
        commands::definitions()
    }

    async fn handle_event(&self, event: &BotEvent) -> Result<(), AppError> {
        match event {
            BotEvent::Command(command) => commands::respond(&self.db, &self.http, command).await,
            _ => Ok(()),
        }
    }
}

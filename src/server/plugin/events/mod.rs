//! Spreadsheet rows turned into Discord scheduled events.
//!
//! Admins sync on demand; guilds with `auto_sync` are synced by an hourly job.

pub mod controller;
pub mod fetch;
pub mod publisher;
pub mod service;
pub mod sheet;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{async_trait, http::Http};
use tokio_cron_scheduler::Job;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    error::AppError,
    plugin::{
        events::{publisher::DiscordEventPublisher, service::EventSyncService},
        DashboardFragment, NavPlacement, Plugin, PluginContext, PluginMeta, PluginRegistration,
    },
    state::AppState,
};

pub const PLUGIN_ID: &str = "events";

/// Top of every hour.
const AUTO_SYNC_SCHEDULE: &str = "0 0 * * * *";

pub fn registration() -> PluginRegistration {
    PluginRegistration {
        id: PLUGIN_ID,
        build,
    }
}

fn build(ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
    Ok(Arc::new(EventSyncPlugin {
        db: ctx.db.clone(),
        http: ctx.http.clone(),
        sheet_client: ctx.sheet_client.clone(),
    }))
}

pub struct EventSyncPlugin {
    db: DatabaseConnection,
    http: Arc<Http>,
    sheet_client: reqwest::Client,
}

#[async_trait]
impl Plugin for EventSyncPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            id: PLUGIN_ID,
            name: "Event Sync",
            description: "Create Discord events from a published spreadsheet",
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
            .routes(routes!(controller::get_settings, controller::update_settings))
            .routes(routes!(controller::preview))
            .routes(routes!(controller::sync))
    }

    fn dashboard(&self) -> Option<DashboardFragment> {
        Some(DashboardFragment {
            id: PLUGIN_ID,
            name: "Event Sync",
            html: include_str!("dashboard.html"),
            script: include_str!("dashboard.js"),
            nav: Some(NavPlacement {
                section: "tools",
                order: 30,
            }),
        })
    }

    fn jobs(&self) -> Result<Vec<Job>, AppError> {
        let db = self.db.clone();
        let http = self.http.clone();
        let sheet_client = self.sheet_client.clone();

        let auto_sync = Job::new_async(AUTO_SYNC_SCHEDULE, move |_uuid, _lock| {
            let db = db.clone();
            let client = sheet_client.clone();
            let publisher = DiscordEventPublisher::new(http.clone());

            Box::pin(async move {
                let service = EventSyncService::new(&db, &client, &publisher);
                if let Err(e) = service.sync_all_auto().await {
                    tracing::error!("Error running automatic event sync: {}", e);
                }
            })
        })?;

        Ok(vec![auto_sync])
    }
}

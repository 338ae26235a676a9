//! Plugin loading and aggregation.

use std::{collections::HashSet, sync::Arc};

use serenity::all::CreateCommand;
use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tokio_cron_scheduler::Job;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    model::plugin::{DashboardFragmentDto, PluginCatalogDto},
    server::{
        bot::event::EventBus,
        plugin::{DashboardFragment, Plugin, PluginContext, PluginMeta, PluginRegistration},
        state::AppState,
    },
};

/// A registration whose constructor returned an error.
#[derive(Debug, Clone)]
pub struct PluginFailure {
    pub id: &'static str,
    pub error: String,
}

pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
    failures: Vec<PluginFailure>,
}

impl PluginRegistry {
    /// Constructs every selected plugin.
    ///
    /// A constructor error is logged and recorded; the remaining plugins still load.
    ///
    /// # Arguments
    /// - `registrations` - Plugins in load order
    /// - `ctx` - Handles passed to each constructor
    /// - `enabled` - `None` loads everything; otherwise only the listed ids
    pub fn load(
        registrations: Vec<PluginRegistration>,
        ctx: &PluginContext,
        enabled: Option<&[String]>,
    ) -> Self {
        let mut plugins = Vec::new();
        let mut failures = Vec::new();

        for registration in registrations {
            if let Some(enabled) = enabled {
                if !enabled.iter().any(|id| id == registration.id) {
                    tracing::info!("Plugin {} is not enabled, skipping", registration.id);
                    continue;
                }
            }

            match (registration.build)(ctx) {
                Ok(plugin) => {
                    tracing::info!("Loaded plugin {}", registration.id);
                    plugins.push(plugin);
                }
                Err(e) => {
                    tracing::error!("Failed to load plugin {}: {}", registration.id, e);
                    failures.push(PluginFailure {
                        id: registration.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        Self { plugins, failures }
    }

    pub fn failures(&self) -> &[PluginFailure] {
        &self.failures
    }

    pub fn metas(&self) -> Vec<PluginMeta> {
        self.plugins.iter().map(|plugin| plugin.meta()).collect()
    }

    /// Dashboard fragments with navigable ones first by order, then the rest, ties by id.
    pub fn fragments(&self) -> Vec<DashboardFragment> {
        let mut fragments: Vec<DashboardFragment> = self
            .plugins
            .iter()
            .filter_map(|plugin| plugin.dashboard())
            .collect();

        fragments.sort_by(|a, b| {
            let a_key = (a.nav.is_none(), a.nav.as_ref().map(|nav| nav.order), a.id);
            let b_key = (b.nav.is_none(), b.nav.as_ref().map(|nav| nav.order), b.id);
            a_key.cmp(&b_key)
        });

        fragments
    }

    /// Slash commands of every plugin; a name taken by an earlier plugin is skipped.
    pub fn commands(&self) -> Vec<CreateCommand> {
        let mut seen = HashSet::new();
        let mut commands = Vec::new();

        for plugin in &self.plugins {
            let id = plugin.meta().id;

            for command in plugin.commands() {
                if !seen.insert(command.name) {
                    tracing::warn!(
                        "Plugin {} command /{} is already registered, skipping",
                        id,
                        command.name
                    );
                    continue;
                }
                commands.push(command.builder);
            }
        }

        commands
    }

    /// Each plugin's routes nested under `/api/plugins/<id>`.
    pub fn router(&self) -> OpenApiRouter<AppState> {
        self.plugins
            .iter()
            .fold(OpenApiRouter::new(), |router, plugin| {
                router.nest(&format!("/api/plugins/{}", plugin.meta().id), plugin.routes())
            })
    }

    /// Scheduled jobs of every plugin; a plugin whose jobs fail to build contributes none.
    pub fn jobs(&self) -> Vec<Job> {
        let mut jobs = Vec::new();

        for plugin in &self.plugins {
            match plugin.jobs() {
                Ok(plugin_jobs) => jobs.extend(plugin_jobs),
                Err(e) => tracing::error!(
                    "Failed to build scheduled jobs for plugin {}: {}",
                    plugin.meta().id,
                    e
                ),
            }
        }

        jobs
    }

    /// Spawns one event subscriber task per plugin.
    ///
    /// Receivers are created before returning so no event published afterwards is missed.
    pub fn spawn_subscribers(&self, bus: &EventBus) -> Vec<JoinHandle<()>> {
        self.plugins
            .iter()
            .map(|plugin| {
                let plugin = plugin.clone();
                let mut receiver = bus.subscribe();

                tokio::spawn(async move {
                    let id = plugin.meta().id;

                    loop {
                        match receiver.recv().await {
                            Ok(event) => {
                                if let Err(e) = plugin.handle_event(&event).await {
                                    tracing::error!("Plugin {} failed to handle event: {}", id, e);
                                }
                            }
                            Err(RecvError::Lagged(skipped)) => {
                                tracing::warn!(
                                    "Plugin {} fell behind and skipped {} events",
                                    id,
                                    skipped
                                );
                            }
                            Err(RecvError::Closed) => break,
                        }
                    }
                })
            })
            .collect()
    }

    pub fn catalog(&self) -> PluginCatalog {
        PluginCatalog {
            plugins: self.metas(),
            fragments: self.fragments(),
            failed: self.failures.iter().map(|failure| failure.id).collect(),
        }
    }
}

/// Snapshot of the loaded plugins served to the dashboard.
#[derive(Debug, Clone, Default)]
pub struct PluginCatalog {
    pub plugins: Vec<PluginMeta>,
    pub fragments: Vec<DashboardFragment>,
    pub failed: Vec<&'static str>,
}

impl PluginCatalog {
    pub fn to_dto(&self) -> PluginCatalogDto {
        PluginCatalogDto {
            plugins: self.plugins.iter().cloned().map(PluginMeta::into_dto).collect(),
            failed: self.failed.iter().map(|id| id.to_string()).collect(),
        }
    }

    pub fn fragments_dto(&self) -> Vec<DashboardFragmentDto> {
        self.fragments
            .iter()
            .cloned()
            .map(DashboardFragment::into_dto)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use serenity::{async_trait, http::Http};
    use test_utils::builder::TestBuilder;
    use utoipa_axum::routes;

    use super::*;
    use crate::server::{
        bot::event::{BotEvent, LevelUp},
        error::AppError,
        plugin::{NavPlacement, PluginConstructor, SlashCommand},
    };

    static HANDLED: AtomicUsize = AtomicUsize::new(0);

    #[utoipa::path(get, path = "/ping", responses((status = 200, description = "Pong")))]
    async fn ping() -> &'static str {
        "pong"
    }

    struct FakePlugin {
        id: &'static str,
        nav: Option<i32>,
        command: &'static str,
    }

    #[async_trait]
    impl Plugin for FakePlugin {
        fn meta(&self) -> PluginMeta {
            PluginMeta {
                id: self.id,
                name: self.id,
                description: "Fake",
                version: "0.0.1",
            }
        }

        fn routes(&self) -> OpenApiRouter<AppState> {
            OpenApiRouter::new().routes(routes!(ping))
        }

        fn dashboard(&self) -> Option<DashboardFragment> {
            Some(DashboardFragment {
                id: self.id,
                name: self.id,
                html: "<div></div>",
                script: "",
                nav: self.nav.map(|order| NavPlacement {
                    section: "main",
                    order,
                }),
            })
        }

        fn commands(&self) -> Vec<SlashCommand> {
            vec![SlashCommand::new(self.command, "Fake command")]
        }

        async fn handle_event(&self, _event: &BotEvent) -> Result<(), AppError> {
            let previous = HANDLED.fetch_add(1, Ordering::SeqCst);
            if previous == 0 {
                return Err(AppError::InternalError("first event fails".to_string()));
            }
            Ok(())
        }
    }

    fn registration(id: &'static str, build: PluginConstructor) -> PluginRegistration {
        PluginRegistration { id, build }
    }

    fn build_alpha(_ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
        Ok(Arc::new(FakePlugin {
            id: "alpha",
            nav: Some(2),
            command: "shared",
        }))
    }

    fn build_beta(_ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
        Ok(Arc::new(FakePlugin {
            id: "beta",
            nav: None,
            command: "shared",
        }))
    }

    fn build_gamma(_ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
        Ok(Arc::new(FakePlugin {
            id: "gamma",
            nav: Some(1),
            command: "gamma",
        }))
    }

    fn build_broken(_ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
        Err(AppError::InternalError("boom".to_string()))
    }

    async fn context() -> PluginContext {
        let mut test = TestBuilder::new().build().await.unwrap();
        let db = test.database().await.unwrap().clone();

        PluginContext {
            db,
            http: Arc::new(Http::new("")),
            bus: EventBus::new(),
            sheet_client: reqwest::Client::new(),
        }
    }

    fn all_registrations() -> Vec<PluginRegistration> {
        vec![
            registration("alpha", build_alpha),
            registration("broken", build_broken),
            registration("beta", build_beta),
            registration("gamma", build_gamma),
        ]
    }

    #[tokio::test]
    async fn failing_constructor_does_not_block_siblings() {
        let ctx = context().await;

        let registry = PluginRegistry::load(all_registrations(), &ctx, None);

        let ids: Vec<&str> = registry.metas().iter().map(|meta| meta.id).collect();
        assert_eq!(ids, vec!["alpha", "beta", "gamma"]);
        assert_eq!(registry.failures().len(), 1);
        assert_eq!(registry.failures()[0].id, "broken");

        let (_, api) = registry.router().split_for_parts();
        for id in ["alpha", "beta", "gamma"] {
            assert!(api
                .paths
                .paths
                .contains_key(&format!("/api/plugins/{}/ping", id)));
        }
        assert!(!api.paths.paths.contains_key("/api/plugins/broken/ping"));
    }

    #[tokio::test]
    async fn loads_only_enabled_plugins() {
        let ctx = context().await;
        let enabled = vec!["gamma".to_string()];

        let registry = PluginRegistry::load(all_registrations(), &ctx, Some(&enabled));

        let ids: Vec<&str> = registry.metas().iter().map(|meta| meta.id).collect();
        assert_eq!(ids, vec!["gamma"]);
        assert!(registry.failures().is_empty());
    }

    #[tokio::test]
    async fn sorts_fragments_by_nav_order() {
        let ctx = context().await;

        let registry = PluginRegistry::load(all_registrations(), &ctx, None);

        let ids: Vec<&str> = registry.fragments().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["gamma", "alpha", "beta"]);
    }

    #[tokio::test]
    async fn skips_duplicate_command_names() {
        let ctx = context().await;

        let registry = PluginRegistry::load(all_registrations(), &ctx, None);

        assert_eq!(registry.commands().len(), 2);
    }

    #[tokio::test]
    async fn subscriber_survives_handler_errors() {
        let ctx = context().await;
        let registry = PluginRegistry::load(vec![registration("alpha", build_alpha)], &ctx, None);
        let handles = registry.spawn_subscribers(&ctx.bus);

        for level in 1..=2 {
            ctx.bus.publish(BotEvent::LevelUp(LevelUp {
                guild_id: 1,
                user_id: 2,
                level,
                channel_id: None,
            }));
        }

        tokio::time::timeout(Duration::from_secs(5), async {
            while HANDLED.load(Ordering::SeqCst) < 2 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("subscriber stopped after the first handler error");

        for handle in handles {
            handle.abort();
        }
    }
}

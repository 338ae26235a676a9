//! Removes messages containing blocked words.

pub mod controller;
pub mod matcher;
pub mod service;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, Colour, CreateEmbed, CreateMessage, Message},
    async_trait,
    http::Http,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::word_filter::WordFilterSettings,
    server::{
        bot::event::BotEvent,
        error::AppError,
        plugin::{
            word_filter::service::{is_exempt, MatcherCache},
            DashboardFragment, NavPlacement, Plugin, PluginContext, PluginMeta,
            PluginRegistration,
        },
        service::settings::SettingsService,
        state::AppState,
        util::discord::user_mention,
    },
};

pub const PLUGIN_ID: &str = "word-filter";

pub fn registration() -> PluginRegistration {
    PluginRegistration {
        id: PLUGIN_ID,
        build,
    }
}

fn build(ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
    Ok(Arc::new(WordFilterPlugin {
        db: ctx.db.clone(),
        http: ctx.http.clone(),
        matchers: MatcherCache::new(),
    }))
}

/// Warning posted in the channel of a removed message.
pub fn warning_text(user_id: u64) -> String {
    format!(
        "{} your message contained a blocked word and was removed.",
        user_mention(user_id)
    )
}

pub struct WordFilterPlugin {
    db: DatabaseConnection,
    http: Arc<Http>,
    matchers: MatcherCache,
}

impl WordFilterPlugin {
    async fn on_message(&self, message: &Message) -> Result<(), AppError> {
        let Some(guild_id) = message.guild_id.map(|id| id.get()) else {
            return Ok(());
        };
        if message.author.bot {
            return Ok(());
        }

        let settings: WordFilterSettings = SettingsService::new(&self.db).load(guild_id).await?;
        if !settings.enabled {
            return Ok(());
        }
        if message
            .member
            .as_ref()
            .is_some_and(|member| is_exempt(&settings, &member.roles))
        {
            return Ok(());
        }

        let matcher = self.matchers.get(guild_id, &settings.words)?;
        let Some(matched) = matcher.find(&message.content) else {
            return Ok(());
        };

        tracing::info!(
            "Blocked word in message {} by {} in guild {}",
            message.id,
            message.author.id,
            guild_id
        );

        if settings.delete_message {
            if let Err(e) = message.delete(&self.http).await {
                tracing::warn!("Failed to delete filtered message {}: {}", message.id, e);
            }
        }

        if settings.warn_user {
            let warning = CreateMessage::new().content(warning_text(message.author.id.get()));
            if let Err(e) = message.channel_id.send_message(&self.http, warning).await {
                tracing::warn!(
                    "Failed to warn {} in channel {}: {}",
                    message.author.id,
                    message.channel_id,
                    e
                );
            }
        }

        if let Some(log_channel_id) = settings.log_channel_id {
            let embed = CreateEmbed::new()
                .title("Blocked word")
                .colour(Colour::RED)
                .field("Author", user_mention(message.author.id.get()), true)
                .field("Channel", format!("<#{}>", message.channel_id), true)
                .field("Matched", matched, true)
                .description(&message.content);

            ChannelId::new(log_channel_id)
                .send_message(&self.http, CreateMessage::new().embed(embed))
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl Plugin for WordFilterPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            id: PLUGIN_ID,
            name: "Word Filter",
            description: "Delete and log messages containing blocked words",
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
            .routes(routes!(controller::get_settings, controller::update_settings))
            .routes(routes!(controller::check))
    }

    fn dashboard(&self) -> Option<DashboardFragment> {
        Some(DashboardFragment {
            id: PLUGIN_ID,
            name: "Word Filter",
            html: include_str!("dashboard.html"),
            script: include_str!("dashboard.js"),
            nav: Some(NavPlacement {
                section: "moderation",
                order: 10,
            }),
        })
    }

    async fn handle_event(&self, event: &BotEvent) -> Result<(), AppError> {
        match event {
            BotEvent::Message(message) => self.on_message(message).await,
            _ => Ok(()),
        }
    }
}

//! XP and levels earned from messages, voice time and reactions.
//!
//! Message cooldowns and open voice sessions live in an [`ActivityTracker`] shared
//! between the event subscriber and the per-minute voice sweep job.

pub mod commands;
pub mod controller;
pub mod formula;
pub mod service;
pub mod tracker;

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use rand::Rng;
use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, Message, Reaction, VoiceState},
    async_trait,
    http::Http,
};
use tokio_cron_scheduler::Job;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::leveling::LevelingSettings,
    server::{
        bot::event::{BotEvent, EventBus, LevelUp},
        error::AppError,
        model::member_xp::XpGrant,
        plugin::{
            leveling::{service::LevelingService, tracker::VoiceCredit},
            DashboardFragment, NavPlacement, Plugin, PluginContext, PluginMeta,
            PluginRegistration, SlashCommand,
        },
        service::settings::SettingsService,
        state::AppState,
        util::discord::user_mention,
    },
};

pub use tracker::ActivityTracker;

pub const PLUGIN_ID: &str = "leveling";

const MESSAGE_XP_MIN: i64 = 15;
const MESSAGE_XP_MAX: i64 = 25;
const VOICE_XP_PER_MINUTE: i64 = 10;
const REACTION_GIVER_XP: i64 = 5;
const REACTION_RECEIVER_XP: i64 = 3;

/// Second zero of every minute.
const VOICE_SWEEP_SCHEDULE: &str = "0 * * * * *";

pub fn registration() -> PluginRegistration {
    PluginRegistration {
        id: PLUGIN_ID,
        build,
    }
}

fn build(ctx: &PluginContext) -> Result<Arc<dyn Plugin>, AppError> {
    Ok(Arc::new(LevelingPlugin::new(ctx)))
}

/// Fills `{user}` and `{level}` in a level-up announcement template.
pub fn render_level_up(template: &str, user_id: u64, level: i32) -> String {
    template
        .replace("{user}", &user_mention(user_id))
        .replace("{level}", &level.to_string())
}

fn earns_xp(settings: &LevelingSettings, source_enabled: bool, channel_id: u64) -> bool {
    settings.enabled && source_enabled && !settings.ignored_channel_ids.contains(&channel_id)
}

fn message_grant(rng: &mut impl Rng) -> XpGrant {
    XpGrant::xp(rng.random_range(MESSAGE_XP_MIN..=MESSAGE_XP_MAX))
}

fn voice_grant(minutes: i64) -> XpGrant {
    XpGrant {
        xp: minutes.saturating_mul(VOICE_XP_PER_MINUTE),
        voice_minutes: minutes,
        ..Default::default()
    }
}

/// Grants for the reaction giver and the message author, in that order.
///
/// Reacting to your own message or to a bot's earns nothing.
fn reaction_grants(
    giver_id: u64,
    author_id: u64,
    author_is_bot: bool,
) -> Option<(XpGrant, XpGrant)> {
    if author_is_bot || author_id == giver_id {
        return None;
    }

    let giver = XpGrant {
        xp: REACTION_GIVER_XP,
        reactions_given: 1,
        ..Default::default()
    };
    let author = XpGrant {
        xp: REACTION_RECEIVER_XP,
        reactions_received: 1,
        ..Default::default()
    };

    Some((giver, author))
}

#[derive(Clone)]
pub struct LevelingPlugin {
    db: DatabaseConnection,
    http: Arc<Http>,
    bus: EventBus,
    tracker: Arc<ActivityTracker>,
}

impl LevelingPlugin {
    pub fn new(ctx: &PluginContext) -> Self {
        Self {
            db: ctx.db.clone(),
            http: ctx.http.clone(),
            bus: ctx.bus.clone(),
            tracker: Arc::new(ActivityTracker::new()),
        }
    }

    async fn settings(&self, guild_id: u64) -> Result<LevelingSettings, AppError> {
        SettingsService::new(&self.db).load(guild_id).await
    }

    /// Applies a grant and publishes a `LevelUp` when the level rose.
    async fn credit(
        &self,
        guild_id: u64,
        user_id: u64,
        grant: XpGrant,
        settings: &LevelingSettings,
        channel_id: Option<u64>,
    ) -> Result<(), AppError> {
        let change = LevelingService::new(&self.db)
            .grant(guild_id, user_id, grant, settings.xp_multiplier)
            .await?;

        if change.leveled_up() {
            tracing::debug!(
                "Member {} reached level {} in guild {}",
                user_id,
                change.member.level,
                guild_id
            );
            self.bus.publish(BotEvent::LevelUp(LevelUp {
                guild_id,
                user_id,
                level: change.member.level,
                channel_id,
            }));
        }

        Ok(())
    }

    async fn on_message(&self, message: &Message) -> Result<(), AppError> {
        let Some(guild_id) = message.guild_id.map(|id| id.get()) else {
            return Ok(());
        };
        if message.author.bot {
            return Ok(());
        }

        let channel_id = message.channel_id.get();
        let settings = self.settings(guild_id).await?;
        if !earns_xp(&settings, settings.message_xp, channel_id) {
            return Ok(());
        }

        let user_id = message.author.id.get();
        if !self.tracker.try_claim_message(guild_id, user_id, Utc::now()) {
            return Ok(());
        }

        let grant = message_grant(&mut rand::rng());
        self.credit(guild_id, user_id, grant, &settings, Some(channel_id))
            .await
    }

    async fn on_reaction(&self, reaction: &Reaction) -> Result<(), AppError> {
        let (Some(guild_id), Some(giver_id)) = (reaction.guild_id, reaction.user_id) else {
            return Ok(());
        };
        let (guild_id, giver_id) = (guild_id.get(), giver_id.get());

        if reaction.member.as_ref().is_some_and(|member| member.user.bot) {
            return Ok(());
        }

        let channel_id = reaction.channel_id.get();
        let settings = self.settings(guild_id).await?;
        if !earns_xp(&settings, settings.reaction_xp, channel_id) {
            return Ok(());
        }

        let Some((author_id, author_is_bot)) = self.reaction_author(reaction).await else {
            return Ok(());
        };

        self.credit_reaction(
            guild_id,
            channel_id,
            giver_id,
            author_id,
            author_is_bot,
            &settings,
        )
        .await
    }

    /// Author of the reacted message and whether they are a bot.
    ///
    /// Gateway events carry only the author ID, so the user is looked up to learn
    /// whether it is a bot. Lookup failures are logged and yield `None`.
    async fn reaction_author(&self, reaction: &Reaction) -> Option<(u64, bool)> {
        let author = match reaction.message_author_id {
            Some(author_id) => self.http.get_user(author_id).await,
            None => reaction
                .message(&self.http)
                .await
                .map(|message| message.author),
        };

        match author {
            Ok(user) => Some((user.id.get(), user.bot)),
            Err(e) => {
                tracing::warn!(
                    "Failed to resolve author of reacted message {} in channel {}: {}",
                    reaction.message_id,
                    reaction.channel_id,
                    e
                );
                None
            }
        }
    }

    async fn credit_reaction(
        &self,
        guild_id: u64,
        channel_id: u64,
        giver_id: u64,
        author_id: u64,
        author_is_bot: bool,
        settings: &LevelingSettings,
    ) -> Result<(), AppError> {
        let Some((giver_grant, author_grant)) = reaction_grants(giver_id, author_id, author_is_bot)
        else {
            return Ok(());
        };

        self.credit(guild_id, giver_id, giver_grant, settings, Some(channel_id))
            .await?;
        self.credit(guild_id, author_id, author_grant, settings, Some(channel_id))
            .await
    }

    async fn on_voice_state(&self, new: &VoiceState) -> Result<(), AppError> {
        let Some(guild_id) = new.guild_id.map(|id| id.get()) else {
            return Ok(());
        };
        if new.member.as_ref().is_some_and(|member| member.user.bot) {
            return Ok(());
        }

        let user_id = new.user_id.get();
        let now = Utc::now();

        match new.channel_id {
            Some(channel_id) => {
                self.tracker.join_voice(guild_id, user_id, channel_id.get(), now);
                Ok(())
            }
            None => match self.tracker.leave_voice(guild_id, user_id, now) {
                Some(credit) => {
                    let settings = self.settings(guild_id).await?;
                    self.credit_voice(credit, &settings).await
                }
                None => Ok(()),
            },
        }
    }

    async fn credit_voice(
        &self,
        credit: VoiceCredit,
        settings: &LevelingSettings,
    ) -> Result<(), AppError> {
        if !earns_xp(settings, settings.voice_xp, credit.channel_id) {
            return Ok(());
        }

        self.credit(
            credit.guild_id,
            credit.user_id,
            voice_grant(credit.minutes),
            settings,
            Some(credit.channel_id),
        )
        .await
    }

    /// Credits every open voice session with its elapsed whole minutes.
    async fn sweep_voice(&self) -> Result<(), AppError> {
        let credits = self.tracker.sweep_voice(Utc::now());
        let mut settings_by_guild: HashMap<u64, LevelingSettings> = HashMap::new();

        for credit in credits {
            let settings = match settings_by_guild.get(&credit.guild_id) {
                Some(settings) => settings.clone(),
                None => {
                    let settings = self.settings(credit.guild_id).await?;
                    settings_by_guild.insert(credit.guild_id, settings.clone());
                    settings
                }
            };

            if let Err(e) = self.credit_voice(credit, &settings).await {
                tracing::error!(
                    "Failed to credit voice time to {} in guild {}: {}",
                    credit.user_id,
                    credit.guild_id,
                    e
                );
            }
        }

        Ok(())
    }

    async fn announce_level_up(&self, event: &LevelUp) -> Result<(), AppError> {
        let settings = self.settings(event.guild_id).await?;
        if !settings.announce_level_up {
            return Ok(());
        }

        let Some(channel_id) = settings.announce_channel_id.or(event.channel_id) else {
            return Ok(());
        };

        let content = render_level_up(&settings.level_up_message, event.user_id, event.level);
        if let Err(e) = ChannelId::new(channel_id).say(&self.http, content).await {
            tracing::warn!(
                "Failed to announce level up in channel {}: {}",
                channel_id,
                e
            );
        }

        Ok(())
    }
}

#[async_trait]
impl Plugin for LevelingPlugin {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            id: PLUGIN_ID,
            name: "Leveling",
            description: "XP and levels from messages, voice time and reactions",
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn routes(&self) -> OpenApiRouter<AppState> {
        OpenApiRouter::new()
            .routes(routes!(controller::get_settings, controller::update_settings))
            .routes(routes!(controller::get_leaderboard))
            .routes(routes!(controller::get_member, controller::reset_member))
            .routes(routes!(controller::set_member_xp))
    }

    fn dashboard(&self) -> Option<DashboardFragment> {
        Some(DashboardFragment {
            id: PLUGIN_ID,
            name: "Leveling",
            html: include_str!("dashboard.html"),
            script: include_str!("dashboard.js"),
            nav: Some(NavPlacement {
                section: "community",
                order: 10,
            }),
        })
    }

    fn commands(&self) -> Vec<SlashCommand> {
        commands::definitions()
    }

    fn jobs(&self) -> Result<Vec<Job>, AppError> {
        let plugin = self.clone();

        let sweep = Job::new_async(VOICE_SWEEP_SCHEDULE, move |_uuid, _lock| {
            let plugin = plugin.clone();

            Box::pin(async move {
                if let Err(e) = plugin.sweep_voice().await {
                    tracing::error!("Error crediting voice time: {}", e);
                }
            })
        })?;

        Ok(vec![sweep])
    }

    async fn handle_event(&self, event: &BotEvent) -> Result<(), AppError> {
        match event {
            BotEvent::Message(message) => self.on_message(message).await,
            BotEvent::ReactionAdd(reaction) => self.on_reaction(reaction).await,
            BotEvent::VoiceStateUpdate { new, .. } => self.on_voice_state(new).await,
            BotEvent::Command(command) => commands::respond(&self.db, &self.http, command).await,
            BotEvent::LevelUp(level_up) => self.announce_level_up(level_up).await,
        }
    }
}

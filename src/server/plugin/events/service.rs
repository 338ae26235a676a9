//! Spreadsheet to Discord scheduled event sync.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::event_sync::{EventSyncSettings, SheetPreviewDto, SyncFailureDto, SyncReportDto},
    server::{
        data::{guild_settings::GuildSettingsRepository, synced_event::SyncedEventRepository},
        error::AppError,
        plugin::events::{
            fetch::{fetch_sheet, validate_sheet_url},
            publisher::EventPublisher,
            sheet::{parse_sheet, ParsedSheet},
        },
        service::settings::{PluginSettings, SettingsService},
    },
};

/// Longest default event duration, one week.
pub const MAX_DEFAULT_DURATION_MINUTES: i64 = 7 * 24 * 60;

impl PluginSettings for EventSyncSettings {
    const PLUGIN: &'static str = "events";

    fn validate(&self) -> Result<(), AppError> {
        if let Some(url) = &self.sheet_url {
            validate_sheet_url(url)?;
        }
        if !(1..=MAX_DEFAULT_DURATION_MINUTES).contains(&self.default_duration_minutes) {
            return Err(AppError::BadRequest(format!(
                "Default duration must be between 1 and {} minutes",
                MAX_DEFAULT_DURATION_MINUTES
            )));
        }

        Ok(())
    }
}

pub struct EventSyncService<'a> {
    db: &'a DatabaseConnection,
    client: &'a reqwest::Client,
    publisher: &'a dyn EventPublisher,
}

impl<'a> EventSyncService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        client: &'a reqwest::Client,
        publisher: &'a dyn EventPublisher,
    ) -> Self {
        Self {
            db,
            client,
            publisher,
        }
    }

    async fn load_sheet(&self, guild_id: u64) -> Result<ParsedSheet, AppError> {
        let settings: EventSyncSettings = SettingsService::new(self.db).load(guild_id).await?;
        let Some(url) = &settings.sheet_url else {
            return Err(AppError::BadRequest(
                "No spreadsheet is configured for this guild".to_string(),
            ));
        };

        let text = fetch_sheet(self.client, url).await?;
        parse_sheet(&text, &settings)
    }

    /// Parses the configured sheet without creating anything.
    pub async fn preview(&self, guild_id: u64) -> Result<SheetPreviewDto, AppError> {
        Ok(self.load_sheet(guild_id).await?.into_preview_dto())
    }

    /// Fetches the configured sheet and creates its new upcoming events.
    pub async fn sync(&self, guild_id: u64) -> Result<SyncReportDto, AppError> {
        let sheet = self.load_sheet(guild_id).await?;
        self.sync_parsed(guild_id, sheet, Utc::now()).await
    }

    /// Creates events that start after `now` and were not synced before.
    ///
    /// A failed creation is reported and the remaining events are still attempted.
    pub async fn sync_parsed(
        &self,
        guild_id: u64,
        sheet: ParsedSheet,
        now: DateTime<Utc>,
    ) -> Result<SyncReportDto, AppError> {
        let synced_repo = SyncedEventRepository::new(self.db);
        let mut known = synced_repo.get_keys_by_guild(guild_id).await?;

        let mut report = SyncReportDto {
            created: 0,
            skipped: 0,
            failed: Vec::new(),
            errors: sheet.errors,
        };

        for event in sheet.events {
            let key = event.source_key();
            if event.start <= now || known.contains(&key) {
                report.skipped += 1;
                continue;
            }

            match self.publisher.publish(guild_id, &event).await {
                Ok(discord_event_id) => {
                    synced_repo
                        .create(guild_id, key.clone(), discord_event_id)
                        .await?;
                    known.insert(key);
                    report.created += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to create event '{}' in guild {}: {}",
                        event.title,
                        guild_id,
                        e
                    );
                    report.failed.push(SyncFailureDto {
                        title: event.title,
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Synced events for guild {}: {} created, {} skipped, {} failed",
            guild_id,
            report.created,
            report.skipped,
            report.failed.len()
        );

        Ok(report)
    }

    /// Syncs every guild with auto sync turned on. One guild failing does not stop
    /// the others.
    pub async fn sync_all_auto(&self) -> Result<(), AppError> {
        let stored = GuildSettingsRepository::new(self.db)
            .get_all_for_plugin(EventSyncSettings::PLUGIN)
            .await?;

        for (guild_id, raw) in stored {
            let settings: EventSyncSettings = match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Unreadable event settings for guild {}: {}", guild_id, e);
                    continue;
                }
            };
            if !settings.auto_sync || settings.sheet_url.is_none() {
                continue;
            }

            if let Err(e) = self.sync(guild_id).await {
                tracing::error!("Automatic event sync failed for guild {}: {}", guild_id, e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{Duration, TimeZone};
    use serenity::async_trait;
    use test_utils::builder::TestBuilder;

    use super::*;
    use crate::server::plugin::events::sheet::SheetEvent;

    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<String>>,
        fail_title: Option<&'static str>,
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, _guild_id: u64, event: &SheetEvent) -> Result<u64, AppError> {
            if Some(event.title.as_str()) == self.fail_title {
                return Err(AppError::InternalError("rejected".to_string()));
            }

            let mut published = self.published.lock().unwrap();
            published.push(event.title.clone());
            Ok(1000 + published.len() as u64)
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn event(title: &str, hours_from_now: i64) -> SheetEvent {
        let start = now() + Duration::hours(hours_from_now);
        SheetEvent {
            title: title.to_string(),
            start,
            end: start + Duration::hours(1),
            location: "Stage".to_string(),
            description: None,
        }
    }

    fn sheet(events: Vec<SheetEvent>) -> ParsedSheet {
        ParsedSheet {
            events,
            errors: Vec::new(),
        }
    }

    #[tokio::test]
    async fn creates_only_future_unsynced_events() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::SyncedEvent)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let publisher = RecordingPublisher::default();
        let client = reqwest::Client::new();
        let service = EventSyncService::new(db, &client, &publisher);

        let first = service
            .sync_parsed(1, sheet(vec![event("Past", -2), event("Jam", 5)]), now())
            .await?;
        assert_eq!((first.created, first.skipped), (1, 1));

        let second = service
            .sync_parsed(1, sheet(vec![event("JAM", 5), event("Workshop", 24)]), now())
            .await?;
        assert_eq!((second.created, second.skipped), (1, 1));

        assert_eq!(
            *publisher.published.lock().unwrap(),
            vec!["Jam".to_string(), "Workshop".to_string()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_creation_is_reported_and_retried_next_time() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::SyncedEvent)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let failing = RecordingPublisher {
            fail_title: Some("Jam"),
            ..Default::default()
        };

        let client = reqwest::Client::new();
        let report = EventSyncService::new(db, &client, &failing)
            .sync_parsed(1, sheet(vec![event("Jam", 5), event("Workshop", 6)]), now())
            .await?;

        assert_eq!(report.created, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].title, "Jam");

        let working = RecordingPublisher::default();
        let retry = EventSyncService::new(db, &client, &working)
            .sync_parsed(1, sheet(vec![event("Jam", 5), event("Workshop", 6)]), now())
            .await?;
        assert_eq!((retry.created, retry.skipped), (1, 1));

        Ok(())
    }

    #[tokio::test]
    async fn sync_without_sheet_is_bad_request() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildSettings)
            .with_table(entity::prelude::SyncedEvent)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let publisher = RecordingPublisher::default();

        let client = reqwest::Client::new();
        let result = EventSyncService::new(db, &client, &publisher).sync(1).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    #[test]
    fn settings_require_https_and_positive_duration() {
        let http = EventSyncSettings {
            sheet_url: Some("http://example.com/sheet.csv".to_string()),
            ..Default::default()
        };
        let zero = EventSyncSettings {
            default_duration_minutes: 0,
            ..Default::default()
        };

        assert!(http.validate().is_err());
        assert!(zero.validate().is_err());
        assert!(EventSyncSettings::default().validate().is_ok());
    }

    #[test]
    fn settings_cap_default_duration() {
        let settings = |default_duration_minutes| EventSyncSettings {
            default_duration_minutes,
            ..Default::default()
        };

        assert!(matches!(
            settings(i64::MAX).validate(),
            Err(AppError::BadRequest(_))
        ));
        assert!(settings(MAX_DEFAULT_DURATION_MINUTES + 1).validate().is_err());
        assert!(settings(MAX_DEFAULT_DURATION_MINUTES).validate().is_ok());
    }
}

//! Parsing of a published spreadsheet's CSV export into events.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::{
    model::event_sync::{EventSyncSettings, RowErrorDto, SheetEventDto, SheetPreviewDto},
    server::error::AppError,
};

const TITLE_COLUMNS: &[&str] = &["title", "name"];
const START_COLUMNS: &[&str] = &["start", "start_time", "date"];
const END_COLUMNS: &[&str] = &["end", "end_time"];
const LOCATION_COLUMNS: &[&str] = &["location"];
const DESCRIPTION_COLUMNS: &[&str] = &["description"];

/// Naive formats tried after RFC 3339, all read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SheetEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    pub description: Option<String>,
}

impl SheetEvent {
    /// Identity of a row across syncs: lowercased title and start time.
    pub fn source_key(&self) -> String {
        format!("{}|{}", self.title.to_lowercase(), self.start.timestamp())
    }

    pub fn into_dto(self) -> SheetEventDto {
        SheetEventDto {
            title: self.title,
            start: self.start,
            end: self.end,
            location: self.location,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSheet {
    pub events: Vec<SheetEvent>,
    pub errors: Vec<RowErrorDto>,
}

impl ParsedSheet {
    pub fn into_preview_dto(self) -> SheetPreviewDto {
        SheetPreviewDto {
            events: self.events.into_iter().map(SheetEvent::into_dto).collect(),
            errors: self.errors,
        }
    }
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

struct Columns {
    title: usize,
    start: usize,
    end: Option<usize>,
    location: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, AppError> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_lowercase(), index))
            .collect();
        let find = |aliases: &[&str]| aliases.iter().find_map(|alias| by_name.get(*alias).copied());

        Ok(Self {
            title: find(TITLE_COLUMNS).ok_or_else(|| {
                AppError::BadRequest("Spreadsheet has no title or name column".to_string())
            })?,
            start: find(START_COLUMNS).ok_or_else(|| {
                AppError::BadRequest("Spreadsheet has no start, start_time or date column".to_string())
            })?,
            end: find(END_COLUMNS),
            location: find(LOCATION_COLUMNS),
            description: find(DESCRIPTION_COLUMNS),
        })
    }
}

fn cell(record: &csv::StringRecord, column: Option<usize>) -> Option<&str> {
    column
        .and_then(|index| record.get(index))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_row(
    record: &csv::StringRecord,
    columns: &Columns,
    settings: &EventSyncSettings,
) -> Result<SheetEvent, String> {
    let title = cell(record, Some(columns.title)).ok_or("Missing title")?;

    let start_text = cell(record, Some(columns.start)).ok_or("Missing start time")?;
    let start = parse_timestamp(start_text)
        .ok_or_else(|| format!("Unrecognized start time '{}'", start_text))?;

    let end = match cell(record, columns.end) {
        Some(end_text) => parse_timestamp(end_text)
            .ok_or_else(|| format!("Unrecognized end time '{}'", end_text))?,
        None => Duration::try_minutes(settings.default_duration_minutes)
            .and_then(|duration| start.checked_add_signed(duration))
            .ok_or("Default duration runs past the supported date range")?,
    };
    if end <= start {
        return Err("End time is not after start time".to_string());
    }

    Ok(SheetEvent {
        title: title.to_string(),
        start,
        end,
        location: cell(record, columns.location)
            .unwrap_or(&settings.default_location)
            .to_string(),
        description: cell(record, columns.description).map(str::to_string),
    })
}

/// Parses CSV text with a header row.
///
/// Bad rows are collected in `errors` and do not stop the parse.
///
/// # Returns
/// - `Ok(ParsedSheet)` - Valid events plus per-row errors
/// - `Err(AppError::BadRequest)` - Required columns are missing
pub fn parse_sheet(text: &str, settings: &EventSyncSettings) -> Result<ParsedSheet, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = Columns::from_headers(reader.headers()?)?;
    let mut parsed = ParsedSheet::default();

    for (index, record) in reader.records().enumerate() {
        // Header is row 1
        let row = index + 2;

        let result = record
            .map_err(|e| e.to_string())
            .and_then(|record| parse_row(&record, &columns, settings));

        match result {
            Ok(event) => parsed.events.push(event),
            Err(message) => parsed.errors.push(RowErrorDto { row, message }),
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn accepts_every_timestamp_format() {
        let expected = utc(2026, 3, 14, 18, 30);

        for value in [
            "2026-03-14T18:30:00Z",
            "2026-03-14T20:30:00+02:00",
            "2026-03-14 18:30",
            "2026-03-14 18:30:00",
            "2026-03-14T18:30",
            "03/14/2026 18:30",
            " 03/14/2026 18:30:00 ",
        ] {
            assert_eq!(parse_timestamp(value), Some(expected), "format {}", value);
        }

        assert_eq!(parse_timestamp("next tuesday"), None);
    }

    #[test]
    fn parses_rows_with_aliases_and_defaults() {
        let csv = "Name,Date,Location\nListening party,2026-03-14 18:30,Stage\nFeedback night,2026-03-15 19:00,\n";
        let settings = EventSyncSettings::default();

        let parsed = parse_sheet(csv, &settings).unwrap();

        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.events[0].location, "Stage");
        assert_eq!(parsed.events[0].end, utc(2026, 3, 14, 19, 30));
        assert_eq!(parsed.events[1].location, settings.default_location);
    }

    #[test]
    fn bad_rows_are_reported_not_fatal() {
        let csv = "title,start,end\n\
                   Good,2026-03-14 18:00,2026-03-14 20:00\n\
                   ,2026-03-14 18:00,\n\
                   Bad date,soon,\n\
                   Backwards,2026-03-14 18:00,2026-03-14 17:00\n";

        let parsed = parse_sheet(csv, &EventSyncSettings::default()).unwrap();

        assert_eq!(parsed.events.len(), 1);
        let rows: Vec<usize> = parsed.errors.iter().map(|error| error.row).collect();
        assert_eq!(rows, vec![3, 4, 5]);
    }

    #[test]
    fn oversized_default_duration_is_a_row_error() {
        let csv = "title,start
Marathon,2026-03-14 18:00
";
        let settings = EventSyncSettings {
            default_duration_minutes: i64::MAX,
            ..Default::default()
        };

        let parsed = parse_sheet(csv, &settings).unwrap();

        assert!(parsed.events.is_empty());
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].row, 2);
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let result = parse_sheet("title,location\nA,B\n", &EventSyncSettings::default());

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn source_key_ignores_title_case() {
        let event = |title: &str| SheetEvent {
            title: title.to_string(),
            start: utc(2026, 1, 1, 0, 0),
            end: utc(2026, 1, 1, 1, 0),
            location: String::new(),
            description: None,
        };

        assert_eq!(event("Jam").source_key(), event("JAM").source_key());
    }
}

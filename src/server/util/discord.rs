//! Helpers for interpreting Discord API results.

use serenity::all::Timestamp;
use serenity::http::HttpError;

use crate::server::error::{internal::InternalError, AppError};

/// Whether a Serenity error is Discord answering 404 (unknown message, member, channel).
///
/// Callers treat these as soft failures rather than internal errors.
pub fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

/// Converts a chrono timestamp into Discord's timestamp type.
pub fn to_discord_timestamp(value: chrono::DateTime<chrono::Utc>) -> Result<Timestamp, AppError> {
    let timestamp = value.timestamp();

    let converted = Timestamp::from_unix_timestamp(timestamp).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp,
            reason: e.to_string(),
        }
    })?;

    Ok(converted)
}

/// Mention markup for a user, rendered by Discord clients as their name.
pub fn user_mention(user_id: u64) -> String {
    format!("<@{}>", user_id)
}

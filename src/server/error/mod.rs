//! `AppError` and its HTTP mapping.
//!
//! Handlers, services, repositories, plugin event handlers and startup all return
//! `AppError`. Client errors carry their message to the response body; everything
//! else is logged and answered with a generic 500.

pub mod auth;
pub mod config;
pub mod internal;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, internal::InternalError},
};

/// Every failure the server can report.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad or missing environment at startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Maps to 401 or 403, see `AuthError`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Unexpected internal state such as unparseable stored IDs.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// SQLx database driver error, raised by the session store migration.
    #[error(transparent)]
    SqlxErr(#[from] sea_orm::SqlxError),

    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// Outbound HTTP, e.g. fetching a spreadsheet or the Discord token exchange.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord REST or gateway failure.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// JSON encoding error while persisting settings or snapshots.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Spreadsheet CSV could not be read.
    #[error(transparent)]
    CsvErr(#[from] csv::Error),

    /// Socket or file system error, typically while binding the HTTP listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// 404 with the message as body.
    #[error("{0}")]
    NotFound(String),

    /// 400 with the message as body.
    #[error("{0}")]
    BadRequest(String),

    /// 500; the message is logged, never returned.
    #[error("{0}")]
    InternalError(String),
}

/// Boxes the error to keep `AppError` small; `serenity::Error` is very large.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Logs any displayable error and answers 500 with a generic body.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_client_errors_to_status_codes() {
        let not_found = AppError::NotFound("missing".to_string()).into_response();
        let bad_request = AppError::BadRequest("bad".to_string()).into_response();
        let denied = AppError::from(AuthError::AccessDenied(1, "nope".to_string())).into_response();
        let anonymous = AppError::from(AuthError::UserNotInSession).into_response();

        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(bad_request.status(), StatusCode::BAD_REQUEST);
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn hides_internal_details() {
        let response = AppError::InternalError("db exploded".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! JSON error responses.
//!
//! Every failure is rendered as `{"error": CODE, "message": text}`, plus the
//! structured fields a client needs to act on it without further requests.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cashbox_core::{GateError, TallyError};
use cashbox_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::{error, warn};

/// Errors returned by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected by the operational-day gate.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Malformed drawer tally.
    #[error(transparent)]
    Tally(#[from] TallyError),

    /// Any other application error.
    #[error(transparent)]
    App(#[from] AppError),
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        error!(error = %e, "Closings store query failed");
        Self::App(AppError::ServiceUnavailable(
            "Closings store is unavailable".to_string(),
        ))
    }
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        let code = match self {
            Self::Gate(e) => e.http_status_code(),
            Self::Tally(e) => e.http_status_code(),
            Self::App(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Gate(e) => e.error_code(),
            Self::Tally(e) => e.error_code(),
            Self::App(e) => e.error_code(),
        }
    }

    /// Returns true if the same request may succeed later without changes.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Gate(e) => e.is_retryable(),
            Self::Tally(_) => false,
            Self::App(e) => e.is_retryable(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::Gate(GateError::AlreadyClosedToday {
                day,
                next_eligible_at,
            }) => json!({
                "error": self.code(),
                "message": self.to_string(),
                "day": day,
                "next_eligible_at": next_eligible_at,
                "retryable": false,
            }),
            Self::Gate(GateError::StorageUnavailable(detail)) => {
                error!(error = %detail, "Closing could not be stored");
                json!({
                    "error": self.code(),
                    "message": "Closings store is unavailable, try again",
                    "retryable": true,
                })
            }
            Self::App(e @ (AppError::Configuration(_) | AppError::Internal(_))) => {
                error!(error = %e, "Request failed");
                json!({
                    "error": self.code(),
                    "message": "An internal error occurred",
                    "retryable": false,
                })
            }
            _ => {
                if status.is_client_error() {
                    warn!(code = self.code(), message = %self, "Request rejected");
                }
                json!({
                    "error": self.code(),
                    "message": self.to_string(),
                    "retryable": self.is_retryable(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_codes() {
        let closed = ApiError::from(GateError::AlreadyClosedToday {
            day: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            next_eligible_at: Utc.with_ymd_and_hms(2024, 3, 2, 16, 0, 0).unwrap(),
        });
        assert_eq!(closed.status(), StatusCode::CONFLICT);
        assert_eq!(closed.code(), "ALREADY_CLOSED_TODAY");

        let negative = ApiError::from(GateError::NegativeCashTotal {
            cash_total: dec!(-1),
        });
        assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

        let tally = ApiError::from(TallyError::EmptyDescription { index: 0 });
        assert_eq!(tally.status(), StatusCode::BAD_REQUEST);

        let store = ApiError::from(DbErr::Custom("gone".into()));
        assert_eq!(store.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(store.is_retryable());
    }
}

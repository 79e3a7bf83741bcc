//! Gate error types.
//!
//! Every rejection carries enough structured data for the caller to render
//! a message without redoing any time-zone arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when admitting a closing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// A closing is already recorded for the current operational day.
    #[error("Operational day {day} is already closed; next closing allowed at {next_eligible_at}")]
    AlreadyClosedToday {
        /// The operational day that is already closed.
        day: NaiveDate,
        /// First instant at which a new closing becomes admissible.
        next_eligible_at: DateTime<Utc>,
    },

    /// The cash total of the candidate is negative.
    #[error("Cash total cannot be negative: {cash_total}")]
    NegativeCashTotal {
        /// The rejected cash total.
        cash_total: Decimal,
    },

    /// A foreign-currency tally was declared with a non-positive rate.
    #[error("Exchange rate must be greater than zero, got {rate}")]
    InvalidExchangeRate {
        /// The rejected rate.
        rate: Decimal,
    },

    /// The closings store could not be reached.
    #[error("Closings store unavailable: {0}")]
    StorageUnavailable(String),
}

impl GateError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyClosedToday { .. } => "ALREADY_CLOSED_TODAY",
            Self::NegativeCashTotal { .. } => "NEGATIVE_CASH_TOTAL",
            Self::InvalidExchangeRate { .. } => "INVALID_EXCHANGE_RATE",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - client input errors
            Self::NegativeCashTotal { .. } | Self::InvalidExchangeRate { .. } => 400,

            // 409 Conflict - the day is taken
            Self::AlreadyClosedToday { .. } => 409,

            // 503 Service Unavailable - transient
            Self::StorageUnavailable(_) => 503,
        }
    }

    /// Returns true if an automatic retry with backoff makes sense.
    ///
    /// `AlreadyClosedToday` is not retryable before [`Self::retry_after`].
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }

    /// Earliest instant at which resubmitting can succeed, if known.
    #[must_use]
    pub fn retry_after(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::AlreadyClosedToday {
                next_eligible_at, ..
            } => Some(*next_eligible_at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn already_closed() -> GateError {
        GateError::AlreadyClosedToday {
            day: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            next_eligible_at: Utc.with_ymd_and_hms(2024, 3, 2, 16, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(already_closed().error_code(), "ALREADY_CLOSED_TODAY");
        assert_eq!(
            GateError::NegativeCashTotal {
                cash_total: Decimal::new(-5, 0)
            }
            .error_code(),
            "NEGATIVE_CASH_TOTAL"
        );
        assert_eq!(
            GateError::InvalidExchangeRate { rate: Decimal::ZERO }.error_code(),
            "INVALID_EXCHANGE_RATE"
        );
        assert_eq!(
            GateError::StorageUnavailable("down".into()).error_code(),
            "STORAGE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(already_closed().http_status_code(), 409);
        assert_eq!(
            GateError::InvalidExchangeRate { rate: Decimal::ZERO }.http_status_code(),
            400
        );
        assert_eq!(
            GateError::StorageUnavailable("down".into()).http_status_code(),
            503
        );
    }

    #[test]
    fn test_retry_semantics() {
        assert!(GateError::StorageUnavailable("down".into()).is_retryable());
        assert!(!already_closed().is_retryable());
        assert_eq!(
            already_closed().retry_after(),
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 16, 0, 0).unwrap())
        );
        assert_eq!(
            GateError::NegativeCashTotal {
                cash_total: Decimal::NEGATIVE_ONE
            }
            .retry_after(),
            None
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            already_closed().to_string(),
            "Operational day 2024-03-01 is already closed; next closing allowed at 2024-03-02 16:00:00 UTC"
        );
        assert_eq!(
            GateError::NegativeCashTotal {
                cash_total: Decimal::new(-5, 0)
            }
            .to_string(),
            "Cash total cannot be negative: -5"
        );
    }
}

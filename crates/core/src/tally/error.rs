//! Errors raised while validating a drawer tally.

use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed drawer tally. Always a client input error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TallyError {
    /// A bill count references a denomination the drawer does not accept.
    #[error("Denomination {denomination} is not accepted")]
    UnknownDenomination {
        /// The rejected face value.
        denomination: u32,
    },

    /// An expense line carries a negative amount.
    #[error("Expense #{index} has a negative amount: {amount}")]
    NegativeExpense {
        /// Zero-based position of the expense.
        index: usize,
        /// The offending amount.
        amount: Decimal,
    },

    /// An expense line has no description.
    #[error("Expense #{index} needs a description")]
    EmptyDescription {
        /// Zero-based position of the expense.
        index: usize,
    },

    /// The drawer float cannot be negative.
    #[error("Base amount cannot be negative: {0}")]
    NegativeBaseAmount(Decimal),

    /// An amount, rate or total is larger than a closing can record.
    #[error("{field} is out of range: {amount}")]
    AmountOutOfRange {
        /// Which figure overflowed.
        field: &'static str,
        /// The rejected value, or `Decimal::MAX` when it could not be computed.
        amount: Decimal,
    },

    /// An amount carries more decimal places than a closing records.
    #[error("{field} allows at most {max_scale} decimal places, got {amount}")]
    TooManyDecimals {
        /// Which figure is too precise.
        field: &'static str,
        /// The rejected value.
        amount: Decimal,
        /// Decimal places allowed for the figure.
        max_scale: u32,
    },
}

impl TallyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDenomination { .. } => "UNKNOWN_DENOMINATION",
            Self::NegativeExpense { .. } => "NEGATIVE_EXPENSE",
            Self::EmptyDescription { .. } => "EMPTY_EXPENSE_DESCRIPTION",
            Self::NegativeBaseAmount(_) => "NEGATIVE_BASE_AMOUNT",
            Self::AmountOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
            Self::TooManyDecimals { .. } => "TOO_MANY_DECIMALS",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        400
    }
}

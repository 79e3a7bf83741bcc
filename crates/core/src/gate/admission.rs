//! Eligibility check and commit-time admission of closings.

use cashbox_shared::types::ClosingId;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::day::{compute_operational_day, next_eligible_instant};
use super::error::GateError;
use crate::tally::{CashCount, ClosingTotals, Expense, ForeignTally, TallyError};

/// Anything that records the operational day of an existing closing.
pub trait RecordedClosing {
    /// The operational day the closing was attributed to.
    fn operational_day(&self) -> NaiveDate;
}

impl RecordedClosing for NaiveDate {
    fn operational_day(&self) -> NaiveDate {
        *self
    }
}

/// State of a single operational day.
///
/// `Closed` is terminal for that day; the following day opens at
/// `next_eligible_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DayState {
    /// No closing recorded yet.
    Open,
    /// A closing is recorded.
    Closed {
        /// When the next operational day begins.
        next_eligible_at: DateTime<Utc>,
    },
}

/// Result of the advisory eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    /// Whether a closing may be submitted now.
    pub admissible: bool,
    /// The operational day the instant maps to.
    pub day: NaiveDate,
    /// When the next closing becomes admissible; `None` when admissible now.
    pub next_eligible_at: Option<DateTime<Utc>>,
}

impl Eligibility {
    /// Returns the state of the operational day.
    #[must_use]
    pub fn state(&self) -> DayState {
        match self.next_eligible_at {
            Some(next_eligible_at) if !self.admissible => DayState::Closed { next_eligible_at },
            _ => DayState::Open,
        }
    }

    /// The next eligible instant rendered in `tz`, for display.
    #[must_use]
    pub fn next_eligible_local(&self, tz: Tz) -> Option<DateTime<Tz>> {
        self.next_eligible_at.map(|at| at.with_timezone(&tz))
    }
}

/// A closing as submitted by a cashier, before admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingCandidate {
    /// Opaque identity of the submitting actor.
    pub submitted_by: String,
    /// Float left in the drawer.
    pub base_amount: Decimal,
    /// Local bills counted.
    pub bills: CashCount,
    /// Optional foreign-currency tally.
    pub foreign: Option<ForeignTally>,
    /// Expenses paid from the drawer.
    pub expenses: Vec<Expense>,
    /// Totals reported for the closing.
    pub totals: ClosingTotals,
}

impl ClosingCandidate {
    /// Builds a candidate and derives its totals from the counts.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::AmountOutOfRange` if a total overflows or cannot
    /// be recorded.
    pub fn new(
        submitted_by: impl Into<String>,
        base_amount: Decimal,
        bills: CashCount,
        foreign: Option<ForeignTally>,
        expenses: Vec<Expense>,
    ) -> Result<Self, TallyError> {
        let totals = ClosingTotals::compute(base_amount, &bills, foreign.as_ref(), &expenses)?;
        Ok(Self {
            submitted_by: submitted_by.into(),
            base_amount,
            bills,
            foreign,
            expenses,
            totals,
        })
    }

    /// Checks the figures the gate is responsible for.
    fn validate(&self) -> Result<(), GateError> {
        if self.totals.cash_total < Decimal::ZERO {
            return Err(GateError::NegativeCashTotal {
                cash_total: self.totals.cash_total,
            });
        }

        if let Some(foreign) = &self.foreign
            && foreign.exchange_rate <= Decimal::ZERO
        {
            return Err(GateError::InvalidExchangeRate {
                rate: foreign.exchange_rate,
            });
        }

        Ok(())
    }
}

/// A candidate that passed the gate, tagged with its operational day and
/// ready to be written by the closings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedClosing {
    /// Identifier assigned at admission.
    pub id: ClosingId,
    /// The operational day the closing is attributed to.
    pub operational_day: NaiveDate,
    /// The instant the gate admitted the closing.
    pub admitted_at: DateTime<Utc>,
    /// The admitted payload.
    pub closing: ClosingCandidate,
}

impl RecordedClosing for AcceptedClosing {
    fn operational_day(&self) -> NaiveDate {
        self.operational_day
    }
}

/// Advisory check: may a closing be submitted at `instant`?
///
/// Used to short-circuit obviously blocked attempts and to show when the
/// next closing opens. The answer is only valid for `instant`; it says
/// nothing about a later commit.
#[must_use]
pub fn can_submit_closing<C: RecordedClosing>(
    existing: &[C],
    instant: DateTime<Utc>,
    tz: Tz,
) -> Eligibility {
    let day = compute_operational_day(instant, tz);

    if existing.iter().any(|closing| closing.operational_day() == day) {
        Eligibility {
            admissible: false,
            day,
            next_eligible_at: Some(next_eligible_instant(day, tz)),
        }
    } else {
        Eligibility {
            admissible: true,
            day,
            next_eligible_at: None,
        }
    }
}

/// Commit-time admission of `candidate` at `instant`.
///
/// Input errors are reported before the day check, so a malformed candidate
/// is rejected as such whether or not the day is already closed. The day
/// check is re-run here rather than trusting an earlier advisory answer.
pub fn admit_closing<C: RecordedClosing>(
    existing: &[C],
    candidate: ClosingCandidate,
    instant: DateTime<Utc>,
    tz: Tz,
) -> Result<AcceptedClosing, GateError> {
    candidate.validate()?;

    let eligibility = can_submit_closing(existing, instant, tz);
    if let Some(next_eligible_at) = eligibility.next_eligible_at {
        return Err(GateError::AlreadyClosedToday {
            day: eligibility.day,
            next_eligible_at,
        });
    }

    Ok(AcceptedClosing {
        id: ClosingId::new(),
        operational_day: eligibility.day,
        admitted_at: instant,
        closing: candidate,
    })
}

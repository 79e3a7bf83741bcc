//! Core business logic for Cashbox.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `gate` - Operational day computation and single-closing-per-day admission
//! - `tally` - Bill counts, expenses, and closing totals
//! - `clock` - Injectable time source

pub mod clock;
pub mod gate;
pub mod tally;

pub use clock::{Clock, FixedClock, SystemClock};
pub use gate::{
    AcceptedClosing, ClosingCandidate, DayState, Eligibility, GateError, RecordedClosing,
    admit_closing, can_submit_closing, compute_operational_day, next_eligible_instant,
};
pub use tally::{
    CashCount, ClosingTotals, Denominations, Expense, ForeignTally, MAX_SUBMITTED_BY_CHARS,
    TallyError, TallyRules,
};

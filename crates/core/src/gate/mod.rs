//! Operational-day gate.
//!
//! This module decides which business day a closing belongs to and whether
//! a new closing may be accepted:
//! - Operational day computation (noon cutover in a fixed time zone)
//! - Advisory eligibility check against recorded closings
//! - Commit-time admission of a closing candidate
//! - Error types carrying the blocking day and the next eligible instant
//!
//! Everything here is pure: the current instant and the time zone are
//! always parameters. Uniqueness of the operational day is ultimately
//! enforced by the closings store; the checks here are the in-process half.

pub mod admission;
pub mod day;
pub mod error;

#[cfg(test)]
mod props;

pub use admission::{
    AcceptedClosing, ClosingCandidate, DayState, Eligibility, RecordedClosing, admit_closing,
    can_submit_closing,
};
pub use day::{CUTOVER, compute_operational_day, next_eligible_instant};
pub use error::GateError;

//! Drawer tally: what the cashier counted and spent.
//!
//! This module provides:
//! - Bill counts per denomination for the local and foreign currency
//! - Expense lines paid out of the drawer
//! - Closing totals derived from the counts
//! - Checks against the drawer's accepted denominations and the recordable range

pub mod count;
pub mod error;
pub mod limits;
pub mod rules;
pub mod totals;

pub use count::{CashCount, Denominations, Expense, ForeignTally, validate_expenses};
pub use error::TallyError;
pub use limits::{
    AMOUNT_SCALE, MAX_AMOUNT, MAX_EXCHANGE_RATE, MAX_SUBMITTED_BY_CHARS, RATE_SCALE,
};
pub use rules::TallyRules;
pub use totals::ClosingTotals;

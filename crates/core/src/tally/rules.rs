//! Validation of a whole drawer tally against the drawer's settings.

use rust_decimal::Decimal;

use super::count::{CashCount, Denominations, Expense, ForeignTally, validate_expenses};
use super::error::TallyError;
use super::limits::{check_amount, check_rate};

/// Denominations a drawer accepts, local and foreign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyRules {
    /// Accepted local bills.
    pub local: Denominations,
    /// Accepted foreign bills.
    pub foreign: Denominations,
}

impl Default for TallyRules {
    fn default() -> Self {
        Self {
            local: Denominations::local_default(),
            foreign: Denominations::foreign_default(),
        }
    }
}

impl TallyRules {
    /// Creates rules from the configured face values.
    #[must_use]
    pub fn new(local: Vec<u32>, foreign: Vec<u32>) -> Self {
        Self {
            local: Denominations::new(local),
            foreign: Denominations::new(foreign),
        }
    }

    /// Rejects a tally that could not have come out of this drawer.
    ///
    /// Checks run in payload order (base, local bills, foreign bills and
    /// rate, expenses) and the first failure is returned. Amounts must fit
    /// the recorded precision and range.
    pub fn check(
        &self,
        base_amount: Decimal,
        bills: &CashCount,
        foreign: Option<&ForeignTally>,
        expenses: &[Expense],
    ) -> Result<(), TallyError> {
        if base_amount < Decimal::ZERO {
            return Err(TallyError::NegativeBaseAmount(base_amount));
        }
        check_amount("base_amount", base_amount)?;

        bills.validate_against(&self.local)?;
        if let Some(foreign) = foreign {
            foreign.bills.validate_against(&self.foreign)?;
            check_rate("exchange_rate", foreign.exchange_rate)?;
        }

        validate_expenses(expenses)?;
        expenses
            .iter()
            .try_for_each(|expense| check_amount("expense_amount", expense.amount))
    }
}

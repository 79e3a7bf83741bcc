//! Closing totals derived from the drawer tally.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::count::{CashCount, Expense, ForeignTally};
use super::error::TallyError;
use super::limits::{AMOUNT_SCALE, check_amount};

/// Figures reported by a closing, all in the local currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingTotals {
    /// Face value of the local bills counted.
    pub bills_counted: Decimal,
    /// Foreign bills converted at the declared rate, rounded to cents (zero
    /// without a tally).
    pub foreign_in_local: Decimal,
    /// Everything in the drawer: base amount + local bills + converted foreign bills.
    pub cash_total: Decimal,
    /// Sum of the expense lines.
    pub expenses_total: Decimal,
    /// `cash_total - expenses_total`.
    pub final_balance: Decimal,
}

fn overflow(field: &'static str) -> TallyError {
    TallyError::AmountOutOfRange {
        field,
        amount: Decimal::MAX,
    }
}

impl ClosingTotals {
    /// Computes the totals for a drawer.
    ///
    /// Fails with `AmountOutOfRange` if any figure overflows or exceeds what
    /// a closing can record.
    pub fn compute(
        base_amount: Decimal,
        bills: &CashCount,
        foreign: Option<&ForeignTally>,
        expenses: &[Expense],
    ) -> Result<Self, TallyError> {
        let bills_counted = bills.total().ok_or_else(|| overflow("bills_counted"))?;

        let foreign_in_local = match foreign {
            Some(tally) => tally
                .total_in_local()
                .ok_or_else(|| overflow("foreign_in_local"))?
                .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero),
            None => Decimal::ZERO,
        };

        let cash_total = base_amount
            .checked_add(bills_counted)
            .and_then(|sum| sum.checked_add(foreign_in_local))
            .ok_or_else(|| overflow("cash_total"))?;

        let expenses_total = expenses
            .iter()
            .try_fold(Decimal::ZERO, |sum, e| sum.checked_add(e.amount))
            .ok_or_else(|| overflow("expenses_total"))?;

        let final_balance = cash_total
            .checked_sub(expenses_total)
            .ok_or_else(|| overflow("final_balance"))?;

        let totals = Self {
            bills_counted,
            foreign_in_local,
            cash_total,
            expenses_total,
            final_balance,
        };
        totals.ensure_recordable()?;
        Ok(totals)
    }

    fn ensure_recordable(&self) -> Result<(), TallyError> {
        check_amount("bills_counted", self.bills_counted)?;
        check_amount("foreign_in_local", self.foreign_in_local)?;
        check_amount("cash_total", self.cash_total)?;
        check_amount("expenses_total", self.expenses_total)?;
        check_amount("final_balance", self.final_balance)
    }
}

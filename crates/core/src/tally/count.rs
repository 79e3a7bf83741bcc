//! Bill counts, foreign tallies and expense lines.

use std::collections::BTreeMap;

use cashbox_shared::config::{DEFAULT_FOREIGN_DENOMINATIONS, DEFAULT_LOCAL_DENOMINATIONS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TallyError;

/// The set of bill face values a drawer accepts, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Denominations(Vec<u32>);

impl Denominations {
    /// Creates a denomination set, sorted largest first without duplicates.
    #[must_use]
    pub fn new(mut values: Vec<u32>) -> Self {
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.dedup();
        Self(values)
    }

    /// Dominican peso bills handled by the drawer.
    #[must_use]
    pub fn local_default() -> Self {
        Self::new(DEFAULT_LOCAL_DENOMINATIONS.to_vec())
    }

    /// US dollar bills handled by the drawer.
    #[must_use]
    pub fn foreign_default() -> Self {
        Self::new(DEFAULT_FOREIGN_DENOMINATIONS.to_vec())
    }

    /// Returns true if `denomination` is accepted.
    #[must_use]
    pub fn contains(&self, denomination: u32) -> bool {
        self.0.contains(&denomination)
    }

    /// Returns the face values, largest first.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Number of bills counted per denomination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashCount(BTreeMap<u32, u32>);

impl CashCount {
    /// Creates an empty count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a count from `(denomination, bills)` pairs; repeated
    /// denominations accumulate.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut count = Self::new();
        for (denomination, bills) in pairs {
            count.add(denomination, bills);
        }
        count
    }

    /// Adds `bills` of `denomination` to the count.
    pub fn add(&mut self, denomination: u32, bills: u32) {
        *self.0.entry(denomination).or_insert(0) += bills;
    }

    /// Number of bills counted for `denomination`.
    #[must_use]
    pub fn bills(&self, denomination: u32) -> u32 {
        self.0.get(&denomination).copied().unwrap_or(0)
    }

    /// Face value of everything counted, or `None` if it does not fit a
    /// `Decimal`.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.0.iter().try_fold(Decimal::ZERO, |acc, (denomination, bills)| {
            Decimal::from(*denomination)
                .checked_mul(Decimal::from(*bills))
                .and_then(|value| acc.checked_add(value))
        })
    }

    /// Rejects counts for denominations outside `accepted`.
    ///
    /// Zero counts are ignored so a form that submits every field still passes.
    pub fn validate_against(&self, accepted: &Denominations) -> Result<(), TallyError> {
        match self
            .0
            .iter()
            .find(|(denomination, bills)| **bills > 0 && !accepted.contains(**denomination))
        {
            Some((denomination, _)) => Err(TallyError::UnknownDenomination {
                denomination: *denomination,
            }),
            None => Ok(()),
        }
    }

    /// Iterates over `(denomination, bills)` pairs, smallest denomination first.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(d, b)| (*d, *b))
    }
}

/// Foreign-currency bills counted in the drawer, with the rate used to
/// convert them into the local currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignTally {
    /// Foreign bills counted.
    pub bills: CashCount,
    /// Local units per foreign unit.
    pub exchange_rate: Decimal,
}

impl ForeignTally {
    /// Face value of the foreign bills, in the foreign currency.
    #[must_use]
    pub fn total_foreign(&self) -> Option<Decimal> {
        self.bills.total()
    }

    /// Value of the foreign bills converted into the local currency, or
    /// `None` on overflow.
    #[must_use]
    pub fn total_in_local(&self) -> Option<Decimal> {
        self.total_foreign()?.checked_mul(self.exchange_rate)
    }
}

/// Money paid out of the drawer during the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// What the money was spent on.
    pub description: String,
    /// Amount paid, in the local currency.
    pub amount: Decimal,
}

impl Expense {
    /// Creates an expense line.
    #[must_use]
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// Checks every expense line: non-negative amount and a description.
pub fn validate_expenses(expenses: &[Expense]) -> Result<(), TallyError> {
    for (index, expense) in expenses.iter().enumerate() {
        if expense.amount < Decimal::ZERO {
            return Err(TallyError::NegativeExpense {
                index,
                amount: expense.amount,
            });
        }
        if expense.description.trim().is_empty() {
            return Err(TallyError::EmptyDescription { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_denominations_sorted_and_deduplicated() {
        let denominations = Denominations::new(vec![50, 2000, 100, 50]);
        assert_eq!(denominations.as_slice(), &[2000, 100, 50]);
        assert!(denominations.contains(100));
        assert!(!denominations.contains(25));
    }

    #[test]
    fn test_cash_count_total() {
        let count = CashCount::from_pairs([(2000, 3), (500, 1), (50, 4)]);
        assert_eq!(count.total(), Some(dec!(6700)));
        assert_eq!(count.bills(2000), 3);
        assert_eq!(count.bills(1000), 0);
    }

    #[test]
    fn test_cash_count_accumulates_repeated_denominations() {
        let count = CashCount::from_pairs([(100, 2), (100, 3)]);
        assert_eq!(count.bills(100), 5);
        assert_eq!(count.total(), Some(dec!(500)));
    }

    #[test]
    fn test_empty_count_is_zero() {
        assert_eq!(CashCount::new().total(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_validate_against_rejects_unknown_denomination() {
        let count = CashCount::from_pairs([(2000, 1), (25, 2)]);
        assert_eq!(
            count.validate_against(&Denominations::local_default()),
            Err(TallyError::UnknownDenomination { denomination: 25 })
        );
    }

    #[test]
    fn test_validate_against_ignores_zero_counts() {
        let count = CashCount::from_pairs([(2000, 1), (25, 0)]);
        assert!(count.validate_against(&Denominations::local_default()).is_ok());
    }

    #[test]
    fn test_foreign_tally_conversion() {
        let tally = ForeignTally {
            bills: CashCount::from_pairs([(100, 1), (20, 2)]),
            exchange_rate: dec!(58.50),
        };
        assert_eq!(tally.total_foreign(), Some(dec!(140)));
        assert_eq!(tally.total_in_local(), Some(dec!(8190.00)));
    }

    #[test]
    fn test_foreign_conversion_overflow_is_none() {
        let tally = ForeignTally {
            bills: CashCount::from_pairs([(100, 1)]),
            exchange_rate: Decimal::MAX,
        };
        assert_eq!(tally.total_in_local(), None);
    }

    #[test]
    fn test_validate_expenses() {
        assert!(validate_expenses(&[Expense::new("Agua", dec!(150))]).is_ok());
        assert!(validate_expenses(&[Expense::new("Cortesia", dec!(0))]).is_ok());
        assert_eq!(
            validate_expenses(&[Expense::new("Agua", dec!(150)), Expense::new("Taxi", dec!(-20))]),
            Err(TallyError::NegativeExpense {
                index: 1,
                amount: dec!(-20)
            })
        );
        assert_eq!(
            validate_expenses(&[Expense::new("   ", dec!(10))]),
            Err(TallyError::EmptyDescription { index: 0 })
        );
    }

    #[test]
    fn test_cash_count_json_uses_denomination_keys() {
        let count = CashCount::from_pairs([(2000, 2), (50, 1)]);
        let json = serde_json::to_value(&count).unwrap();
        assert_eq!(json, serde_json::json!({"50": 1, "2000": 2}));

        let parsed: CashCount = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, count);
    }
}

//! Bounds every recorded figure has to respect.
//!
//! Money is kept to cents below one trillion and exchange rates to four
//! decimal places below one hundred million, matching the `closings` columns.
//! Submitter names are capped at [`MAX_SUBMITTED_BY_CHARS`].

use rust_decimal::Decimal;

use super::error::TallyError;

/// Decimal places kept for money.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest money amount a closing records: 999,999,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, AMOUNT_SCALE);

/// Decimal places kept for exchange rates.
pub const RATE_SCALE: u32 = 4;

/// Largest exchange rate a closing records: 99,999,999.9999.
pub const MAX_EXCHANGE_RATE: Decimal =
    Decimal::from_parts(3_567_587_327, 232, 0, false, RATE_SCALE);

/// Longest name a closing can be submitted under, in characters.
pub const MAX_SUBMITTED_BY_CHARS: u32 = 100;

/// Checks that `amount` fits a money column.
pub fn check_amount(field: &'static str, amount: Decimal) -> Result<(), TallyError> {
    check(field, amount, AMOUNT_SCALE, MAX_AMOUNT)
}

/// Checks that `rate` fits an exchange-rate column. The sign is the gate's
/// concern.
pub fn check_rate(field: &'static str, rate: Decimal) -> Result<(), TallyError> {
    check(field, rate, RATE_SCALE, MAX_EXCHANGE_RATE)
}

fn check(
    field: &'static str,
    amount: Decimal,
    max_scale: u32,
    max: Decimal,
) -> Result<(), TallyError> {
    if amount.abs() > max {
        return Err(TallyError::AmountOutOfRange { field, amount });
    }
    if amount.normalize().scale() > max_scale {
        return Err(TallyError::TooManyDecimals {
            field,
            amount,
            max_scale,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limits_match_column_widths() {
        assert_eq!(MAX_AMOUNT, dec!(999999999999.99));
        assert_eq!(MAX_EXCHANGE_RATE, dec!(99999999.9999));
    }

    #[rstest]
    #[case::plain(dec!(4000))]
    #[case::cents(dec!(150.25))]
    #[case::trailing_zeros(dec!(150.2500))]
    #[case::negative(dec!(-20.50))]
    #[case::at_max(dec!(999999999999.99))]
    fn test_accepts_amount(#[case] amount: Decimal) {
        assert_eq!(check_amount("amount", amount), Ok(()));
    }

    #[rstest]
    #[case::above_max(dec!(1000000000000), "AMOUNT_OUT_OF_RANGE")]
    #[case::far_below_min(dec!(-1000000000000), "AMOUNT_OUT_OF_RANGE")]
    #[case::decimal_max(Decimal::MAX, "AMOUNT_OUT_OF_RANGE")]
    #[case::sub_cent(dec!(0.001), "TOO_MANY_DECIMALS")]
    fn test_rejects_amount(#[case] amount: Decimal, #[case] code: &str) {
        let err = check_amount("amount", amount).unwrap_err();
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_rate_allows_four_decimals() {
        assert_eq!(check_rate("exchange_rate", dec!(58.1234)), Ok(()));
        assert_eq!(
            check_rate("exchange_rate", dec!(58.12345)),
            Err(TallyError::TooManyDecimals {
                field: "exchange_rate",
                amount: dec!(58.12345),
                max_scale: 4,
            })
        );
        assert!(check_rate("exchange_rate", dec!(100000000)).is_err());
    }
}

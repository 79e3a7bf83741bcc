//! Property-based tests for the operational-day gate.

use chrono::{DateTime, NaiveDate, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::*;
use crate::tally::CashCount;

/// 2000-01-01T00:00:00Z ..= 2099-12-31T23:59:59Z
fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800_i64..4_102_444_799_i64, 0_u32..1000)
        .prop_map(|(secs, millis)| DateTime::from_timestamp(secs, millis * 1_000_000).unwrap())
}

/// Zones whose offset changes never happen around local noon.
fn zone_strategy() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(chrono_tz::America::Santo_Domingo),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Europe::Madrid),
        Just(chrono_tz::Asia::Kolkata),
        Just(chrono_tz::Asia::Tokyo),
        Just(Tz::UTC),
    ]
}

fn operational_days_strategy() -> impl Strategy<Value = Vec<NaiveDate>> {
    prop::collection::vec(0_i64..36_500, 0..20).prop_map(|offsets| {
        let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        offsets
            .into_iter()
            .map(|offset| epoch + TimeDelta::days(offset))
            .collect()
    })
}

fn valid_candidate() -> ClosingCandidate {
    ClosingCandidate::new(
        "cajero",
        Decimal::new(4000, 0),
        CashCount::from_pairs([(500, 2)]),
        None,
        vec![],
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Local hour before noon maps to the previous calendar date.
    #[test]
    fn prop_morning_maps_to_previous_date(instant in instant_strategy(), tz in zone_strategy()) {
        let local = instant.with_timezone(&tz);
        prop_assume!(local.hour() < 12);

        let expected = local.date_naive().pred_opt().unwrap();
        prop_assert_eq!(compute_operational_day(instant, tz), expected);
    }

    /// Local hour at or after noon maps to the local calendar date.
    #[test]
    fn prop_afternoon_maps_to_same_date(instant in instant_strategy(), tz in zone_strategy()) {
        let local = instant.with_timezone(&tz);
        prop_assume!(local.hour() >= 12);

        prop_assert_eq!(compute_operational_day(instant, tz), local.date_naive());
    }

    /// Same inputs, same answer.
    #[test]
    fn prop_eligibility_is_idempotent(
        existing in operational_days_strategy(),
        instant in instant_strategy(),
        tz in zone_strategy(),
    ) {
        let first = can_submit_closing(&existing, instant, tz);
        let second = can_submit_closing(&existing, instant, tz);
        prop_assert_eq!(first, second);
    }

    /// Admissible exactly when the computed day is not recorded.
    #[test]
    fn prop_admissible_iff_day_unrecorded(
        existing in operational_days_strategy(),
        instant in instant_strategy(),
        tz in zone_strategy(),
    ) {
        let eligibility = can_submit_closing(&existing, instant, tz);
        prop_assert_eq!(eligibility.admissible, !existing.contains(&eligibility.day));
        prop_assert_eq!(eligibility.next_eligible_at.is_none(), eligibility.admissible);
    }

    /// Once admitted, the day stays closed until the next eligible instant,
    /// which is exactly where the following operational day begins.
    #[test]
    fn prop_admitted_day_stays_closed(
        instant in instant_strategy(),
        tz in zone_strategy(),
        later_secs in 0_i64..(48 * 3600),
    ) {
        let none: Vec<NaiveDate> = vec![];
        let accepted = admit_closing(&none, valid_candidate(), instant, tz).unwrap();
        let existing = vec![accepted.operational_day];

        let blocked = can_submit_closing(&existing, instant, tz);
        prop_assert!(!blocked.admissible);
        let next = blocked.next_eligible_at.unwrap();
        prop_assert!(next > instant);

        let later = instant + TimeDelta::seconds(later_secs);
        let eligibility = can_submit_closing(&existing, later, tz);
        if later < next {
            prop_assert!(!eligibility.admissible);
            prop_assert_eq!(eligibility.day, accepted.operational_day);
        } else {
            prop_assert!(eligibility.admissible);
        }

        prop_assert_eq!(
            compute_operational_day(next, tz),
            accepted.operational_day.succ_opt().unwrap()
        );
        prop_assert_eq!(
            compute_operational_day(next - TimeDelta::milliseconds(1), tz),
            accepted.operational_day
        );
    }

    /// Negative cash totals are rejected whatever the day state.
    #[test]
    fn prop_negative_cash_always_rejected(
        existing in operational_days_strategy(),
        instant in instant_strategy(),
        tz in zone_strategy(),
        cents in 1_i64..10_000_000,
    ) {
        let mut candidate = valid_candidate();
        candidate.totals.cash_total = Decimal::new(-cents, 2);

        let result = admit_closing(&existing, candidate, instant, tz);
        let is_negative_cash = matches!(result, Err(GateError::NegativeCashTotal { .. }));
        prop_assert!(is_negative_cash);
    }
}

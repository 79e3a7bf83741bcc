//! Concurrent submission tests for the closing store.
//!
//! Several admissions for the same operational day race to insert. The
//! store must let exactly one through and report the rest as duplicates.

use cashbox_core::{CashCount, ClosingCandidate, admit_closing};
use cashbox_db::migration::{Migrator, MigratorTrait};
use cashbox_db::{ClosingRepository, ClosingStoreError};
use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::America::Santo_Domingo;
use futures::future::join_all;
use rust_decimal_macros::dec;
use sea_orm::Database;

const CONCURRENT_SUBMISSIONS: usize = 16;

#[tokio::test]
async fn test_only_one_closing_per_day_under_contention() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let repo = ClosingRepository::new(db);

    // 14:00 local on 2024-03-01; every submission lands within the same day.
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
    let none: Vec<NaiveDate> = vec![];

    let admitted: Vec<_> = (0..CONCURRENT_SUBMISSIONS)
        .map(|i| {
            let candidate = ClosingCandidate::new(
                format!("cajero-{i}"),
                dec!(4000),
                CashCount::from_pairs([(500, 2)]),
                None,
                vec![],
            )
            .unwrap();
            let at = start + TimeDelta::seconds(i64::try_from(i).unwrap());
            admit_closing(&none, candidate, at, Santo_Domingo).unwrap()
        })
        .collect();

    let results = join_all(admitted.iter().map(|accepted| {
        let repo = repo.clone();
        async move { repo.insert_if_absent(accepted).await }
    }))
    .await;

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(ClosingStoreError::Duplicate(_))))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(duplicates, CONCURRENT_SUBMISSIONS - 1);

    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert_eq!(repo.operational_days(None).await.unwrap(), vec![day]);
}

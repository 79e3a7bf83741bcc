//! Integration tests for the closing repository.
//!
//! Runs the real migration against an in-memory SQLite database, so the
//! unique index on `operational_day` is exercised exactly as deployed.

use cashbox_core::{
    AcceptedClosing, CashCount, ClosingCandidate, Expense, ForeignTally, GateError,
    admit_closing,
};
use cashbox_db::migration::{Migrator, MigratorTrait};
use cashbox_db::{ClosingRecord, ClosingRepository, ClosingStoreError};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::America::Santo_Domingo;
use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection};

async fn setup() -> ClosingRepository {
    let db: DatabaseConnection = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    ClosingRepository::new(db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Local time in Santo Domingo, converted to UTC.
fn rd(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Santo_Domingo
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn candidate(foreign: Option<ForeignTally>) -> ClosingCandidate {
    ClosingCandidate::new(
        "cajero",
        dec!(4000),
        CashCount::from_pairs([(1000, 3), (100, 5)]),
        foreign,
        vec![Expense::new("Agua", dec!(150))],
    )
    .unwrap()
}

fn admit(at: DateTime<Utc>, foreign: Option<ForeignTally>) -> AcceptedClosing {
    let none: Vec<NaiveDate> = vec![];
    admit_closing(&none, candidate(foreign), at, Santo_Domingo).unwrap()
}

#[tokio::test]
async fn test_insert_and_find_by_day() {
    let repo = setup().await;
    let accepted = admit(rd(2024, 3, 1, 14), None);

    let stored = repo.insert_if_absent(&accepted).await.unwrap();
    assert_eq!(stored.operational_day, date(2024, 3, 1));
    assert_eq!(stored.id, accepted.id.into_inner());

    let found = repo.find_by_day(date(2024, 3, 1)).await.unwrap().unwrap();
    let record = ClosingRecord::try_from(found).unwrap();
    assert_eq!(record.submitted_by, "cajero");
    assert_eq!(record.bills, CashCount::from_pairs([(1000, 3), (100, 5)]));
    assert_eq!(record.expenses, vec![Expense::new("Agua", dec!(150))]);
    assert_eq!(record.totals.cash_total, dec!(7500));
    assert_eq!(record.totals.final_balance, dec!(7350));
    assert_eq!(record.foreign, None);

    assert!(repo.find_by_day(date(2024, 3, 2)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_second_closing_for_same_day_is_duplicate() {
    let repo = setup().await;
    repo.insert_if_absent(&admit(rd(2024, 3, 1, 14), None))
        .await
        .unwrap();

    // 09:00 the next morning still belongs to March 1st.
    let late = admit(rd(2024, 3, 2, 9), None);
    assert_eq!(late.operational_day, date(2024, 3, 1));

    let err = repo.insert_if_absent(&late).await.unwrap_err();
    assert!(matches!(err, ClosingStoreError::Duplicate(day) if day == date(2024, 3, 1)));

    assert_eq!(
        err.into_gate_error(Santo_Domingo),
        GateError::AlreadyClosedToday {
            day: date(2024, 3, 1),
            next_eligible_at: Utc.with_ymd_and_hms(2024, 3, 2, 16, 0, 0).unwrap(),
        }
    );
}

#[tokio::test]
async fn test_operational_days_since() {
    let repo = setup().await;
    for day in [1, 2, 4] {
        repo.insert_if_absent(&admit(rd(2024, 3, day, 15), None))
            .await
            .unwrap();
    }

    assert_eq!(
        repo.operational_days(None).await.unwrap(),
        vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 4)]
    );
    assert_eq!(
        repo.operational_days(Some(date(2024, 3, 2))).await.unwrap(),
        vec![date(2024, 3, 2), date(2024, 3, 4)]
    );
}

#[tokio::test]
async fn test_list_closings_newest_first_with_limit() {
    let repo = setup().await;
    for day in 1..=4 {
        repo.insert_if_absent(&admit(rd(2024, 3, day, 15), None))
            .await
            .unwrap();
    }

    let days: Vec<NaiveDate> = repo
        .list_closings(2)
        .await
        .unwrap()
        .into_iter()
        .map(|closing| closing.operational_day)
        .collect();
    assert_eq!(days, vec![date(2024, 3, 4), date(2024, 3, 3)]);
}

#[tokio::test]
async fn test_list_between_is_inclusive() {
    let repo = setup().await;
    for day in 1..=5 {
        repo.insert_if_absent(&admit(rd(2024, 3, day, 15), None))
            .await
            .unwrap();
    }

    let days: Vec<NaiveDate> = repo
        .list_between(date(2024, 3, 2), date(2024, 3, 4))
        .await
        .unwrap()
        .into_iter()
        .map(|closing| closing.operational_day)
        .collect();
    assert_eq!(days, vec![date(2024, 3, 4), date(2024, 3, 3), date(2024, 3, 2)]);

    assert!(
        repo.list_between(date(2024, 4, 1), date(2024, 4, 30))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_latest_exchange_rate_skips_closings_without_foreign_tally() {
    let repo = setup().await;
    assert_eq!(repo.latest_exchange_rate().await.unwrap(), None);

    let usd = |rate| ForeignTally {
        bills: CashCount::from_pairs([(20, 2)]),
        exchange_rate: rate,
    };
    repo.insert_if_absent(&admit(rd(2024, 3, 1, 15), Some(usd(dec!(58.25)))))
        .await
        .unwrap();
    repo.insert_if_absent(&admit(rd(2024, 3, 2, 15), Some(usd(dec!(59.10)))))
        .await
        .unwrap();
    repo.insert_if_absent(&admit(rd(2024, 3, 3, 15), None))
        .await
        .unwrap();

    assert_eq!(repo.latest_exchange_rate().await.unwrap(), Some(dec!(59.10)));

    let record = ClosingRecord::try_from(
        repo.find_by_day(date(2024, 3, 2)).await.unwrap().unwrap(),
    )
    .unwrap();
    let foreign = record.foreign.unwrap();
    assert_eq!(foreign.bills, CashCount::from_pairs([(20, 2)]));
    assert_eq!(record.totals.foreign_in_local, dec!(2364));
}

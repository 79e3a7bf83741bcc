//! Database seeder for Cashbox development.
//!
//! Seeds one closing for each of the last few operational days, admitted
//! through the same gate the API uses. Days that already have a closing are
//! skipped, so the seeder can be run repeatedly.
//!
//! Usage: cargo run --bin seeder [days]

use anyhow::Context;
use cashbox_core::{
    CashCount, ClosingCandidate, Clock, Expense, ForeignTally, SystemClock, admit_closing,
    compute_operational_day,
};
use cashbox_db::{ClosingRepository, ClosingStoreError, connect_with};
use cashbox_shared::{AppConfig, DrawerConfig};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use rust_decimal::Decimal;

const DEFAULT_DAYS: u32 = 7;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let days = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u32>()
            .with_context(|| format!("invalid day count: {arg}"))?,
        None => DEFAULT_DAYS,
    };

    let config = AppConfig::load().context("failed to load configuration")?;

    println!("Connecting to database...");
    let db = connect_with(&config.database)
        .await
        .context("failed to connect to database")?;
    let repo = ClosingRepository::new(db);

    let today = compute_operational_day(SystemClock.now(), config.drawer.timezone);
    println!("Seeding closings for the {days} days before {today}...");

    for offset in (1..=days).rev() {
        let day = today - TimeDelta::days(i64::from(offset));
        seed_closing(&repo, &config.drawer, day, offset).await?;
    }

    println!("Seeding complete!");
    Ok(())
}

/// Evening of `day` in the drawer's zone.
fn closing_time(drawer: &DrawerConfig, day: NaiveDate) -> anyhow::Result<DateTime<Utc>> {
    let evening = NaiveTime::from_hms_opt(19, 30, 0).context("invalid closing time")?;
    day.and_time(evening)
        .and_local_timezone(drawer.timezone)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .with_context(|| format!("no local evening on {day}"))
}

/// A plausible tally that varies a little from day to day.
fn demo_candidate(drawer: &DrawerConfig, seed: u32) -> anyhow::Result<ClosingCandidate> {
    let bills = CashCount::from_pairs([
        (2000, 1 + seed % 3),
        (1000, 2 + seed % 4),
        (500, 3),
        (100, 4 + seed % 5),
        (50, seed % 6),
    ]);

    let foreign = (seed % 2 == 0).then(|| ForeignTally {
        bills: CashCount::from_pairs([(20, 1 + seed % 3), (5, 2)]),
        exchange_rate: drawer.default_exchange_rate + Decimal::new(i64::from(seed % 4) * 25, 2),
    });

    let mut expenses = vec![Expense::new("Agua", Decimal::new(150, 0))];
    if seed % 3 == 0 {
        expenses.push(Expense::new("Materiales de limpieza", Decimal::new(425, 0)));
    }

    Ok(ClosingCandidate::new(
        "demo",
        drawer.base_amount,
        bills,
        foreign,
        expenses,
    )?)
}

async fn seed_closing(
    repo: &ClosingRepository,
    drawer: &DrawerConfig,
    day: NaiveDate,
    seed: u32,
) -> anyhow::Result<()> {
    let at = closing_time(drawer, day)?;
    let existing = repo.operational_days(Some(day)).await?;

    let candidate = demo_candidate(drawer, seed)?;

    let accepted = match admit_closing(&existing, candidate, at, drawer.timezone) {
        Ok(accepted) => accepted,
        Err(e) => {
            println!("  {day}: {e}, skipping...");
            return Ok(());
        }
    };

    match repo.insert_if_absent(&accepted).await {
        Ok(stored) => {
            println!(
                "  {day}: closed with final balance {}",
                stored.final_balance
            );
            Ok(())
        }
        Err(ClosingStoreError::Duplicate(_)) => {
            println!("  {day}: closing already exists, skipping...");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

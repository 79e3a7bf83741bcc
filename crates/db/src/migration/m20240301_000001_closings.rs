//! Closings table.
//!
//! One row per operational day. The unique index on `operational_day` is
//! the authoritative guard against two closings for the same day.
//!
//! Built with the schema builder so the same migration runs on Postgres
//! (production) and SQLite (tests).

use cashbox_core::MAX_SUBMITTED_BY_CHARS;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Closings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Closings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Closings::OperationalDay).date().not_null())
                    .col(
                        ColumnDef::new(Closings::SubmittedBy)
                            .string_len(MAX_SUBMITTED_BY_CHARS)
                            .not_null(),
                    )
                    .col(money(Closings::BaseAmount))
                    .col(ColumnDef::new(Closings::Bills).json().not_null())
                    .col(ColumnDef::new(Closings::ForeignBills).json().null())
                    .col(ColumnDef::new(Closings::ExchangeRate).decimal_len(12, 4).null())
                    .col(ColumnDef::new(Closings::Expenses).json().not_null())
                    .col(money(Closings::BillsCounted))
                    .col(money(Closings::ForeignInLocal))
                    .col(
                        money(Closings::CashTotal)
                            .check(Expr::col(Closings::CashTotal).gte(0)),
                    )
                    .col(money(Closings::ExpensesTotal))
                    .col(money(Closings::FinalBalance))
                    .col(
                        ColumnDef::new(Closings::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_closings_operational_day")
                    .table(Closings::Table)
                    .col(Closings::OperationalDay)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_closings_submitted_at")
                    .table(Closings::Table)
                    .col(Closings::SubmittedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Closings::Table).if_exists().to_owned())
            .await
    }
}

/// Non-null amount in the local currency.
fn money(column: Closings) -> ColumnDef {
    ColumnDef::new(column).decimal_len(14, 2).not_null().to_owned()
}

#[derive(DeriveIden, Clone, Copy)]
enum Closings {
    Table,
    Id,
    OperationalDay,
    SubmittedBy,
    BaseAmount,
    Bills,
    ForeignBills,
    ExchangeRate,
    Expenses,
    BillsCounted,
    ForeignInLocal,
    CashTotal,
    ExpensesTotal,
    FinalBalance,
    SubmittedAt,
}

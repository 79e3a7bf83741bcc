//! Closing repository: the durable store behind the operational-day gate.
//!
//! `insert_if_absent` is the authoritative admission step. The unique index
//! on `operational_day` decides which of two concurrent inserts wins; the
//! loser gets [`ClosingStoreError::Duplicate`].

use cashbox_core::{
    AcceptedClosing, CashCount, ClosingTotals, Expense, ForeignTally, GateError,
    next_eligible_instant,
};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::closings;

/// Error types for closing storage.
#[derive(Debug, thiserror::Error)]
pub enum ClosingStoreError {
    /// A closing for this operational day is already stored.
    #[error("A closing for {0} already exists")]
    Duplicate(NaiveDate),

    /// A stored JSON column could not be encoded or decoded.
    #[error("Malformed closing payload: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The database rejected or failed the operation.
    #[error("Database error: {0}")]
    Unavailable(#[from] DbErr),
}

impl ClosingStoreError {
    /// Translates a storage failure into the gate's vocabulary.
    ///
    /// A duplicate-key rejection means the same thing as a failed gate
    /// check, so it carries the same next eligible instant.
    #[must_use]
    pub fn into_gate_error(self, tz: Tz) -> GateError {
        match self {
            Self::Duplicate(day) => GateError::AlreadyClosedToday {
                day,
                next_eligible_at: next_eligible_instant(day, tz),
            },
            Self::Encoding(e) => GateError::StorageUnavailable(e.to_string()),
            Self::Unavailable(e) => GateError::StorageUnavailable(e.to_string()),
        }
    }
}

/// A stored closing with its JSON columns decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosingRecord {
    /// Closing ID.
    pub id: Uuid,
    /// The operational day the closing belongs to.
    pub operational_day: NaiveDate,
    /// Who submitted it.
    pub submitted_by: String,
    /// Float left in the drawer.
    pub base_amount: Decimal,
    /// Local bills counted.
    pub bills: CashCount,
    /// Foreign tally, if one was declared.
    pub foreign: Option<ForeignTally>,
    /// Expenses paid from the drawer.
    pub expenses: Vec<Expense>,
    /// Reported totals.
    pub totals: ClosingTotals,
    /// When the closing was stored.
    pub submitted_at: DateTime<Utc>,
}

impl TryFrom<closings::Model> for ClosingRecord {
    type Error = ClosingStoreError;

    fn try_from(model: closings::Model) -> Result<Self, Self::Error> {
        let totals = model.totals();
        let foreign = match (model.foreign_bills, model.exchange_rate) {
            (Some(bills), Some(exchange_rate)) => Some(ForeignTally {
                bills: serde_json::from_value(bills)?,
                exchange_rate,
            }),
            _ => None,
        };

        Ok(Self {
            id: model.id,
            operational_day: model.operational_day,
            submitted_by: model.submitted_by,
            base_amount: model.base_amount,
            bills: serde_json::from_value(model.bills)?,
            foreign,
            expenses: serde_json::from_value(model.expenses)?,
            totals,
            submitted_at: model.submitted_at.with_timezone(&Utc),
        })
    }
}

/// Closing repository.
#[derive(Debug, Clone)]
pub struct ClosingRepository {
    db: DatabaseConnection,
}

impl ClosingRepository {
    /// Creates a new closing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores an admitted closing unless its operational day is taken.
    ///
    /// # Errors
    ///
    /// Returns `ClosingStoreError::Duplicate` if a closing for the same
    /// operational day already exists, `Unavailable` for any other
    /// database failure.
    pub async fn insert_if_absent(
        &self,
        accepted: &AcceptedClosing,
    ) -> Result<closings::Model, ClosingStoreError> {
        let closing = &accepted.closing;
        let day = accepted.operational_day;

        let model = closings::ActiveModel {
            id: Set(accepted.id.into_inner()),
            operational_day: Set(day),
            submitted_by: Set(closing.submitted_by.clone()),
            base_amount: Set(closing.base_amount),
            bills: Set(serde_json::to_value(&closing.bills)?),
            foreign_bills: Set(closing
                .foreign
                .as_ref()
                .map(|f| serde_json::to_value(&f.bills))
                .transpose()?),
            exchange_rate: Set(closing.foreign.as_ref().map(|f| f.exchange_rate)),
            expenses: Set(serde_json::to_value(&closing.expenses)?),
            bills_counted: Set(closing.totals.bills_counted),
            foreign_in_local: Set(closing.totals.foreign_in_local),
            cash_total: Set(closing.totals.cash_total),
            expenses_total: Set(closing.totals.expenses_total),
            final_balance: Set(closing.totals.final_balance),
            submitted_at: Set(accepted.admitted_at.into()),
        };

        model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ClosingStoreError::Duplicate(day),
            _ => ClosingStoreError::Unavailable(e),
        })
    }

    /// Operational days that already have a closing, optionally only those
    /// on or after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn operational_days(
        &self,
        since: Option<NaiveDate>,
    ) -> Result<Vec<NaiveDate>, DbErr> {
        let mut query = closings::Entity::find()
            .select_only()
            .column(closings::Column::OperationalDay);

        if let Some(since) = since {
            query = query.filter(closings::Column::OperationalDay.gte(since));
        }

        query
            .order_by_asc(closings::Column::OperationalDay)
            .into_tuple::<NaiveDate>()
            .all(&self.db)
            .await
    }

    /// Finds the closing of an operational day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_day(&self, day: NaiveDate) -> Result<Option<closings::Model>, DbErr> {
        closings::Entity::find()
            .filter(closings::Column::OperationalDay.eq(day))
            .one(&self.db)
            .await
    }

    /// Lists the most recent closings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_closings(&self, limit: u64) -> Result<Vec<closings::Model>, DbErr> {
        closings::Entity::find()
            .order_by_desc(closings::Column::SubmittedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }

    /// Lists closings whose operational day falls in `[from, to]`, latest
    /// day first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<closings::Model>, DbErr> {
        closings::Entity::find()
            .filter(closings::Column::OperationalDay.between(from, to))
            .order_by_desc(closings::Column::OperationalDay)
            .all(&self.db)
            .await
    }

    /// Exchange rate declared by the most recent closing that carried a
    /// foreign tally.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn latest_exchange_rate(&self) -> Result<Option<Decimal>, DbErr> {
        let latest = closings::Entity::find()
            .filter(closings::Column::ExchangeRate.is_not_null())
            .order_by_desc(closings::Column::SubmittedAt)
            .one(&self.db)
            .await?;

        Ok(latest.and_then(|closing| closing.exchange_rate))
    }
}

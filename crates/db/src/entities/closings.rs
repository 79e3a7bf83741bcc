//! `SeaORM` Entity for closings table.

use cashbox_core::{ClosingTotals, RecordedClosing};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "closings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub operational_day: Date,
    pub submitted_by: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub base_amount: Decimal,
    pub bills: Json,
    pub foreign_bills: Option<Json>,
    #[sea_orm(column_type = "Decimal(Some((12, 4)))", nullable)]
    pub exchange_rate: Option<Decimal>,
    pub expenses: Json,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub bills_counted: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub foreign_in_local: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub cash_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub expenses_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub final_balance: Decimal,
    pub submitted_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Totals as stored, after the columns applied their precision.
    #[must_use]
    pub const fn totals(&self) -> ClosingTotals {
        ClosingTotals {
            bills_counted: self.bills_counted,
            foreign_in_local: self.foreign_in_local,
            cash_total: self.cash_total,
            expenses_total: self.expenses_total,
            final_balance: self.final_balance,
        }
    }
}

impl RecordedClosing for Model {
    fn operational_day(&self) -> Date {
        self.operational_day
    }
}

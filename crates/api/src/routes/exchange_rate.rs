//! Exchange rate suggestion for the foreign tally.

use axum::{Json, Router, extract::State, routing::get};
use cashbox_shared::types::Currency;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Where a suggested rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// The rate declared by the most recent closing with a foreign tally.
    LastClosing,
    /// No closing has declared a rate yet; the configured default.
    Default,
}

/// Response for the exchange rate suggestion.
#[derive(Debug, Serialize)]
pub struct ExchangeRateResponse {
    /// Foreign currency.
    pub from_currency: Currency,
    /// Local currency.
    pub to_currency: Currency,
    /// Local units per foreign unit.
    pub rate: Decimal,
    /// Where the rate came from.
    pub source: RateSource,
}

/// GET `/exchange-rate`
async fn get_exchange_rate(
    State(state): State<AppState>,
) -> Result<Json<ExchangeRateResponse>, ApiError> {
    let (rate, source) = match state.closings().latest_exchange_rate().await? {
        Some(rate) => (rate, RateSource::LastClosing),
        None => (state.drawer.default_exchange_rate, RateSource::Default),
    };

    Ok(Json(ExchangeRateResponse {
        from_currency: state.drawer.foreign_currency,
        to_currency: state.drawer.local_currency,
        rate,
        source,
    }))
}

/// Creates the exchange rate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/exchange-rate", get(get_exchange_rate))
}

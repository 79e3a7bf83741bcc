//! Drawer settings exposed to the client.

use axum::{Json, Router, extract::State, routing::get};
use cashbox_core::gate::CUTOVER;
use cashbox_shared::types::Currency;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::AppState;

/// What a client needs to render the closing form.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Service version.
    pub version: &'static str,
    /// Zone the operational day is computed in.
    pub timezone: String,
    /// Local time at which an operational day starts, `HH:MM`.
    pub cutover: String,
    /// Currency the drawer is reconciled in.
    pub local_currency: Currency,
    /// Currency of the optional foreign tally.
    pub foreign_currency: Currency,
    /// Default float left in the drawer.
    pub base_amount: Decimal,
    /// Accepted local bills, largest first.
    pub local_denominations: Vec<u32>,
    /// Accepted foreign bills, largest first.
    pub foreign_denominations: Vec<u32>,
    /// Maximum number of closings returned by the history listing.
    pub history_limit: u64,
}

/// GET `/info`
async fn get_info(State(state): State<AppState>) -> Json<InfoResponse> {
    let rules = state.tally_rules();
    let drawer = &state.drawer;

    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION"),
        timezone: drawer.timezone.name().to_string(),
        cutover: CUTOVER.format("%H:%M").to_string(),
        local_currency: drawer.local_currency,
        foreign_currency: drawer.foreign_currency,
        base_amount: drawer.base_amount,
        local_denominations: rules.local.as_slice().to_vec(),
        foreign_denominations: rules.foreign.as_slice().to_vec(),
        history_limit: drawer.history_limit,
    })
}

/// Creates the info routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/info", get(get_info))
}

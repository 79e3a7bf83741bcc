//! Daily closing routes.
//!
//! The eligibility endpoint is advisory. Submission re-runs the gate against
//! the stored days and then relies on the store's unique constraint, so two
//! cashiers racing for the same day get one 201 and one 409.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use cashbox_core::{
    CashCount, ClosingCandidate, ClosingTotals, DayState, Expense, ForeignTally,
    MAX_SUBMITTED_BY_CHARS, admit_closing, can_submit_closing, compute_operational_day,
    next_eligible_instant,
};
use cashbox_db::{ClosingRecord, ClosingStoreError, entities::closings};
use cashbox_shared::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Creates the closing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/closings", get(list_closings).post(create_closing))
        .route("/closings/eligibility", get(get_eligibility))
        .route("/closings/range", get(list_closings_in_range))
}

/// Response for the eligibility check.
#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    /// Whether a closing may be submitted right now.
    pub admissible: bool,
    /// Operational day the current instant belongs to.
    pub day: NaiveDate,
    /// `open` or `closed`, with the reopening instant when closed.
    pub state: DayState,
    /// When the next closing becomes admissible, if the day is closed.
    pub next_eligible_at: Option<DateTime<Utc>>,
    /// `next_eligible_at` in the drawer's zone.
    pub next_eligible_local: Option<String>,
    /// Zone the answer was computed in.
    pub timezone: String,
    /// Instant the check was made at.
    pub checked_at: DateTime<Utc>,
}

/// GET `/closings/eligibility`
async fn get_eligibility(
    State(state): State<AppState>,
) -> Result<Json<EligibilityResponse>, ApiError> {
    let now = state.clock.now();
    let tz = state.drawer.timezone;
    let today = compute_operational_day(now, tz);

    let existing = state.closings().operational_days(Some(today)).await?;
    let eligibility = can_submit_closing(&existing, now, tz);

    Ok(Json(EligibilityResponse {
        admissible: eligibility.admissible,
        day: eligibility.day,
        state: eligibility.state(),
        next_eligible_at: eligibility.next_eligible_at,
        next_eligible_local: eligibility
            .next_eligible_local(tz)
            .map(|local| local.to_rfc3339()),
        timezone: tz.name().to_string(),
        checked_at: now,
    }))
}

/// Foreign bills in a submission.
#[derive(Debug, Deserialize)]
pub struct ForeignTallyRequest {
    /// Bills counted per denomination.
    #[serde(default)]
    pub bills: CashCount,
    /// Local units per foreign unit.
    pub exchange_rate: Decimal,
}

/// Request body for submitting a closing.
#[derive(Debug, Deserialize)]
pub struct CreateClosingRequest {
    /// Who is closing the drawer.
    pub submitted_by: String,
    /// Float left in the drawer; defaults to the configured amount.
    pub base_amount: Option<Decimal>,
    /// Local bills counted per denomination.
    #[serde(default)]
    pub bills: CashCount,
    /// Optional foreign-currency tally.
    pub foreign: Option<ForeignTallyRequest>,
    /// Expenses paid from the drawer.
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Response for an accepted closing.
#[derive(Debug, Serialize)]
pub struct ClosingCreatedResponse {
    /// Closing ID.
    pub id: Uuid,
    /// Operational day the closing was recorded for.
    pub operational_day: NaiveDate,
    /// When the closing was stored.
    pub submitted_at: DateTime<Utc>,
    /// Totals as recorded.
    pub totals: ClosingTotals,
    /// First instant at which the next closing is admissible.
    pub next_eligible_at: DateTime<Utc>,
}

/// POST `/closings`
async fn create_closing(
    State(state): State<AppState>,
    Json(payload): Json<CreateClosingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let submitted_by = payload.submitted_by.trim();
    if submitted_by.is_empty() {
        return Err(AppError::Validation("submitted_by is required".to_string()).into());
    }
    if submitted_by.chars().count() > MAX_SUBMITTED_BY_CHARS as usize {
        return Err(AppError::Validation(format!(
            "submitted_by must be at most {MAX_SUBMITTED_BY_CHARS} characters"
        ))
        .into());
    }

    let base_amount = payload.base_amount.unwrap_or(state.drawer.base_amount);
    let foreign = payload.foreign.map(|f| ForeignTally {
        bills: f.bills,
        exchange_rate: f.exchange_rate,
    });

    state
        .tally_rules()
        .check(base_amount, &payload.bills, foreign.as_ref(), &payload.expenses)?;

    let candidate = ClosingCandidate::new(
        submitted_by,
        base_amount,
        payload.bills,
        foreign,
        payload.expenses,
    )?;

    let now = state.clock.now();
    let tz = state.drawer.timezone;
    let repo = state.closings();

    let existing = repo
        .operational_days(Some(compute_operational_day(now, tz)))
        .await?;
    let accepted = admit_closing(&existing, candidate, now, tz)?;

    let stored = repo.insert_if_absent(&accepted).await.map_err(|e| {
        if let ClosingStoreError::Duplicate(day) = &e {
            warn!(day = %day, "Closing lost the race for its operational day");
        }
        e.into_gate_error(tz)
    })?;

    info!(
        closing_id = %stored.id,
        day = %stored.operational_day,
        submitted_by = %stored.submitted_by,
        final_balance = %stored.final_balance,
        "Closing recorded"
    );

    let response = ClosingCreatedResponse {
        id: stored.id,
        operational_day: stored.operational_day,
        submitted_at: stored.submitted_at.with_timezone(&Utc),
        totals: stored.totals(),
        next_eligible_at: next_eligible_instant(stored.operational_day, tz),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Query parameters for the history listing.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of closings; capped at the configured history limit.
    pub limit: Option<u64>,
}

/// Response for closing listings.
#[derive(Debug, Serialize)]
pub struct ClosingListResponse {
    /// Closings, newest first.
    pub closings: Vec<ClosingRecord>,
    /// Number of closings returned.
    pub count: usize,
}

impl ClosingListResponse {
    fn decode(models: Vec<closings::Model>) -> Result<Self, ApiError> {
        let closings = models
            .into_iter()
            .map(ClosingRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self {
            count: closings.len(),
            closings,
        })
    }
}

/// GET `/closings`
async fn list_closings(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ClosingListResponse>, ApiError> {
    let cap = state.drawer.history_limit;
    let limit = query.limit.map_or(cap, |limit| limit.min(cap));

    let models = state.closings().list_closings(limit).await?;
    Ok(Json(ClosingListResponse::decode(models)?))
}

/// Query parameters for the range listing.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// First operational day, inclusive.
    pub from: NaiveDate,
    /// Last operational day, inclusive.
    pub to: NaiveDate,
}

/// GET `/closings/range?from=YYYY-MM-DD&to=YYYY-MM-DD`
async fn list_closings_in_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<ClosingListResponse>, ApiError> {
    if query.from > query.to {
        return Err(AppError::Validation(format!(
            "from ({}) must not be after to ({})",
            query.from, query.to
        ))
        .into());
    }

    let models = state.closings().list_between(query.from, query.to).await?;
    Ok(Json(ClosingListResponse::decode(models)?))
}

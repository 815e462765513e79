//! Read-only HTTP query API.
//!
//! Two routes over the shared state and the measurement history:
//!
//! - `GET /get_data` — the latest reading, each field formatted to two
//!   decimals.
//! - `GET /get_all_data?start=<ts>&end=<ts>` — stored rows filtered by
//!   inclusive timestamp bounds; absent or empty params mean "no bound".
//!
//! Request failures stay request-local: a storage error maps to a 500 and
//! never touches the loops.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use log::error;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::state::SharedReadings;
use crate::storage::MeasurementStore;

/// Everything the handlers need.
#[derive(Clone)]
pub struct AppState {
    pub readings: Arc<SharedReadings>,
    pub store: MeasurementStore,
}

/// Build the query-API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/get_data", get(get_data))
        .route("/get_all_data", get(get_all_data))
        .with_state(state)
}

/// Latest snapshot as named items.
pub async fn get_data(State(state): State<AppState>) -> Json<Value> {
    let reading = state.readings.snapshot();
    Json(json!({
        "items": [
            { "name": "Room temperature", "value": format!("{:.2}", reading.room_temp) },
            { "name": "Water temperature", "value": format!("{:.2}", reading.water_temp) },
            { "name": "Light level", "value": format!("{:.2}", reading.light_level) },
        ]
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Stored rows as `[datetime, room_temp, water_temp, light_level]` arrays.
pub async fn get_all_data(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, (StatusCode, String)> {
    // An empty parameter means the same as an absent one: no bound.
    let start = query.start.as_deref().filter(|s| !s.is_empty());
    let end = query.end.as_deref().filter(|s| !s.is_empty());

    let records = state.store.query_range(start, end).map_err(|e| {
        error!("history query failed: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let rows: Vec<Value> = records
        .iter()
        .map(|r| json!([r.datetime, r.room_temp, r.water_temp, r.light_level]))
        .collect();
    Ok(Json(Value::Array(rows)))
}

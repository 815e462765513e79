//! Query-API handler tests — the handlers called directly with real state.

use std::sync::Arc;

use axum::extract::{Query, State};

use aquanode::server::{self, AppState, HistoryQuery};
use aquanode::state::{Reading, SharedReadings};
use aquanode::storage::{MeasurementRecord, MeasurementStore};

fn seeded_state() -> AppState {
    let readings = Arc::new(SharedReadings::new());
    readings.publish(Reading {
        room_temp: 21.5,
        water_temp: 24.25,
        light_level: 100.0,
    });

    let store = MeasurementStore::open_in_memory().unwrap();
    for (ts, water) in [
        ("2023-01-01 00:00:00", 24.0),
        ("2023-01-01 12:00:00", 24.5),
        ("2023-01-02 00:00:00", 25.0),
        ("2023-01-03 08:30:00", 25.5),
    ] {
        store
            .append(&MeasurementRecord {
                datetime: ts.to_string(),
                room_temp: 21.0,
                water_temp: water,
                light_level: 150.0,
            })
            .unwrap();
    }

    AppState { readings, store }
}

#[tokio::test]
async fn get_data_returns_named_two_decimal_items() {
    let body = server::get_data(State(seeded_state())).await.0;

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["name"], "Room temperature");
    assert_eq!(items[0]["value"], "21.50");
    assert_eq!(items[1]["name"], "Water temperature");
    assert_eq!(items[1]["value"], "24.25");
    assert_eq!(items[2]["name"], "Light level");
    assert_eq!(items[2]["value"], "100.00");
}

#[tokio::test]
async fn history_with_both_bounds_is_inclusive() {
    let query = HistoryQuery {
        start: Some("2023-01-01 00:00:00".to_string()),
        end: Some("2023-01-02 00:00:00".to_string()),
    };
    let body = server::get_all_data(State(seeded_state()), Query(query))
        .await
        .unwrap()
        .0;

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "2023-01-01 00:00:00");
    assert_eq!(rows[2][0], "2023-01-02 00:00:00");
    // Row shape: [datetime, room_temp, water_temp, light_level].
    assert_eq!(rows[0].as_array().unwrap().len(), 4);
    assert_eq!(rows[0][2], 24.0);
}

#[tokio::test]
async fn history_with_start_only_applies_lower_bound() {
    let query = HistoryQuery {
        start: Some("2023-01-02 00:00:00".to_string()),
        end: None,
    };
    let body = server::get_all_data(State(seeded_state()), Query(query))
        .await
        .unwrap()
        .0;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_params_mean_no_bound() {
    let query = HistoryQuery {
        start: Some(String::new()),
        end: Some(String::new()),
    };
    let body = server::get_all_data(State(seeded_state()), Query(query))
        .await
        .unwrap()
        .0;
    assert_eq!(body.as_array().unwrap().len(), 4);
}

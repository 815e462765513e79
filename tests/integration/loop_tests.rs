//! Loop-level tests: the real tasks driven by mock ports.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use aquanode::ports::{Color, Glyph};
use aquanode::state::{ModeCell, Reading, SharedReadings};
use aquanode::storage::MeasurementStore;
use aquanode::tasks;

use crate::mock_hw::{Frame, RecordingDisplay, RecordingRgb, standard_rig};

const SHUTDOWN_BUDGET: Duration = Duration::from_secs(1);

/// Poll `cond` for up to a second.
async fn eventually(mut cond: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
}

fn digits(d: [u8; 4]) -> [Glyph; 4] {
    d.map(Glyph::Digit)
}

#[tokio::test(flavor = "multi_thread")]
async fn sampling_loop_publishes_and_signals_readiness() {
    let readings = Arc::new(SharedReadings::new());
    let cancel = CancellationToken::new();
    let handle = tasks::sampling::spawn(
        standard_rig(),
        Arc::clone(&readings),
        Duration::from_millis(5),
        cancel.clone(),
    );

    let mut ready = readings.ready();
    timeout(SHUTDOWN_BUDGET, ready.wait_for(|&r| r))
        .await
        .expect("first reading within budget")
        .expect("state alive");

    let r = readings.snapshot();
    assert_eq!(r.room_temp, 21.5);
    assert_eq!(r.water_temp, 24.25);
    assert!((r.light_level - 100.0).abs() < 1e-4);

    cancel.cancel();
    timeout(SHUTDOWN_BUDGET, handle)
        .await
        .expect("sampling loop exits within one iteration")
        .unwrap();
}

#[test]
fn concurrent_publishes_never_tear() {
    let shared = Arc::new(SharedReadings::new());

    let writer = {
        let shared = Arc::clone(&shared);
        std::thread::spawn(move || {
            for i in 0..20_000u32 {
                let v = i as f32;
                shared.publish(Reading {
                    room_temp: v,
                    water_temp: v,
                    light_level: v,
                });
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for _ in 0..20_000 {
                    let r = shared.snapshot();
                    assert!(
                        r.room_temp == r.water_temp && r.water_temp == r.light_level,
                        "torn reading observed: {r:?}"
                    );
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn display_renders_selected_quantity_and_blanks_on_exit() {
    let readings = Arc::new(SharedReadings::new());
    readings.publish(Reading {
        room_temp: 21.5,
        water_temp: 24.25,
        light_level: 100.0,
    });
    let mode = Arc::new(ModeCell::new());
    let cancel = CancellationToken::new();

    let display = RecordingDisplay::default();
    let handle = tasks::display::spawn(
        display.clone(),
        Arc::clone(&readings),
        Arc::clone(&mode),
        Duration::from_millis(5),
        cancel.clone(),
    );

    // Default mode is water temperature.
    let water_frame = Frame::Shown(digits([2, 4, 2, 5]), Some(3));
    assert!(
        eventually(|| display.frames.lock().unwrap().contains(&water_frame)).await,
        "water temperature never rendered"
    );

    // One advance switches to room temperature.
    mode.advance();
    let room_frame = Frame::Shown(digits([2, 1, 5, 0]), Some(3));
    assert!(
        eventually(|| display.frames.lock().unwrap().contains(&room_frame)).await,
        "room temperature never rendered after mode advance"
    );

    cancel.cancel();
    timeout(SHUTDOWN_BUDGET, handle).await.unwrap().unwrap();
    assert_eq!(display.frames.lock().unwrap().last(), Some(&Frame::Blanked));
}

#[tokio::test(flavor = "multi_thread")]
async fn indicator_tracks_water_band_and_switches_off() {
    let readings = Arc::new(SharedReadings::new());
    readings.publish(Reading {
        room_temp: 21.0,
        water_temp: 24.0,
        light_level: 0.0,
    });
    let cancel = CancellationToken::new();

    let rgb = RecordingRgb::default();
    let handle = tasks::indicator::spawn(
        rgb.clone(),
        Arc::clone(&readings),
        20.0,
        26.0,
        Duration::from_millis(5),
        cancel.clone(),
    );

    assert!(
        eventually(|| rgb.colors.lock().unwrap().last() == Some(&Color::GREEN)).await,
        "ideal water never showed green"
    );

    readings.publish(Reading {
        room_temp: 21.0,
        water_temp: 30.0,
        light_level: 0.0,
    });
    assert!(
        eventually(|| rgb.colors.lock().unwrap().last() == Some(&Color::RED)).await,
        "hot water never showed red"
    );

    cancel.cancel();
    timeout(SHUTDOWN_BUDGET, handle).await.unwrap().unwrap();
    assert_eq!(rgb.colors.lock().unwrap().last(), Some(&Color::OFF));
}

#[tokio::test(flavor = "multi_thread")]
async fn persistence_loop_appends_stamped_rows() {
    let readings = Arc::new(SharedReadings::new());
    readings.publish(Reading {
        room_temp: 21.5,
        water_temp: 24.25,
        light_level: 100.0,
    });
    let store = MeasurementStore::open_in_memory().unwrap();
    let cancel = CancellationToken::new();

    let handle = tasks::persistence::spawn(
        store.clone(),
        Arc::clone(&readings),
        Duration::from_millis(10),
        cancel.clone(),
    );

    assert!(
        eventually(|| store.query_range(None, None).map(|r| r.len() >= 2).unwrap_or(false)).await,
        "no rows persisted"
    );

    cancel.cancel();
    timeout(SHUTDOWN_BUDGET, handle).await.unwrap().unwrap();

    let rows = store.query_range(None, None).unwrap();
    let first = &rows[0];
    assert_eq!(first.datetime.len(), "2023-01-01 00:00:00".len());
    assert!((first.room_temp - 21.5).abs() < 1e-6);
    assert!((first.water_temp - 24.25).abs() < 1e-6);
    assert!((first.light_level - 100.0).abs() < 1e-4);
}

#[tokio::test(flavor = "multi_thread")]
async fn warm_up_consumers_exit_promptly_without_a_first_reading() {
    let readings = Arc::new(SharedReadings::new());
    let mode = Arc::new(ModeCell::new());
    let cancel = CancellationToken::new();
    let display = RecordingDisplay::default();
    let store = MeasurementStore::open_in_memory().unwrap();

    let handles = [
        tasks::display::spawn(
            display.clone(),
            Arc::clone(&readings),
            mode,
            Duration::from_millis(5),
            cancel.clone(),
        ),
        tasks::persistence::spawn(
            store.clone(),
            Arc::clone(&readings),
            Duration::from_millis(5),
            cancel.clone(),
        ),
    ];

    // Nothing was ever published; cancellation must still unblock both.
    cancel.cancel();
    for handle in handles {
        timeout(SHUTDOWN_BUDGET, handle).await.unwrap().unwrap();
    }

    // Cleanup ran even though the loop never ticked.
    assert_eq!(display.frames.lock().unwrap().as_slice(), &[Frame::Blanked]);
    assert!(store.query_range(None, None).unwrap().is_empty());
}

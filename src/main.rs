//! Aquanode — main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    hw adapters (outer ring)                   │
//! │                                                               │
//! │  SysfsW1     Bh1750Bus    ShiftRegDisplay   RgbLed  Button    │
//! │  (OneWire)   (LightBus)   (GlyphDisplay)    (Rgb)   (edge)    │
//! │                                                               │
//! │  ─────────────────── port trait boundary ──────────────────   │
//! │                                                               │
//! │  sampling loop ──▶ SharedReadings ◀── indicator/display/      │
//! │                        │               persistence loops      │
//! │  button edge  ──▶ ModeCell             MeasurementStore       │
//! │                        │                     │                │
//! │                   query server (axum, read-only)              │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sampling loop is the sole producer into the shared readings; every
//! other component is a consumer. The lifecycle below runs the query
//! server in the foreground; when it stops serving, the cancellation
//! token fans out to the loops and cleanup runs.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use aquanode::config::NodeConfig;
use aquanode::hw::bh1750::Bh1750Bus;
use aquanode::hw::button::ModeButton;
use aquanode::hw::display::ShiftRegDisplay;
use aquanode::hw::rgb::RgbLed;
use aquanode::hw::w1::SysfsW1;
use aquanode::sensors::SensorRig;
use aquanode::sensors::light::LightReader;
use aquanode::sensors::thermal::{ROOM_SENSOR, ThermalReader, WATER_SENSOR};
use aquanode::server::{self, AppState};
use aquanode::state::{ModeCell, SharedReadings};
use aquanode::storage::MeasurementStore;
use aquanode::tasks;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  Aquanode v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("aquanode.json"), PathBuf::from);
    let config = NodeConfig::load_or_default(&config_path);

    // ── 3. Measurement store ──────────────────────────────────
    let store = MeasurementStore::open(Path::new(&config.db_path))
        .with_context(|| format!("opening measurement store at {}", config.db_path))?;
    info!("measurement store ready at {}", config.db_path);

    // ── 4. Hardware ───────────────────────────────────────────
    // Any failure here aborts startup before a single loop runs.
    let gpio = rppal::gpio::Gpio::new().context("GPIO controller unavailable")?;

    let thermal = ThermalReader::new(
        SysfsW1,
        vec![
            (ROOM_SENSOR.to_string(), PathBuf::from(&config.room_sensor_path)),
            (WATER_SENSOR.to_string(), PathBuf::from(&config.water_sensor_path)),
        ],
        config.max_crc_retries,
    );
    let light = LightReader::new(
        Bh1750Bus::open(config.light_i2c_bus, config.light_i2c_addr)
            .context("light sensor init")?,
    );
    let rig = SensorRig::new(thermal, light);

    let display = ShiftRegDisplay::new(
        &gpio,
        config.display_data_gpio,
        config.display_clock_gpio,
        config.display_latch_gpio,
    )
    .context("display init")?;
    let rgb = RgbLed::new(
        &gpio,
        config.led_red_gpio,
        config.led_green_gpio,
        config.led_blue_gpio,
    )
    .context("indicator init")?;

    // ── 5. Shared state ───────────────────────────────────────
    let readings = Arc::new(SharedReadings::new());
    let mode = Arc::new(ModeCell::new());
    let cancel = CancellationToken::new();

    // ── 6. Button handler ─────────────────────────────────────
    let _button = ModeButton::watch(
        &gpio,
        config.button_gpio,
        Duration::from_millis(config.button_debounce_ms),
        Arc::clone(&mode),
    )
    .context("button init")?;

    // ── 7. Loops ──────────────────────────────────────────────
    let handles = vec![
        tasks::sampling::spawn(
            rig,
            Arc::clone(&readings),
            Duration::from_millis(config.sample_interval_ms),
            cancel.clone(),
        ),
        tasks::indicator::spawn(
            rgb,
            Arc::clone(&readings),
            config.water_cold_max_c,
            config.water_ideal_max_c,
            Duration::from_millis(config.indicator_interval_ms),
            cancel.clone(),
        ),
        tasks::display::spawn(
            display,
            Arc::clone(&readings),
            Arc::clone(&mode),
            Duration::from_millis(config.display_interval_ms),
            cancel.clone(),
        ),
        tasks::persistence::spawn(
            store.clone(),
            Arc::clone(&readings),
            Duration::from_secs(config.persist_interval_secs),
            cancel.clone(),
        ),
    ];

    // ── 8. Query server (foreground) ──────────────────────────
    let app = server::router(AppState {
        readings: Arc::clone(&readings),
        store,
    });
    let listener = tokio::net::TcpListener::bind(&config.http_bind)
        .await
        .with_context(|| format!("binding query server to {}", config.http_bind))?;
    info!("query server listening on {}", config.http_bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("query server failed")?;

    // ── 9. Shutdown ───────────────────────────────────────────
    // Server stopped accepting requests; fan the cancellation out and let
    // every loop exit at its next iteration boundary. The display and
    // indicator loops blank their hardware on the way out.
    info!("query server stopped, cancelling loops");
    cancel.cancel();
    for handle in handles {
        if let Err(e) = handle.await {
            warn!("loop did not shut down cleanly: {e}");
        }
    }

    let last = readings.snapshot();
    println!("Room temperature: {} °C", last.room_temp);
    println!("Water temperature: {} °C", last.water_temp);
    println!("Light level: {:.2} lx", last.light_level);

    info!("shutdown complete");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("SIGINT handler failed: {e}");
        }
    };
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("SIGTERM handler failed: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = ctrl_c => info!("received SIGINT"),
        () = sigterm => info!("received SIGTERM"),
    }
}

//! Remocon Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  IrHardware (LEDC carrier · LED pair · Ets delay)        │
//! │  LogEventSink            serial console (command lines)  │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │  TransmitEngine ─▶ TransmitOrchestrator            │  │
//! │  │  CommandRegistry · TV / Vacuum encoders            │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::BufRead;

use anyhow::Result;
use log::{info, warn};

use remocon::adapters::hardware::BoardHardware;
use remocon::adapters::log_sink::LogEventSink;
use remocon::app::engine::TransmitEngine;
use remocon::config::EngineConfig;
use remocon::drivers;
use remocon::registry::CommandRegistry;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Remocon v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = EngineConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    drivers::hw_init::init_peripherals()?;
    let hw = BoardHardware::board(&config, esp_idf_hal::delay::Ets);

    // ── 4. Engine ─────────────────────────────────────────────
    let registry = CommandRegistry::standard();
    info!("Registry: {} commands", registry.len());
    let engine = TransmitEngine::new(registry, config, LogEventSink::new());
    engine.init(hw)?;

    // ── 5. Command loop ───────────────────────────────────────
    //
    // One key name per line on the serial console, e.g. `TV_KEY_POWER`.
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("console read failed: {}", e);
                break;
            }
        };
        let name = line.trim_end_matches('\r');
        if name.is_empty() {
            continue;
        }
        if !engine.transmit(name.as_bytes()) {
            warn!("cmd [{}] send failed", name);
        }
    }

    // ── 6. Teardown ───────────────────────────────────────────
    drop(engine.shutdown());
    info!("Console closed, IR engine released");
    Ok(())
}

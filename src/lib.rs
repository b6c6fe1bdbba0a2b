//! Remocon firmware library.
//!
//! Turns symbolic key names into timed IR pulse trains for a Samsung TV
//! and a Philips robot vacuum.  Exposes the pure-logic modules for
//! integration testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod protocol;
pub mod registry;

// Hardware-facing modules; implementations are cfg-gated inside.
pub mod adapters;
pub mod drivers;

pub use error::{Error, Result};

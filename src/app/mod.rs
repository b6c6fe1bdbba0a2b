//! Application core — command resolution and IR transmission, zero I/O.
//!
//! The registry lookup, frame sequencing and indicator bracketing live
//! here.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without a
//! carrier peripheral or LEDs.

pub mod commands;
pub mod engine;
pub mod events;
pub mod ports;
pub mod service;

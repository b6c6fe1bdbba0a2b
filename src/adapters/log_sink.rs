//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing transmit events to the ESP-IDF
//! logger (UART / USB-CDC in production).  A network adapter reporting
//! results back to the broker would implement the same trait.

use log::{info, warn};

use crate::app::events::TransmitEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`TransmitEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &TransmitEvent) {
        match event {
            TransmitEvent::StateChanged { from, to } => {
                log::debug!("STATE | {:?} -> {:?}", from, to);
            }
            TransmitEvent::Sent {
                command,
                family,
                frames,
            } => {
                info!(
                    "TX | {} (#{}, 0x{:04X}) | family={:?} frames={}",
                    command.name, command.index, command.code, family, frames
                );
            }
            TransmitEvent::Failed { error } => {
                warn!("FAIL | {}", error);
            }
            TransmitEvent::EngineReady => {
                info!("ENGINE | ready");
            }
            TransmitEvent::EngineShutdown => {
                info!("ENGINE | shut down");
            }
        }
    }
}

//! Outbound engine events.
//!
//! The [`TransmitOrchestrator`](super::service::TransmitOrchestrator) emits
//! these through the [`EventSink`](super::ports::EventSink) port.

use crate::error::Error;
use crate::protocol::Family;
use crate::registry::Command;

/// Orchestrator states.  Nothing is retained between `send` calls; every
/// run starts and ends in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitState {
    Idle,
    Resolving,
    Encoding,
    Transmitting,
}

/// Structured events emitted by the transmit core.
#[derive(Debug, Clone, PartialEq)]
pub enum TransmitEvent {
    /// The orchestrator moved between states.
    StateChanged { from: TransmitState, to: TransmitState },

    /// A command was transmitted completely.
    Sent {
        command: &'static Command,
        family: Family,
        frames: u8,
    },

    /// A send ended without a complete transmission.
    Failed { error: Error },

    /// Hardware was claimed and configured.
    EngineReady,

    /// Hardware was released.
    EngineShutdown,
}

//! Transmit orchestrator — the hexagonal core.
//!
//! [`TransmitOrchestrator`] resolves a command name, picks the protocol
//! encoder, and plays the resulting frame through the carrier, bracketing
//! the whole run with the status indicator.  All I/O flows through port
//! traits injected at the call site, so the full sequence is testable
//! against a virtual clock.
//!
//! ```text
//!  name ──▶ Resolving ──▶ Encoding ──▶ Transmitting ──▶ Idle
//!              │ miss                      │ hw error
//!              └──────────▶ Idle ◀─────────┘ (carrier off, indicator idle)
//! ```

use log::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::protocol::Pulse;
use crate::registry::{Command, CommandRegistry};

use super::events::{TransmitEvent, TransmitState};
use super::ports::{
    CarrierChannel, EventSink, IndicatorState, PeripheralError, TimeSource, TransmitHardware,
};

// ───────────────────────────────────────────────────────────────
// TransmitOrchestrator
// ───────────────────────────────────────────────────────────────

pub struct TransmitOrchestrator {
    registry: CommandRegistry,
    state: TransmitState,
    /// Gap between repeated frames of one keypress (nominal µs).
    repeat_gap_us: u32,
}

impl TransmitOrchestrator {
    pub fn new(registry: CommandRegistry, config: &EngineConfig) -> Self {
        Self {
            registry,
            state: TransmitState::Idle,
            repeat_gap_us: config.tv_repeat_gap_us,
        }
    }

    // ── Transmission ──────────────────────────────────────────

    /// Resolve `name` and transmit it.  Blocks for the whole frame schedule.
    ///
    /// An unknown name returns [`Error::CommandNotFound`] without a single
    /// hardware call.  Every other exit leaves the carrier off and the
    /// indicator idle.
    pub fn send<H: TransmitHardware>(
        &mut self,
        name: &str,
        hw: &mut H,
        sink: &mut impl EventSink,
    ) -> Result<&'static Command> {
        self.transition(TransmitState::Resolving, sink);
        let Some(command) = self.registry.lookup(name) else {
            warn!("tx: unknown command {:?}", name);
            return Err(self.fail(Error::CommandNotFound, sink));
        };
        let family = self.registry.family_of(command);
        info!(
            "{} : {} : 0x{:04X} ({:?})",
            command.index, command.name, command.code, family
        );

        if !hw.is_configured() {
            error!("tx: carrier not configured, dropping {}", command.name);
            return Err(self.fail(Error::PeripheralUnavailable, sink));
        }

        self.transition(TransmitState::Encoding, sink);
        let encoder = family.encoder();
        let frame = encoder.encode(command.code);
        let frames = encoder.repeat_count();
        debug!("tx: {} pulses x{}", frame.len(), frames);

        self.transition(TransmitState::Transmitting, sink);
        hw.set(IndicatorState::Active);
        let result = self.emit_frames(&frame, frames, hw);
        if let Err(e) = result {
            // Never leave the LED emitting after a failed write.
            if let Err(off) = hw.disable() {
                error!("tx: carrier disable after failure also failed: {}", off);
            }
            hw.set(IndicatorState::Idle);
            error!("tx: {} aborted: {}", command.name, e);
            return Err(self.fail(e.into(), sink));
        }
        hw.set(IndicatorState::Idle);

        self.transition(TransmitState::Idle, sink);
        sink.emit(&TransmitEvent::Sent {
            command,
            family,
            frames,
        });
        Ok(command)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> TransmitState {
        self.state
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_frames<H: TransmitHardware>(
        &self,
        frame: &[Pulse],
        frames: u8,
        hw: &mut H,
    ) -> core::result::Result<(), PeripheralError> {
        for n in 0..frames {
            if n > 0 {
                hw.delay_micros(self.repeat_gap_us);
            }
            emit_frame(frame, hw)?;
        }
        Ok(())
    }

    fn transition(&mut self, to: TransmitState, sink: &mut impl EventSink) {
        let from = self.state;
        if from != to {
            self.state = to;
            sink.emit(&TransmitEvent::StateChanged { from, to });
        }
    }

    fn fail(&mut self, error: Error, sink: &mut impl EventSink) -> Error {
        self.transition(TransmitState::Idle, sink);
        sink.emit(&TransmitEvent::Failed { error });
        error
    }
}

/// Play one frame: carrier on for the mark, off for the space, strictly
/// alternating and in order.
fn emit_frame<H: CarrierChannel + TimeSource>(
    frame: &[Pulse],
    hw: &mut H,
) -> core::result::Result<(), PeripheralError> {
    for pulse in frame {
        hw.enable()?;
        hw.delay_micros(pulse.mark_us);
        hw.disable()?;
        hw.delay_micros(pulse.space_us);
    }
    Ok(())
}

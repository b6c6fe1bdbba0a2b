//! Port traits — the hexagonal boundary between the transmit core and the
//! outside world.
//!
//! ```text
//!   Driver ──▶ Port trait ──▶ TransmitOrchestrator (domain)
//! ```
//!
//! Driven adapters (carrier PWM, status LED pair, busy-wait delay, event
//! sinks) implement these traits.  The
//! [`TransmitOrchestrator`](super::service::TransmitOrchestrator) consumes
//! them via generics, so the protocol logic never touches a register.

use crate::config::CarrierConfig;

// ───────────────────────────────────────────────────────────────
// Carrier channel (driven adapter: domain → modulated IR output)
// ───────────────────────────────────────────────────────────────

/// A modulated-output peripheral: configure frequency/duty once, then toggle
/// emission.
///
/// Polarity is the implementation's problem.  Callers think in logical
/// terms only: `enable()` means the IR LED is emitting the carrier.
pub trait CarrierChannel {
    /// Claim and program the peripheral.  Calling it again with identical
    /// parameters must succeed and leave the channel unchanged.
    fn configure(&mut self, config: &CarrierConfig) -> Result<(), PeripheralError>;

    /// Start carrier emission (start of a mark).
    fn enable(&mut self) -> Result<(), PeripheralError>;

    /// Stop carrier emission (start of a space).
    fn disable(&mut self) -> Result<(), PeripheralError>;

    /// Whether [`configure`](Self::configure) has succeeded.
    fn is_configured(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Status indicator (driven adapter: domain → LED pair)
// ───────────────────────────────────────────────────────────────

/// Logical state shown by the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// A transmission is running.
    Active,
    /// Nothing is being transmitted.
    Idle,
}

/// Two-state physical indicator.
///
/// Fail-soft: implementations log write errors and carry on.  A broken LED
/// must never block IR transmission.
pub trait StatusIndicator {
    fn set(&mut self, state: IndicatorState);
}

// ───────────────────────────────────────────────────────────────
// Time source
// ───────────────────────────────────────────────────────────────

/// Blocking microsecond delay.
///
/// Production implementations apply the hardware calibration factor; see
/// [`CalibratedDelay`](crate::drivers::delay::CalibratedDelay).  Callers
/// always pass the nominal protocol duration.
pub trait TimeSource {
    fn delay_micros(&mut self, micros: u32);
}

// ───────────────────────────────────────────────────────────────
// Combined hardware bundle
// ───────────────────────────────────────────────────────────────

/// Everything one transmission needs, owned by a single value so that the
/// engine can guard it with one lock.
pub trait TransmitHardware: CarrierChannel + StatusIndicator + TimeSource {}

impl<T: CarrierChannel + StatusIndicator + TimeSource> TransmitHardware for T {}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`TransmitEvent`](super::events::TransmitEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::TransmitEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`CarrierChannel`] operations.  The `i32` payloads carry the
/// raw ESP-IDF return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    /// `enable`/`disable` called before a successful `configure`.
    NotConfigured,
    /// The timer or channel could not be claimed.
    ClaimFailed(i32),
    /// A duty or level register write failed.
    WriteFailed(i32),
}

impl core::fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "peripheral not configured"),
            Self::ClaimFailed(rc) => write!(f, "claim failed (rc={})", rc),
            Self::WriteFailed(rc) => write!(f, "write failed (rc={})", rc),
        }
    }
}

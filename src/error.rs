//! Unified error types for the remocon firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the
//! transmit path has one failure vocabulary from the inbound payload down
//! to the carrier peripheral.  All variants are `Copy` so they can be
//! carried through events and logs without allocation.

use core::fmt;

use crate::app::ports::PeripheralError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible transmit-path operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The command name has no registry match.  No hardware was touched.
    CommandNotFound,
    /// Carrier or indicator not initialised/claimed.  Aborted before any pulse.
    PeripheralUnavailable,
    /// A hardware write failed while the transmission was running.
    PeripheralWriteFailure(PeripheralError),
    /// A non-blocking send found another transmission in progress.
    Busy,
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandNotFound => write!(f, "command not found"),
            Self::PeripheralUnavailable => write!(f, "peripheral unavailable"),
            Self::PeripheralWriteFailure(e) => write!(f, "peripheral write failure: {e}"),
            Self::Busy => write!(f, "transmitter busy"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<PeripheralError> for Error {
    fn from(e: PeripheralError) -> Self {
        match e {
            PeripheralError::NotConfigured | PeripheralError::ClaimFailed(_) => {
                Self::PeripheralUnavailable
            }
            PeripheralError::WriteFailed(_) => Self::PeripheralWriteFailure(e),
        }
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(e: crate::config::ConfigError) -> Self {
        match e {
            crate::config::ConfigError::ValidationFailed(msg) => Self::Config(msg),
            crate::config::ConfigError::Malformed => Self::Config("malformed config document"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

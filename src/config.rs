//! Engine configuration parameters
//!
//! All tunable parameters of the IR transmit engine.  The defaults are the
//! values the target receivers were measured against; change them only with
//! a scope on the IR LED.

use serde::{Deserialize, Serialize};

/// Physical polarity of the carrier output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarrierPolarity {
    /// Logical "on" drives the pin high.
    ActiveHigh,
    /// Logical "on" drives the pin low (IR LED sinks to the GPIO).
    ActiveLow,
}

/// Carrier modulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierConfig {
    /// Carrier frequency in Hz (38 kHz → 26 µs period).
    pub frequency_hz: u32,
    /// Carrier duty cycle while emitting (0-100%).
    pub duty_percent: u8,
    /// Output polarity, encapsulated by the carrier driver.
    pub polarity: CarrierPolarity,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 38_000,
            duty_percent: 50,
            polarity: CarrierPolarity::ActiveLow,
        }
    }
}

/// Core engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    // --- Carrier ---
    pub carrier: CarrierConfig,

    // --- Timing ---
    /// Sleep overshoot correction, in percent of the requested delay (88 = k 0.88)
    pub delay_calibration_percent: u8,
    /// Gap between the two TV frames of one keypress (microseconds)
    pub tv_repeat_gap_us: u32,

    // --- Inbound ---
    /// Longest accepted command name (bytes)
    pub max_command_len: usize,
}

/// Calibration the reference hardware was tuned with.
pub const DEFAULT_DELAY_CALIBRATION_PERCENT: u8 = 88;

/// Inbound command buffers are 30 bytes including the terminator.
pub const MAX_COMMAND_LEN: usize = 29;

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            carrier: CarrierConfig::default(),
            delay_calibration_percent: DEFAULT_DELAY_CALIBRATION_PERCENT,
            tv_repeat_gap_us: 52_000,
            max_command_len: MAX_COMMAND_LEN,
        }
    }
}

impl EngineConfig {
    /// Reject values that would produce a signal no receiver decodes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(30_000..=60_000).contains(&self.carrier.frequency_hz) {
            return Err(ConfigError::ValidationFailed(
                "carrier.frequency_hz must be within 30-60 kHz",
            ));
        }
        if self.carrier.duty_percent == 0 || self.carrier.duty_percent >= 100 {
            return Err(ConfigError::ValidationFailed(
                "carrier.duty_percent must be within 1-99",
            ));
        }
        if self.delay_calibration_percent == 0 || self.delay_calibration_percent > 100 {
            return Err(ConfigError::ValidationFailed(
                "delay_calibration_percent must be within 1-100",
            ));
        }
        if self.tv_repeat_gap_us == 0 {
            return Err(ConfigError::ValidationFailed("tv_repeat_gap_us must be non-zero"));
        }
        if self.max_command_len == 0 || self.max_command_len > MAX_COMMAND_LEN {
            return Err(ConfigError::ValidationFailed(
                "max_command_len must be within 1-29",
            ));
        }
        Ok(())
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("config: rejected JSON document: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors from configuration loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document could not be deserialised.
    Malformed,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

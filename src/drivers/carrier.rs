//! IR carrier driver (LEDC PWM).
//!
//! The carrier is a fixed 38 kHz square wave; a mark is "duty on", a space
//! is "duty zero".  Active-low wiring is handled by the LEDC output-invert
//! flag, so the duty values written here are always logical.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: programs LEDC through hw_init.
//! On host/test: tracks state in-memory only.

use log::{info, warn};

use crate::app::ports::{CarrierChannel, PeripheralError};
use crate::config::{CarrierConfig, CarrierPolarity};
use crate::drivers::hw_init;
use crate::pins;

pub struct LedcCarrier {
    config: Option<CarrierConfig>,
    /// Raw duty written while emitting.
    on_duty: u32,
    emitting: bool,
}

impl Default for LedcCarrier {
    fn default() -> Self {
        Self::new()
    }
}

impl LedcCarrier {
    pub fn new() -> Self {
        Self {
            config: None,
            on_duty: 0,
            emitting: false,
        }
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    /// Raw duty register value currently applied.
    pub fn current_duty(&self) -> u32 {
        if self.emitting { self.on_duty } else { 0 }
    }

    /// Level the IR pin rests at between marks (`true` = high).
    pub fn idle_level(&self) -> bool {
        matches!(
            self.config.map(|c| c.polarity),
            Some(CarrierPolarity::ActiveLow)
        )
    }

    pub fn config(&self) -> Option<CarrierConfig> {
        self.config
    }

    fn write_duty(&self, duty: u32) -> Result<(), PeripheralError> {
        hw_init::ledc_carrier_duty(duty).map_err(PeripheralError::WriteFailed)
    }
}

/// Logical duty percentage → raw LEDC duty at the carrier resolution.
pub fn raw_duty(duty_percent: u8) -> u32 {
    let full = 1u32 << pins::IR_LEDC_RESOLUTION_BITS;
    full * u32::from(duty_percent.min(100)) / 100
}

impl CarrierChannel for LedcCarrier {
    fn configure(&mut self, config: &CarrierConfig) -> Result<(), PeripheralError> {
        if self.config.as_ref() == Some(config) {
            return Ok(());
        }
        let invert = config.polarity == CarrierPolarity::ActiveLow;
        hw_init::ledc_carrier_config(config.frequency_hz, invert)
            .map_err(PeripheralError::ClaimFailed)?;
        // A re-program restarts the channel at duty 0.
        self.emitting = false;
        self.on_duty = raw_duty(config.duty_percent);
        self.config = Some(*config);
        info!(
            "carrier: {} Hz, duty {}/{}, {:?}",
            config.frequency_hz,
            self.on_duty,
            1u32 << pins::IR_LEDC_RESOLUTION_BITS,
            config.polarity
        );
        Ok(())
    }

    fn enable(&mut self) -> Result<(), PeripheralError> {
        if self.config.is_none() {
            return Err(PeripheralError::NotConfigured);
        }
        if self.emitting {
            warn!("carrier: enable while already emitting");
            return Ok(());
        }
        self.write_duty(self.on_duty)?;
        self.emitting = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), PeripheralError> {
        if self.config.is_none() {
            return Err(PeripheralError::NotConfigured);
        }
        self.write_duty(0)?;
        self.emitting = false;
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}

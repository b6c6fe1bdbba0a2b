//! Hardware adapter — bridges the real drivers to the domain port traits.
//!
//! Owns the carrier, the indicator and the delay, and exposes them as one
//! [`TransmitHardware`](crate::app::ports::TransmitHardware) value the
//! engine can lock as a unit.  On non-espidf targets the underlying drivers
//! use their simulation stubs.

use crate::app::ports::{CarrierChannel, IndicatorState, PeripheralError, StatusIndicator, TimeSource};
use crate::config::{CarrierConfig, EngineConfig};
use crate::drivers::carrier::LedcCarrier;
use crate::drivers::delay::{CalibratedDelay, PlatformDelay};
use crate::drivers::indicator::{BicolorIndicator, GpioLine};
use crate::pins;

/// Concrete adapter that combines all IR hardware behind port traits.
pub struct IrHardware<C, S, T> {
    carrier: C,
    indicator: S,
    time: T,
}

/// The board's production bundle.
pub type BoardHardware =
    IrHardware<LedcCarrier, BicolorIndicator<GpioLine, GpioLine>, CalibratedDelay<PlatformDelay>>;

impl<C, S, T> IrHardware<C, S, T> {
    pub fn new(carrier: C, indicator: S, time: T) -> Self {
        Self {
            carrier,
            indicator,
            time,
        }
    }

    pub fn carrier(&self) -> &C {
        &self.carrier
    }

    pub fn indicator(&self) -> &S {
        &self.indicator
    }

    pub fn into_parts(self) -> (C, S, T) {
        (self.carrier, self.indicator, self.time)
    }
}

impl BoardHardware {
    /// Bundle the board's pins.  Call after `hw_init::init_peripherals()`.
    pub fn board(config: &EngineConfig, delay: PlatformDelay) -> Self {
        Self::new(
            LedcCarrier::new(),
            BicolorIndicator::new(
                GpioLine::new(pins::LED_ACTIVE_GPIO),
                GpioLine::new(pins::LED_IDLE_GPIO),
            ),
            CalibratedDelay::new(delay, config.delay_calibration_percent),
        )
    }
}

// ── CarrierChannel implementation ─────────────────────────────

impl<C: CarrierChannel, S, T> CarrierChannel for IrHardware<C, S, T> {
    fn configure(&mut self, config: &CarrierConfig) -> Result<(), PeripheralError> {
        self.carrier.configure(config)
    }

    fn enable(&mut self) -> Result<(), PeripheralError> {
        self.carrier.enable()
    }

    fn disable(&mut self) -> Result<(), PeripheralError> {
        self.carrier.disable()
    }

    fn is_configured(&self) -> bool {
        self.carrier.is_configured()
    }
}

// ── StatusIndicator implementation ────────────────────────────

impl<C, S: StatusIndicator, T> StatusIndicator for IrHardware<C, S, T> {
    fn set(&mut self, state: IndicatorState) {
        self.indicator.set(state);
    }
}

// ── TimeSource implementation ─────────────────────────────────

impl<C, S, T: TimeSource> TimeSource for IrHardware<C, S, T> {
    fn delay_micros(&mut self, micros: u32) {
        self.time.delay_micros(micros);
    }
}

//! Bicolour status indicator.
//!
//! Two discrete LEDs: green while transmitting, red while idle.  Exactly
//! one is lit after every `set`.  Switching is make-before-break: the
//! incoming LED lights before the outgoing one goes dark, so the pair is
//! never both off.  Both are briefly lit for the two GPIO writes instead.
//!
//! Pins are any `embedded_hal` output; [`GpioLine`] is the board's own
//! implementation over hw_init.

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

use crate::app::ports::{IndicatorState, StatusIndicator};
use crate::drivers::hw_init;

pub struct BicolorIndicator<A, I> {
    active: A,
    idle: I,
    state: Option<IndicatorState>,
}

impl<A: OutputPin, I: OutputPin> BicolorIndicator<A, I> {
    /// `active` lights during transmission, `idle` otherwise.  The state is
    /// unknown until the first `set`.
    pub fn new(active: A, idle: I) -> Self {
        Self {
            active,
            idle,
            state: None,
        }
    }

    pub fn state(&self) -> Option<IndicatorState> {
        self.state
    }

    pub fn release(self) -> (A, I) {
        (self.active, self.idle)
    }
}

impl<A: OutputPin, I: OutputPin> StatusIndicator for BicolorIndicator<A, I> {
    fn set(&mut self, state: IndicatorState) {
        let (off_ok, on_ok) = match state {
            IndicatorState::Active => {
                let on = self.active.set_high().is_ok();
                (self.idle.set_low().is_ok(), on)
            }
            IndicatorState::Idle => {
                let on = self.idle.set_high().is_ok();
                (self.active.set_low().is_ok(), on)
            }
        };
        if !(off_ok && on_ok) {
            warn!("indicator: LED write failed while switching to {:?}", state);
        }
        self.state = Some(state);
    }
}

// ── GpioLine ──────────────────────────────────────────────────

/// Error from a raw GPIO write, carrying the ESP-IDF return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioWriteError(pub i32);

impl embedded_hal::digital::Error for GpioWriteError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Output pin configured by [`hw_init::init_peripherals`].
pub struct GpioLine {
    pin: i32,
    high: bool,
}

impl GpioLine {
    pub fn new(pin: i32) -> Self {
        Self { pin, high: false }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    fn write(&mut self, high: bool) -> Result<(), GpioWriteError> {
        hw_init::gpio_write(self.pin, high).map_err(GpioWriteError)?;
        self.high = high;
        Ok(())
    }
}

impl ErrorType for GpioLine {
    type Error = GpioWriteError;
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

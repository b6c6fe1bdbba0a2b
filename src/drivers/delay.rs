//! Calibrated blocking delay.
//!
//! The sleep primitive on the reference board overshoots by a roughly
//! constant ratio, so every requested duration is scaled down before it is
//! handed to the underlying delay.  The factor is part of the timing
//! contract: receivers only tolerate ±20-30% on mark/space widths.
//!
//! On ESP-IDF the inner delay is `esp_idf_hal::delay::Ets` (ROM busy-wait);
//! on host it is [`StdDelay`].

use embedded_hal::delay::DelayNs;

use crate::app::ports::TimeSource;
use crate::config::DEFAULT_DELAY_CALIBRATION_PERCENT;

/// [`TimeSource`] that applies `micros * percent / 100` (truncating) and
/// blocks on `D`.
pub struct CalibratedDelay<D> {
    inner: D,
    percent: u8,
}

impl<D: DelayNs> CalibratedDelay<D> {
    pub fn new(inner: D, percent: u8) -> Self {
        Self { inner, percent }
    }

    /// Delay with the reference 0.88 factor.
    pub fn reference(inner: D) -> Self {
        Self::new(inner, DEFAULT_DELAY_CALIBRATION_PERCENT)
    }

    /// Duration actually requested from the inner delay.
    pub fn scaled(&self, micros: u32) -> u32 {
        (u64::from(micros) * u64::from(self.percent) / 100) as u32
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: DelayNs> TimeSource for CalibratedDelay<D> {
    fn delay_micros(&mut self, micros: u32) {
        let scaled = self.scaled(micros);
        self.inner.delay_us(scaled);
    }
}

/// Host delay on top of `std::thread::sleep` (monotonic).
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

#[cfg(target_os = "espidf")]
pub type PlatformDelay = esp_idf_hal::delay::Ets;

#[cfg(not(target_os = "espidf"))]
pub type PlatformDelay = StdDelay;

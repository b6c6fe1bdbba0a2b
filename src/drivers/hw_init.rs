//! Raw peripheral access for the IR board.
//!
//! Configures the indicator GPIOs and the LEDC carrier timer/channel using
//! ESP-IDF sys calls.  On host targets every function is an in-memory
//! stand-in that succeeds, so the drivers above run unchanged in tests.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the engine exists; single-threaded.
    unsafe {
        init_gpio_outputs()?;
    }
    info!("hw_init: indicator GPIOs configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

/// Indicator levels driven at boot: red lit, green dark.  The board shows
/// idle from the first instruction, before the engine takes over.
pub const LED_BOOT_LEVELS: [(i32, bool); 2] = [
    (pins::LED_ACTIVE_GPIO, false),
    (pins::LED_IDLE_GPIO, true),
];

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for (pin, high) in LED_BOOT_LEVELS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, u32::from(high)) };
    }
    Ok(())
}

/// Drive an output pin.  Returns the raw ESP-IDF code on failure.
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), i32> {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs().
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret == ESP_OK { Ok(()) } else { Err(ret) }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) -> Result<(), i32> {
    Ok(())
}

// ── LEDC carrier ─────────────────────────────────────────────

/// Program the carrier timer and bind the IR channel to it.
///
/// With `invert` the hardware inverts the channel output, so a zero duty
/// leaves an active-low line parked high (LED dark).
#[cfg(target_os = "espidf")]
pub fn ledc_carrier_config(freq_hz: u32, invert: bool) -> Result<(), i32> {
    // SAFETY: Only the carrier driver calls this, from behind the engine lock.
    unsafe {
        let timer = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num: pins::IR_LEDC_TIMER,
            duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
            freq_hz,
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        let ret = ledc_timer_config(&timer);
        if ret != ESP_OK { return Err(ret); }

        let mut channel = ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: pins::IR_LEDC_CHANNEL,
            timer_sel: pins::IR_LEDC_TIMER,
            gpio_num: pins::IR_TX_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        channel.flags.set_output_invert(u32::from(invert));
        let ret = ledc_channel_config(&channel);
        if ret != ESP_OK { return Err(ret); }
    }
    info!("hw_init: LEDC carrier {} Hz on GPIO{} (invert={})", freq_hz, pins::IR_TX_GPIO, invert);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_carrier_config(freq_hz: u32, invert: bool) -> Result<(), i32> {
    log::debug!(
        "hw_init(sim): LEDC carrier {} Hz on GPIO{} (invert={})",
        freq_hz,
        pins::IR_TX_GPIO,
        invert
    );
    Ok(())
}

/// Write the carrier duty register (raw, `IR_LEDC_RESOLUTION_BITS` wide).
#[cfg(target_os = "espidf")]
pub fn ledc_carrier_duty(duty: u32) -> Result<(), i32> {
    // SAFETY: Channel configured in ledc_carrier_config(); only the carrier
    // driver writes it, from behind the engine lock.
    unsafe {
        let ret = ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::IR_LEDC_CHANNEL, duty);
        if ret != ESP_OK { return Err(ret); }
        let ret = ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, pins::IR_LEDC_CHANNEL);
        if ret != ESP_OK { return Err(ret); }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_carrier_duty(_duty: u32) -> Result<(), i32> {
    Ok(())
}

//! GPIO / peripheral pin assignments for the remocon board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// IR transmitter
// ---------------------------------------------------------------------------

/// LEDC output driving the IR LED transistor.  The LED sinks into the
/// driver stage, so the line is active-low.
pub const IR_TX_GPIO: i32 = 4;

/// LEDC timer reserved for the 38 kHz carrier.
pub const IR_LEDC_TIMER: u32 = 0;
/// LEDC channel reserved for the carrier.
pub const IR_LEDC_CHANNEL: u32 = 0;
/// LEDC duty resolution (bits).  8-bit at 38 kHz keeps the source clock
/// well inside the APB range.
pub const IR_LEDC_RESOLUTION_BITS: u32 = 8;

// ---------------------------------------------------------------------------
// Status indicator (bicolour LED pair)
// ---------------------------------------------------------------------------

/// Green LED: lit while a transmission runs.
pub const LED_ACTIVE_GPIO: i32 = 12;
/// Red LED: lit while idle.
pub const LED_IDLE_GPIO: i32 = 13;

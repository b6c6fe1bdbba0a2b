//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements        | Connects to                 |
//! |------------|-------------------|-----------------------------|
//! | `hardware` | CarrierChannel    | LEDC carrier on the IR LED  |
//! |            | StatusIndicator   | Green/red LED GPIOs         |
//! |            | TimeSource        | Calibrated busy-wait delay  |
//! | `log_sink` | EventSink         | Serial log output           |

pub mod hardware;
pub mod log_sink;

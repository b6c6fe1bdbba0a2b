//! IR carrier, indicator and delay drivers plus raw peripheral helpers.

pub mod carrier;
pub mod delay;
pub mod hw_init;
pub mod indicator;

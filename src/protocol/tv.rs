//! Samsung TV protocol (remote model BN59-01180A).
//!
//! A 32-bit frame: the fixed 16-bit device preamble `0xE0E0` followed by the
//! 16-bit key code, sent MSB-first as one value.  The physical remote sends
//! every keypress twice with a 52 ms gap; see [`TvEncoder::repeat_count`].

use super::{ProtocolEncoder, ProtocolTiming, Pulse, PulseSequence, Family, push_bits, push_pulse};

/// Device address prefixed to every key code.
pub const PREAMBLE: u16 = 0xE0E0;

pub const TIMING: ProtocolTiming = ProtocolTiming {
    header: Pulse::new(4443, 4569),
    one: Pulse::new(492, 1749),
    zero: Pulse::new(492, 630),
    stop: Pulse::new(493, 590),
};

/// Pulses per TV frame: header, 32 data bits, stop.
pub const FRAME_PULSES: usize = 34;

/// Full 32-bit frame value for a key code.
pub const fn frame_value(code: u16) -> u32 {
    ((PREAMBLE as u32) << 16) | code as u32
}

pub struct TvEncoder;

impl ProtocolEncoder for TvEncoder {
    fn family(&self) -> Family {
        Family::Tv
    }

    fn timing(&self) -> &'static ProtocolTiming {
        &TIMING
    }

    fn encode(&self, code: u16) -> PulseSequence {
        let mut seq = PulseSequence::new();
        push_pulse(&mut seq, TIMING.header);
        push_bits(&mut seq, &TIMING, frame_value(code), 32);
        push_pulse(&mut seq, TIMING.stop);
        seq
    }

    fn repeat_count(&self) -> u8 {
        2
    }
}

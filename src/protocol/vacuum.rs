//! Philips robot vacuum protocol (model FC8794).
//!
//! Five bytes per frame: a fixed 3-byte preamble followed by the 16-bit key
//! code, each MSB-first, using this family's own measured bit widths.  Sent
//! once: the 47 ms stop space stands in for a repeat gap.

use super::{ProtocolEncoder, ProtocolTiming, Pulse, PulseSequence, Family, push_bits, push_pulse};

/// Device preamble, transmitted byte by byte before the key code.
pub const PREAMBLE: [u8; 3] = [0xA2, 0xAA, 0x0A];

pub const TIMING: ProtocolTiming = ProtocolTiming {
    header: Pulse::new(9000, 4570),
    one: Pulse::new(510, 1745),
    zero: Pulse::new(520, 630),
    stop: Pulse::new(510, 47_000),
};

/// Pulses per Vacuum frame: header, 24 preamble bits, 16 code bits, stop.
pub const FRAME_PULSES: usize = 42;

pub struct VacuumEncoder;

impl ProtocolEncoder for VacuumEncoder {
    fn family(&self) -> Family {
        Family::Vacuum
    }

    fn timing(&self) -> &'static ProtocolTiming {
        &TIMING
    }

    fn encode(&self, code: u16) -> PulseSequence {
        let mut seq = PulseSequence::new();
        push_pulse(&mut seq, TIMING.header);
        for byte in PREAMBLE {
            push_bits(&mut seq, &TIMING, u32::from(byte), 8);
        }
        push_bits(&mut seq, &TIMING, u32::from(code), 16);
        push_pulse(&mut seq, TIMING.stop);
        seq
    }
}

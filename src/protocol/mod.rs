//! IR protocol encoders.
//!
//! Each encoder turns a 16-bit key code into a [`PulseSequence`]: an ordered
//! list of (mark, space) pairs in nominal microseconds.  The sequence is the
//! whole frame, header to stop pulse.  Repetition between frames is the
//! orchestrator's job, driven by [`ProtocolEncoder::repeat_count`].
//!
//! | Family | Device                         | Frame                               |
//! |--------|--------------------------------|-------------------------------------|
//! | TV     | Samsung remote BN59-01180A     | header · 32 bits · stop, sent twice |
//! | Vacuum | Philips FC8794 robot cleaner   | header · 24 + 16 bits · stop, once  |

pub mod tv;
pub mod vacuum;

pub use tv::TvEncoder;
pub use vacuum::VacuumEncoder;

/// One mark/space pair, in nominal (uncalibrated) microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub mark_us: u32,
    pub space_us: u32,
}

impl Pulse {
    pub const fn new(mark_us: u32, space_us: u32) -> Self {
        Self { mark_us, space_us }
    }
}

/// Upper bound on pulses in one frame (Vacuum: 1 + 24 + 16 + 1).
pub const MAX_FRAME_PULSES: usize = 42;

/// One encoded frame, emitted in order exactly once per transmission.
pub type PulseSequence = heapless::Vec<Pulse, MAX_FRAME_PULSES>;

/// The fixed timing contract with a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolTiming {
    pub header: Pulse,
    pub one: Pulse,
    pub zero: Pulse,
    pub stop: Pulse,
}

impl ProtocolTiming {
    /// Pulse for a single data bit.
    pub const fn bit(&self, set: bool) -> Pulse {
        if set { self.one } else { self.zero }
    }
}

/// Protocol family a registry entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Tv,
    Vacuum,
}

impl Family {
    /// Encoder that implements this family's frame format.
    pub fn encoder(self) -> &'static dyn ProtocolEncoder {
        match self {
            Self::Tv => &TvEncoder,
            Self::Vacuum => &VacuumEncoder,
        }
    }
}

/// Turns a key code into a frame.
pub trait ProtocolEncoder: Sync {
    fn family(&self) -> Family;

    fn timing(&self) -> &'static ProtocolTiming;

    /// Encode one complete frame for `code`.
    fn encode(&self, code: u16) -> PulseSequence;

    /// Frames sent per keypress.
    fn repeat_count(&self) -> u8 {
        1
    }
}

/// Append `nbits` low bits of `value`, most significant first.
pub(crate) fn push_bits(seq: &mut PulseSequence, timing: &ProtocolTiming, value: u32, nbits: u32) {
    for bit in (0..nbits).rev() {
        push_pulse(seq, timing.bit(value & (1 << bit) != 0));
    }
}

pub(crate) fn push_pulse(seq: &mut PulseSequence, pulse: Pulse) {
    let pushed = seq.push(pulse).is_ok();
    debug_assert!(pushed, "frame exceeds MAX_FRAME_PULSES");
}

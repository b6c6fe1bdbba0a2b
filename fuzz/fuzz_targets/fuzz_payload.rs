//! Fuzz target: inbound command payloads
//!
//! Drives arbitrary byte sequences through `parse_payload`, the registry
//! lookup and the matching encoder, asserting that nothing panics and that
//! any resolved command encodes to a frame of its family's length.
//!
//! cargo fuzz run fuzz_payload

#![no_main]

use libfuzzer_sys::fuzz_target;
use remocon::app::commands::parse_payload;
use remocon::config::MAX_COMMAND_LEN;
use remocon::protocol::{tv, vacuum, Family};
use remocon::registry::CommandRegistry;

fuzz_target!(|data: &[u8]| {
    let Ok(name) = parse_payload(data, MAX_COMMAND_LEN) else {
        return;
    };
    assert!(name.len() <= MAX_COMMAND_LEN);

    let registry = CommandRegistry::standard();
    let Some(command) = registry.lookup(&name) else {
        return;
    };

    let family = registry.family_of(command);
    let frame = family.encoder().encode(command.code);
    let expected = match family {
        Family::Tv => tv::FRAME_PULSES,
        Family::Vacuum => vacuum::FRAME_PULSES,
    };
    assert_eq!(frame.len(), expected, "{} encoded to a short frame", command.name);
});

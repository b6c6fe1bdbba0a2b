//! Inbound command payloads.
//!
//! The network collaborator hands the engine raw bytes.  They are treated
//! like a C string in a 30-byte buffer: everything from the first NUL on is
//! ignored, and what remains must be a short UTF-8 name.

use crate::config::MAX_COMMAND_LEN;

/// Command name as received, before registry lookup.
pub type CommandName = heapless::String<MAX_COMMAND_LEN>;

/// Why a payload never reached the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    Empty,
    TooLong(usize),
    NotUtf8,
}

impl core::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty payload"),
            Self::TooLong(n) => write!(f, "payload too long ({} bytes)", n),
            Self::NotUtf8 => write!(f, "payload is not UTF-8"),
        }
    }
}

/// Extract the command name from a raw payload.
///
/// `max_len` may tighten, but never exceed, [`MAX_COMMAND_LEN`].
pub fn parse_payload(payload: &[u8], max_len: usize) -> Result<CommandName, PayloadError> {
    let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());
    let raw = &payload[..end];
    if raw.is_empty() {
        return Err(PayloadError::Empty);
    }
    if raw.len() > max_len.min(MAX_COMMAND_LEN) {
        return Err(PayloadError::TooLong(raw.len()));
    }
    let text = core::str::from_utf8(raw).map_err(|_| PayloadError::NotUtf8)?;
    let mut name = CommandName::new();
    name.push_str(text).map_err(|()| PayloadError::TooLong(raw.len()))?;
    Ok(name)
}

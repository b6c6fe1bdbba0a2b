//! Command registry — the symbolic key names accepted from the outside
//! world and the codes they transmit.
//!
//! Entries below [`VACUUM_FAMILY_START`] are TV keys, the rest are robot
//! vacuum keys.  Family selection goes through
//! [`CommandRegistry::family_of`]; nothing else compares indices.

use crate::protocol::Family;

/// Immutable registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Position in the registry.  Selects the protocol family.
    pub index: u8,
    /// Case-sensitive ASCII key name.
    pub name: &'static str,
    /// 16-bit key code.
    pub code: u16,
}

impl Command {
    pub const fn new(index: u8, name: &'static str, code: u16) -> Self {
        Self { index, name, code }
    }
}

/// First index belonging to the Vacuum family.
pub const VACUUM_FAMILY_START: u8 = 10;

/// Samsung BN59-01180A keys followed by Philips FC8794 keys.
pub static STANDARD_COMMANDS: [Command; 20] = [
    Command::new(0, "TV_KEY_POWER", 0x40BF),
    Command::new(1, "TV_KEY_CHANNELUP", 0x48B7),
    Command::new(2, "TV_KEY_CHANNELDOWN", 0x08F7),
    Command::new(3, "TV_KEY_VOLUMEUP", 0xE01F),
    Command::new(4, "TV_KEY_VOLUMEDOWN", 0xD02F),
    Command::new(5, "TV_KEY_MENU", 0x58A7),
    Command::new(6, "TV_KEY_UP", 0x06F9),
    Command::new(7, "TV_KEY_DOWN", 0x8679),
    Command::new(8, "TV_KEY_LEFT", 0xA659),
    Command::new(9, "TV_KEY_RIGHT", 0x46B9),
    Command::new(10, "VA_KEY_UP", 0xC03F),
    Command::new(11, "VA_KEY_DOWN", 0x609F),
    Command::new(12, "VA_KEY_RIGHT", 0xA05F),
    Command::new(13, "VA_KEY_LEFT", 0x20DF),
    Command::new(14, "VA_KEY_START", 0x807F),
    Command::new(15, "VA_KEY_RANDOM", 0xE01F),
    Command::new(16, "VA_KEY_CIRCLE", 0x10EF),
    Command::new(17, "VA_KEY_WALL", 0x50AF),
    Command::new(18, "VA_KEY_SCHED", 0x906F),
    Command::new(19, "VA_KEY_HOME", 0x40BF),
];

/// Ordered, read-only command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandRegistry {
    entries: &'static [Command],
    vacuum_start: u8,
}

impl CommandRegistry {
    /// Build a registry over `entries`.
    ///
    /// Indices must equal table positions and names must be unique.
    pub fn new(entries: &'static [Command], vacuum_start: u8) -> Result<Self, RegistryError> {
        for (pos, cmd) in entries.iter().enumerate() {
            if usize::from(cmd.index) != pos {
                return Err(RegistryError::IndexMismatch(cmd.index));
            }
            if entries[..pos].iter().any(|c| c.name == cmd.name) {
                return Err(RegistryError::DuplicateName(cmd.name));
            }
        }
        Ok(Self {
            entries,
            vacuum_start,
        })
    }

    /// The built-in TV + vacuum table.
    pub const fn standard() -> Self {
        Self {
            entries: &STANDARD_COMMANDS,
            vacuum_start: VACUUM_FAMILY_START,
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&'static Command> {
        let entries: &'static [Command] = self.entries;
        entries.iter().find(|c| c.name == name)
    }

    pub fn get(&self, index: u8) -> Option<&'static Command> {
        let entries: &'static [Command] = self.entries;
        entries.get(usize::from(index))
    }

    pub fn family_of(&self, command: &Command) -> Family {
        if command.index < self.vacuum_start {
            Family::Tv
        } else {
            Family::Vacuum
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Command> + use<> {
        let entries: &'static [Command] = self.entries;
        entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Errors from [`CommandRegistry::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// An entry's index does not match its table position.
    IndexMismatch(u8),
    /// Two entries share a name.
    DuplicateName(&'static str),
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IndexMismatch(i) => write!(f, "entry index {} out of order", i),
            Self::DuplicateName(n) => write!(f, "duplicate command name {}", n),
        }
    }
}

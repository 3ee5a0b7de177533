//! Key events and the palette open shortcut.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A keyboard key as delivered by the host's keydown events.
///
/// Printable characters reach the engine only for shortcut matching; once
/// the surface is open the host routes typed text through the query input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Char(char),
}

bitflags::bitflags! {
    /// Modifier mask on a key event. `PRIMARY` is the platform's command
    /// modifier (Cmd on macOS, Ctrl elsewhere); the host maps it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const PRIMARY = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
    }
}

impl Serialize for Modifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Modifiers::from_bits(bits)
            .ok_or_else(|| D::Error::custom(format!("unknown modifier bits: {bits:#04x}")))
    }
}

/// The modifier+key combination that opens the search surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl Shortcut {
    /// The conventional palette shortcut: primary modifier + `k`.
    pub fn default_open() -> Self {
        Self {
            key: Key::Char('k'),
            modifiers: Modifiers::PRIMARY,
        }
    }

    /// Exact match: the pressed key and the full modifier set must agree.
    /// Character comparison is case-insensitive so Shift-layer variants of
    /// the same physical key still match.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        if modifiers != self.modifiers {
            return false;
        }
        match (self.key, key) {
            (Key::Char(want), Key::Char(got)) => {
                want.eq_ignore_ascii_case(&got)
            }
            (want, got) => want == got,
        }
    }
}

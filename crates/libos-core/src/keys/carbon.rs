//! Virtual key to macOS `kVK_*` key code table, plus the pure helpers the
//! Carbon backend builds on.
//!
//! Key codes are defined in Carbon `Events.h` (HIToolbox framework) and name
//! *physical positions* on an ANSI keyboard: `kVK_ANSI_A` is the key in the
//! A position of a US layout, whatever the active layout prints on it.
//!
//! Two keys deliberately have no code here: `Backspace` and `Insert`.  Apple
//! keyboards label the backspace position "delete" and that position
//! (`kVK_Delete` = 0x33) is what [`VirtualKey::Delete`] maps to.

use std::fmt;
use std::ops::BitOr;

use crate::combination::KeyCombination;

use super::VirtualKey;

/// Translates a [`VirtualKey`] to a macOS `kVK_*` key code.
///
/// Returns `None` for keys with no Carbon equivalent.
pub fn to_keycode(key: VirtualKey) -> Option<u16> {
    match key {
        // Letters (ANSI positions, not ASCII)
        VirtualKey::A => Some(0x00), // kVK_ANSI_A
        VirtualKey::S => Some(0x01),
        VirtualKey::D => Some(0x02),
        VirtualKey::F => Some(0x03),
        VirtualKey::H => Some(0x04),
        VirtualKey::G => Some(0x05),
        VirtualKey::Z => Some(0x06),
        VirtualKey::X => Some(0x07),
        VirtualKey::C => Some(0x08),
        VirtualKey::V => Some(0x09),
        VirtualKey::B => Some(0x0B),
        VirtualKey::Q => Some(0x0C),
        VirtualKey::W => Some(0x0D),
        VirtualKey::E => Some(0x0E),
        VirtualKey::R => Some(0x0F),
        VirtualKey::Y => Some(0x10),
        VirtualKey::T => Some(0x11),
        VirtualKey::O => Some(0x1F),
        VirtualKey::U => Some(0x20),
        VirtualKey::I => Some(0x22),
        VirtualKey::P => Some(0x23),
        VirtualKey::L => Some(0x25),
        VirtualKey::J => Some(0x26),
        VirtualKey::K => Some(0x28),
        VirtualKey::N => Some(0x2D),
        VirtualKey::M => Some(0x2E),

        // Digits
        VirtualKey::Key1 => Some(0x12),
        VirtualKey::Key2 => Some(0x13),
        VirtualKey::Key3 => Some(0x14),
        VirtualKey::Key4 => Some(0x15),
        VirtualKey::Key6 => Some(0x16),
        VirtualKey::Key5 => Some(0x17),
        VirtualKey::Key9 => Some(0x19),
        VirtualKey::Key7 => Some(0x1A),
        VirtualKey::Key8 => Some(0x1C),
        VirtualKey::Key0 => Some(0x1D),

        // Punctuation
        VirtualKey::Equal => Some(0x18),
        VirtualKey::Minus => Some(0x1B),
        VirtualKey::BracketRight => Some(0x1E),
        VirtualKey::BracketLeft => Some(0x21),
        VirtualKey::Quote => Some(0x27),
        VirtualKey::Semicolon => Some(0x29),
        VirtualKey::Backslash => Some(0x2A),
        VirtualKey::Comma => Some(0x2B),
        VirtualKey::Slash => Some(0x2C),
        VirtualKey::Period => Some(0x2F),
        VirtualKey::Grave => Some(0x32),
        VirtualKey::Section => Some(0x0A), // kVK_ISO_Section

        // Layout-independent keys
        VirtualKey::Return => Some(0x24),
        VirtualKey::Tab => Some(0x30),
        VirtualKey::Space => Some(0x31),
        VirtualKey::Delete => Some(0x33),
        VirtualKey::Escape => Some(0x35),
        VirtualKey::SuperRight => Some(0x36), // kVK_RightCommand
        VirtualKey::SuperLeft => Some(0x37),  // kVK_Command
        VirtualKey::ShiftLeft => Some(0x38),
        VirtualKey::CapsLock => Some(0x39),
        VirtualKey::AltLeft => Some(0x3A), // kVK_Option
        VirtualKey::ControlLeft => Some(0x3B),
        VirtualKey::ShiftRight => Some(0x3C),
        VirtualKey::AltRight => Some(0x3D),
        VirtualKey::ControlRight => Some(0x3E),
        VirtualKey::Function => Some(0x3F),

        // Keypad
        VirtualKey::NumDecimal => Some(0x41),
        VirtualKey::NumMultiply => Some(0x43),
        VirtualKey::NumPlus => Some(0x45),
        VirtualKey::NumClear => Some(0x47),
        VirtualKey::NumDivide => Some(0x4B),
        VirtualKey::NumEnter => Some(0x4C),
        VirtualKey::NumMinus => Some(0x4E),
        VirtualKey::NumEquals => Some(0x51),
        VirtualKey::Num0 => Some(0x52),
        VirtualKey::Num1 => Some(0x53),
        VirtualKey::Num2 => Some(0x54),
        VirtualKey::Num3 => Some(0x55),
        VirtualKey::Num4 => Some(0x56),
        VirtualKey::Num5 => Some(0x57),
        VirtualKey::Num6 => Some(0x58),
        VirtualKey::Num7 => Some(0x59),
        VirtualKey::Num8 => Some(0x5B),
        VirtualKey::Num9 => Some(0x5C),

        VirtualKey::VolumeUp => Some(0x48),
        VirtualKey::VolumeDown => Some(0x49),
        VirtualKey::Mute => Some(0x4A),

        // Function keys (non-contiguous)
        VirtualKey::F5 => Some(0x60),
        VirtualKey::F6 => Some(0x61),
        VirtualKey::F7 => Some(0x62),
        VirtualKey::F3 => Some(0x63),
        VirtualKey::F8 => Some(0x64),
        VirtualKey::F9 => Some(0x65),
        VirtualKey::F11 => Some(0x67),
        VirtualKey::F10 => Some(0x6D),
        VirtualKey::F12 => Some(0x6F),
        VirtualKey::F4 => Some(0x76),
        VirtualKey::F2 => Some(0x78),
        VirtualKey::F1 => Some(0x7A),

        VirtualKey::Help => Some(0x72),
        VirtualKey::Home => Some(0x73),
        VirtualKey::PageUp => Some(0x74),
        VirtualKey::End => Some(0x77),
        VirtualKey::PageDown => Some(0x79),
        VirtualKey::Left => Some(0x7B),
        VirtualKey::Right => Some(0x7C),
        VirtualKey::Down => Some(0x7D),
        VirtualKey::Up => Some(0x7E),

        VirtualKey::Backspace | VirtualKey::Insert => None,
    }
}

/// Translates a macOS `kVK_*` key code back to a [`VirtualKey`].
pub fn from_keycode(keycode: u16) -> Option<VirtualKey> {
    VirtualKey::ALL
        .iter()
        .copied()
        .find(|&key| to_keycode(key) == Some(keycode))
}

/// CoreGraphics event modifier flags (`CGEventFlags` bits).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierFlags(pub u64);

impl ModifierFlags {
    pub const NONE: ModifierFlags = ModifierFlags(0);
    /// `kCGEventFlagMaskShift`
    pub const SHIFT: ModifierFlags = ModifierFlags(0x0002_0000);
    /// `kCGEventFlagMaskControl`
    pub const CONTROL: ModifierFlags = ModifierFlags(0x0004_0000);
    /// `kCGEventFlagMaskAlternate`
    pub const ALTERNATE: ModifierFlags = ModifierFlags(0x0008_0000);
    /// `kCGEventFlagMaskCommand`
    pub const COMMAND: ModifierFlags = ModifierFlags(0x0010_0000);
    /// `kCGEventFlagMaskSecondaryFn`
    pub const SECONDARY_FN: ModifierFlags = ModifierFlags(0x0080_0000);

    /// Flag contributed by `key`, if it is a chord modifier.
    pub fn for_key(key: VirtualKey) -> Option<ModifierFlags> {
        match key {
            VirtualKey::ShiftLeft | VirtualKey::ShiftRight => Some(Self::SHIFT),
            VirtualKey::ControlLeft | VirtualKey::ControlRight => Some(Self::CONTROL),
            VirtualKey::AltLeft | VirtualKey::AltRight => Some(Self::ALTERNATE),
            VirtualKey::SuperLeft | VirtualKey::SuperRight => Some(Self::COMMAND),
            VirtualKey::Function => Some(Self::SECONDARY_FN),
            _ => None,
        }
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: ModifierFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ModifierFlags {
    type Output = ModifierFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        ModifierFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Splits a combination into its CoreGraphics modifier mask and the
/// remaining non-modifier keys.
///
/// The input is left untouched.  Both sides of a sided modifier contribute
/// the same flag, so `{ShiftLeft, ShiftRight, A}` yields `(SHIFT, {A})`.
pub fn extract_modifiers(combo: &KeyCombination) -> (ModifierFlags, KeyCombination) {
    let mut flags = ModifierFlags::NONE;
    let mut rest = KeyCombination::new();
    for key in combo.iter() {
        match ModifierFlags::for_key(key) {
            Some(flag) => flags = flags | flag,
            None => {
                rest += key;
            }
        }
    }
    (flags, rest)
}

/// Picks the virtual key a physical key stands for under the active layout.
///
/// `keycode` is the physical `kVK_*` position and `produced` the character
/// the layout prints on it (from `UCKeyTranslate`).  When the position holds
/// a layout-dependent key and the character is a latin letter, a digit or
/// a symbol with its own key, that key wins: on AZERTY the `kVK_ANSI_Q`
/// position produces `'a'` and resolves to [`VirtualKey::A`], and the
/// `kVK_ANSI_M` position produces `','` and resolves to
/// [`VirtualKey::Comma`].  Everything else falls back to [`from_keycode`].
pub fn resolve_layout_key(keycode: u16, produced: Option<char>) -> Option<VirtualKey> {
    let positional = from_keycode(keycode);
    let localized = match positional {
        Some(key) if key.is_layout_dependent() => produced.and_then(|c| {
            VirtualKey::from_letter(c)
                .or_else(|| VirtualKey::from_digit(c))
                .or_else(|| VirtualKey::from_punctuation(c))
        }),
        _ => None,
    };
    localized.or(positional)
}

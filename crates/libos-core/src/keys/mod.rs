//! The platform-neutral virtual key space and its per-family native tables.
//!
//! A [`VirtualKey`] is a *symbolic* identifier: `VirtualKey::A`,
//! `VirtualKey::ShiftLeft`, `VirtualKey::F5`.  Its numeric encoding differs
//! per platform family and is only available through an explicit table:
//!
//! - [`x11`] – X11 KeySym values (Linux).
//! - [`win32`] – Windows Virtual-Key codes.
//! - [`carbon`] – macOS `kVK_*` key codes (HIToolbox `Events.h`).
//!
//! A family may legitimately lack a symbol (`Function` exists only on the
//! Carbon family); the tables then return `None`.
//!
//! # Aliases
//!
//! Aliases such as `Enter` for `Return` or `Ctrl` for `ControlLeft` are
//! associated constants equal to their canonical variant, so they can never
//! diverge in any table:
//!
//! ```
//! use libos_core::VirtualKey;
//! assert_eq!(VirtualKey::Enter, VirtualKey::Return);
//! assert_eq!(VirtualKey::Shift, VirtualKey::ShiftLeft);
//! ```

pub mod carbon;
pub mod hid;
pub mod win32;
pub mod x11;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::PlatformFamily;

/// Error returned when a key name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
    #[error("empty key name in combination {0:?}")]
    EmptySegment(String),
}

/// Symbolic keyboard key, independent of any native numeric encoding.
///
/// The declaration order is the iteration order of a
/// [`KeyCombination`](crate::KeyCombination): modifiers, then everything
/// else.  Backends press keys in that order, so `Ctrl + C` sends Control
/// down before `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VirtualKey {
    // Modifiers come first so a chord presses them before its other keys.
    ControlLeft,
    ControlRight,
    ShiftLeft,
    ShiftRight,
    /// Alt on PC keyboards, Option on Apple keyboards.
    AltLeft,
    AltRight,
    /// Super on X11, Win on Windows, Command on macOS.
    SuperLeft,
    SuperRight,
    /// Apple `fn` key.
    Function,
    CapsLock,

    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Digits (main row)
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    // Symbols
    Space,
    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Semicolon,
    Quote,
    Backslash,
    Comma,
    Period,
    Slash,
    Grave,
    /// ISO section key (`§`), Apple keyboards only.
    Section,

    // TTY function keys
    Backspace,
    Tab,
    Return,
    Escape,
    Delete,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Arrows
    Left,
    Up,
    Right,
    Down,

    // Navigation
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Help,

    // Numpad
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    NumDecimal,
    NumMultiply,
    NumPlus,
    NumMinus,
    NumDivide,
    NumEquals,
    NumClear,
    NumEnter,

    // Media
    VolumeUp,
    VolumeDown,
    Mute,
}

#[allow(non_upper_case_globals)]
impl VirtualKey {
    pub const Shift: VirtualKey = VirtualKey::ShiftLeft;
    pub const Control: VirtualKey = VirtualKey::ControlLeft;
    pub const Ctrl: VirtualKey = VirtualKey::ControlLeft;
    pub const Caps: VirtualKey = VirtualKey::CapsLock;
    pub const Alt: VirtualKey = VirtualKey::AltLeft;
    pub const Option: VirtualKey = VirtualKey::AltLeft;
    pub const OptionLeft: VirtualKey = VirtualKey::AltLeft;
    pub const OptionRight: VirtualKey = VirtualKey::AltRight;
    pub const Super: VirtualKey = VirtualKey::SuperLeft;
    pub const Win: VirtualKey = VirtualKey::SuperLeft;
    pub const WinLeft: VirtualKey = VirtualKey::SuperLeft;
    pub const WinRight: VirtualKey = VirtualKey::SuperRight;
    pub const Command: VirtualKey = VirtualKey::SuperLeft;
    pub const Cmd: VirtualKey = VirtualKey::SuperLeft;
    pub const CommandLeft: VirtualKey = VirtualKey::SuperLeft;
    pub const CommandRight: VirtualKey = VirtualKey::SuperRight;
    pub const Fn: VirtualKey = VirtualKey::Function;
    pub const Enter: VirtualKey = VirtualKey::Return;
    pub const Esc: VirtualKey = VirtualKey::Escape;
    pub const Del: VirtualKey = VirtualKey::Delete;
}

/// Alternative spellings accepted by [`VirtualKey::from_str`], already
/// normalized (lowercase, no `_`, `-` or spaces).
const ALIAS_NAMES: &[(&str, VirtualKey)] = &[
    ("shift", VirtualKey::ShiftLeft),
    ("shiftl", VirtualKey::ShiftLeft),
    ("shiftr", VirtualKey::ShiftRight),
    ("control", VirtualKey::ControlLeft),
    ("controll", VirtualKey::ControlLeft),
    ("controlr", VirtualKey::ControlRight),
    ("ctrl", VirtualKey::ControlLeft),
    ("ctrlleft", VirtualKey::ControlLeft),
    ("ctrlright", VirtualKey::ControlRight),
    ("caps", VirtualKey::CapsLock),
    ("alt", VirtualKey::AltLeft),
    ("altl", VirtualKey::AltLeft),
    ("altr", VirtualKey::AltRight),
    ("option", VirtualKey::AltLeft),
    ("optionl", VirtualKey::AltLeft),
    ("optionr", VirtualKey::AltRight),
    ("optionleft", VirtualKey::AltLeft),
    ("optionright", VirtualKey::AltRight),
    ("super", VirtualKey::SuperLeft),
    ("superl", VirtualKey::SuperLeft),
    ("superr", VirtualKey::SuperRight),
    ("win", VirtualKey::SuperLeft),
    ("winl", VirtualKey::SuperLeft),
    ("winr", VirtualKey::SuperRight),
    ("winleft", VirtualKey::SuperLeft),
    ("winright", VirtualKey::SuperRight),
    ("command", VirtualKey::SuperLeft),
    ("commandl", VirtualKey::SuperLeft),
    ("commandr", VirtualKey::SuperRight),
    ("commandleft", VirtualKey::SuperLeft),
    ("commandright", VirtualKey::SuperRight),
    ("cmd", VirtualKey::SuperLeft),
    ("fn", VirtualKey::Function),
    ("enter", VirtualKey::Return),
    ("esc", VirtualKey::Escape),
    ("del", VirtualKey::Delete),
    ("bracketl", VirtualKey::BracketLeft),
    ("bracketr", VirtualKey::BracketRight),
    ("space", VirtualKey::Space),
    ("0", VirtualKey::Key0),
    ("1", VirtualKey::Key1),
    ("2", VirtualKey::Key2),
    ("3", VirtualKey::Key3),
    ("4", VirtualKey::Key4),
    ("5", VirtualKey::Key5),
    ("6", VirtualKey::Key6),
    ("7", VirtualKey::Key7),
    ("8", VirtualKey::Key8),
    ("9", VirtualKey::Key9),
];

impl VirtualKey {
    /// Every virtual key, in declaration order.
    pub const ALL: &'static [VirtualKey] = &[
        VirtualKey::ControlLeft, VirtualKey::ControlRight, VirtualKey::ShiftLeft,
        VirtualKey::ShiftRight, VirtualKey::AltLeft, VirtualKey::AltRight,
        VirtualKey::SuperLeft, VirtualKey::SuperRight, VirtualKey::Function,
        VirtualKey::CapsLock,
        VirtualKey::A, VirtualKey::B, VirtualKey::C, VirtualKey::D, VirtualKey::E,
        VirtualKey::F, VirtualKey::G, VirtualKey::H, VirtualKey::I, VirtualKey::J,
        VirtualKey::K, VirtualKey::L, VirtualKey::M, VirtualKey::N, VirtualKey::O,
        VirtualKey::P, VirtualKey::Q, VirtualKey::R, VirtualKey::S, VirtualKey::T,
        VirtualKey::U, VirtualKey::V, VirtualKey::W, VirtualKey::X, VirtualKey::Y,
        VirtualKey::Z,
        VirtualKey::Key0, VirtualKey::Key1, VirtualKey::Key2, VirtualKey::Key3,
        VirtualKey::Key4, VirtualKey::Key5, VirtualKey::Key6, VirtualKey::Key7,
        VirtualKey::Key8, VirtualKey::Key9,
        VirtualKey::Space, VirtualKey::Minus, VirtualKey::Equal, VirtualKey::BracketLeft,
        VirtualKey::BracketRight, VirtualKey::Semicolon, VirtualKey::Quote,
        VirtualKey::Backslash, VirtualKey::Comma, VirtualKey::Period, VirtualKey::Slash,
        VirtualKey::Grave, VirtualKey::Section,
        VirtualKey::Backspace, VirtualKey::Tab, VirtualKey::Return, VirtualKey::Escape,
        VirtualKey::Delete,
        VirtualKey::F1, VirtualKey::F2, VirtualKey::F3, VirtualKey::F4, VirtualKey::F5,
        VirtualKey::F6, VirtualKey::F7, VirtualKey::F8, VirtualKey::F9, VirtualKey::F10,
        VirtualKey::F11, VirtualKey::F12,
        VirtualKey::Left, VirtualKey::Up, VirtualKey::Right, VirtualKey::Down,
        VirtualKey::Insert, VirtualKey::Home, VirtualKey::End, VirtualKey::PageUp,
        VirtualKey::PageDown, VirtualKey::Help,
        VirtualKey::Num0, VirtualKey::Num1, VirtualKey::Num2, VirtualKey::Num3,
        VirtualKey::Num4, VirtualKey::Num5, VirtualKey::Num6, VirtualKey::Num7,
        VirtualKey::Num8, VirtualKey::Num9, VirtualKey::NumDecimal, VirtualKey::NumMultiply,
        VirtualKey::NumPlus, VirtualKey::NumMinus, VirtualKey::NumDivide,
        VirtualKey::NumEquals, VirtualKey::NumClear, VirtualKey::NumEnter,
        VirtualKey::VolumeUp, VirtualKey::VolumeDown, VirtualKey::Mute,
    ];

    /// Canonical name of the key, as rendered by `Display`.
    pub fn name(self) -> &'static str {
        use VirtualKey::*;
        match self {
            A => "A", B => "B", C => "C", D => "D", E => "E", F => "F", G => "G",
            H => "H", I => "I", J => "J", K => "K", L => "L", M => "M", N => "N",
            O => "O", P => "P", Q => "Q", R => "R", S => "S", T => "T", U => "U",
            V => "V", W => "W", X => "X", Y => "Y", Z => "Z",
            Key0 => "Key0", Key1 => "Key1", Key2 => "Key2", Key3 => "Key3",
            Key4 => "Key4", Key5 => "Key5", Key6 => "Key6", Key7 => "Key7",
            Key8 => "Key8", Key9 => "Key9",
            Space => "Space",
            Minus => "Minus",
            Equal => "Equal",
            BracketLeft => "BracketLeft",
            BracketRight => "BracketRight",
            Semicolon => "Semicolon",
            Quote => "Quote",
            Backslash => "Backslash",
            Comma => "Comma",
            Period => "Period",
            Slash => "Slash",
            Grave => "Grave",
            Section => "Section",
            ShiftLeft => "ShiftLeft",
            ShiftRight => "ShiftRight",
            ControlLeft => "ControlLeft",
            ControlRight => "ControlRight",
            AltLeft => "AltLeft",
            AltRight => "AltRight",
            SuperLeft => "SuperLeft",
            SuperRight => "SuperRight",
            CapsLock => "CapsLock",
            Function => "Function",
            Backspace => "Backspace",
            Tab => "Tab",
            Return => "Return",
            Escape => "Escape",
            Delete => "Delete",
            F1 => "F1", F2 => "F2", F3 => "F3", F4 => "F4", F5 => "F5", F6 => "F6",
            F7 => "F7", F8 => "F8", F9 => "F9", F10 => "F10", F11 => "F11", F12 => "F12",
            Left => "Left",
            Up => "Up",
            Right => "Right",
            Down => "Down",
            Insert => "Insert",
            Home => "Home",
            End => "End",
            PageUp => "PageUp",
            PageDown => "PageDown",
            Help => "Help",
            Num0 => "Num0", Num1 => "Num1", Num2 => "Num2", Num3 => "Num3",
            Num4 => "Num4", Num5 => "Num5", Num6 => "Num6", Num7 => "Num7",
            Num8 => "Num8", Num9 => "Num9",
            NumDecimal => "NumDecimal",
            NumMultiply => "NumMultiply",
            NumPlus => "NumPlus",
            NumMinus => "NumMinus",
            NumDivide => "NumDivide",
            NumEquals => "NumEquals",
            NumClear => "NumClear",
            NumEnter => "NumEnter",
            VolumeUp => "VolumeUp",
            VolumeDown => "VolumeDown",
            Mute => "Mute",
        }
    }

    /// Returns `true` for shift, control, alt/option, super/command and `fn`.
    ///
    /// Caps Lock is a toggle, not a chord modifier, and is excluded.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            VirtualKey::ShiftLeft
                | VirtualKey::ShiftRight
                | VirtualKey::ControlLeft
                | VirtualKey::ControlRight
                | VirtualKey::AltLeft
                | VirtualKey::AltRight
                | VirtualKey::SuperLeft
                | VirtualKey::SuperRight
                | VirtualKey::Function
        )
    }

    /// Returns `true` for keys whose produced character depends on the
    /// active keyboard layout (letters, main-row digits, punctuation).
    pub fn is_layout_dependent(self) -> bool {
        use VirtualKey::*;
        self.letter().is_some()
            || self.digit().is_some()
            || matches!(
                self,
                Minus | Equal | BracketLeft | BracketRight | Semicolon | Quote | Backslash
                    | Comma | Period | Slash | Grave | Section
            )
    }

    /// Returns the uppercase ASCII letter for `A`–`Z`.
    pub fn letter(self) -> Option<char> {
        let index = (self as usize).checked_sub(VirtualKey::A as usize)?;
        (index < 26).then(|| (b'A' + index as u8) as char)
    }

    /// Returns the ASCII digit for `Key0`–`Key9`.
    pub fn digit(self) -> Option<char> {
        let index = (self as usize).checked_sub(VirtualKey::Key0 as usize)?;
        (index < 10).then(|| (b'0' + index as u8) as char)
    }

    /// Returns the letter key for an ASCII letter (either case).
    pub fn from_letter(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
        Some(Self::ALL[VirtualKey::A as usize + index])
    }

    /// Returns the main-row digit key for an ASCII digit.
    pub fn from_digit(c: char) -> Option<Self> {
        let value = c.to_digit(10)?;
        Some(Self::ALL[VirtualKey::Key0 as usize + value as usize])
    }

    /// Returns the symbol key whose US-layout base character is `c`.
    pub fn from_punctuation(c: char) -> Option<Self> {
        use VirtualKey::*;
        Some(match c {
            '-' => Minus,
            '=' => Equal,
            '[' => BracketLeft,
            ']' => BracketRight,
            ';' => Semicolon,
            '\'' => Quote,
            '\\' => Backslash,
            ',' => Comma,
            '.' => Period,
            '/' => Slash,
            '`' => Grave,
            '§' => Section,
            _ => return None,
        })
    }

    /// Numeric code of this key on the build target's platform family.
    ///
    /// Returns `None` when the key has no encoding on that family or when the
    /// family is [`PlatformFamily::Unsupported`].
    pub fn native_code(self) -> Option<u32> {
        PlatformFamily::CURRENT.native_code(self)
    }
}

impl PlatformFamily {
    /// Looks `key` up in this family's symbolic-to-native table.
    pub fn native_code(self, key: VirtualKey) -> Option<u32> {
        match self {
            PlatformFamily::X11 => x11::to_keysym(key),
            PlatformFamily::Win32 => win32::to_vk(key).map(u32::from),
            PlatformFamily::Carbon => carbon::to_keycode(key).map(u32::from),
            PlatformFamily::Unsupported => None,
        }
    }

    /// Looks a native code up in this family's native-to-symbolic table.
    pub fn virtual_key(self, code: u32) -> Option<VirtualKey> {
        match self {
            PlatformFamily::X11 => x11::from_keysym(code),
            PlatformFamily::Win32 => u8::try_from(code).ok().and_then(win32::from_vk),
            PlatformFamily::Carbon => u16::try_from(code).ok().and_then(carbon::from_keycode),
            PlatformFamily::Unsupported => None,
        }
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for VirtualKey {
    type Err = ParseKeyError;

    /// Parses a canonical name (`"ShiftLeft"`), an alias (`"Ctrl"`,
    /// `"Enter"`, `"Shift_L"`) or a bare digit (`"7"`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s.trim());
        if wanted.is_empty() {
            return Err(ParseKeyError::UnknownKey(s.to_string()));
        }
        if let Some(&key) = Self::ALL.iter().find(|k| normalize(k.name()) == wanted) {
            return Ok(key);
        }
        ALIAS_NAMES
            .iter()
            .find(|(alias, _)| *alias == wanted)
            .map(|&(_, key)| key)
            .ok_or_else(|| ParseKeyError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_equal_their_canonical_variant() {
        assert_eq!(VirtualKey::Enter, VirtualKey::Return);
        assert_eq!(VirtualKey::Shift, VirtualKey::ShiftLeft);
        assert_eq!(VirtualKey::Ctrl, VirtualKey::ControlLeft);
        assert_eq!(VirtualKey::Control, VirtualKey::ControlLeft);
        assert_eq!(VirtualKey::Cmd, VirtualKey::SuperLeft);
        assert_eq!(VirtualKey::Win, VirtualKey::SuperLeft);
        assert_eq!(VirtualKey::Option, VirtualKey::AltLeft);
        assert_eq!(VirtualKey::Fn, VirtualKey::Function);
        assert_eq!(VirtualKey::Esc, VirtualKey::Escape);
        assert_eq!(VirtualKey::Del, VirtualKey::Delete);
    }

    #[test]
    fn test_all_is_in_declaration_order_without_duplicates() {
        for pair in VirtualKey::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{:?} must sort before {:?}", pair[0], pair[1]);
        }
        assert_eq!(VirtualKey::ALL.last(), Some(&VirtualKey::Mute));
        for (index, &key) in VirtualKey::ALL.iter().enumerate() {
            assert_eq!(key as usize, index, "{key:?}");
        }
    }

    #[test]
    fn test_from_punctuation_maps_us_symbols() {
        for (c, key) in [(',', VirtualKey::Comma), ('§', VirtualKey::Section), ('\\', VirtualKey::Backslash)] {
            assert_eq!(VirtualKey::from_punctuation(c), Some(key));
        }
        assert_eq!(VirtualKey::from_punctuation('a'), None);
        assert_eq!(VirtualKey::from_punctuation(' '), None);
    }

    #[test]
    fn test_modifiers_sort_before_every_other_key() {
        let last_modifier = VirtualKey::ALL
            .iter()
            .rposition(|key| key.is_modifier())
            .unwrap();
        let first_other = VirtualKey::ALL
            .iter()
            .position(|key| !key.is_modifier())
            .unwrap();

        assert!(last_modifier < first_other);
        assert!(VirtualKey::Ctrl < VirtualKey::Shift);
        assert!(VirtualKey::Shift < VirtualKey::A);
    }

    #[test]
    fn test_letter_and_digit_helpers() {
        assert_eq!(VirtualKey::A.letter(), Some('A'));
        assert_eq!(VirtualKey::Z.letter(), Some('Z'));
        assert_eq!(VirtualKey::Key0.digit(), Some('0'));
        assert_eq!(VirtualKey::Key9.digit(), Some('9'));
        assert_eq!(VirtualKey::Num3.digit(), None);
        assert_eq!(VirtualKey::from_letter('q'), Some(VirtualKey::Q));
        assert_eq!(VirtualKey::from_digit('4'), Some(VirtualKey::Key4));
        assert_eq!(VirtualKey::from_letter('1'), None);
    }

    #[test]
    fn test_modifier_classification() {
        for key in [VirtualKey::Shift, VirtualKey::AltRight, VirtualKey::Cmd, VirtualKey::Fn] {
            assert!(key.is_modifier(), "{key:?} should be a modifier");
        }
        for key in [VirtualKey::A, VirtualKey::CapsLock, VirtualKey::Return, VirtualKey::F1] {
            assert!(!key.is_modifier(), "{key:?} should NOT be a modifier");
        }
    }

    #[test]
    fn test_layout_dependent_keys() {
        assert!(VirtualKey::Q.is_layout_dependent());
        assert!(VirtualKey::Key2.is_layout_dependent());
        assert!(VirtualKey::Semicolon.is_layout_dependent());
        assert!(!VirtualKey::Num2.is_layout_dependent());
        assert!(!VirtualKey::F2.is_layout_dependent());
    }

    #[test]
    fn test_parse_canonical_alias_and_underscore_names() {
        assert_eq!("ShiftLeft".parse(), Ok(VirtualKey::ShiftLeft));
        assert_eq!("shift_l".parse(), Ok(VirtualKey::ShiftLeft));
        assert_eq!("Control_R".parse(), Ok(VirtualKey::ControlRight));
        assert_eq!("ctrl".parse(), Ok(VirtualKey::ControlLeft));
        assert_eq!("Enter".parse(), Ok(VirtualKey::Return));
        assert_eq!("Num_3".parse(), Ok(VirtualKey::Num3));
        assert_eq!(" f5 ".parse(), Ok(VirtualKey::F5));
        assert_eq!("7".parse(), Ok(VirtualKey::Key7));
    }

    #[test]
    fn test_parse_unknown_name_fails() {
        assert_eq!(
            "Hyper".parse::<VirtualKey>(),
            Err(ParseKeyError::UnknownKey("Hyper".to_string()))
        );
        assert!("".parse::<VirtualKey>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for &key in VirtualKey::ALL {
            assert_eq!(key.to_string().parse(), Ok(key), "{key:?}");
        }
    }

    #[test]
    fn test_unsupported_family_has_no_codes() {
        assert_eq!(PlatformFamily::Unsupported.native_code(VirtualKey::A), None);
        assert_eq!(PlatformFamily::Unsupported.virtual_key(0x41), None);
    }

    #[test]
    fn test_every_family_maps_core_keys() {
        for family in [PlatformFamily::X11, PlatformFamily::Win32, PlatformFamily::Carbon] {
            for key in [VirtualKey::A, VirtualKey::Key1, VirtualKey::Space, VirtualKey::Return,
                        VirtualKey::ShiftLeft, VirtualKey::F12, VirtualKey::Left, VirtualKey::Num9] {
                assert!(family.native_code(key).is_some(), "{family}: {key:?} unmapped");
            }
        }
    }

    #[test]
    fn test_family_reverse_lookup_matches_forward_table() {
        for family in [PlatformFamily::X11, PlatformFamily::Win32, PlatformFamily::Carbon] {
            for &key in VirtualKey::ALL {
                if let Some(code) = family.native_code(key) {
                    assert_eq!(family.virtual_key(code), Some(key), "{family}: {key:?}");
                }
            }
        }
    }
}

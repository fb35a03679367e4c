//! Virtual key to X11 KeySym table (Linux).
//!
//! KeySym values are defined in `X11/keysymdef.h` and, for the media keys,
//! `X11/XF86keysym.h`.
//! Reference: https://gitlab.freedesktop.org/xorg/proto/xorgproto/-/blob/master/include/X11/keysymdef.h
//!
//! # Upper-case letter KeySyms
//!
//! Letters map to their *upper-case* KeySym (`XK_A` = 0x41).  The backend
//! never injects KeySyms directly: it resolves each KeySym to a physical
//! keycode with `XKeysymToKeycode`, and both `XK_a` and `XK_A` resolve to the
//! same keycode.  In the other direction the server reports the level-0
//! (lower-case) KeySym for a letter key, so [`from_keysym`] folds `XK_a` …
//! `XK_z` back onto `A` … `Z`.

use super::VirtualKey;

/// Translates a [`VirtualKey`] to an X11 KeySym value.
///
/// Returns `None` for keys with no X11 equivalent (`Function`).
pub fn to_keysym(key: VirtualKey) -> Option<u32> {
    if let Some(c) = key.letter().or_else(|| key.digit()) {
        return Some(c as u32); // XK_A..XK_Z, XK_0..XK_9
    }
    match key {
        VirtualKey::Space => Some(0x0020),        // XK_space
        VirtualKey::Minus => Some(0x002D),        // XK_minus
        VirtualKey::Equal => Some(0x003D),        // XK_equal
        VirtualKey::BracketLeft => Some(0x005B),  // XK_bracketleft
        VirtualKey::BracketRight => Some(0x005D), // XK_bracketright
        VirtualKey::Semicolon => Some(0x003B),    // XK_semicolon
        VirtualKey::Quote => Some(0x0027),        // XK_apostrophe
        VirtualKey::Backslash => Some(0x005C),    // XK_backslash
        VirtualKey::Comma => Some(0x002C),        // XK_comma
        VirtualKey::Period => Some(0x002E),       // XK_period
        VirtualKey::Slash => Some(0x002F),        // XK_slash
        VirtualKey::Grave => Some(0x0060),        // XK_grave
        VirtualKey::Section => Some(0x00A7),      // XK_section

        // Modifiers
        VirtualKey::ShiftLeft => Some(0xFFE1),    // XK_Shift_L
        VirtualKey::ShiftRight => Some(0xFFE2),   // XK_Shift_R
        VirtualKey::ControlLeft => Some(0xFFE3),  // XK_Control_L
        VirtualKey::ControlRight => Some(0xFFE4), // XK_Control_R
        VirtualKey::CapsLock => Some(0xFFE5),     // XK_Caps_Lock
        VirtualKey::AltLeft => Some(0xFFE9),      // XK_Alt_L
        VirtualKey::AltRight => Some(0xFFEA),     // XK_Alt_R
        VirtualKey::SuperLeft => Some(0xFFEB),    // XK_Super_L
        VirtualKey::SuperRight => Some(0xFFEC),   // XK_Super_R
        VirtualKey::Function => None,

        // TTY function keys
        VirtualKey::Backspace => Some(0xFF08), // XK_BackSpace
        VirtualKey::Tab => Some(0xFF09),       // XK_Tab
        VirtualKey::Return => Some(0xFF0D),    // XK_Return
        VirtualKey::Escape => Some(0xFF1B),    // XK_Escape
        VirtualKey::Delete => Some(0xFFFF),    // XK_Delete

        // Function keys (XK_F1 = 0xFFBE … XK_F12 = 0xFFC9)
        VirtualKey::F1 => Some(0xFFBE),
        VirtualKey::F2 => Some(0xFFBF),
        VirtualKey::F3 => Some(0xFFC0),
        VirtualKey::F4 => Some(0xFFC1),
        VirtualKey::F5 => Some(0xFFC2),
        VirtualKey::F6 => Some(0xFFC3),
        VirtualKey::F7 => Some(0xFFC4),
        VirtualKey::F8 => Some(0xFFC5),
        VirtualKey::F9 => Some(0xFFC6),
        VirtualKey::F10 => Some(0xFFC7),
        VirtualKey::F11 => Some(0xFFC8),
        VirtualKey::F12 => Some(0xFFC9),

        VirtualKey::Left => Some(0xFF51),  // XK_Left
        VirtualKey::Up => Some(0xFF52),    // XK_Up
        VirtualKey::Right => Some(0xFF53), // XK_Right
        VirtualKey::Down => Some(0xFF54),  // XK_Down

        VirtualKey::Insert => Some(0xFF63),   // XK_Insert
        VirtualKey::Home => Some(0xFF50),     // XK_Home
        VirtualKey::End => Some(0xFF57),      // XK_End
        VirtualKey::PageUp => Some(0xFF55),   // XK_Page_Up
        VirtualKey::PageDown => Some(0xFF56), // XK_Page_Down
        VirtualKey::Help => Some(0xFF6A),     // XK_Help

        // Numpad (XK_KP_0 = 0xFFB0 … XK_KP_9 = 0xFFB9)
        VirtualKey::Num0 => Some(0xFFB0),
        VirtualKey::Num1 => Some(0xFFB1),
        VirtualKey::Num2 => Some(0xFFB2),
        VirtualKey::Num3 => Some(0xFFB3),
        VirtualKey::Num4 => Some(0xFFB4),
        VirtualKey::Num5 => Some(0xFFB5),
        VirtualKey::Num6 => Some(0xFFB6),
        VirtualKey::Num7 => Some(0xFFB7),
        VirtualKey::Num8 => Some(0xFFB8),
        VirtualKey::Num9 => Some(0xFFB9),
        VirtualKey::NumDecimal => Some(0xFFAE),  // XK_KP_Decimal
        VirtualKey::NumMultiply => Some(0xFFAA), // XK_KP_Multiply
        VirtualKey::NumPlus => Some(0xFFAB),     // XK_KP_Add
        VirtualKey::NumMinus => Some(0xFFAD),    // XK_KP_Subtract
        VirtualKey::NumDivide => Some(0xFFAF),   // XK_KP_Divide
        VirtualKey::NumEquals => Some(0xFFBD),   // XK_KP_Equal
        VirtualKey::NumClear => Some(0xFF0B),    // XK_Clear
        VirtualKey::NumEnter => Some(0xFF8D),    // XK_KP_Enter

        VirtualKey::VolumeUp => Some(0x1008_FF13),   // XF86XK_AudioRaiseVolume
        VirtualKey::VolumeDown => Some(0x1008_FF11), // XF86XK_AudioLowerVolume
        VirtualKey::Mute => Some(0x1008_FF12),       // XF86XK_AudioMute

        // Letters and digits are handled above.
        _ => None,
    }
}

/// Translates an X11 KeySym back to a [`VirtualKey`].
///
/// Lower-case latin KeySyms (`XK_a` … `XK_z`) fold onto the letter keys.
/// Returns `None` for KeySyms outside the table.
pub fn from_keysym(keysym: u32) -> Option<VirtualKey> {
    let keysym = match keysym {
        0x61..=0x7A => keysym - 0x20,
        other => other,
    };
    VirtualKey::ALL
        .iter()
        .copied()
        .find(|&key| to_keysym(key) == Some(keysym))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_and_digit_keysyms_are_ascii() {
        assert_eq!(to_keysym(VirtualKey::A), Some(0x41));
        assert_eq!(to_keysym(VirtualKey::Z), Some(0x5A));
        assert_eq!(to_keysym(VirtualKey::Key0), Some(0x30));
        assert_eq!(to_keysym(VirtualKey::Key9), Some(0x39));
        assert_eq!(to_keysym(VirtualKey::Space), Some(0x20));
    }

    #[test]
    fn test_modifier_keysyms() {
        assert_eq!(to_keysym(VirtualKey::Shift), Some(0xFFE1));
        assert_eq!(to_keysym(VirtualKey::ShiftRight), Some(0xFFE2));
        assert_eq!(to_keysym(VirtualKey::Ctrl), Some(0xFFE3));
        assert_eq!(to_keysym(VirtualKey::Caps), Some(0xFFE5));
        assert_eq!(to_keysym(VirtualKey::Alt), Some(0xFFE9));
        assert_eq!(to_keysym(VirtualKey::Super), Some(0xFFEB));
        assert_eq!(to_keysym(VirtualKey::SuperRight), Some(0xFFEC));
    }

    #[test]
    fn test_tty_and_function_keysyms() {
        assert_eq!(to_keysym(VirtualKey::Backspace), Some(0xFF08));
        assert_eq!(to_keysym(VirtualKey::Enter), Some(0xFF0D));
        assert_eq!(to_keysym(VirtualKey::Esc), Some(0xFF1B));
        assert_eq!(to_keysym(VirtualKey::Del), Some(0xFFFF));
        assert_eq!(to_keysym(VirtualKey::F1), Some(0xFFBE));
        assert_eq!(to_keysym(VirtualKey::F12), Some(0xFFC9));
    }

    #[test]
    fn test_arrow_and_numpad_keysyms() {
        assert_eq!(to_keysym(VirtualKey::Left), Some(0xFF51));
        assert_eq!(to_keysym(VirtualKey::Down), Some(0xFF54));
        assert_eq!(to_keysym(VirtualKey::Num0), Some(0xFFB0));
        assert_eq!(to_keysym(VirtualKey::Num9), Some(0xFFB9));
    }

    #[test]
    fn test_function_key_has_no_x11_keysym() {
        assert_eq!(to_keysym(VirtualKey::Function), None);
    }

    #[test]
    fn test_lowercase_letter_keysyms_fold_to_letter_keys() {
        assert_eq!(from_keysym(0x61), Some(VirtualKey::A)); // XK_a
        assert_eq!(from_keysym(0x7A), Some(VirtualKey::Z)); // XK_z
        assert_eq!(from_keysym(0x41), Some(VirtualKey::A)); // XK_A
    }

    #[test]
    fn test_unknown_keysym_returns_none() {
        assert_eq!(from_keysym(0xFE03), None); // XK_ISO_Level3_Shift
        assert_eq!(from_keysym(0), None);
    }

    #[test]
    fn test_keysyms_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for &key in VirtualKey::ALL {
            if let Some(sym) = to_keysym(key) {
                assert!(seen.insert(sym), "keysym 0x{sym:X} mapped twice");
            }
        }
    }
}

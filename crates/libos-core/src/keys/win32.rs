//! Windows Virtual-Key (VK) code table.
//!
//! Reference: Windows Virtual-Key Codes (`winuser.h`).
//! VK codes range from 0x00 to 0xFF.
//!
//! # How this table works
//!
//! `VK_TABLE` is a compile-time array of 256 `Option<VirtualKey>` values,
//! indexed by VK code.  Position 0x41 holds `Some(VirtualKey::A)` because
//! `VK_A` is 0x41.  Codes without a virtual key (mouse buttons, the generic
//! `VK_SHIFT`/`VK_CONTROL`/`VK_MENU`, browser keys) store `None`, which is
//! exactly what a full `GetAsyncKeyState` scan needs to skip.

use super::VirtualKey;

/// Translates a Windows VK code to a [`VirtualKey`].
///
/// Returns `None` for VK codes outside the table.
pub fn from_vk(vk: u8) -> Option<VirtualKey> {
    VK_TABLE[vk as usize]
}

/// Translates a [`VirtualKey`] to a Windows VK code.
///
/// Returns `None` for keys with no Windows equivalent (`Function`,
/// `Section`, `NumEquals`, `NumEnter`).
pub fn to_vk(key: VirtualKey) -> Option<u8> {
    // Linear scan over 256 entries; the symbolic-to-native direction is only
    // taken once per key per native batch.
    VK_TABLE
        .iter()
        .position(|&mapped| mapped == Some(key))
        .map(|vk| vk as u8)
}

/// Complete VK → virtual key table indexed by VK code (0x00–0xFF).
///
/// Reference: https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes
const VK_TABLE: [Option<VirtualKey>; 256] = {
    use VirtualKey::*;
    let mut t: [Option<VirtualKey>; 256] = [None; 256];

    // ── TTY keys ─────────────────────────────────────────────────────────────
    t[0x08] = Some(Backspace); // VK_BACK
    t[0x09] = Some(Tab); // VK_TAB
    t[0x0C] = Some(NumClear); // VK_CLEAR
    t[0x0D] = Some(Return); // VK_RETURN
    t[0x14] = Some(CapsLock); // VK_CAPITAL
    t[0x1B] = Some(Escape); // VK_ESCAPE
    t[0x20] = Some(Space); // VK_SPACE

    // ── Navigation ───────────────────────────────────────────────────────────
    t[0x21] = Some(PageUp); // VK_PRIOR
    t[0x22] = Some(PageDown); // VK_NEXT
    t[0x23] = Some(End);
    t[0x24] = Some(Home);
    t[0x25] = Some(Left);
    t[0x26] = Some(Up);
    t[0x27] = Some(Right);
    t[0x28] = Some(Down);
    t[0x2D] = Some(Insert);
    t[0x2E] = Some(Delete);
    t[0x2F] = Some(Help);

    // ── Digits (VK_0=0x30 … VK_9=0x39) ───────────────────────────────────────
    t[0x30] = Some(Key0);
    t[0x31] = Some(Key1);
    t[0x32] = Some(Key2);
    t[0x33] = Some(Key3);
    t[0x34] = Some(Key4);
    t[0x35] = Some(Key5);
    t[0x36] = Some(Key6);
    t[0x37] = Some(Key7);
    t[0x38] = Some(Key8);
    t[0x39] = Some(Key9);

    // ── Letters (VK_A=0x41 … VK_Z=0x5A) ──────────────────────────────────────
    t[0x41] = Some(A);
    t[0x42] = Some(B);
    t[0x43] = Some(C);
    t[0x44] = Some(D);
    t[0x45] = Some(E);
    t[0x46] = Some(F);
    t[0x47] = Some(G);
    t[0x48] = Some(H);
    t[0x49] = Some(I);
    t[0x4A] = Some(J);
    t[0x4B] = Some(K);
    t[0x4C] = Some(L);
    t[0x4D] = Some(M);
    t[0x4E] = Some(N);
    t[0x4F] = Some(O);
    t[0x50] = Some(P);
    t[0x51] = Some(Q);
    t[0x52] = Some(R);
    t[0x53] = Some(S);
    t[0x54] = Some(T);
    t[0x55] = Some(U);
    t[0x56] = Some(V);
    t[0x57] = Some(W);
    t[0x58] = Some(X);
    t[0x59] = Some(Y);
    t[0x5A] = Some(Z);

    t[0x5B] = Some(SuperLeft); // VK_LWIN
    t[0x5C] = Some(SuperRight); // VK_RWIN

    // ── Numpad ───────────────────────────────────────────────────────────────
    t[0x60] = Some(Num0);
    t[0x61] = Some(Num1);
    t[0x62] = Some(Num2);
    t[0x63] = Some(Num3);
    t[0x64] = Some(Num4);
    t[0x65] = Some(Num5);
    t[0x66] = Some(Num6);
    t[0x67] = Some(Num7);
    t[0x68] = Some(Num8);
    t[0x69] = Some(Num9);
    t[0x6A] = Some(NumMultiply);
    t[0x6B] = Some(NumPlus); // VK_ADD
    t[0x6D] = Some(NumMinus); // VK_SUBTRACT
    t[0x6E] = Some(NumDecimal);
    t[0x6F] = Some(NumDivide);

    // ── Function keys (VK_F1=0x70 … VK_F12=0x7B) ─────────────────────────────
    t[0x70] = Some(F1);
    t[0x71] = Some(F2);
    t[0x72] = Some(F3);
    t[0x73] = Some(F4);
    t[0x74] = Some(F5);
    t[0x75] = Some(F6);
    t[0x76] = Some(F7);
    t[0x77] = Some(F8);
    t[0x78] = Some(F9);
    t[0x79] = Some(F10);
    t[0x7A] = Some(F11);
    t[0x7B] = Some(F12);

    // ── Sided modifiers ──────────────────────────────────────────────────────
    t[0xA0] = Some(ShiftLeft);
    t[0xA1] = Some(ShiftRight);
    t[0xA2] = Some(ControlLeft);
    t[0xA3] = Some(ControlRight);
    t[0xA4] = Some(AltLeft); // VK_LMENU
    t[0xA5] = Some(AltRight); // VK_RMENU

    // ── Media ────────────────────────────────────────────────────────────────
    t[0xAD] = Some(Mute); // VK_VOLUME_MUTE
    t[0xAE] = Some(VolumeDown);
    t[0xAF] = Some(VolumeUp);

    // ── OEM punctuation (US layout positions) ────────────────────────────────
    t[0xBA] = Some(Semicolon); // VK_OEM_1
    t[0xBB] = Some(Equal); // VK_OEM_PLUS
    t[0xBC] = Some(Comma); // VK_OEM_COMMA
    t[0xBD] = Some(Minus); // VK_OEM_MINUS
    t[0xBE] = Some(Period); // VK_OEM_PERIOD
    t[0xBF] = Some(Slash); // VK_OEM_2
    t[0xC0] = Some(Grave); // VK_OEM_3
    t[0xDB] = Some(BracketLeft); // VK_OEM_4
    t[0xDC] = Some(Backslash); // VK_OEM_5
    t[0xDD] = Some(BracketRight); // VK_OEM_6
    t[0xDE] = Some(Quote); // VK_OEM_7

    t
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Known VK → virtual key pairs (from winuser.h).
    const STANDARD_MAPPINGS: &[(u8, VirtualKey)] = &[
        (0x41, VirtualKey::A),
        (0x5A, VirtualKey::Z),
        (0x30, VirtualKey::Key0),
        (0x20, VirtualKey::Space),
        (0xA0, VirtualKey::ShiftLeft),
        (0xA1, VirtualKey::ShiftRight),
        (0xA2, VirtualKey::ControlLeft),
        (0xA3, VirtualKey::ControlRight),
        (0x14, VirtualKey::CapsLock),
        (0xA4, VirtualKey::AltLeft),
        (0xA5, VirtualKey::AltRight),
        (0x5B, VirtualKey::SuperLeft),
        (0x5C, VirtualKey::SuperRight),
        (0x08, VirtualKey::Backspace),
        (0x09, VirtualKey::Tab),
        (0x0D, VirtualKey::Return),
        (0x1B, VirtualKey::Escape),
        (0x2E, VirtualKey::Delete),
        (0x70, VirtualKey::F1),
        (0x7B, VirtualKey::F12),
        (0x25, VirtualKey::Left),
        (0x26, VirtualKey::Up),
        (0x27, VirtualKey::Right),
        (0x28, VirtualKey::Down),
        (0x60, VirtualKey::Num0),
        (0x69, VirtualKey::Num9),
    ];

    #[test]
    fn test_all_standard_vk_codes_map_to_correct_key() {
        for &(vk, expected) in STANDARD_MAPPINGS {
            assert_eq!(from_vk(vk), Some(expected), "VK 0x{vk:02X} should map to {expected:?}");
            assert_eq!(to_vk(expected), Some(vk), "{expected:?} should map to VK 0x{vk:02X}");
        }
    }

    #[test]
    fn test_aliases_resolve_to_canonical_vk() {
        assert_eq!(to_vk(VirtualKey::Ctrl), Some(0xA2));
        assert_eq!(to_vk(VirtualKey::Win), Some(0x5B));
        assert_eq!(to_vk(VirtualKey::Enter), Some(0x0D));
    }

    #[test]
    fn test_generic_modifier_and_mouse_vks_have_no_key() {
        for vk in [0x01u8, 0x02, 0x04, 0x10, 0x11, 0x12] {
            assert_eq!(from_vk(vk), None, "VK 0x{vk:02X} must be skipped");
        }
    }

    #[test]
    fn test_keys_without_windows_equivalent() {
        assert_eq!(to_vk(VirtualKey::Function), None);
        assert_eq!(to_vk(VirtualKey::Section), None);
        assert_eq!(to_vk(VirtualKey::NumEquals), None);
    }

    #[test]
    fn test_from_vk_never_panics_for_any_u8() {
        for vk in 0u8..=255 {
            let _ = from_vk(vk);
        }
    }
}

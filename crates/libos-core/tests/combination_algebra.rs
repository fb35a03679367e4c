//! Integration tests for the key combination algebra and the alias
//! equivalences of every native table, through the public API only.

use libos_core::{extract_modifiers, KeyCombination, ModifierFlags, PlatformFamily, VirtualKey};

const FAMILIES: [PlatformFamily; 3] = [
    PlatformFamily::X11,
    PlatformFamily::Win32,
    PlatformFamily::Carbon,
];

#[test]
fn test_aliases_have_identical_codes_in_every_family() {
    let pairs = [
        (VirtualKey::Shift, VirtualKey::ShiftLeft),
        (VirtualKey::Control, VirtualKey::ControlLeft),
        (VirtualKey::Ctrl, VirtualKey::ControlLeft),
        (VirtualKey::Caps, VirtualKey::CapsLock),
        (VirtualKey::Alt, VirtualKey::AltLeft),
        (VirtualKey::Option, VirtualKey::AltLeft),
        (VirtualKey::Super, VirtualKey::SuperLeft),
        (VirtualKey::Win, VirtualKey::SuperLeft),
        (VirtualKey::Command, VirtualKey::SuperLeft),
        (VirtualKey::Cmd, VirtualKey::SuperLeft),
        (VirtualKey::Fn, VirtualKey::Function),
        (VirtualKey::Enter, VirtualKey::Return),
        (VirtualKey::Esc, VirtualKey::Escape),
        (VirtualKey::Del, VirtualKey::Delete),
    ];
    for family in FAMILIES {
        for (alias, canonical) in pairs {
            assert_eq!(
                family.native_code(alias),
                family.native_code(canonical),
                "{family}: {alias:?} vs {canonical:?}"
            );
        }
    }
}

#[test]
fn test_family_specific_gaps() {
    assert_eq!(PlatformFamily::X11.native_code(VirtualKey::Function), None);
    assert_eq!(PlatformFamily::Win32.native_code(VirtualKey::Function), None);
    assert_eq!(PlatformFamily::Carbon.native_code(VirtualKey::Function), Some(0x3F));
    assert_eq!(PlatformFamily::Carbon.native_code(VirtualKey::Backspace), None);
}

#[test]
fn test_native_code_matches_current_family() {
    for &key in VirtualKey::ALL {
        assert_eq!(key.native_code(), PlatformFamily::CURRENT.native_code(key));
    }
}

#[test]
fn test_idempotent_addition() {
    for &key in VirtualKey::ALL {
        assert_eq!(key + key, KeyCombination::from(key), "{key:?}");
    }
}

#[test]
fn test_addition_is_associative_and_commutative() {
    // Arrange
    let a = VirtualKey::Ctrl + VirtualKey::A;
    let b = KeyCombination::from(VirtualKey::Shift);
    let c = VirtualKey::A + VirtualKey::F4;

    // Act
    let left = (&a + &b) + &c;
    let right = &a + (&b + &c);
    let swapped = &c + &b + &a;

    // Assert
    assert_eq!(left, right);
    assert_eq!(left, swapped);
    assert_eq!(left.len(), 4);
}

#[test]
fn test_mixed_operand_forms() {
    let from_keys = VirtualKey::Ctrl + VirtualKey::Alt;
    let combo_plus_key = KeyCombination::from(VirtualKey::Ctrl) + VirtualKey::Alt;
    let key_plus_combo = VirtualKey::Ctrl + KeyCombination::from(VirtualKey::Alt);

    assert_eq!(from_keys, combo_plus_key);
    assert_eq!(from_keys, key_plus_combo);
}

#[test]
fn test_compound_assignment_mutates_receiver_only() {
    let mut chord = KeyCombination::from(VirtualKey::Cmd);
    let extra = VirtualKey::Shift + VirtualKey::Key4;

    chord += &extra;

    assert_eq!(chord.len(), 3);
    assert_eq!(extra.len(), 2);
}

#[test]
fn test_extract_modifiers_law() {
    let (flags, rest) = extract_modifiers(&(VirtualKey::A + VirtualKey::Shift));

    assert_eq!(flags, ModifierFlags::SHIFT);
    assert_eq!(rest, KeyCombination::from(VirtualKey::A));
}

#[test]
fn test_text_form_round_trip_for_parsed_hotkey() {
    let parsed: KeyCombination = "cmd+shift+4".parse().expect("valid combination");

    assert_eq!(parsed, VirtualKey::Cmd + VirtualKey::Shift + VirtualKey::Key4);
    assert_eq!(parsed.to_string(), "ShiftLeft+SuperLeft+Key4");
}

#[test]
fn test_combination_serializes_as_key_list() {
    let chord = VirtualKey::Ctrl + VirtualKey::C;

    let toml_text = toml::to_string(&Wrapper { chord: chord.clone() }).expect("serialize");
    let back: Wrapper = toml::from_str(&toml_text).expect("deserialize");

    assert_eq!(back.chord, chord);
    assert!(toml_text.contains("ControlLeft"));
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Wrapper {
    chord: KeyCombination,
}

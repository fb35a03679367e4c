//! USB HID Usage ID (page 0x07, Keyboard/Keypad) to macOS `kVK_*` table.
//!
//! IOKit reports keyboard elements by their HID usage; the Carbon backend
//! needs the `kVK_*` position to ask the active layout which character the
//! key produces.  Reference: USB HID Usage Tables 1.3, section 10.

/// HID usage page of keyboard/keypad elements.
pub const KEYBOARD_USAGE_PAGE: u32 = 0x07;

/// Translates a HID keyboard-page usage to a macOS `kVK_*` key code.
///
/// Returns `None` for usages without a Carbon key code (error roll-over
/// codes, `LANG` keys, vendor ranges).
pub fn hid_usage_to_carbon(usage: u32) -> Option<u16> {
    let keycode = match usage {
        // Letters
        0x04 => 0x00, // a  → kVK_ANSI_A
        0x05 => 0x0B, // b
        0x06 => 0x08, // c
        0x07 => 0x02, // d
        0x08 => 0x0E, // e
        0x09 => 0x03, // f
        0x0A => 0x05, // g
        0x0B => 0x04, // h
        0x0C => 0x22, // i
        0x0D => 0x26, // j
        0x0E => 0x28, // k
        0x0F => 0x25, // l
        0x10 => 0x2E, // m
        0x11 => 0x2D, // n
        0x12 => 0x1F, // o
        0x13 => 0x23, // p
        0x14 => 0x0C, // q
        0x15 => 0x0F, // r
        0x16 => 0x01, // s
        0x17 => 0x11, // t
        0x18 => 0x20, // u
        0x19 => 0x09, // v
        0x1A => 0x0D, // w
        0x1B => 0x07, // x
        0x1C => 0x10, // y
        0x1D => 0x06, // z

        // Digits 1..9, 0
        0x1E => 0x12,
        0x1F => 0x13,
        0x20 => 0x14,
        0x21 => 0x15,
        0x22 => 0x17,
        0x23 => 0x16,
        0x24 => 0x1A,
        0x25 => 0x1C,
        0x26 => 0x19,
        0x27 => 0x1D,

        0x28 => 0x24, // Return
        0x29 => 0x35, // Escape
        0x2A => 0x33, // Delete (backspace position)
        0x2B => 0x30, // Tab
        0x2C => 0x31, // Space
        0x2D => 0x1B, // -
        0x2E => 0x18, // =
        0x2F => 0x21, // [
        0x30 => 0x1E, // ]
        0x31 => 0x2A, // backslash
        0x32 => 0x2A, // non-US # shares the backslash position
        0x33 => 0x29, // ;
        0x34 => 0x27, // '
        0x35 => 0x32, // `
        0x36 => 0x2B, // ,
        0x37 => 0x2F, // .
        0x38 => 0x2C, // /
        0x39 => 0x39, // Caps Lock

        // F1..F12
        0x3A => 0x7A,
        0x3B => 0x78,
        0x3C => 0x63,
        0x3D => 0x76,
        0x3E => 0x60,
        0x3F => 0x61,
        0x40 => 0x62,
        0x41 => 0x64,
        0x42 => 0x65,
        0x43 => 0x6D,
        0x44 => 0x67,
        0x45 => 0x6F,

        0x49 => 0x72, // Insert position is Help on Apple keyboards
        0x4A => 0x73, // Home
        0x4B => 0x74, // Page Up
        0x4C => 0x75, // Forward Delete
        0x4D => 0x77, // End
        0x4E => 0x79, // Page Down
        0x4F => 0x7C, // Right
        0x50 => 0x7B, // Left
        0x51 => 0x7D, // Down
        0x52 => 0x7E, // Up

        // Keypad
        0x53 => 0x47, // Num Lock / Clear
        0x54 => 0x4B, // /
        0x55 => 0x43, // *
        0x56 => 0x4E, // -
        0x57 => 0x45, // +
        0x58 => 0x4C, // Enter
        0x59 => 0x53, // 1
        0x5A => 0x54,
        0x5B => 0x55,
        0x5C => 0x56,
        0x5D => 0x57,
        0x5E => 0x58,
        0x5F => 0x59, // 7
        0x60 => 0x5B, // 8
        0x61 => 0x5C, // 9
        0x62 => 0x52, // 0
        0x63 => 0x41, // .
        0x64 => 0x0A, // non-US backslash → ISO section
        0x67 => 0x51, // =

        0x75 => 0x72, // Help
        0x7F => 0x4A, // Mute
        0x80 => 0x48, // Volume Up
        0x81 => 0x49, // Volume Down

        // Modifiers
        0xE0 => 0x3B, // Left Control
        0xE1 => 0x38, // Left Shift
        0xE2 => 0x3A, // Left Alt / Option
        0xE3 => 0x37, // Left GUI / Command
        0xE4 => 0x3E, // Right Control
        0xE5 => 0x3C, // Right Shift
        0xE6 => 0x3D, // Right Alt / Option
        0xE7 => 0x36, // Right GUI / Command

        _ => return None,
    };
    Some(keycode)
}

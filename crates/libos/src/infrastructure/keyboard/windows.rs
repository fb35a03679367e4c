//! Windows keyboard provider via `GetAsyncKeyState` and `SendInput`.
//!
//! Translates virtual keys to Windows Virtual-Key codes and injects one
//! batched `SendInput` call per press/release.  No session is needed: both
//! APIs work against the calling thread's desktop.

use libos_core::keys::win32;
use libos_core::{KeyCombination, PlatformFamily};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, VIRTUAL_KEY,
};

use crate::application::diagnostics::{Diagnostic, DiagnosticHook};
use crate::application::keyboard::{KeyboardError, KeyboardProvider};
use crate::config::KeyboardConfig;

/// Most significant bit of `GetAsyncKeyState`: the key is down right now.
const KEY_DOWN_BIT: u16 = 0x8000;

/// VK codes that live on the extended part of the keyboard and need
/// `KEYEVENTF_EXTENDEDKEY` to be told apart from their numpad twins.
const EXTENDED_VKS: &[u8] = &[
    0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, // nav
    0x2D, 0x2E, // Insert, Delete
    0x5B, 0x5C, // Win keys
    0x6F, // Numpad divide
    0xA3, 0xA5, // Right Ctrl, Right Alt
];

/// Windows implementation of [`KeyboardProvider`].
pub struct WindowsKeyboard {
    hook: DiagnosticHook,
}

impl WindowsKeyboard {
    pub fn new(_config: &KeyboardConfig, hook: DiagnosticHook) -> Self {
        Self { hook }
    }

    fn send(&self, keys: &KeyCombination, key_up: bool) {
        let inputs: Vec<INPUT> = keys
            .iter()
            .filter_map(|key| {
                let vk = win32::to_vk(key);
                if vk.is_none() {
                    (self.hook)(&Diagnostic::UnmappedKey {
                        key,
                        family: PlatformFamily::Win32,
                    });
                }
                vk
            })
            .map(|vk| keyboard_input(vk, key_up))
            .collect();
        if inputs.is_empty() {
            return;
        }

        // SAFETY: `inputs` is a valid slice of keyboard INPUT structures and
        // the size argument matches the element type.
        let injected = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };
        tracing::debug!(%keys, key_up, requested = inputs.len(), injected, "SendInput");
        if (injected as usize) < inputs.len() {
            (self.hook)(&Diagnostic::PartialInjection {
                requested: inputs.len(),
                injected: injected as usize,
            });
        }
    }
}

impl KeyboardProvider for WindowsKeyboard {
    fn is_pressed(&self, keys: &KeyCombination) -> Result<bool, KeyboardError> {
        Ok(keys
            .iter()
            .all(|key| win32::to_vk(key).is_some_and(is_vk_down)))
    }

    fn pressed_keys(&self) -> Result<KeyCombination, KeyboardError> {
        Ok((0..=255u8)
            .filter_map(|vk| win32::from_vk(vk).filter(|_| is_vk_down(vk)))
            .collect())
    }

    fn press(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.send(keys, false);
        Ok(())
    }

    fn release(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.send(keys, true);
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn is_vk_down(vk: u8) -> bool {
    // SAFETY: GetAsyncKeyState accepts any VK code and has no preconditions.
    let state = unsafe { GetAsyncKeyState(i32::from(vk)) };
    state as u16 & KEY_DOWN_BIT != 0
}

fn keyboard_input(vk: u8, key_up: bool) -> INPUT {
    let mut flags = KEYBD_EVENT_FLAGS(0);
    if key_up {
        flags |= KEYEVENTF_KEYUP;
    }
    if EXTENDED_VKS.contains(&vk) {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(u16::from(vk)),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_input_flags() {
        // SAFETY: reading the `ki` union member of an INPUT_KEYBOARD input.
        let down = unsafe { keyboard_input(0x41, false).Anonymous.ki };
        let up = unsafe { keyboard_input(0x41, true).Anonymous.ki };
        let arrow = unsafe { keyboard_input(0x25, false).Anonymous.ki };

        assert_eq!(down.wVk, VIRTUAL_KEY(0x41));
        assert_eq!(down.dwFlags, KEYBD_EVENT_FLAGS(0));
        assert_eq!(up.dwFlags, KEYEVENTF_KEYUP);
        assert_eq!(arrow.dwFlags, KEYEVENTF_EXTENDEDKEY);
    }

    #[test]
    fn test_empty_combination_is_pressed() {
        let keyboard = WindowsKeyboard::new(
            &KeyboardConfig::default(),
            crate::application::diagnostics::tracing_hook(),
        );
        assert_eq!(keyboard.is_pressed(&KeyCombination::new()), Ok(true));
    }
}

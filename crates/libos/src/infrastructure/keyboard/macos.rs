//! macOS keyboard provider: CoreGraphics events out, IOKit HID state in.
//!
//! # Injection
//!
//! 1. [`extract_modifiers`] folds Shift/Control/Option/Command/Fn out of the
//!    combination into a `CGEventFlags` mask.
//! 2. `CGEventSource::new(HIDSystemState)` gives the events a source.
//! 3. For every remaining key, `CGEvent::new_keyboard_event(source, kVK,
//!    down)` + `set_flags(mask)` + `post(CGEventTapLocation::HID)`.
//!
//! A combination made only of modifiers therefore posts nothing.
//!
//! # Queries
//!
//! Key state is read from the HID elements of every attached keyboard
//! through [`HidElementCache`], built on first query.
//!
//! # Permissions
//!
//! Posting requires Accessibility access and reading HID values requires
//! Input Monitoring access (System Settings → Privacy & Security).  Without
//! them the cache stays empty and a diagnostic is reported once.

use std::sync::OnceLock;

use core_graphics::event::{CGEvent, CGEventFlags, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use libos_core::keys::carbon::{self, extract_modifiers};
use libos_core::{KeyCombination, PlatformFamily};

use super::hid_cache::HidElementCache;
use crate::application::diagnostics::{Diagnostic, DiagnosticHook};
use crate::application::keyboard::{KeyboardError, KeyboardProvider};
use crate::config::KeyboardConfig;

/// macOS implementation of [`KeyboardProvider`].
pub struct MacosKeyboard {
    cache: OnceLock<HidElementCache>,
    hook: DiagnosticHook,
}

impl MacosKeyboard {
    pub fn new(_config: &KeyboardConfig, hook: DiagnosticHook) -> Self {
        Self {
            cache: OnceLock::new(),
            hook,
        }
    }

    fn cache(&self) -> &HidElementCache {
        self.cache.get_or_init(|| HidElementCache::build(&self.hook))
    }

    fn post(&self, keys: &KeyCombination, key_down: bool) {
        let (flags, keys) = extract_modifiers(keys);
        if keys.is_empty() {
            return;
        }
        let Ok(source) = CGEventSource::new(CGEventSourceStateID::HIDSystemState) else {
            (self.hook)(&Diagnostic::EventSourceUnavailable);
            return;
        };
        let cg_flags = CGEventFlags::from_bits_truncate(flags.bits());
        tracing::debug!(%keys, %flags, key_down, "posting CG keyboard events");

        for key in &keys {
            let Some(keycode) = carbon::to_keycode(key) else {
                (self.hook)(&Diagnostic::UnmappedKey {
                    key,
                    family: PlatformFamily::Carbon,
                });
                continue;
            };
            match CGEvent::new_keyboard_event(source.clone(), keycode, key_down) {
                Ok(event) => {
                    event.set_flags(cg_flags);
                    event.post(CGEventTapLocation::HID);
                }
                Err(()) => tracing::debug!(%key, "CGEventCreateKeyboardEvent failed"),
            }
        }
    }
}

impl KeyboardProvider for MacosKeyboard {
    fn is_pressed(&self, keys: &KeyCombination) -> Result<bool, KeyboardError> {
        if keys.is_empty() {
            return Ok(true);
        }
        let cache = self.cache();
        Ok(keys.iter().all(|key| cache.is_held(key)))
    }

    fn pressed_keys(&self) -> Result<KeyCombination, KeyboardError> {
        Ok(self.cache().held_keys())
    }

    fn press(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.post(keys, true);
        Ok(())
    }

    fn release(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.post(keys, false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libos_core::VirtualKey;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_modifier_only_and_empty_combinations_post_nothing() {
        // Arrange
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let keyboard = MacosKeyboard::new(
            &KeyboardConfig::default(),
            Arc::new(move |d: &Diagnostic| sink.lock().unwrap().push(d.clone())),
        );

        // Act
        keyboard.press(&(VirtualKey::Cmd + VirtualKey::Shift)).unwrap();
        keyboard.release(&KeyCombination::new()).unwrap();
        let empty = keyboard.is_pressed(&KeyCombination::new());

        // Assert – nothing reached CoreGraphics or IOKit
        assert_eq!(empty, Ok(true));
        assert!(keyboard.cache.get().is_none());
        assert!(seen.lock().unwrap().is_empty());
    }
}

//! Linux X11 keyboard provider via `XQueryKeymap` and the XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! events as if the user had physically pressed the keys.  These events are
//! delivered to the focused window exactly like real input.  The call is
//! `XTestFakeKeyEvent(display, keycode, is_press, time)`.
//!
//! # Key code translation
//!
//! ```text
//! VirtualKey → X11 KeySym (table) → XKeysymToKeycode → X11 keycode
//! ```
//!
//! The keycode half is resolved once per connection by [`X11Session`].
//!
//! # Permissions
//!
//! The process needs access to the X display, which is normally satisfied
//! inside the user's session.  If `DISPLAY` is unset or the server refuses the
//! connection, the provider degrades: queries report nothing pressed and
//! injections are dropped, with one `SessionUnavailable` diagnostic.

use std::sync::OnceLock;

use libos_core::{KeyCombination, PlatformFamily, VirtualKey};

use super::x11_session::{held_keycodes, is_keycode_held, X11Session};
use crate::application::diagnostics::{Diagnostic, DiagnosticHook};
use crate::application::keyboard::{KeyboardError, KeyboardProvider};
use crate::config::KeyboardConfig;

/// Linux X11/XTest keyboard provider.
///
/// The X connection is opened on first use and kept for the provider's
/// lifetime.
pub struct LinuxKeyboard {
    display_name: Option<String>,
    session: OnceLock<Option<X11Session>>,
    hook: DiagnosticHook,
}

impl LinuxKeyboard {
    pub fn new(config: &KeyboardConfig, hook: DiagnosticHook) -> Self {
        Self {
            display_name: config.x11_display.clone(),
            session: OnceLock::new(),
            hook,
        }
    }

    fn session(&self) -> Option<&X11Session> {
        self.session
            .get_or_init(|| match X11Session::open(self.display_name.as_deref()) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::debug!(error = %e, "X11 session unavailable");
                    (self.hook)(&Diagnostic::SessionUnavailable {
                        display: self.display_name.clone(),
                    });
                    None
                }
            })
            .as_ref()
    }

    /// Resolves keycodes for `keys`, reporting and skipping unmapped ones.
    fn keycodes(&self, session: &X11Session, keys: &KeyCombination) -> Vec<u8> {
        keys.iter()
            .filter_map(|key| {
                let code = session.keycode(key);
                if code.is_none() {
                    self.report_unmapped(key);
                }
                code
            })
            .collect()
    }

    fn report_unmapped(&self, key: VirtualKey) {
        (self.hook)(&Diagnostic::UnmappedKey {
            key,
            family: PlatformFamily::X11,
        });
    }

    fn send(&self, keys: &KeyCombination, is_press: bool) {
        if keys.is_empty() {
            return;
        }
        let Some(session) = self.session() else {
            return;
        };
        let codes = self.keycodes(session, keys);
        if codes.is_empty() {
            return;
        }
        tracing::debug!(%keys, is_press, events = codes.len(), "XTest key events");
        session.fake_key_events(&codes, is_press);
    }
}

impl KeyboardProvider for LinuxKeyboard {
    fn is_pressed(&self, keys: &KeyCombination) -> Result<bool, KeyboardError> {
        if keys.is_empty() {
            return Ok(true);
        }
        let Some(session) = self.session() else {
            return Ok(false);
        };
        let keymap = session.query_keymap();
        Ok(keys.iter().all(|key| match session.keycode(key) {
            Some(code) => is_keycode_held(&keymap, code),
            None => {
                tracing::trace!(%key, "no X11 keycode, treated as not pressed");
                false
            }
        }))
    }

    fn pressed_keys(&self) -> Result<KeyCombination, KeyboardError> {
        let Some(session) = self.session() else {
            return Ok(KeyCombination::new());
        };
        let keymap = session.query_keymap();
        Ok(held_keycodes(&keymap)
            .filter_map(|code| session.virtual_key(code))
            .collect())
    }

    fn press(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.send(keys, true);
        Ok(())
    }

    fn release(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.send(keys, false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// A display name no X server will ever answer to.
    const DEAD_DISPLAY: &str = ":97";

    fn make_keyboard() -> (LinuxKeyboard, Arc<Mutex<Vec<Diagnostic>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let config = KeyboardConfig {
            x11_display: Some(DEAD_DISPLAY.to_string()),
        };
        let keyboard = LinuxKeyboard::new(
            &config,
            Arc::new(move |d: &Diagnostic| sink.lock().unwrap().push(d.clone())),
        );
        (keyboard, seen)
    }

    #[test]
    fn test_empty_combination_needs_no_session() {
        // Arrange
        let (keyboard, seen) = make_keyboard();

        // Act
        let pressed = keyboard.is_pressed(&KeyCombination::new());
        keyboard.press(&KeyCombination::new()).unwrap();

        // Assert – no connection attempt, hence no diagnostic
        assert_eq!(pressed, Ok(true));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unreachable_display_degrades_and_reports_once() {
        // Arrange
        let (keyboard, seen) = make_keyboard();
        let chord = VirtualKey::Ctrl + VirtualKey::A;

        // Act
        let pressed = keyboard.is_pressed(&chord);
        let all = keyboard.pressed_keys();
        let press = keyboard.press(&chord);
        let release = keyboard.release(&chord);

        // Assert
        assert_eq!(pressed, Ok(false));
        assert_eq!(all, Ok(KeyCombination::new()));
        assert_eq!(press, Ok(()));
        assert_eq!(release, Ok(()));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Diagnostic::SessionUnavailable {
                display: Some(DEAD_DISPLAY.to_string())
            }]
        );
    }
}

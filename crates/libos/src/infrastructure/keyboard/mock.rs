//! Mock keyboard provider for unit and integration testing.
//!
//! # Why a mock keyboard?
//!
//! The native providers make OS calls that:
//!
//! - Require a desktop session (an X server, a logged-in Windows or macOS
//!   user) to run.
//! - Actually press keys on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! `MockKeyboard` replaces all of that with in-memory state.  Every press and
//! release is pushed into a `Mutex<Vec<KeyEvent>>` so assertions can inspect
//! exactly what was emitted and in what order, and the "physically held" set
//! that `is_pressed`/`pressed_keys` read can be set directly.
//!
//! # Usage in tests
//!
//! ```
//! use std::sync::Arc;
//! use libos::{Keyboard, KeyEvent, MockKeyboard};
//! use libos_core::VirtualKey;
//!
//! let mock = Arc::new(MockKeyboard::new());
//! let keyboard = Keyboard::new(mock.clone());
//!
//! let chord = VirtualKey::Ctrl + VirtualKey::C;
//! keyboard.click(&chord).unwrap();
//!
//! assert_eq!(mock.events(), vec![KeyEvent::Down(chord.clone()), KeyEvent::Up(chord)]);
//! ```
//!
//! # `should_fail` flag
//!
//! Build with [`MockKeyboard::failing`] to make every operation return
//! `KeyboardError::UnsupportedPlatform`, which exercises error paths without
//! an unsupported build target.

use std::sync::{Mutex, PoisonError};

use libos_core::KeyCombination;

use crate::application::keyboard::{KeyboardError, KeyboardProvider};

/// One recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Down(KeyCombination),
    Up(KeyCombination),
}

/// A keyboard that records calls without performing OS API calls.
#[derive(Debug, Default)]
pub struct MockKeyboard {
    events: Mutex<Vec<KeyEvent>>,
    held: Mutex<KeyCombination>,
    /// When `true`, every method returns `KeyboardError::UnsupportedPlatform`.
    pub should_fail: bool,
}

impl MockKeyboard {
    /// Creates a mock with no recorded events and nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose every operation fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Sets the keys `is_pressed` and `pressed_keys` report as held.
    pub fn set_held(&self, keys: KeyCombination) {
        *self.held.lock().unwrap_or_else(PoisonError::into_inner) = keys;
    }

    /// Returns a snapshot of every recorded event, oldest first.
    pub fn events(&self) -> Vec<KeyEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clears the recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn check(&self) -> Result<(), KeyboardError> {
        if self.should_fail {
            Err(KeyboardError::UnsupportedPlatform)
        } else {
            Ok(())
        }
    }

    fn record(&self, event: KeyEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl KeyboardProvider for MockKeyboard {
    fn is_pressed(&self, keys: &KeyCombination) -> Result<bool, KeyboardError> {
        self.check()?;
        let held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(keys.is_subset(&held))
    }

    fn pressed_keys(&self) -> Result<KeyCombination, KeyboardError> {
        self.check()?;
        Ok(self
            .held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    /// Records the press; the empty combination records nothing.
    fn press(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.check()?;
        if !keys.is_empty() {
            self.record(KeyEvent::Down(keys.clone()));
        }
        Ok(())
    }

    /// Records the release; the empty combination records nothing.
    fn release(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.check()?;
        if !keys.is_empty() {
            self.record(KeyEvent::Up(keys.clone()));
        }
        Ok(())
    }
}

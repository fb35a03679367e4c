//! Keyboard service: query and simulate key combinations.
//!
//! This module sits at the application layer and delegates to a
//! [`KeyboardProvider`] trait object for the OS-level work.  The native
//! providers live in the infrastructure layer; the one matching the build
//! target is available as `infrastructure::keyboard::NativeKeyboard`.
//!
//! `click` and `double_click` are composed here, once, on top of `press` and
//! `release`, so every backend gets identical semantics for free.

use std::sync::Arc;

use libos_core::KeyCombination;
use thiserror::Error;

/// Error type for keyboard operations.
///
/// Missing native resources (no X display, no HID access, unmapped keys) are
/// *not* errors; they degrade and are reported as diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyboardError {
    #[error("keyboard operations are not supported on this platform")]
    UnsupportedPlatform,
}

/// Platform-agnostic keyboard capability.
///
/// Each supported platform family provides an implementation in the
/// infrastructure layer.  All operations take the combination by reference
/// and never modify it.
pub trait KeyboardProvider: Send + Sync {
    /// Returns `true` iff every key of `keys` is physically held right now.
    ///
    /// The empty combination is trivially pressed.
    fn is_pressed(&self, keys: &KeyCombination) -> Result<bool, KeyboardError>;

    /// Scans every known key and returns those currently held.
    fn pressed_keys(&self) -> Result<KeyCombination, KeyboardError>;

    /// Emits a key-down event for every key, in iteration order.
    fn press(&self, keys: &KeyCombination) -> Result<(), KeyboardError>;

    /// Emits a key-up event for every key, in iteration order.
    fn release(&self, keys: &KeyCombination) -> Result<(), KeyboardError>;
}

/// The keyboard service.
///
/// Cheap to clone; clones share the same provider (and therefore the same
/// lazily opened native session).
#[derive(Clone)]
pub struct Keyboard {
    provider: Arc<dyn KeyboardProvider>,
}

impl Keyboard {
    /// Creates a keyboard service over the given provider.
    pub fn new(provider: Arc<dyn KeyboardProvider>) -> Self {
        Self { provider }
    }

    /// Returns `true` iff every key of `keys` is currently pressed.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::UnsupportedPlatform`] on a build target
    /// without a keyboard backend.
    pub fn is_pressed(&self, keys: &KeyCombination) -> Result<bool, KeyboardError> {
        self.provider.is_pressed(keys)
    }

    /// Returns every key currently pressed.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::UnsupportedPlatform`] on a build target
    /// without a keyboard backend.
    pub fn pressed_keys(&self) -> Result<KeyCombination, KeyboardError> {
        self.provider.pressed_keys()
    }

    /// Presses every key of `keys` and leaves them held.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::UnsupportedPlatform`] on a build target
    /// without a keyboard backend.
    pub fn press(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        tracing::trace!(%keys, "press");
        self.provider.press(keys)
    }

    /// Releases every key of `keys`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::UnsupportedPlatform`] on a build target
    /// without a keyboard backend.
    pub fn release(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        tracing::trace!(%keys, "release");
        self.provider.release(keys)
    }

    /// Presses and then releases `keys`, with no hold delay.
    ///
    /// If the press fails, nothing is released.
    ///
    /// # Errors
    ///
    /// Propagates the first failing operation.
    pub fn click(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.press(keys)?;
        self.release(keys)
    }

    /// Clicks `keys` twice.
    ///
    /// # Errors
    ///
    /// Propagates the first failing operation.
    pub fn double_click(&self, keys: &KeyCombination) -> Result<(), KeyboardError> {
        self.click(keys)?;
        self.click(keys)
    }
}

impl std::fmt::Debug for Keyboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyboard").finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

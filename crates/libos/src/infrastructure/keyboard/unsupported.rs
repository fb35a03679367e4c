//! Keyboard provider for build targets without a native backend.

use libos_core::KeyCombination;

use crate::application::diagnostics::DiagnosticHook;
use crate::application::keyboard::{KeyboardError, KeyboardProvider};
use crate::config::KeyboardConfig;

/// Fails every operation with [`KeyboardError::UnsupportedPlatform`],
/// including those on the empty combination.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedKeyboard;

impl UnsupportedKeyboard {
    /// Same signature as the native backends so it can stand in as
    /// `NativeKeyboard`.
    pub fn new(_config: &KeyboardConfig, _hook: DiagnosticHook) -> Self {
        Self
    }
}

impl KeyboardProvider for UnsupportedKeyboard {
    fn is_pressed(&self, _keys: &KeyCombination) -> Result<bool, KeyboardError> {
        Err(KeyboardError::UnsupportedPlatform)
    }

    fn pressed_keys(&self) -> Result<KeyCombination, KeyboardError> {
        Err(KeyboardError::UnsupportedPlatform)
    }

    fn press(&self, _keys: &KeyCombination) -> Result<(), KeyboardError> {
        Err(KeyboardError::UnsupportedPlatform)
    }

    fn release(&self, _keys: &KeyCombination) -> Result<(), KeyboardError> {
        Err(KeyboardError::UnsupportedPlatform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::diagnostics::tracing_hook;
    use libos_core::VirtualKey;

    #[test]
    fn test_every_operation_fails_even_for_empty_combination() {
        let keyboard = UnsupportedKeyboard::new(&KeyboardConfig::default(), tracing_hook());
        let empty = KeyCombination::new();

        assert_eq!(keyboard.is_pressed(&empty), Err(KeyboardError::UnsupportedPlatform));
        assert_eq!(keyboard.press(&empty), Err(KeyboardError::UnsupportedPlatform));
        assert_eq!(keyboard.release(&empty), Err(KeyboardError::UnsupportedPlatform));
        assert_eq!(keyboard.pressed_keys(), Err(KeyboardError::UnsupportedPlatform));
        assert_eq!(
            keyboard.press(&VirtualKey::A.into()),
            Err(KeyboardError::UnsupportedPlatform)
        );
    }
}

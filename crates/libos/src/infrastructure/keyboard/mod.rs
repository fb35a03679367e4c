//! Platform-specific keyboard providers.
//!
//! The backend for the build target is selected at compile time via
//! `#[cfg(target_os = ...)]` and exported as [`NativeKeyboard`]:
//!
//! | Target  | `NativeKeyboard`      | Native facility                         |
//! |---------|-----------------------|-----------------------------------------|
//! | Linux   | `LinuxKeyboard`       | Xlib `XQueryKeymap` + XTest             |
//! | Windows | `WindowsKeyboard`     | `GetAsyncKeyState` + `SendInput`        |
//! | macOS   | `MacosKeyboard`       | IOKit HID element values + `CGEventPost` |
//! | other   | `UnsupportedKeyboard` | none, every call fails                  |
//!
//! A [`MockKeyboard`](mock::MockKeyboard) that records events in memory is
//! always available for tests.

use std::sync::Arc;

use crate::application::diagnostics::{tracing_hook, DiagnosticHook};
use crate::application::keyboard::Keyboard;
use crate::config::KeyboardConfig;

pub mod mock;
pub mod unsupported;

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "linux")]
mod x11_session;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
mod hid_cache;
#[cfg(target_os = "macos")]
pub mod macos;

/// The keyboard provider for the current build target.
#[cfg(target_os = "linux")]
pub type NativeKeyboard = linux::LinuxKeyboard;
/// The keyboard provider for the current build target.
#[cfg(target_os = "windows")]
pub type NativeKeyboard = windows::WindowsKeyboard;
/// The keyboard provider for the current build target.
#[cfg(target_os = "macos")]
pub type NativeKeyboard = macos::MacosKeyboard;
/// The keyboard provider for the current build target.
#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
pub type NativeKeyboard = unsupported::UnsupportedKeyboard;

impl Keyboard {
    /// Creates a keyboard service over the native backend with default
    /// settings, logging diagnostics through `tracing`.
    ///
    /// No native resource is acquired until the first operation.
    pub fn native() -> Self {
        Self::from_config(&KeyboardConfig::default())
    }

    /// Creates a keyboard service over the native backend.
    pub fn from_config(config: &KeyboardConfig) -> Self {
        Self::with_diagnostics(config, tracing_hook())
    }

    /// Creates a keyboard service over the native backend, sending every
    /// diagnostic to `hook` instead of the log.
    pub fn with_diagnostics(config: &KeyboardConfig, hook: DiagnosticHook) -> Self {
        Self::new(Arc::new(NativeKeyboard::new(config, hook)))
    }
}

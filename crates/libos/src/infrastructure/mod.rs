//! Infrastructure layer: OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `libos_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`keyboard`** – OS-specific implementations of `KeyboardProvider`.
//!   The correct implementation is selected at compile time using
//!   `#[cfg(target_os)]` and exported as `NativeKeyboard`.  A `MockKeyboard`
//!   is also provided for tests.

pub mod keyboard;

//! libos library entry point.
//!
//! One API for three questions every desktop tool eventually asks:
//!
//! - Which OS and kernel am I running on? ([`system`])
//! - Which keys are held right now? ([`Keyboard::is_pressed`],
//!   [`Keyboard::pressed_keys`])
//! - How do I type a shortcut? ([`Keyboard::press`], [`Keyboard::release`],
//!   [`Keyboard::click`], [`Keyboard::double_click`])
//!
//! Keys and combinations are platform-independent values from
//! [`libos_core`]; each backend translates them to its native codes.
//!
//! ```no_run
//! use libos::Keyboard;
//! use libos_core::VirtualKey;
//!
//! let keyboard = Keyboard::native();
//! keyboard.click(&(VirtualKey::Ctrl + VirtualKey::C))?;
//! if keyboard.is_pressed(&VirtualKey::Shift.into())? {
//!     println!("shift is down");
//! }
//! # Ok::<(), libos::KeyboardError>(())
//! ```
//!
//! # Layers
//!
//! | Layer            | Contents                                          |
//! |------------------|---------------------------------------------------|
//! | `application`    | `Keyboard` service, provider trait, diagnostics   |
//! | `infrastructure` | X11, Win32, macOS, unsupported and mock providers |
//! | `system`         | OS and kernel info                                |
//! | `config`         | TOML configuration                                |

/// Application layer: keyboard service and diagnostics.
pub mod application;

/// Configuration file schema and loading.
pub mod config;

/// Infrastructure layer: OS keyboard adapters.
pub mod infrastructure;

/// OS and kernel identification.
pub mod system;

pub use application::diagnostics::{tracing_hook, Diagnostic, DiagnosticHook};
pub use application::keyboard::{Keyboard, KeyboardError, KeyboardProvider};
pub use config::{ConfigError, KeyboardConfig, LibosConfig, LoggingConfig};
pub use infrastructure::keyboard::mock::{KeyEvent, MockKeyboard};
pub use infrastructure::keyboard::unsupported::UnsupportedKeyboard;
pub use infrastructure::keyboard::NativeKeyboard;
pub use system::{KernelInfo, OsInfo};

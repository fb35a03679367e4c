//! # libos-core
//!
//! OS-independent foundation of LibOS: the virtual key space, the native key
//! code tables of every supported platform family, key combinations and the
//! semantic version type.
//!
//! This crate makes no OS calls.  Everything here is a pure function or a
//! value type, so it is fully testable on any host; the `libos` crate layers
//! the native keyboard backends and the OS/kernel info providers on top.
//!
//! # Architecture overview (for beginners)
//!
//! - **`platform`** – Which native keyboard facility the build target has
//!   (`X11`, `Win32`, `Carbon` or none).  Resolved at compile time.
//!
//! - **`keys`** – The [`VirtualKey`] enum names keys symbolically.  Each
//!   platform family has its own numeric encoding, available through an
//!   explicit table (`keys::x11`, `keys::win32`, `keys::carbon`) rather than
//!   by numeric coincidence.
//!
//! - **`combination`** – [`KeyCombination`], the chord type that every
//!   keyboard operation takes: `VirtualKey::Ctrl + VirtualKey::C`.
//!
//! - **`version`** – [`Version`], the `major.minor.patch` triple reported by
//!   the OS and kernel info providers.

pub mod combination;
pub mod keys;
pub mod platform;
pub mod version;

pub use combination::KeyCombination;
pub use keys::carbon::{extract_modifiers, ModifierFlags};
pub use keys::{ParseKeyError, VirtualKey};
pub use platform::{OsType, PlatformFamily};
pub use version::Version;

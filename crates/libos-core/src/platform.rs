//! Build-time platform capability switch.
//!
//! Every other component reads [`PlatformFamily::CURRENT`] (or
//! [`OsType::CURRENT`]) exactly once, at the point where it picks a native
//! table or backend.  Nothing mutates it; it is a `const` resolved by
//! `#[cfg(target_os = ...)]` when the crate is compiled.
//!
//! # Families vs. operating systems (for beginners)
//!
//! The keyboard subsystem cares about *which native input facility* is
//! available, not about the marketing name of the OS:
//!
//! | Family   | Input facility                          | OS      |
//! |----------|-----------------------------------------|---------|
//! | `X11`    | Xlib + XTest extension                  | Linux   |
//! | `Win32`  | `SendInput` / `GetAsyncKeyState`        | Windows |
//! | `Carbon` | CoreGraphics events + IOKit HID queries | macOS   |
//!
//! Any other target resolves to [`PlatformFamily::Unsupported`], and every
//! keyboard operation fails fast there instead of silently doing nothing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The native keyboard facility family selected at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformFamily {
    /// Xlib / XTest (Linux).
    X11,
    /// Win32 input injection and asynchronous key state (Windows).
    Win32,
    /// CoreGraphics event posting and IOKit HID element queries (macOS).
    Carbon,
    /// No recognized family; keyboard operations are unavailable.
    Unsupported,
}

impl PlatformFamily {
    /// The family of the target this crate was compiled for.
    #[cfg(target_os = "linux")]
    pub const CURRENT: PlatformFamily = PlatformFamily::X11;
    /// The family of the target this crate was compiled for.
    #[cfg(target_os = "windows")]
    pub const CURRENT: PlatformFamily = PlatformFamily::Win32;
    /// The family of the target this crate was compiled for.
    #[cfg(target_os = "macos")]
    pub const CURRENT: PlatformFamily = PlatformFamily::Carbon;
    /// The family of the target this crate was compiled for.
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    pub const CURRENT: PlatformFamily = PlatformFamily::Unsupported;

    /// Returns the family of the current build target.
    pub const fn current() -> Self {
        Self::CURRENT
    }

    /// Returns `true` for every family that has a keyboard backend.
    pub const fn is_supported(self) -> bool {
        !matches!(self, PlatformFamily::Unsupported)
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformFamily::X11 => "X11",
            PlatformFamily::Win32 => "Win32",
            PlatformFamily::Carbon => "Carbon",
            PlatformFamily::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Operating system type, as reported by the OS-info provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsType {
    #[default]
    Undefined,
    Linux,
    Windows,
    MacOs,
}

impl OsType {
    #[cfg(target_os = "linux")]
    pub const CURRENT: OsType = OsType::Linux;
    #[cfg(target_os = "windows")]
    pub const CURRENT: OsType = OsType::Windows;
    #[cfg(target_os = "macos")]
    pub const CURRENT: OsType = OsType::MacOs;
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    pub const CURRENT: OsType = OsType::Undefined;

    /// Returns the OS type of the current build target.
    pub const fn current() -> Self {
        Self::CURRENT
    }

    /// Returns the keyboard facility family that serves this OS.
    pub const fn family(self) -> PlatformFamily {
        match self {
            OsType::Linux => PlatformFamily::X11,
            OsType::Windows => PlatformFamily::Win32,
            OsType::MacOs => PlatformFamily::Carbon,
            OsType::Undefined => PlatformFamily::Unsupported,
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsType::Undefined => "undefined",
            OsType::Linux => "linux",
            OsType::Windows => "windows",
            OsType::MacOs => "macos",
        };
        f.write_str(name)
    }
}

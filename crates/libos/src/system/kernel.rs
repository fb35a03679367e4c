//! Kernel name and release.

use std::sync::OnceLock;

use libos_core::Version;
use serde::Serialize;

/// Kernel identification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KernelInfo {
    pub name: String,
    pub version: Version,
    /// Full release string, e.g. `"6.8.0-45-generic"`.
    pub version_string: String,
}

/// Name of the kernel the crate was built for.
pub const fn name() -> &'static str {
    if cfg!(target_os = "linux") {
        "Linux"
    } else if cfg!(target_os = "macos") {
        "Darwin"
    } else if cfg!(target_os = "windows") {
        "Windows NT"
    } else {
        "Unknown"
    }
}

pub fn version() -> Version {
    info().version
}

pub fn version_string() -> &'static str {
    &info().version_string
}

/// Kernel info, detected on first call.
pub fn info() -> &'static KernelInfo {
    static INFO: OnceLock<KernelInfo> = OnceLock::new();
    INFO.get_or_init(detect)
}

#[cfg(unix)]
fn detect() -> KernelInfo {
    let release = uname_release().unwrap_or_default();
    tracing::debug!(%release, "uname");
    KernelInfo {
        name: name().to_string(),
        version: Version::parse(&release),
        version_string: release,
    }
}

/// The Windows NT kernel shares its version numbers with the OS.
#[cfg(windows)]
fn detect() -> KernelInfo {
    let os = super::os::info();
    KernelInfo {
        name: name().to_string(),
        version: os.version,
        version_string: os.version_string.clone(),
    }
}

#[cfg(not(any(unix, windows)))]
fn detect() -> KernelInfo {
    KernelInfo {
        name: name().to_string(),
        ..KernelInfo::default()
    }
}

/// `uname(2)` release field.
#[cfg(unix)]
fn uname_release() -> Option<String> {
    let mut uts = std::mem::MaybeUninit::<libc::utsname>::zeroed();
    // SAFETY: `uts` is a writable utsname buffer.
    if unsafe { libc::uname(uts.as_mut_ptr()) } != 0 {
        return None;
    }
    // SAFETY: uname succeeded, so every field is initialised and
    // NUL-terminated.
    let uts = unsafe { uts.assume_init() };
    // SAFETY: see above.
    let release = unsafe { std::ffi::CStr::from_ptr(uts.release.as_ptr()) };
    Some(release.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_target() {
        #[cfg(target_os = "linux")]
        assert_eq!(name(), "Linux");
        #[cfg(target_os = "macos")]
        assert_eq!(name(), "Darwin");
        #[cfg(target_os = "windows")]
        assert_eq!(name(), "Windows NT");
    }

    #[test]
    fn test_info_is_computed_once() {
        let first = info();
        let second = info();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first.name, name());
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_release_parses_to_nonzero_major() {
        // Arrange / Act
        let info = info();

        // Assert – every real kernel release starts with a non-zero major
        assert!(!info.version_string.is_empty());
        assert!(info.version.major > 0);
        assert_eq!(info.version, Version::parse(&info.version_string));
    }
}

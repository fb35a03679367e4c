//! Operating-system name, codename and version.
//!
//! # Where the answer comes from
//!
//! | Target  | Source                                                   |
//! |---------|----------------------------------------------------------|
//! | Linux   | `/etc/os-release` (falls back to the kernel when absent) |
//! | macOS   | `/System/Library/CoreServices/SystemVersion.plist`       |
//! | Windows | `RtlGetVersion` (not subject to manifest version lies)   |
//!
//! The parsers are plain functions over text so they can be tested on any
//! host.

use std::sync::OnceLock;

use libos_core::{OsType, Version};
use serde::Serialize;

/// Operating-system identification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OsInfo {
    pub os_type: OsType,
    /// Name without version, e.g. `"Ubuntu"`.
    pub name: String,
    /// Human-readable name with version, e.g. `"Ubuntu 24.04.1 LTS"`.
    pub pretty_name: String,
    /// Release codename, empty when the OS has none.
    pub codename: String,
    pub version: Version,
    /// Version plus extra detail, e.g. `"14.5 (23F79)"` on macOS.
    pub version_string: String,
}

pub fn os_type() -> OsType {
    OsType::CURRENT
}

pub fn name() -> &'static str {
    &info().name
}

pub fn pretty_name() -> &'static str {
    &info().pretty_name
}

pub fn codename() -> &'static str {
    &info().codename
}

pub fn version() -> Version {
    info().version
}

pub fn version_string() -> &'static str {
    &info().version_string
}

/// OS info, detected on first call.
pub fn info() -> &'static OsInfo {
    static INFO: OnceLock<OsInfo> = OnceLock::new();
    INFO.get_or_init(|| {
        let info = detect();
        tracing::debug!(name = %info.name, version = %info.version, "OS detected");
        info
    })
}

// ── Linux ─────────────────────────────────────────────────────────────────────

/// Builds [`OsInfo`] from the contents of an `os-release` file.
///
/// Recognised keys are `NAME`, `VERSION`, `PRETTY_NAME`, `VERSION_ID` and
/// `VERSION_CODENAME`; surrounding quotes are stripped, comments and
/// unknown keys ignored.
pub fn parse_os_release(text: &str) -> OsInfo {
    let mut info = OsInfo {
        os_type: OsType::Linux,
        ..OsInfo::default()
    };
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = unquote(value.trim()).to_string();
        match key.trim() {
            "NAME" => info.name = value,
            "VERSION" => info.version_string = value,
            "PRETTY_NAME" => info.pretty_name = value,
            "VERSION_ID" => info.version = Version::parse(&value),
            "VERSION_CODENAME" => info.codename = value,
            _ => {}
        }
    }
    info
}

/// `OsInfo` for a Linux system without an `os-release` file.
pub fn from_kernel(kernel: &super::KernelInfo) -> OsInfo {
    OsInfo {
        os_type: OsType::Linux,
        name: kernel.name.clone(),
        pretty_name: format!("{} {}", kernel.name, kernel.version_string),
        codename: String::new(),
        version: kernel.version,
        version_string: kernel.version_string.clone(),
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(target_os = "linux")]
fn detect() -> OsInfo {
    const OS_RELEASE_PATHS: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];

    OS_RELEASE_PATHS
        .iter()
        .find_map(|path| std::fs::read_to_string(path).ok())
        .map(|text| parse_os_release(&text))
        .unwrap_or_else(|| {
            tracing::debug!("no os-release file; describing the kernel instead");
            from_kernel(super::kernel::info())
        })
}

// ── macOS ─────────────────────────────────────────────────────────────────────

/// Extracts `(ProductVersion, ProductBuildVersion)` from the XML text of
/// `SystemVersion.plist`.
pub fn parse_system_version_plist(text: &str) -> Option<(String, String)> {
    Some((
        plist_string(text, "ProductVersion")?,
        plist_string(text, "ProductBuildVersion")?,
    ))
}

/// Value of the `<string>` that follows `<key>{key}</key>`.
fn plist_string(text: &str, key: &str) -> Option<String> {
    let marker = format!("<key>{key}</key>");
    let after_key = &text[text.find(&marker)? + marker.len()..];
    let start = after_key.trim_start().strip_prefix("<string>")?;
    let end = start.find("</string>")?;
    Some(start[..end].trim().to_string())
}

/// Marketing name of a macOS release, empty when unknown.
pub fn macos_codename(version: Version) -> &'static str {
    match (version.major, version.minor) {
        (10, 12) => "Sierra",
        (10, 13) => "High Sierra",
        (10, 14) => "Mojave",
        (10, 15) => "Catalina",
        (11, _) => "Big Sur",
        (12, _) => "Monterey",
        (13, _) => "Ventura",
        (14, _) => "Sonoma",
        (15, _) => "Sequoia",
        (26, _) => "Tahoe",
        _ => "",
    }
}

/// `OsInfo` for a macOS product version and build.
pub fn from_macos_version(product_version: &str, build: &str) -> OsInfo {
    let version = Version::parse(product_version);
    let codename = macos_codename(version);
    let pretty_name = if codename.is_empty() {
        format!("macOS {product_version}")
    } else {
        format!("macOS {codename}")
    };
    OsInfo {
        os_type: OsType::MacOs,
        name: "macOS".to_string(),
        pretty_name,
        codename: codename.to_string(),
        version,
        version_string: format!("{product_version} ({build})"),
    }
}

#[cfg(target_os = "macos")]
fn detect() -> OsInfo {
    const SYSTEM_VERSION_PLIST: &str = "/System/Library/CoreServices/SystemVersion.plist";

    let parsed = std::fs::read_to_string(SYSTEM_VERSION_PLIST)
        .ok()
        .and_then(|text| parse_system_version_plist(&text));
    match parsed {
        Some((version, build)) => from_macos_version(&version, &build),
        None => {
            tracing::debug!("SystemVersion.plist unreadable");
            OsInfo {
                os_type: OsType::MacOs,
                name: "macOS".to_string(),
                pretty_name: "macOS".to_string(),
                ..OsInfo::default()
            }
        }
    }
}

// ── Windows ───────────────────────────────────────────────────────────────────

/// First Windows 10 build number that is marketed as Windows 11.
pub const WINDOWS_11_FIRST_BUILD: u32 = 22_000;

/// Marketing name of an NT version (`patch` carries the build number).
pub fn windows_pretty_name(version: Version) -> String {
    let release = match (version.major, version.minor) {
        (10, _) if version.patch >= WINDOWS_11_FIRST_BUILD => "11".to_string(),
        (major, _) if major >= 10 => major.to_string(),
        (6, minor) if minor >= 3 => "8.1".to_string(),
        (6, 2) => "8".to_string(),
        (6, 1) => "7".to_string(),
        (6, 0) => "Vista".to_string(),
        (5, minor) if minor >= 2 => "XP 64-Bit Edition".to_string(),
        (5, 1) => "XP".to_string(),
        (5, 0) => "2000".to_string(),
        _ => return "Windows".to_string(),
    };
    format!("Windows {release}")
}

/// `OsInfo` for an NT `major.minor.build` triple.
pub fn from_windows_version(major: u32, minor: u32, build: u32) -> OsInfo {
    let version = Version::new(major, minor, build);
    OsInfo {
        os_type: OsType::Windows,
        name: "Windows".to_string(),
        pretty_name: windows_pretty_name(version),
        codename: String::new(),
        version,
        version_string: version.to_string(),
    }
}

#[cfg(target_os = "windows")]
fn detect() -> OsInfo {
    use windows::Wdk::System::SystemServices::RtlGetVersion;
    use windows::Win32::System::SystemInformation::OSVERSIONINFOW;

    let mut raw = OSVERSIONINFOW {
        dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };
    // SAFETY: `raw` is a writable OSVERSIONINFOW with its size field set.
    let status = unsafe { RtlGetVersion(&mut raw) };
    if status.is_err() {
        tracing::debug!(status = status.0, "RtlGetVersion failed");
        return OsInfo {
            os_type: OsType::Windows,
            name: "Windows".to_string(),
            pretty_name: "Windows".to_string(),
            ..OsInfo::default()
        };
    }
    from_windows_version(raw.dwMajorVersion, raw.dwMinorVersion, raw.dwBuildNumber)
}

// ── Other targets ─────────────────────────────────────────────────────────────

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn detect() -> OsInfo {
    OsInfo {
        os_type: OsType::Undefined,
        name: "Unknown".to_string(),
        ..OsInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::KernelInfo;

    const UBUNTU_OS_RELEASE: &str = r#"PRETTY_NAME="Ubuntu 24.04.1 LTS"
NAME="Ubuntu"
VERSION_ID="24.04"
VERSION="24.04.1 LTS (Noble Numbat)"
VERSION_CODENAME=noble
ID=ubuntu
ID_LIKE=debian
HOME_URL="https://www.ubuntu.com/"
"#;

    const SONOMA_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>BuildID</key>
	<string>6B6F4E42-1C3F-11EF-9C1A-3D2E0E7B0C3A</string>
	<key>ProductBuildVersion</key>
	<string>23F79</string>
	<key>ProductCopyright</key>
	<string>1983-2024 Apple Inc.</string>
	<key>ProductName</key>
	<string>macOS</string>
	<key>ProductUserVisibleVersion</key>
	<string>14.5</string>
	<key>ProductVersion</key>
	<string>14.5</string>
</dict>
</plist>
"#;

    #[test]
    fn test_parse_os_release_strips_quotes() {
        // Act
        let info = parse_os_release(UBUNTU_OS_RELEASE);

        // Assert
        assert_eq!(info.os_type, OsType::Linux);
        assert_eq!(info.name, "Ubuntu");
        assert_eq!(info.pretty_name, "Ubuntu 24.04.1 LTS");
        assert_eq!(info.codename, "noble");
        assert_eq!(info.version, Version::new(24, 4, 0));
        assert_eq!(info.version_string, "24.04.1 LTS (Noble Numbat)");
    }

    #[test]
    fn test_parse_os_release_ignores_comments_and_blank_lines() {
        let text = "# generated\n\nNAME='Alpine Linux'\nVERSION_ID=3.20.3\n";

        let info = parse_os_release(text);

        assert_eq!(info.name, "Alpine Linux");
        assert_eq!(info.version, Version::new(3, 20, 3));
        assert!(info.codename.is_empty());
    }

    #[test]
    fn test_from_kernel_uses_release_as_version() {
        let kernel = KernelInfo {
            name: "Linux".to_string(),
            version: Version::new(6, 8, 0),
            version_string: "6.8.0-45-generic".to_string(),
        };

        let info = from_kernel(&kernel);

        assert_eq!(info.pretty_name, "Linux 6.8.0-45-generic");
        assert_eq!(info.version, Version::new(6, 8, 0));
        assert!(info.codename.is_empty());
    }

    #[test]
    fn test_parse_system_version_plist() {
        assert_eq!(
            parse_system_version_plist(SONOMA_PLIST),
            Some(("14.5".to_string(), "23F79".to_string()))
        );
        assert_eq!(parse_system_version_plist("<plist></plist>"), None);
    }

    #[test]
    fn test_from_macos_version() {
        let info = from_macos_version("14.5", "23F79");

        assert_eq!(info.name, "macOS");
        assert_eq!(info.codename, "Sonoma");
        assert_eq!(info.pretty_name, "macOS Sonoma");
        assert_eq!(info.version_string, "14.5 (23F79)");
    }

    #[test]
    fn test_macos_codenames() {
        assert_eq!(macos_codename(Version::new(10, 12, 6)), "Sierra");
        assert_eq!(macos_codename(Version::new(10, 15, 7)), "Catalina");
        assert_eq!(macos_codename(Version::new(10, 11, 0)), "");
        assert_eq!(macos_codename(Version::new(11, 7, 10)), "Big Sur");
        assert_eq!(macos_codename(Version::new(15, 1, 0)), "Sequoia");
        assert_eq!(macos_codename(Version::new(26, 0, 0)), "Tahoe");
    }

    #[test]
    fn test_unknown_macos_release_falls_back_to_version() {
        let info = from_macos_version("99.1", "Z1");

        assert!(info.codename.is_empty());
        assert_eq!(info.pretty_name, "macOS 99.1");
    }

    #[test]
    fn test_windows_pretty_names() {
        assert_eq!(windows_pretty_name(Version::new(10, 0, 19045)), "Windows 10");
        assert_eq!(windows_pretty_name(Version::new(10, 0, 22631)), "Windows 11");
        assert_eq!(windows_pretty_name(Version::new(6, 3, 9600)), "Windows 8.1");
        assert_eq!(windows_pretty_name(Version::new(6, 1, 7601)), "Windows 7");
        assert_eq!(windows_pretty_name(Version::new(5, 1, 2600)), "Windows XP");
        assert_eq!(windows_pretty_name(Version::new(4, 0, 0)), "Windows");
    }

    #[test]
    fn test_from_windows_version() {
        let info = from_windows_version(10, 0, 22631);

        assert_eq!(info.version_string, "10.0.22631");
        assert_eq!(info.pretty_name, "Windows 11");
        assert!(info.codename.is_empty());
    }

    #[test]
    fn test_info_matches_build_target() {
        let info = info();

        assert_eq!(info.os_type, os_type());
        assert!(std::ptr::eq(info, super::info()));
    }
}

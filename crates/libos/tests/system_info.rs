//! Integration tests for the OS and kernel info providers on the host.

use libos::system::{kernel, os};
use libos_core::OsType;

#[test]
fn test_os_accessors_agree_with_info() {
    let info = os::info();

    assert_eq!(os::os_type(), OsType::CURRENT);
    assert_eq!(os::name(), info.name);
    assert_eq!(os::pretty_name(), info.pretty_name);
    assert_eq!(os::codename(), info.codename);
    assert_eq!(os::version(), info.version);
    assert_eq!(os::version_string(), info.version_string);
}

#[test]
fn test_kernel_accessors_agree_with_info() {
    let info = kernel::info();

    assert_eq!(kernel::name(), info.name);
    assert_eq!(kernel::version(), info.version);
    assert_eq!(kernel::version_string(), info.version_string);
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
#[test]
fn test_supported_hosts_have_a_name() {
    assert!(!os::name().is_empty());
    assert!(!os::pretty_name().is_empty());
}

//! IOKit HID element cache used to read live key state on macOS.
//!
//! CoreGraphics can post keyboard events but has no "is this key down"
//! query that sees other processes' input.  IOKit can: every attached
//! keyboard exposes one HID element per key, and `IOHIDDeviceGetValue` on
//! that element returns 1 while the key is held.
//!
//! # Building the cache
//!
//! ```text
//! IOHIDManager (GenericDesktop/Keyboard) → devices
//!   → elements on usage page 0x07
//!   → usage → kVK_* (fixed table)
//!   → kVK_* → character (UCKeyTranslate, active layout)
//!   → VirtualKey (layout-resolved)
//! ```
//!
//! The cache is built once; a layout switch afterwards is not picked up.

use std::collections::BTreeMap;
use std::ffi::c_void;
use std::ptr;

use core_foundation::array::{CFArrayGetCount, CFArrayGetValueAtIndex, CFArrayRef};
use core_foundation::base::{
    kCFAllocatorDefault, CFAllocatorRef, CFIndex, CFRelease, CFTypeRef, TCFType,
};
use core_foundation::data::{CFDataGetBytePtr, CFDataRef};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::set::{CFSetGetCount, CFSetGetValues, CFSetRef};
use core_foundation::string::{CFString, CFStringRef};
use libos_core::keys::{carbon, hid};
use libos_core::{KeyCombination, VirtualKey};

use crate::application::diagnostics::{Diagnostic, DiagnosticHook};

type IOHIDManagerRef = *mut c_void;
type IOHIDDeviceRef = *mut c_void;
type IOHIDElementRef = *mut c_void;
type IOHIDValueRef = *mut c_void;
type IOReturn = i32;
type TISInputSourceRef = *mut c_void;

const K_IO_RETURN_SUCCESS: IOReturn = 0;
/// `kIOReturnError`, used when the manager cannot even be created.
const K_IO_RETURN_ERROR: IOReturn = 0xE000_02BC_u32 as i32;
const K_IOHID_OPTIONS_TYPE_NONE: u32 = 0;

const GENERIC_DESKTOP_PAGE: i32 = 0x01;
const KEYBOARD_USAGE: i32 = 0x06;

const K_UC_KEY_ACTION_DISPLAY: u16 = 3;
const K_UC_KEY_TRANSLATE_NO_DEAD_KEYS_MASK: u32 = 1;

#[link(name = "IOKit", kind = "framework")]
extern "C" {
    fn IOHIDManagerCreate(allocator: CFAllocatorRef, options: u32) -> IOHIDManagerRef;
    fn IOHIDManagerSetDeviceMatching(manager: IOHIDManagerRef, matching: CFDictionaryRef);
    fn IOHIDManagerOpen(manager: IOHIDManagerRef, options: u32) -> IOReturn;
    fn IOHIDManagerCopyDevices(manager: IOHIDManagerRef) -> CFSetRef;
    fn IOHIDDeviceCopyMatchingElements(
        device: IOHIDDeviceRef,
        matching: CFDictionaryRef,
        options: u32,
    ) -> CFArrayRef;
    fn IOHIDDeviceGetValue(
        device: IOHIDDeviceRef,
        element: IOHIDElementRef,
        value: *mut IOHIDValueRef,
    ) -> IOReturn;
    fn IOHIDElementGetUsagePage(element: IOHIDElementRef) -> u32;
    fn IOHIDElementGetUsage(element: IOHIDElementRef) -> u32;
    fn IOHIDValueGetIntegerValue(value: IOHIDValueRef) -> CFIndex;
}

#[link(name = "Carbon", kind = "framework")]
extern "C" {
    static kTISPropertyUnicodeKeyLayoutData: CFStringRef;
    fn TISCopyCurrentKeyboardLayoutInputSource() -> TISInputSourceRef;
    fn TISGetInputSourceProperty(source: TISInputSourceRef, key: CFStringRef) -> *const c_void;
    fn LMGetKbdType() -> u8;
    #[allow(clippy::too_many_arguments)]
    fn UCKeyTranslate(
        layout: *const u8,
        virtual_key_code: u16,
        key_action: u16,
        modifier_key_state: u32,
        keyboard_type: u32,
        key_translate_options: u32,
        dead_key_state: *mut u32,
        max_string_length: usize,
        actual_string_length: *mut usize,
        unicode_string: *mut u16,
    ) -> i32;
}

/// A retained CoreFoundation object, released on drop.
struct CfOwned(CFTypeRef);

impl CfOwned {
    /// Takes ownership of a +1 reference; `None` for null.
    fn new(ptr: *const c_void) -> Option<Self> {
        (!ptr.is_null()).then_some(Self(ptr))
    }

    fn as_ptr(&self) -> *const c_void {
        self.0
    }
}

impl Drop for CfOwned {
    fn drop(&mut self) {
        // SAFETY: we hold exactly one reference, taken in `new`.
        unsafe { CFRelease(self.0) };
    }
}

/// The active keyboard layout's `UCKeyboardLayout` data.
struct KeyboardLayout {
    _source: CfOwned,
    data: *const u8,
    keyboard_type: u32,
}

impl KeyboardLayout {
    fn current() -> Option<Self> {
        // SAFETY: plain Text Input Sources calls; the returned source is +1.
        let source = CfOwned::new(unsafe { TISCopyCurrentKeyboardLayoutInputSource() })?;
        // SAFETY: `source` is live; the property follows the Get rule and
        // stays valid while `source` is retained.
        let data = unsafe {
            TISGetInputSourceProperty(source.as_ptr() as TISInputSourceRef, kTISPropertyUnicodeKeyLayoutData)
        } as CFDataRef;
        if data.is_null() {
            return None;
        }
        // SAFETY: `data` is a live CFData owned by `source`.
        let bytes = unsafe { CFDataGetBytePtr(data) };
        if bytes.is_null() {
            return None;
        }
        Some(Self {
            _source: source,
            data: bytes,
            // SAFETY: no preconditions.
            keyboard_type: u32::from(unsafe { LMGetKbdType() }),
        })
    }

    /// Character the unmodified key prints, dead keys suppressed.
    fn translate(&self, keycode: u16) -> Option<char> {
        let mut dead_key_state = 0u32;
        let mut buf = [0u16; 4];
        let mut len = 0usize;
        // SAFETY: `data` stays valid while `_source` is retained; the output
        // buffer and its length match.
        let status = unsafe {
            UCKeyTranslate(
                self.data,
                keycode,
                K_UC_KEY_ACTION_DISPLAY,
                0,
                self.keyboard_type,
                K_UC_KEY_TRANSLATE_NO_DEAD_KEYS_MASK,
                &mut dead_key_state,
                buf.len(),
                &mut len,
                buf.as_mut_ptr(),
            )
        };
        if status != 0 || len == 0 {
            return None;
        }
        char::decode_utf16(buf[..len.min(buf.len())].iter().copied())
            .next()
            .and_then(Result::ok)
    }
}

/// One key element on one keyboard device.
#[derive(Clone, Copy)]
struct HidElement {
    device: IOHIDDeviceRef,
    element: IOHIDElementRef,
}

impl HidElement {
    fn is_down(&self) -> bool {
        let mut value: IOHIDValueRef = ptr::null_mut();
        // SAFETY: device and element are kept alive by the owning cache.
        let status = unsafe { IOHIDDeviceGetValue(self.device, self.element, &mut value) };
        // SAFETY: `value` is non-null and follows the Get rule.
        status == K_IO_RETURN_SUCCESS
            && !value.is_null()
            && unsafe { IOHIDValueGetIntegerValue(value) } == 1
    }
}

/// Map from virtual key to the HID elements reporting it.
///
/// An empty cache (resource unavailable) answers "not pressed" for every
/// key.
pub struct HidElementCache {
    elements: BTreeMap<VirtualKey, Vec<HidElement>>,
    // Drop order: element arrays, then devices, then the manager.
    _element_arrays: Vec<CfOwned>,
    _devices: Option<CfOwned>,
    _manager: Option<CfOwned>,
}

// SAFETY: the raw IOKit references are immutable after construction and
// IOHIDDeviceGetValue may be called from any thread.
unsafe impl Send for HidElementCache {}
// SAFETY: see `Send`.
unsafe impl Sync for HidElementCache {}

impl HidElementCache {
    fn empty() -> Self {
        Self {
            elements: BTreeMap::new(),
            _element_arrays: Vec::new(),
            _devices: None,
            _manager: None,
        }
    }

    /// Enumerates keyboards, reporting an unavailable layout or HID manager
    /// through `hook` and returning an empty cache in that case.
    pub fn build(hook: &DiagnosticHook) -> Self {
        let Some(layout) = KeyboardLayout::current() else {
            hook(&Diagnostic::LayoutUnavailable);
            return Self::empty();
        };

        // SAFETY: default allocator, no options.
        let raw = unsafe { IOHIDManagerCreate(kCFAllocatorDefault, K_IOHID_OPTIONS_TYPE_NONE) };
        let Some(manager) = CfOwned::new(raw) else {
            hook(&Diagnostic::HidManagerUnavailable {
                status: K_IO_RETURN_ERROR,
            });
            return Self::empty();
        };
        let device_matching = matching_dictionary(&[
            ("DeviceUsagePage", GENERIC_DESKTOP_PAGE),
            ("DeviceUsage", KEYBOARD_USAGE),
        ]);
        let manager_ref = manager.as_ptr() as IOHIDManagerRef;
        // SAFETY: manager is live; the dictionary is copied by the call.
        let status = unsafe {
            IOHIDManagerSetDeviceMatching(manager_ref, device_matching.as_concrete_TypeRef());
            IOHIDManagerOpen(manager_ref, K_IOHID_OPTIONS_TYPE_NONE)
        };
        if status != K_IO_RETURN_SUCCESS {
            hook(&Diagnostic::HidManagerUnavailable { status });
            return Self::empty();
        }

        let mut cache = Self::empty();
        // SAFETY: manager is open; the returned set is +1.
        let devices = CfOwned::new(unsafe { IOHIDManagerCopyDevices(manager_ref) });
        if let Some(devices) = &devices {
            let element_matching =
                matching_dictionary(&[("UsagePage", hid::KEYBOARD_USAGE_PAGE as i32)]);
            for device in set_values(devices.as_ptr() as CFSetRef) {
                cache.add_device(device as IOHIDDeviceRef, &element_matching, &layout);
            }
        }
        cache._devices = devices;
        cache._manager = Some(manager);

        tracing::debug!(
            keys = cache.elements.len(),
            arrays = cache._element_arrays.len(),
            "HID element cache built"
        );
        cache
    }

    fn add_device(
        &mut self,
        device: IOHIDDeviceRef,
        matching: &CFDictionary<CFString, CFNumber>,
        layout: &KeyboardLayout,
    ) {
        // SAFETY: device is retained by the device set; result is +1.
        let raw = unsafe {
            IOHIDDeviceCopyMatchingElements(device, matching.as_concrete_TypeRef(), K_IOHID_OPTIONS_TYPE_NONE)
        };
        let Some(array) = CfOwned::new(raw) else {
            return;
        };
        let array_ref = array.as_ptr() as CFArrayRef;
        // SAFETY: array is live.
        let count = unsafe { CFArrayGetCount(array_ref) };
        for index in 0..count {
            // SAFETY: index is in bounds; the element is retained by the array.
            let element = unsafe { CFArrayGetValueAtIndex(array_ref, index) } as IOHIDElementRef;
            // SAFETY: element is live.
            let (page, usage) =
                unsafe { (IOHIDElementGetUsagePage(element), IOHIDElementGetUsage(element)) };
            if page != hid::KEYBOARD_USAGE_PAGE {
                continue;
            }
            let Some(keycode) = hid::hid_usage_to_carbon(usage) else {
                continue;
            };
            if let Some(key) = carbon::resolve_layout_key(keycode, layout.translate(keycode)) {
                tracing::trace!(%key, usage, keycode, "HID element");
                self.elements
                    .entry(key)
                    .or_default()
                    .push(HidElement { device, element });
            }
        }
        self._element_arrays.push(array);
    }

    /// `true` when any keyboard reports `key` held.
    pub fn is_held(&self, key: VirtualKey) -> bool {
        self.elements
            .get(&key)
            .is_some_and(|elements| elements.iter().any(HidElement::is_down))
    }

    /// Every key currently held on any keyboard.
    pub fn held_keys(&self) -> KeyCombination {
        self.elements
            .iter()
            .filter(|(_, elements)| elements.iter().any(HidElement::is_down))
            .map(|(&key, _)| key)
            .collect()
    }
}

fn matching_dictionary(pairs: &[(&'static str, i32)]) -> CFDictionary<CFString, CFNumber> {
    let pairs: Vec<(CFString, CFNumber)> = pairs
        .iter()
        .map(|&(key, value)| (CFString::from_static_string(key), CFNumber::from(value)))
        .collect();
    CFDictionary::from_CFType_pairs(&pairs)
}

fn set_values(set: CFSetRef) -> Vec<*const c_void> {
    // SAFETY: set is live; the buffer holds exactly `count` values.
    unsafe {
        let count = CFSetGetCount(set);
        let mut values = vec![ptr::null(); usize::try_from(count).unwrap_or(0)];
        CFSetGetValues(set, values.as_mut_ptr());
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_reports_nothing_held() {
        let cache = HidElementCache::empty();

        assert!(!cache.is_held(VirtualKey::A));
        assert!(cache.held_keys().is_empty());
    }

    #[test]
    fn test_cf_owned_rejects_null() {
        assert!(CfOwned::new(ptr::null()).is_none());
    }
}

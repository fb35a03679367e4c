//! Owned connection to an X server.
//!
//! # Keycodes vs. KeySyms (for beginners)
//!
//! X11 identifies a *physical* key by an 8-bit **keycode** chosen by the
//! server, and the *symbol* printed on it by a **KeySym**.  Our tables map
//! virtual keys to KeySyms; the server's keyboard mapping turns a KeySym into
//! a keycode (`XKeysymToKeycode`).  Both `XQueryKeymap` and
//! `XTestFakeKeyEvent` speak keycodes, so the session resolves every virtual
//! key to its keycode once, when the connection is opened.

use std::ffi::CString;
use std::ptr::NonNull;
use std::sync::{Mutex, PoisonError};

use libos_core::keys::x11 as keysyms;
use libos_core::VirtualKey;
use thiserror::Error;
use x11::{xlib, xtest};

/// Passing `CurrentTime` (0) as the XTest delay means "now".
const CURRENT_TIME: std::os::raw::c_ulong = 0;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("display name contains a NUL byte")]
    InvalidDisplayName,
    #[error("XOpenDisplay failed")]
    OpenFailed,
}

/// One X server connection plus the keycode table resolved on it.
///
/// Not `Clone`; the connection is closed when the session is dropped.  Every
/// Xlib call goes through the mutex, so the session can be shared between
/// threads.
pub struct X11Session {
    display: Mutex<NonNull<xlib::Display>>,
    /// Keycode of each virtual key, or 0 when the server has none.
    keycodes: Vec<(VirtualKey, u8)>,
    /// Reverse of `keycodes`; the first virtual key wins on collisions.
    keys_by_code: [Option<VirtualKey>; 256],
}

// SAFETY: the raw `Display` pointer is only dereferenced by Xlib while the
// mutex is held, so no two threads ever use the connection concurrently.
unsafe impl Send for X11Session {}
// SAFETY: see `Send`; all shared access is serialized through the mutex.
unsafe impl Sync for X11Session {}

impl X11Session {
    /// Opens `display_name` (e.g. `":0"`), or `$DISPLAY` when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::OpenFailed`] if the X server is unreachable.
    pub fn open(display_name: Option<&str>) -> Result<Self, SessionError> {
        let name = display_name
            .map(CString::new)
            .transpose()
            .map_err(|_| SessionError::InvalidDisplayName)?;
        let name_ptr = name.as_ref().map_or(std::ptr::null(), |n| n.as_ptr());

        // SAFETY: `name_ptr` is null or points to a NUL-terminated string that
        // outlives the call.
        let raw = unsafe { xlib::XOpenDisplay(name_ptr) };
        let display = NonNull::new(raw).ok_or(SessionError::OpenFailed)?;

        let mut keycodes = Vec::with_capacity(VirtualKey::ALL.len());
        let mut keys_by_code = [None; 256];
        for &key in VirtualKey::ALL {
            let code = match keysyms::to_keysym(key) {
                // SAFETY: `display` is a live connection owned by this function.
                Some(sym) => unsafe {
                    xlib::XKeysymToKeycode(display.as_ptr(), xlib::KeySym::from(sym))
                },
                None => 0,
            };
            keycodes.push((key, code));
            if code != 0 && keys_by_code[code as usize].is_none() {
                keys_by_code[code as usize] = Some(key);
            }
        }

        tracing::debug!(
            display = display_name.unwrap_or("$DISPLAY"),
            mapped = keycodes.iter().filter(|(_, c)| *c != 0).count(),
            "X11 session opened"
        );

        Ok(Self {
            display: Mutex::new(display),
            keycodes,
            keys_by_code,
        })
    }

    /// Keycode of `key` on this server, `None` if it has none.
    pub fn keycode(&self, key: VirtualKey) -> Option<u8> {
        self.keycodes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, code)| code)
            .filter(|&code| code != 0)
    }

    /// Virtual key of a keycode.
    ///
    /// Uses the table resolved at open time, then falls back to the level-0
    /// KeySym of the keycode (`XkbKeycodeToKeysym`) for keys bound to a
    /// KeySym outside our table's preferred spelling.
    pub fn virtual_key(&self, keycode: u8) -> Option<VirtualKey> {
        if let Some(key) = self.keys_by_code[keycode as usize] {
            return Some(key);
        }
        let display = self.lock();
        // SAFETY: the connection is live and the mutex is held.
        let sym = unsafe { xlib::XkbKeycodeToKeysym(display.as_ptr(), keycode, 0, 0) };
        u32::try_from(sym).ok().and_then(keysyms::from_keysym)
    }

    /// The 256-bit map of currently held keycodes (`XQueryKeymap`).
    pub fn query_keymap(&self) -> [u8; 32] {
        let mut keys: [std::os::raw::c_char; 32] = [0; 32];
        let display = self.lock();
        // SAFETY: `keys` is the 32-byte buffer XQueryKeymap requires.
        unsafe { xlib::XQueryKeymap(display.as_ptr(), keys.as_mut_ptr()) };
        keys.map(|b| b as u8)
    }

    /// Sends one XTest key event per keycode, then flushes once.
    pub fn fake_key_events(&self, keycodes: &[u8], is_press: bool) {
        let state = if is_press { xlib::True } else { xlib::False };
        let display = self.lock();
        for &code in keycodes {
            // SAFETY: the connection is live and the mutex is held.
            unsafe {
                xtest::XTestFakeKeyEvent(
                    display.as_ptr(),
                    std::os::raw::c_uint::from(code),
                    state,
                    CURRENT_TIME,
                )
            };
        }
        // SAFETY: as above.
        unsafe { xlib::XFlush(display.as_ptr()) };
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NonNull<xlib::Display>> {
        self.display.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for X11Session {
    fn drop(&mut self) {
        let display = self
            .display
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        // SAFETY: the pointer came from XOpenDisplay and is closed exactly once.
        unsafe { xlib::XCloseDisplay(display.as_ptr()) };
    }
}

/// Tests whether `keycode` is set in an `XQueryKeymap` bit vector.
pub fn is_keycode_held(keymap: &[u8; 32], keycode: u8) -> bool {
    keymap[(keycode / 8) as usize] & (1 << (keycode % 8)) != 0
}

/// Iterates every keycode set in an `XQueryKeymap` bit vector.
pub fn held_keycodes(keymap: &[u8; 32]) -> impl Iterator<Item = u8> + '_ {
    (0..=255u8).filter(move |&code| is_keycode_held(keymap, code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_keycode_held_tests_the_right_bit() {
        let mut keymap = [0u8; 32];
        keymap[38 / 8] = 1 << (38 % 8); // keycode 38 is `a` on evdev

        assert!(is_keycode_held(&keymap, 38));
        assert!(!is_keycode_held(&keymap, 39));
        assert!(!is_keycode_held(&keymap, 0));
    }

    #[test]
    fn test_held_keycodes_lists_every_set_bit() {
        let mut keymap = [0u8; 32];
        keymap[0] = 0b0000_0011;
        keymap[31] = 0b1000_0000;

        let held: Vec<u8> = held_keycodes(&keymap).collect();

        assert_eq!(held, vec![0, 1, 255]);
    }

    #[test]
    fn test_open_with_nul_in_name_is_rejected() {
        let result = X11Session::open(Some(":0\0junk"));
        assert!(matches!(result, Err(SessionError::InvalidDisplayName)));
    }
}

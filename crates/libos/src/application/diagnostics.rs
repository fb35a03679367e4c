//! Degradation reports emitted by the keyboard backends.
//!
//! Backends never fail because a native resource is missing: they answer
//! "not pressed", return an empty set or skip the event.  What they do
//! instead is hand a [`Diagnostic`] to the [`DiagnosticHook`] they were
//! built with, so the application can decide whether to surface it.

use std::fmt;
use std::sync::Arc;

use libos_core::{PlatformFamily, VirtualKey};

/// A non-fatal condition detected by a keyboard backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The X server connection could not be opened.
    SessionUnavailable { display: Option<String> },
    /// `IOHIDManagerOpen` failed (usually missing Input Monitoring permission).
    HidManagerUnavailable { status: i32 },
    /// The active keyboard layout has no Unicode layout data.
    LayoutUnavailable,
    /// `CGEventSourceCreate` failed; the batch was not posted.
    EventSourceUnavailable,
    /// A key has no native code on this family and was skipped.
    UnmappedKey {
        key: VirtualKey,
        family: PlatformFamily,
    },
    /// The OS accepted fewer events than were submitted.
    PartialInjection { requested: usize, injected: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SessionUnavailable { display: Some(name) } => {
                write!(f, "cannot open X display {name:?}")
            }
            Diagnostic::SessionUnavailable { display: None } => {
                f.write_str("cannot open the default X display")
            }
            Diagnostic::HidManagerUnavailable { status } => {
                write!(f, "IOHIDManagerOpen failed with status {status:#x}")
            }
            Diagnostic::LayoutUnavailable => {
                f.write_str("current keyboard layout has no Unicode layout data")
            }
            Diagnostic::EventSourceUnavailable => f.write_str("cannot create a CG event source"),
            Diagnostic::UnmappedKey { key, family } => {
                write!(f, "key {key} has no {family} code")
            }
            Diagnostic::PartialInjection {
                requested,
                injected,
            } => write!(f, "only {injected} of {requested} key events were injected"),
        }
    }
}

/// Callback receiving every diagnostic a backend emits.
pub type DiagnosticHook = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Returns the hook used when none is supplied: a `tracing` warning.
pub fn tracing_hook() -> DiagnosticHook {
    Arc::new(|diagnostic: &Diagnostic| {
        tracing::warn!(%diagnostic, "keyboard backend degraded");
    })
}

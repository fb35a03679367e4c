//! Application layer: the keyboard service and its diagnostics.
//!
//! - **`keyboard`** – [`Keyboard`](keyboard::Keyboard), the service callers
//!   use, and the [`KeyboardProvider`](keyboard::KeyboardProvider) trait the
//!   platform backends implement.  `click` and `double_click` live here.
//!
//! - **`diagnostics`** – non-fatal degradation reports and the hook that
//!   receives them.
//!
//! Nothing in this layer touches an OS API.

pub mod diagnostics;
pub mod keyboard;

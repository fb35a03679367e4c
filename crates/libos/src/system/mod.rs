//! Operating-system and kernel identification.
//!
//! Both providers compute their answer once per process (the sources are
//! files or system calls that do not change while we run) and hand out
//! `&'static` references afterwards.
//!
//! - **`os`** – distribution / product name, codename and version.
//! - **`kernel`** – kernel name and release.

pub mod kernel;
pub mod os;

pub use kernel::KernelInfo;
pub use os::OsInfo;

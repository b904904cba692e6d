//! Filesystem primitives used by the reorganizer.
//! Each helper performs exactly one filesystem mutation and returns the raw
//! `io::Error`; the reorganizer decides which error kind it becomes.

mod atomic;
mod metadata;
mod temp;
#[cfg(unix)]
mod util;

pub use atomic::rename_entry;
pub use metadata::restore_mtime;
pub use temp::create_temp_sibling;

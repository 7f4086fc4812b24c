//! Change detection for watched files.

mod mtime;

pub use mtime::{get_mtime, has_changed};

//! Pure, deterministic logic for workbench commands.

pub mod diff;
pub mod status;
pub mod trace;
pub mod types;

//! I/O helpers for workbench commands.

pub mod config;
pub mod hash;
pub mod jar;
pub mod layout;
pub mod manifest;
pub mod process;

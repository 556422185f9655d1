//! Core module hosting configuration and global logging utilities.
pub mod config;
pub mod plugin;

pub use plugin::CorePlugin;

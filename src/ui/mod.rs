// src/ui/mod.rs
//
// Screen-space overlays: entry screen, tooltip, help button, and the portfolio panels.

pub mod components;
pub mod content;
pub mod plugin;
pub mod systems;

pub use plugin::UiPlugin;

//! Interaction module: hover resolution, modal arbitration, and the entry gate.
pub mod components;
pub mod events;
pub mod hover;
pub mod modal;
pub mod plugin;
pub mod systems;

pub use plugin::InteractionPlugin;

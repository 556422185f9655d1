//! Character module binding idle/wave animation and the wave cue state machine.
pub mod components;
pub mod cue;
pub mod plugin;
pub mod systems;

pub use plugin::CharacterPlugin;

//! Scene module loading the room model and resolving hot objects by node name.
pub mod components;
pub mod errors;
pub mod events;
pub mod plugin;
pub mod systems;

pub use plugin::ScenePlugin;

//! Camera module housing the isometric orbit rig and its input systems.
pub mod components;
pub mod plugin;
pub mod rig;
pub mod systems;

pub use plugin::CameraPlugin;

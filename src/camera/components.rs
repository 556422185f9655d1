//! Components used by the camera module.
use bevy::prelude::*;

/// Marker component for the orthographic room camera.
#[derive(Component, Debug, Default)]
pub struct RoomCamera;

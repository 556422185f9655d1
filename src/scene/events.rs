//! Messages emitted while the room model loads.
use bevy::prelude::*;

use crate::scene::errors::SceneError;

/// Written once when the room model stops loading, either way.
#[derive(Message, Debug, Clone)]
pub enum RoomModelSettled {
    Loaded {
        scene: Handle<Scene>,
        clip_count: usize,
    },
    Failed(SceneError),
}

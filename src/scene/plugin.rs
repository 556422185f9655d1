//! ScenePlugin coordinates model loading, the placeholder fallback, and hot object tagging.
use bevy::prelude::*;

use crate::scene::{
    components::{HotObjectRegistry, RoomLoadStatus},
    events::RoomModelSettled,
    systems::{
        apply_room_model, finish_room_spawn, poll_room_model, setup_room_scene, tag_hot_objects,
    },
};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        info!("ScenePlugin registered");

        app.init_resource::<RoomLoadStatus>()
            .init_resource::<HotObjectRegistry>()
            .add_message::<RoomModelSettled>()
            .add_systems(Startup, setup_room_scene)
            .add_systems(
                Update,
                (
                    poll_room_model,
                    apply_room_model,
                    tag_hot_objects,
                    finish_room_spawn,
                )
                    .chain(),
            );
    }
}

//! Components and resources for the room scene bootstrap.
use std::collections::HashMap;

use bevy::{gltf::Gltf, prelude::*};

use crate::interaction::hover::HotObjectKind;

/// Marker for the red cube shown until the room model replaces it.
#[derive(Component, Debug, Default)]
pub struct PlaceholderCube;

/// Marker for the spawned room scene root.
#[derive(Component, Debug, Default)]
pub struct RoomScene;

/// Handles to the glTF files the scene depends on.
#[derive(Resource, Debug, Clone)]
pub struct RoomAssets {
    pub room: Handle<Gltf>,
    pub idle: Handle<Gltf>,
}

/// Progress of the room model from request to spawned scene.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomLoadStatus {
    #[default]
    Loading,
    /// Model parsed and scene spawn requested.
    Spawning,
    /// Scene instance spawned; hot objects resolved.
    Ready,
    /// Model failed; the placeholder cube stays.
    Failed,
}

impl RoomLoadStatus {
    /// The entry control unlocks on success and failure alike.
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Hot objects resolved in the spawned room, by identity.
#[derive(Resource, Debug, Default)]
pub struct HotObjectRegistry {
    entities: HashMap<HotObjectKind, Entity>,
}

impl HotObjectRegistry {
    /// Registers a node. The first match for a kind wins.
    pub fn register(&mut self, kind: HotObjectKind, entity: Entity) -> bool {
        if self.entities.contains_key(&kind) {
            return false;
        }
        self.entities.insert(kind, entity);
        true
    }

    pub fn get(&self, kind: HotObjectKind) -> Option<Entity> {
        self.entities.get(&kind).copied()
    }

    /// Kinds with no node in the scene, in priority order.
    pub fn missing(&self) -> Vec<HotObjectKind> {
        HotObjectKind::ALL
            .into_iter()
            .filter(|kind| !self.entities.contains_key(kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }
}

//! Systems for loading the room model and resolving its hot objects.
use bevy::{
    asset::LoadState,
    ecs::message::{MessageReader, MessageWriter},
    gltf::Gltf,
    prelude::*,
    scene::{SceneInstance, SceneSpawner},
};

use crate::{
    core::config::{CueSettings, SceneSettings},
    interaction::hover::HotObject,
    scene::{
        components::{HotObjectRegistry, PlaceholderCube, RoomAssets, RoomLoadStatus, RoomScene},
        errors::SceneError,
        events::RoomModelSettled,
    },
};

const LIGHT_POSITION: Vec3 = Vec3::new(3.0, 4.0, -1.0);
const PLACEHOLDER_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
const POINT_LIGHT_COLOR: Color = Color::srgb_u8(0xff, 0x90, 0x00);

/// Spawns lights and the placeholder cube, and requests the glTF files.
pub fn setup_room_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    scene_settings: Res<SceneSettings>,
    cue_settings: Res<CueSettings>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 500.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Key Light"),
    ));

    commands.spawn((
        PointLight {
            color: POINT_LIGHT_COLOR,
            intensity: 400_000.0,
            range: 100.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(LIGHT_POSITION),
        Name::new("Warm Light"),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: PLACEHOLDER_COLOR,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.5, 0.0),
        PlaceholderCube,
        Name::new("Placeholder Cube"),
    ));

    commands.insert_resource(RoomAssets {
        room: asset_server.load(scene_settings.room_model.clone()),
        idle: asset_server.load(cue_settings.idle_model.clone()),
    });

    info!("Requested room model '{}'", scene_settings.room_model);
}

/// Watches the room model's load state and reports once it settles.
pub fn poll_room_model(
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    assets: Option<Res<RoomAssets>>,
    settings: Res<SceneSettings>,
    status: Res<RoomLoadStatus>,
    mut settled: MessageWriter<RoomModelSettled>,
) {
    if *status != RoomLoadStatus::Loading {
        return;
    }
    let Some(assets) = assets else {
        return;
    };

    match asset_server.get_load_state(assets.room.id()) {
        Some(LoadState::Loaded) => {
            let Some(gltf) = gltfs.get(&assets.room) else {
                return;
            };
            let message = match gltf
                .default_scene
                .clone()
                .or_else(|| gltf.scenes.first().cloned())
            {
                Some(scene) => RoomModelSettled::Loaded {
                    scene,
                    clip_count: gltf.animations.len(),
                },
                None => RoomModelSettled::Failed(SceneError::asset_load(
                    &settings.room_model,
                    "model contains no scenes",
                )),
            };
            settled.write(message);
        }
        Some(LoadState::Failed(err)) => {
            settled.write(RoomModelSettled::Failed(SceneError::asset_load(
                &settings.room_model,
                err,
            )));
        }
        _ => {}
    }
}

/// Spawns the room scene over the placeholder, or keeps the placeholder on failure.
pub fn apply_room_model(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    mut settled: MessageReader<RoomModelSettled>,
    mut status: ResMut<RoomLoadStatus>,
    mut placeholder: Query<&mut Visibility, With<PlaceholderCube>>,
) {
    for message in settled.read() {
        if *status != RoomLoadStatus::Loading {
            continue;
        }
        match message {
            RoomModelSettled::Loaded { scene, clip_count } => {
                commands.spawn((SceneRoot(scene.clone()), RoomScene, Name::new("Room Scene")));
                for mut visibility in placeholder.iter_mut() {
                    *visibility = Visibility::Hidden;
                }
                *status = RoomLoadStatus::Spawning;
                info!(
                    "Room model '{}' loaded ({} animation clips)",
                    settings.room_model, clip_count
                );
            }
            RoomModelSettled::Failed(err) => {
                warn!("{}", err);
                warn!(
                    "Place the room model at assets/{} to replace the placeholder",
                    settings.room_model
                );
                *status = RoomLoadStatus::Failed;
            }
        }
    }
}

/// Tags newly spawned scene nodes whose names match a configured hot object.
pub fn tag_hot_objects(
    mut commands: Commands,
    status: Res<RoomLoadStatus>,
    settings: Res<SceneSettings>,
    mut registry: ResMut<HotObjectRegistry>,
    named: Query<(Entity, &Name), Added<Name>>,
) {
    if !matches!(*status, RoomLoadStatus::Spawning | RoomLoadStatus::Ready) {
        return;
    }

    for (entity, name) in named.iter() {
        let Some(kind) = settings.kind_for_node(name.as_str()) else {
            continue;
        };
        if registry.register(kind, entity) {
            commands.entity(entity).insert(HotObject(kind));
            debug!("Hot object '{}' bound to node '{}'", kind.key(), name);
        }
    }
}

/// Sorted, de-duplicated node names joined for a single log line.
pub fn node_listing<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_unstable();
    names.dedup();
    names.join(", ")
}

/// Marks the room ready once its scene instance has spawned and reports absent hot objects.
pub fn finish_room_spawn(
    scene_spawner: Res<SceneSpawner>,
    settings: Res<SceneSettings>,
    registry: Res<HotObjectRegistry>,
    rooms: Query<&SceneInstance, With<RoomScene>>,
    names: Query<&Name>,
    mut status: ResMut<RoomLoadStatus>,
) {
    if *status != RoomLoadStatus::Spawning {
        return;
    }
    let Ok(instance) = rooms.single() else {
        return;
    };
    if !scene_spawner.instance_is_ready(**instance) {
        return;
    }

    debug!(
        "Room nodes: {}",
        node_listing(
            scene_spawner
                .iter_instance_entities(**instance)
                .filter_map(|entity| names.get(entity).ok())
                .map(Name::as_str)
        )
    );

    for kind in registry.missing() {
        warn!("{}", SceneError::missing_node(kind, settings.node_name(kind)));
    }

    *status = RoomLoadStatus::Ready;
    info!("Room scene ready with {} hot objects", registry.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PortfolioSettings;

    fn settle_app(message: RoomModelSettled) -> App {
        let mut app = App::new();
        app.insert_resource(PortfolioSettings::default().scene)
            .insert_resource(RoomLoadStatus::Loading)
            .add_message::<RoomModelSettled>()
            .add_systems(Update, apply_room_model);
        app.world_mut()
            .spawn((PlaceholderCube, Visibility::Inherited));
        app.world_mut()
            .resource_mut::<Messages<RoomModelSettled>>()
            .write(message);
        app
    }

    fn placeholder_visibility(app: &mut App) -> Visibility {
        let mut query = app
            .world_mut()
            .query_filtered::<&Visibility, With<PlaceholderCube>>();
        *query.single(app.world()).expect("one placeholder")
    }

    #[test]
    fn failed_model_keeps_placeholder_visible() {
        let mut app = settle_app(RoomModelSettled::Failed(SceneError::asset_load(
            "models/room.glb",
            "file not found",
        )));
        app.update();

        assert_eq!(*app.world().resource::<RoomLoadStatus>(), RoomLoadStatus::Failed);
        assert_eq!(placeholder_visibility(&mut app), Visibility::Inherited);
        let mut rooms = app.world_mut().query_filtered::<Entity, With<RoomScene>>();
        assert_eq!(rooms.iter(app.world()).count(), 0);
    }

    #[test]
    fn loaded_model_replaces_placeholder() {
        let mut app = settle_app(RoomModelSettled::Loaded {
            scene: Handle::default(),
            clip_count: 3,
        });
        app.update();

        assert_eq!(
            *app.world().resource::<RoomLoadStatus>(),
            RoomLoadStatus::Spawning
        );
        assert_eq!(placeholder_visibility(&mut app), Visibility::Hidden);
        let mut rooms = app.world_mut().query_filtered::<Entity, With<RoomScene>>();
        assert_eq!(rooms.iter(app.world()).count(), 1);
    }

    #[test]
    fn node_listing_is_sorted_and_unique() {
        assert_eq!(
            node_listing(["Trophy", "Character", "Map", "Trophy"]),
            "Character, Map, Trophy"
        );
        assert_eq!(node_listing(std::iter::empty()), "");
    }
}

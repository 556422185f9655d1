//! Systems binding the idle/wave clips and driving the wave cue.
use bevy::{asset::LoadState, ecs::message::MessageReader, gltf::Gltf, prelude::*};

use crate::{
    character::{
        components::{CharacterAnimator, CharacterBinding},
        cue::{CueCommand, WaveCue},
    },
    core::config::{CueSettings, SceneSettings},
    interaction::{events::WaveRequested, hover::HotObjectKind},
    scene::{
        components::{HotObjectRegistry, RoomAssets, RoomLoadStatus},
        errors::{ClipRole, SceneError},
    },
};

/// Picks the animation player that drives the character.
///
/// Prefers the character node itself, then its nearest animated ancestor,
/// then any player in the scene.
pub fn choose_player(
    players: &[Entity],
    character: Option<Entity>,
    ancestors: impl Fn(Entity) -> Vec<Entity>,
) -> Option<Entity> {
    if let Some(character) = character {
        if players.contains(&character) {
            return Some(character);
        }
        if let Some(found) = ancestors(character)
            .into_iter()
            .find(|ancestor| players.contains(ancestor))
        {
            return Some(found);
        }
    }
    players.first().copied()
}

/// Builds the animation graph once the room is ready and the idle model has settled.
#[allow(clippy::too_many_arguments)] // System function requires all arguments
pub fn bind_character_animation(
    mut commands: Commands,
    status: Res<RoomLoadStatus>,
    mut binding: ResMut<CharacterBinding>,
    assets: Option<Res<RoomAssets>>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    clips: Res<Assets<AnimationClip>>,
    settings: Res<CueSettings>,
    scene_settings: Res<SceneSettings>,
    registry: Res<HotObjectRegistry>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut players: Query<(Entity, &mut AnimationPlayer)>,
    parents: Query<&ChildOf>,
) {
    if *binding != CharacterBinding::Pending {
        return;
    }

    match *status {
        RoomLoadStatus::Failed => {
            *binding = CharacterBinding::Disabled;
            debug!("Character cues disabled: room model unavailable");
            return;
        }
        RoomLoadStatus::Loading | RoomLoadStatus::Spawning => return,
        RoomLoadStatus::Ready => {}
    }

    let Some(assets) = assets else {
        return;
    };

    let idle_gltf = match asset_server.get_load_state(assets.idle.id()) {
        Some(LoadState::Loaded) => gltfs.get(&assets.idle),
        Some(LoadState::Failed(err)) => {
            warn!("{}", SceneError::asset_load(&settings.idle_model, err));
            None
        }
        _ => return,
    };

    let idle_clip = idle_gltf.and_then(|gltf| gltf.animations.get(settings.idle_clip_index).cloned());
    let wave_clip = gltfs
        .get(&assets.room)
        .and_then(|gltf| gltf.animations.get(settings.wave_clip_index).cloned());

    if idle_clip.is_none() {
        warn!(
            "{}",
            SceneError::missing_clip(ClipRole::Idle, &settings.idle_model, settings.idle_clip_index)
        );
    }
    if wave_clip.is_none() {
        warn!(
            "{}",
            SceneError::missing_clip(
                ClipRole::Wave,
                &scene_settings.room_model,
                settings.wave_clip_index
            )
        );
    }
    if idle_clip.is_none() && wave_clip.is_none() {
        *binding = CharacterBinding::Disabled;
        return;
    }

    let player_entities: Vec<Entity> = players.iter().map(|(entity, _)| entity).collect();
    let character = registry.get(HotObjectKind::Character);
    let Some(player_entity) = choose_player(&player_entities, character, |entity| {
        parents.iter_ancestors(entity).collect()
    }) else {
        warn!("{}", SceneError::MissingAnimationPlayer);
        *binding = CharacterBinding::Disabled;
        return;
    };

    let wave_duration = wave_clip
        .as_ref()
        .and_then(|handle| clips.get(handle))
        .map(|clip| clip.duration())
        .unwrap_or(0.0);

    let mut graph = AnimationGraph::new();
    let idle = idle_clip.map(|clip| graph.add_clip(clip, 1.0, graph.root));
    let wave = wave_clip.map(|clip| graph.add_clip(clip, 1.0, graph.root));

    let mut transitions = AnimationTransitions::new();
    if let (Some(idle), Ok((_, mut player))) = (idle, players.get_mut(player_entity)) {
        transitions
            .play(&mut player, idle, std::time::Duration::ZERO)
            .repeat();
    }

    commands
        .entity(player_entity)
        .insert((AnimationGraphHandle(graphs.add(graph)), transitions));

    let cue = match (idle, wave) {
        (Some(_), Some(_)) => Some(WaveCue::new(
            wave_duration,
            settings.fade_to_wave_seconds,
            settings.fade_to_idle_seconds,
        )),
        _ => None,
    };

    info!(
        "Character animation bound (idle: {}, wave: {}, wave length {:.2}s)",
        idle.is_some(),
        wave.is_some(),
        wave_duration
    );

    commands.insert_resource(CharacterAnimator {
        player: player_entity,
        idle,
        wave,
        cue,
    });
    *binding = CharacterBinding::Bound;
}

/// Starts the wave when requested. Requests during an active wave are ignored.
pub fn trigger_wave_cue(
    mut requests: MessageReader<WaveRequested>,
    animator: Option<ResMut<CharacterAnimator>>,
    mut players: Query<(&mut AnimationPlayer, &mut AnimationTransitions)>,
) {
    let Some(mut animator) = animator else {
        requests.clear();
        return;
    };

    for request in requests.read() {
        let Some(cue) = animator.cue.as_mut() else {
            continue;
        };
        match cue.trigger() {
            Some(command) => {
                debug!("Wave cue triggered ({:?})", request.reason);
                apply_cue_command(command, &animator, &mut players);
            }
            None => debug!(
                "Wave cue busy ({:?}); ignoring {:?}",
                cue.phase(),
                request.reason
            ),
        }
    }
}

/// Advances the wave cue by frame time and applies any cross-fade it emits.
pub fn advance_wave_cue(
    time: Res<Time>,
    animator: Option<ResMut<CharacterAnimator>>,
    mut players: Query<(&mut AnimationPlayer, &mut AnimationTransitions)>,
) {
    let Some(mut animator) = animator else {
        return;
    };
    let Some(command) = animator
        .cue
        .as_mut()
        .and_then(|cue| cue.tick(time.delta_secs()))
    else {
        return;
    };
    apply_cue_command(command, &animator, &mut players);
}

fn apply_cue_command(
    command: CueCommand,
    animator: &CharacterAnimator,
    players: &mut Query<(&mut AnimationPlayer, &mut AnimationTransitions)>,
) {
    let Ok((mut player, mut transitions)) = players.get_mut(animator.player) else {
        return;
    };

    match (command, animator.idle, animator.wave) {
        (CueCommand::PlayWave { fade }, _, Some(wave)) => {
            transitions.play(&mut player, wave, fade).replay();
        }
        (CueCommand::ReturnToIdle { fade }, Some(idle), _) => {
            transitions.play(&mut player, idle, fade).repeat();
        }
        _ => {}
    }
}

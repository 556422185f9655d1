//! CharacterPlugin wires animation binding and the wave cue.
use bevy::prelude::*;

use crate::{
    character::{
        components::CharacterBinding,
        systems::{advance_wave_cue, bind_character_animation, trigger_wave_cue},
    },
    scene::systems::finish_room_spawn,
};

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        info!("CharacterPlugin registered");

        app.init_resource::<CharacterBinding>().add_systems(
            Update,
            (
                bind_character_animation.after(finish_room_spawn),
                trigger_wave_cue.after(bind_character_animation),
                advance_wave_cue.after(trigger_wave_cue),
            ),
        );
    }
}

//! Resources binding the character's animation player to the wave cue.
use bevy::prelude::*;

use super::cue::WaveCue;

/// Whether the character animation has been wired up yet.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterBinding {
    #[default]
    Pending,
    Bound,
    /// Model, clips, or player missing. Cues are dropped.
    Disabled,
}

/// Animation graph nodes on the character's player, plus the wave cue.
#[derive(Resource, Debug)]
pub struct CharacterAnimator {
    pub player: Entity,
    pub idle: Option<AnimationNodeIndex>,
    pub wave: Option<AnimationNodeIndex>,
    /// Present only when both idle and wave clips exist.
    pub cue: Option<WaveCue>,
}

//! Non-fatal failures surfaced while bootstrapping the room scene.
use std::fmt;

use crate::interaction::hover::HotObjectKind;

/// Which animation a missing clip was meant to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipRole {
    Idle,
    Wave,
}

impl fmt::Display for ClipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Wave => "wave",
        };
        write!(f, "{}", label)
    }
}

/// Scene bootstrap failures. All of them degrade a feature instead of aborting.
#[derive(Debug, Clone)]
pub enum SceneError {
    AssetLoad { path: String, reason: String },
    MissingNode { object: HotObjectKind, node: String },
    MissingClip { role: ClipRole, path: String, index: usize },
    MissingAnimationPlayer,
}

impl SceneError {
    pub fn asset_load(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn missing_node(object: HotObjectKind, node: impl Into<String>) -> Self {
        Self::MissingNode {
            object,
            node: node.into(),
        }
    }

    pub fn missing_clip(role: ClipRole, path: impl Into<String>, index: usize) -> Self {
        Self::MissingClip {
            role,
            path: path.into(),
            index,
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoad { path, reason } => {
                write!(f, "failed to load {}: {}", path, reason)
            }
            Self::MissingNode { object, node } => write!(
                f,
                "hot object '{}' not found (node '{}'); interaction disabled",
                object.key(),
                node
            ),
            Self::MissingClip { role, path, index } => write!(
                f,
                "{} clip #{} missing from {}; wave cue disabled",
                role, index, path
            ),
            Self::MissingAnimationPlayer => {
                write!(f, "room scene has no animation player; character cues disabled")
            }
        }
    }
}

impl std::error::Error for SceneError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_degraded_feature() {
        let load = SceneError::asset_load("models/room.glb", "file not found");
        assert!(load.to_string().contains("models/room.glb"));
        assert!(load.to_string().contains("file not found"));

        let node = SceneError::missing_node(HotObjectKind::Mic, "macbook");
        assert!(node.to_string().contains("'mic'"));
        assert!(node.to_string().contains("macbook"));

        let clip = SceneError::missing_clip(ClipRole::Idle, "models/character_idle.glb", 0);
        assert!(clip.to_string().starts_with("idle clip #0"));

        assert!(SceneError::MissingAnimationPlayer
            .to_string()
            .contains("disabled"));
    }
}

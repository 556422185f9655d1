//! Runtime configuration loaded from `config/portfolio.toml`.
use std::{
    collections::HashMap,
    f32::consts::{FRAC_PI_3, FRAC_PI_6, PI},
    fs,
    path::Path,
};

use bevy::prelude::*;
use serde::Deserialize;

use crate::interaction::hover::HotObjectKind;

const CONFIG_PATH: &str = "config/portfolio.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawPortfolioConfig {
    #[serde(default)]
    camera: RawCameraSection,
    #[serde(default)]
    hover: RawHoverSection,
    #[serde(default)]
    character: RawCharacterSection,
    #[serde(default)]
    scene: RawSceneSection,
    #[serde(default)]
    panels: RawPanelSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCameraSection {
    start_position: [f32; 3],
    target: [f32; 3],
    distance: f32,
    polar_angle_fraction: f32,
    min_azimuth_degrees: f32,
    max_azimuth_degrees: f32,
    drag_sensitivity: f32,
    return_base: f32,
    return_epsilon: f32,
    view_size: f32,
    zoomed_view_size: f32,
    min_view_size: f32,
    max_view_size: f32,
    zoom_speed: f32,
    scroll_step: f32,
}

impl Default for RawCameraSection {
    fn default() -> Self {
        Self {
            start_position: [15.0, 15.0, 15.0],
            target: [1.0, 1.0, -5.0],
            distance: 20.0,
            polar_angle_fraction: 0.35,
            min_azimuth_degrees: FRAC_PI_6.to_degrees(),
            max_azimuth_degrees: FRAC_PI_3.to_degrees(),
            drag_sensitivity: 0.005,
            return_base: 0.02,
            return_epsilon: 0.001,
            view_size: 4.5,
            zoomed_view_size: 2.5,
            min_view_size: 2.5,
            max_view_size: 6.0,
            zoom_speed: 3.0,
            scroll_step: 0.25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHoverSection {
    hold_seconds: f32,
    tooltip_offset_px: f32,
}

impl Default for RawHoverSection {
    fn default() -> Self {
        Self {
            hold_seconds: 0.5,
            tooltip_offset_px: 15.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCharacterSection {
    idle_model: String,
    idle_clip_index: usize,
    wave_clip_index: usize,
    fade_to_wave_seconds: f32,
    fade_to_idle_seconds: f32,
}

impl Default for RawCharacterSection {
    fn default() -> Self {
        Self {
            idle_model: "models/character_idle.glb".to_string(),
            idle_clip_index: 0,
            wave_clip_index: 0,
            fade_to_wave_seconds: 0.3,
            fade_to_idle_seconds: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSceneSection {
    room_model: String,
    background: [f32; 3],
    node_names: HashMap<String, String>,
}

impl Default for RawSceneSection {
    fn default() -> Self {
        Self {
            room_model: "models/room.glb".to_string(),
            background: [0.125, 0.125, 0.125],
            node_names: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPanelSection {
    map_loading_seconds: f32,
    map_reset_seconds: f32,
    entry_fade_seconds: f32,
    content_path: String,
}

impl Default for RawPanelSection {
    fn default() -> Self {
        Self {
            map_loading_seconds: 1.5,
            map_reset_seconds: 0.5,
            entry_fade_seconds: 0.8,
            content_path: "assets/content/portfolio.json".to_string(),
        }
    }
}

/// Orbit rig and projection tunables.
#[derive(Resource, Debug, Clone)]
pub struct CameraSettings {
    pub target: Vec3,
    pub distance: f32,
    pub polar_angle: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    /// Azimuth of the configured start position around the target.
    pub rest_azimuth: f32,
    pub drag_sensitivity: f32,
    pub return_base: f32,
    pub return_epsilon: f32,
    pub view_size: f32,
    pub zoomed_view_size: f32,
    pub min_view_size: f32,
    pub max_view_size: f32,
    pub zoom_speed: f32,
    pub scroll_step: f32,
}

/// Hover resolver tunables.
#[derive(Resource, Debug, Clone)]
pub struct HoverSettings {
    pub hold_seconds: f32,
    pub tooltip_offset_px: f32,
}

/// Character animation cue tunables.
#[derive(Resource, Debug, Clone)]
pub struct CueSettings {
    pub idle_model: String,
    pub idle_clip_index: usize,
    pub wave_clip_index: usize,
    pub fade_to_wave_seconds: f32,
    pub fade_to_idle_seconds: f32,
}

/// Scene bootstrap tunables.
#[derive(Resource, Debug, Clone)]
pub struct SceneSettings {
    pub room_model: String,
    pub background: Color,
    node_names: HashMap<HotObjectKind, String>,
}

impl SceneSettings {
    /// Node name looked up in the room scene for a hot object.
    pub fn node_name(&self, kind: HotObjectKind) -> &str {
        self.node_names
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_node_name())
    }

    /// Resolves a scene node name back to the hot object it represents.
    pub fn kind_for_node(&self, name: &str) -> Option<HotObjectKind> {
        HotObjectKind::ALL
            .into_iter()
            .find(|kind| self.node_name(*kind) == name)
    }
}

/// Panel timing and content location.
#[derive(Resource, Debug, Clone)]
pub struct PanelSettings {
    pub map_loading_seconds: f32,
    pub map_reset_seconds: f32,
    pub entry_fade_seconds: f32,
    pub content_path: String,
}

/// Every settings resource derived from the config file.
#[derive(Debug, Clone)]
pub struct PortfolioSettings {
    pub camera: CameraSettings,
    pub hover: HoverSettings,
    pub cue: CueSettings,
    pub scene: SceneSettings,
    pub panels: PanelSettings,
}

impl PortfolioSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_or_default(&data),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawPortfolioConfig::default().into()
            }
        }
    }

    fn from_toml_or_default(data: &str) -> Self {
        match toml::from_str::<RawPortfolioConfig>(data) {
            Ok(raw) => raw.into(),
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawPortfolioConfig::default().into()
            }
        }
    }
}

impl Default for PortfolioSettings {
    fn default() -> Self {
        RawPortfolioConfig::default().into()
    }
}

impl From<RawPortfolioConfig> for PortfolioSettings {
    fn from(value: RawPortfolioConfig) -> Self {
        Self {
            camera: value.camera.into(),
            hover: HoverSettings {
                hold_seconds: value.hover.hold_seconds.max(0.0),
                tooltip_offset_px: value.hover.tooltip_offset_px,
            },
            cue: CueSettings {
                idle_model: value.character.idle_model,
                idle_clip_index: value.character.idle_clip_index,
                wave_clip_index: value.character.wave_clip_index,
                fade_to_wave_seconds: value.character.fade_to_wave_seconds.max(0.0),
                fade_to_idle_seconds: value.character.fade_to_idle_seconds.max(0.0),
            },
            scene: value.scene.into(),
            panels: PanelSettings {
                map_loading_seconds: value.panels.map_loading_seconds.max(0.0),
                map_reset_seconds: value.panels.map_reset_seconds.max(0.0),
                entry_fade_seconds: value.panels.entry_fade_seconds.max(0.0),
                content_path: value.panels.content_path,
            },
        }
    }
}

impl From<RawCameraSection> for CameraSettings {
    fn from(value: RawCameraSection) -> Self {
        let min = value.min_azimuth_degrees.to_radians();
        let max = value.max_azimuth_degrees.to_radians();
        let (min_azimuth, max_azimuth) = (min.min(max), min.max(max));

        let target = Vec3::from_array(value.target);
        let offset = Vec3::from_array(value.start_position) - target;
        let rest_azimuth = offset.x.atan2(offset.z).clamp(min_azimuth, max_azimuth);

        let min_view_size = value.min_view_size.max(0.1);
        let max_view_size = value.max_view_size.max(min_view_size);

        Self {
            target,
            distance: value.distance.max(0.1),
            polar_angle: (value.polar_angle_fraction * PI).clamp(0.01, PI - 0.01),
            min_azimuth,
            max_azimuth,
            rest_azimuth,
            drag_sensitivity: value.drag_sensitivity.max(0.0),
            return_base: value.return_base.clamp(f32::EPSILON, 1.0 - f32::EPSILON),
            return_epsilon: value.return_epsilon.max(f32::EPSILON),
            view_size: value.view_size.clamp(min_view_size, max_view_size),
            zoomed_view_size: value.zoomed_view_size.clamp(min_view_size, max_view_size),
            min_view_size,
            max_view_size,
            zoom_speed: value.zoom_speed.max(0.0),
            scroll_step: value.scroll_step.max(0.0),
        }
    }
}

impl From<RawSceneSection> for SceneSettings {
    fn from(value: RawSceneSection) -> Self {
        let mut node_names = HashMap::new();
        for (key, node) in value.node_names {
            match HotObjectKind::from_key(&key) {
                Some(kind) => {
                    node_names.insert(kind, node);
                }
                None => warn!("Ignoring node name for unknown hot object '{}'", key),
            }
        }

        let [r, g, b] = value.background;
        Self {
            room_model: value.room_model,
            background: Color::srgb(r, g, b),
            node_names,
        }
    }
}

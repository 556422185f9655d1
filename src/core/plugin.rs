//! CorePlugin loads configuration and wires global logging utilities.
use bevy::prelude::*;
#[cfg(feature = "interaction_debug")]
use bevy::time::TimerMode;

use super::config::{CameraSettings, PortfolioSettings, SceneSettings};
#[cfg(feature = "interaction_debug")]
use crate::{
    camera::rig::OrbitRig,
    interaction::{hover::HoverState, modal::ModalState},
};

#[cfg(feature = "interaction_debug")]
#[derive(Resource)]
struct DebugDumpTimer {
    timer: Timer,
}

#[cfg(feature = "interaction_debug")]
impl Default for DebugDumpTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Registers the settings resources every other plugin reads.
#[derive(Debug, Clone, Default)]
pub struct CorePlugin {
    settings: Option<PortfolioSettings>,
}

impl CorePlugin {
    /// Uses the provided settings instead of reading the config file.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_settings(settings: PortfolioSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let settings = self
            .settings
            .clone()
            .unwrap_or_else(PortfolioSettings::load_or_default);

        app.insert_resource(ClearColor(settings.scene.background))
            .insert_resource(settings.camera)
            .insert_resource(settings.hover)
            .insert_resource(settings.cue)
            .insert_resource(settings.scene)
            .insert_resource(settings.panels)
            .add_systems(Startup, log_startup_settings);

        #[cfg(feature = "interaction_debug")]
        {
            app.insert_resource(DebugDumpTimer::default())
                .add_systems(Update, log_interaction_state);
        }
    }
}

fn log_startup_settings(camera: Res<CameraSettings>, scene: Res<SceneSettings>) {
    info!(
        "CorePlugin initialised: room '{}', azimuth arc [{:.3}, {:.3}] rad, rest {:.3} rad",
        scene.room_model, camera.min_azimuth, camera.max_azimuth, camera.rest_azimuth
    );
}

#[cfg(feature = "interaction_debug")]
fn log_interaction_state(
    mut timer: ResMut<DebugDumpTimer>,
    time: Res<Time>,
    hover: Res<HoverState>,
    modal: Res<ModalState>,
    rig: Res<OrbitRig>,
) {
    if timer.timer.tick(time.delta()).just_finished() {
        info!(
            target: "interaction_debug",
            "hover: {:?} | panel: {:?} | cheatsheet: {} | azimuth: {:.4} | returning: {}",
            hover.current(),
            modal.active(),
            modal.is_cheatsheet_open(),
            rig.azimuth(),
            rig.is_returning(),
        );
    }
}

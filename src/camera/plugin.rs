//! CameraPlugin wires the orbit rig resources and camera input.
use bevy::prelude::*;

use crate::{
    camera::{
        rig::{OrbitRig, ZoomState},
        systems::{
            advance_camera_rig, apply_camera_rig, focus_zoom_input, orbit_drag_input,
            scroll_zoom_input, spawn_room_camera,
        },
    },
    core::config::{CameraSettings, PortfolioSettings},
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        let settings = match app.world().get_resource::<CameraSettings>() {
            Some(settings) => settings.clone(),
            None => {
                warn!("CameraSettings missing; register CorePlugin before CameraPlugin");
                let defaults = PortfolioSettings::default().camera;
                app.insert_resource(defaults.clone());
                defaults
            }
        };

        info!(
            "CameraPlugin registered: rest azimuth {:.3} rad, view size {:.2}",
            settings.rest_azimuth, settings.view_size
        );

        app.insert_resource(OrbitRig::new(&settings))
            .insert_resource(ZoomState::new(&settings))
            .add_systems(Startup, spawn_room_camera)
            .add_systems(
                Update,
                (
                    (orbit_drag_input, scroll_zoom_input, focus_zoom_input),
                    advance_camera_rig,
                    apply_camera_rig,
                )
                    .chain(),
            );
    }
}

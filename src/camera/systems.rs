//! Systems for the camera module.
use bevy::{
    camera::ScalingMode,
    ecs::message::MessageReader,
    input::{
        mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
        ButtonInput,
    },
    prelude::*,
};

use crate::{
    camera::{
        components::RoomCamera,
        rig::{OrbitRig, ZoomState},
    },
    core::config::CameraSettings,
    interaction::{components::EntryGate, modal::ModalState, systems::pointer_over_ui},
};

const FOCUS_ZOOM_KEY: KeyCode = KeyCode::KeyZ;
const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

/// Spawns the orthographic camera at the rest azimuth.
pub fn spawn_room_camera(
    mut commands: Commands,
    settings: Res<CameraSettings>,
    rig: Res<OrbitRig>,
    zoom: Res<ZoomState>,
) {
    let eye = rig.eye(settings.target, settings.distance, settings.polar_angle);
    let transform = Transform::from_translation(eye).looking_at(settings.target, Vec3::Y);

    commands.spawn((
        Camera3d::default(),
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: zoom.view_size() * 2.0,
            },
            near: 0.1,
            far: 1000.0,
            ..OrthographicProjection::default_3d()
        }),
        transform,
        RoomCamera,
        Name::new("Room Camera"),
    ));
}

/// Left-drag rotates the rig horizontally. Disabled before entry, while a
/// panel is open, or when the press lands on an overlay.
pub fn orbit_drag_input(
    mut motion_events: MessageReader<MouseMotion>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    settings: Res<CameraSettings>,
    modal: Res<ModalState>,
    gate: Res<EntryGate>,
    ui_nodes: Query<&Interaction>,
    mut rig: ResMut<OrbitRig>,
) {
    let mut cumulative_delta = Vec2::ZERO;
    for ev in motion_events.read() {
        cumulative_delta += ev.delta;
    }

    if mouse_buttons.just_pressed(MouseButton::Left) && gate.is_entered() {
        if !modal.any_popup_open() && !pointer_over_ui(&ui_nodes) {
            rig.begin_drag();
            debug!("Orbit drag started at azimuth {:.3}", rig.azimuth());
        }
    }

    if rig.is_dragging() && cumulative_delta.x != 0.0 {
        rig.drag_by(-cumulative_delta.x * settings.drag_sensitivity);
    }

    if mouse_buttons.just_released(MouseButton::Left) && rig.is_dragging() {
        rig.end_drag();
        debug!("Orbit drag released at azimuth {:.3}", rig.azimuth());
    }
}

/// Mouse wheel zooms the orthographic view within the configured limits.
pub fn scroll_zoom_input(
    mut wheel_events: MessageReader<MouseWheel>,
    settings: Res<CameraSettings>,
    modal: Res<ModalState>,
    gate: Res<EntryGate>,
    mut zoom: ResMut<ZoomState>,
) {
    let mut steps = 0.0;
    for ev in wheel_events.read() {
        steps += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_SCROLL_LINE,
        };
    }

    if steps == 0.0 || modal.any_popup_open() || !gate.is_entered() {
        return;
    }
    zoom.scroll(steps, settings.scroll_step);
}

/// Toggles the focus zoom once the visitor has entered.
pub fn focus_zoom_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gate: Res<EntryGate>,
    mut zoom: ResMut<ZoomState>,
) {
    if keyboard.just_pressed(FOCUS_ZOOM_KEY) && gate.is_entered() {
        zoom.toggle_focus();
        debug!("Focus zoom toggled (zoomed in: {})", zoom.is_zoomed_in());
    }
}

/// Advances the zoom animation and the auto-return. The return waits while zooming.
pub fn advance_camera_rig(
    time: Res<Time>,
    settings: Res<CameraSettings>,
    mut rig: ResMut<OrbitRig>,
    mut zoom: ResMut<ZoomState>,
) {
    let delta = time.delta_secs();

    if zoom.is_zooming() {
        zoom.step(delta);
        return;
    }

    if rig.is_returning()
        && !rig.step_return(delta, settings.return_base, settings.return_epsilon)
    {
        debug!("Camera settled at rest azimuth {:.3}", rig.rest_azimuth());
    }
}

/// Writes rig and zoom state onto the camera entity.
pub fn apply_camera_rig(
    settings: Res<CameraSettings>,
    rig: Res<OrbitRig>,
    zoom: Res<ZoomState>,
    mut camera: Query<(&mut Transform, &mut Projection), With<RoomCamera>>,
) {
    if !rig.is_changed() && !zoom.is_changed() {
        return;
    }

    let Ok((mut transform, mut projection)) = camera.single_mut() else {
        return;
    };

    let eye = rig.eye(settings.target, settings.distance, settings.polar_angle);
    *transform = Transform::from_translation(eye).looking_at(settings.target, Vec3::Y);

    if let Projection::Orthographic(ortho) = projection.as_mut() {
        ortho.scaling_mode = ScalingMode::FixedVertical {
            viewport_height: zoom.view_size() * 2.0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PortfolioSettings;

    fn input_app(gate: EntryGate) -> App {
        let settings = PortfolioSettings::default().camera;
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_message::<MouseMotion>()
            .add_message::<MouseWheel>()
            .insert_resource(OrbitRig::new(&settings))
            .insert_resource(ZoomState::new(&settings))
            .insert_resource(settings)
            .insert_resource(ModalState::default())
            .insert_resource(gate)
            .add_systems(
                Update,
                (orbit_drag_input, scroll_zoom_input, focus_zoom_input),
            );
        app
    }

    fn press_inputs(app: &mut App) {
        let world = app.world_mut();
        world
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(FOCUS_ZOOM_KEY);
        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
    }

    #[test]
    fn camera_input_is_inert_behind_entry_overlay() {
        let mut app = input_app(EntryGate::default());
        let rest_size = app.world().resource::<ZoomState>().view_size();
        press_inputs(&mut app);

        let zoom = app.world().resource::<ZoomState>();
        assert!(!zoom.is_zooming());
        assert_eq!(zoom.view_size(), rest_size);
        assert!(!app.world().resource::<OrbitRig>().is_dragging());
    }

    #[test]
    fn camera_input_responds_after_entry() {
        let mut gate = EntryGate::default();
        gate.enter();
        let mut app = input_app(gate);
        press_inputs(&mut app);

        assert!(app.world().resource::<ZoomState>().is_zooming());
        assert!(app.world().resource::<OrbitRig>().is_dragging());
    }
}

//! Systems resolving hover, clicks, and the Escape key against the modal state.
use bevy::{
    ecs::message::MessageWriter,
    input::ButtonInput,
    picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings},
    prelude::*,
    window::PrimaryWindow,
};

use crate::{
    camera::{components::RoomCamera, rig::ZoomState},
    interaction::{
        components::EntryGate,
        events::{WaveReason, WaveRequested},
        hover::{pointer_to_ndc, resolve_hover, HotObject, HotObjectKind, HoverState},
        modal::ModalState,
    },
};

/// Unprojects an NDC point into a world-space ray through the camera.
pub fn ray_from_ndc(camera: &Camera, camera_transform: &GlobalTransform, ndc: Vec2) -> Option<Ray3d> {
    let near = camera.ndc_to_world(camera_transform, ndc.extend(1.0))?;
    let far = camera.ndc_to_world(camera_transform, ndc.extend(f32::EPSILON))?;
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Scene hover runs only after entry, with no panel open and the camera not focused.
pub fn hover_enabled(modal: &ModalState, zoom: &ZoomState, gate: &EntryGate) -> bool {
    gate.is_entered() && !modal.any_popup_open() && !zoom.is_zoomed_in()
}

/// True when any UI node tracking the pointer (buttons, panel bodies) is under it.
pub fn pointer_over_ui<'a>(interactions: impl IntoIterator<Item = &'a Interaction>) -> bool {
    interactions
        .into_iter()
        .any(|interaction| *interaction != Interaction::None)
}

/// Walks from a hit mesh up to the nearest tagged hot object.
fn hot_object_for(
    entity: Entity,
    hot_objects: &Query<&HotObject>,
    parents: &Query<&ChildOf>,
) -> Option<HotObjectKind> {
    std::iter::once(entity)
        .chain(parents.iter_ancestors(entity))
        .find_map(|candidate| hot_objects.get(candidate).ok().map(|hot| hot.0))
}

/// Resolves the hover identity under the cursor.
///
/// No-op while a panel is open, while the camera is zoomed in, or before entry.
/// A pointer resting on an overlay clears the hover.
#[allow(clippy::too_many_arguments)] // System function requires all arguments
pub fn resolve_pointer_hover(
    window: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform), With<RoomCamera>>,
    modal: Res<ModalState>,
    zoom: Res<ZoomState>,
    gate: Res<EntryGate>,
    ui_nodes: Query<&Interaction>,
    hot_objects: Query<&HotObject>,
    parents: Query<&ChildOf>,
    mut ray_cast: MeshRayCast,
    mut hover: ResMut<HoverState>,
) {
    if !hover_enabled(&modal, &zoom, &gate) {
        return;
    }
    if pointer_over_ui(&ui_nodes) {
        if hover.current().is_some() {
            hover.clear();
        }
        return;
    }

    let Ok(window) = window.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };

    let Some(cursor) = window.cursor_position() else {
        if hover.current().is_some() {
            hover.clear();
        }
        return;
    };

    let next = pointer_to_ndc(cursor, window.size())
        .and_then(|ndc| ray_from_ndc(camera, camera_transform, ndc))
        .and_then(|ray| {
            let settings = MeshRayCastSettings::default().never_early_exit();
            let hits = ray_cast.cast_ray(ray, &settings);
            resolve_hover(
                hits.iter()
                    .filter_map(|(entity, _)| hot_object_for(*entity, &hot_objects, &parents)),
            )
        });

    if next == hover.current() && hover.pointer() == Some(cursor) {
        return;
    }

    let previous = hover.current();
    if hover.update(next, Some(cursor)) {
        debug!(
            "Hover changed: {:?} -> {:?}",
            previous.map(HotObjectKind::key),
            next.map(HotObjectKind::key)
        );
    }
}

/// Fires the wave once the pointer has rested on the character long enough.
pub fn tick_hover_hold(
    time: Res<Time>,
    mut hover: ResMut<HoverState>,
    mut wave_writer: MessageWriter<WaveRequested>,
) {
    if !hover.is_hold_pending() {
        return;
    }
    if hover.bypass_change_detection().tick(time.delta()) {
        wave_writer.write(WaveRequested {
            reason: WaveReason::HoverHold,
        });
    }
}

/// Clicking a hovered hot object opens its panel when nothing else is open.
pub fn open_panel_on_click(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    gate: Res<EntryGate>,
    ui_nodes: Query<&Interaction>,
    mut hover: ResMut<HoverState>,
    mut modal: ResMut<ModalState>,
) {
    if !mouse_buttons.just_pressed(MouseButton::Left) || !gate.is_entered() {
        return;
    }
    if pointer_over_ui(&ui_nodes) {
        return;
    }

    let Some(panel) = hover.current().and_then(HotObjectKind::panel) else {
        return;
    };
    if modal.any_popup_open() {
        return;
    }

    if modal.open(panel) {
        hover.clear();
        info!("Opened {} panel", panel);
    }
}

/// Escape closes exactly one layer per press. Inert behind the entry overlay.
pub fn close_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    gate: Res<EntryGate>,
    mut modal: ResMut<ModalState>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) || !gate.is_entered() {
        return;
    }

    if let Some(layer) = modal.bypass_change_detection().escape() {
        modal.set_changed();
        debug!("Escape closed {:?}", layer);
    }
}

/// Advances map loading and reset timers.
pub fn advance_modal_timers(time: Res<Time>, mut modal: ResMut<ModalState>) {
    if modal.bypass_change_detection().tick(time.delta()) {
        modal.set_changed();
        debug!("Map phase now {:?}", modal.map_phase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::config::PortfolioSettings, interaction::modal::Panel};

    fn entered_gate() -> EntryGate {
        let mut gate = EntryGate::default();
        gate.enter();
        gate
    }

    fn zoom() -> ZoomState {
        ZoomState::new(&PortfolioSettings::default().camera)
    }

    fn focused_zoom() -> ZoomState {
        let mut zoom = zoom();
        zoom.toggle_focus();
        for _ in 0..10 {
            zoom.step(1.0);
        }
        assert!(zoom.is_zoomed_in());
        zoom
    }

    fn escape_app(modal: ModalState, gate: EntryGate) -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(modal)
            .insert_resource(gate)
            .add_systems(Update, close_on_escape);
        app
    }

    fn press_escape(app: &mut App) {
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.release(KeyCode::Escape);
            keys.clear();
            keys.press(KeyCode::Escape);
        }
        app.update();
    }

    #[test]
    fn hover_needs_entry_no_panel_and_no_focus_zoom() {
        let modal = ModalState::default();
        assert!(hover_enabled(&modal, &zoom(), &entered_gate()));
        assert!(!hover_enabled(&modal, &zoom(), &EntryGate::default()));
        assert!(!hover_enabled(&modal, &focused_zoom(), &entered_gate()));

        let mut open = ModalState::default();
        open.open(Panel::Tv);
        assert!(!hover_enabled(&open, &zoom(), &entered_gate()));

        let mut cheatsheet = ModalState::default();
        cheatsheet.toggle_cheatsheet();
        assert!(hover_enabled(&cheatsheet, &zoom(), &entered_gate()));
    }

    #[test]
    fn any_tracked_ui_node_absorbs_the_pointer() {
        assert!(!pointer_over_ui(&[Interaction::None, Interaction::None]));
        assert!(pointer_over_ui(&[Interaction::None, Interaction::Hovered]));
        assert!(pointer_over_ui(&[Interaction::Pressed]));
        let none: [Interaction; 0] = [];
        assert!(!pointer_over_ui(&none));
    }

    fn click_app(hovered: HotObjectKind) -> App {
        let mut hover = HoverState::default();
        hover.update(Some(hovered), Some(Vec2::new(100.0, 100.0)));

        let mut app = App::new();
        app.init_resource::<ButtonInput<MouseButton>>()
            .insert_resource(entered_gate())
            .insert_resource(hover)
            .insert_resource(ModalState::default())
            .add_systems(Update, open_panel_on_click);
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app
    }

    #[test]
    fn click_on_hovered_object_opens_its_panel() {
        let mut app = click_app(HotObjectKind::Trophy);
        app.update();

        let modal = app.world().resource::<ModalState>();
        assert!(modal.is_open(Panel::Leaderboard));
        assert_eq!(app.world().resource::<HoverState>().current(), None);
    }

    #[test]
    fn click_over_panel_body_does_not_reach_the_scene() {
        let mut app = click_app(HotObjectKind::Trophy);
        app.world_mut().spawn((Node::default(), Interaction::Hovered));
        app.update();

        let modal = app.world().resource::<ModalState>();
        assert_eq!(modal.active(), None);
    }

    #[test]
    fn escape_key_closes_one_layer_per_press() {
        let mut modal = ModalState::default();
        modal.open(Panel::Podcast);
        modal.open(Panel::Cheatsheet);
        let mut app = escape_app(modal, entered_gate());

        press_escape(&mut app);
        let modal = app.world().resource::<ModalState>();
        assert!(!modal.is_open(Panel::Podcast));
        assert!(modal.is_cheatsheet_open());

        press_escape(&mut app);
        let modal = app.world().resource::<ModalState>();
        assert!(!modal.is_cheatsheet_open());

        press_escape(&mut app);
        let modal = app.world().resource::<ModalState>();
        assert_eq!(modal.active(), None);
        assert!(!modal.is_cheatsheet_open());
    }

    #[test]
    fn escape_with_nothing_open_leaves_state_unchanged() {
        let mut app = escape_app(ModalState::default(), entered_gate());
        app.update();
        press_escape(&mut app);

        let modal = app.world().resource::<ModalState>();
        assert_eq!(modal.active(), None);
        assert!(!modal.is_cheatsheet_open());
    }

    #[test]
    fn escape_is_ignored_before_entry() {
        let mut modal = ModalState::default();
        modal.toggle_cheatsheet();
        let mut app = escape_app(modal, EntryGate::default());
        press_escape(&mut app);

        assert!(app.world().resource::<ModalState>().is_cheatsheet_open());
    }
}

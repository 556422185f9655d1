// src/ui/systems.rs
//
// Systems spawning the overlays and keeping them in step with the modal state.

use bevy::{
    ecs::message::MessageWriter,
    input::ButtonInput,
    prelude::*,
    ui::FocusPolicy,
    window::{CursorIcon, PrimaryWindow, SystemCursorIcon},
};

use crate::{
    core::config::{HoverSettings, PanelSettings},
    interaction::{
        components::EntryGate,
        events::{WaveReason, WaveRequested},
        hover::HoverState,
        modal::{FilmId, MapPhase, ModalState, Panel},
    },
    scene::components::RoomLoadStatus,
};

use super::{
    components::{
        ContinentButton, ContinentCloseButton, EnterButton, EntryContent, EntryLoadingText,
        EntryOverlay, FilmButton, HelpButton, OverlayPart, PanelCloseButton, PanelRegistry,
        TooltipNode,
    },
    content::{leaderboard_view, LeaderboardView, PortfolioContent},
};

// Visual constants
const OVERLAY_COLOR: Color = Color::srgb(0.06, 0.06, 0.08);
const PANEL_COLOR: Color = Color::srgba(0.1, 0.1, 0.12, 0.95);
const PANEL_BORDER: Color = Color::srgb(0.3, 0.3, 0.32);
const POPUP_COLOR: Color = Color::srgba(0.16, 0.16, 0.2, 0.98);
const BUTTON_COLOR: Color = Color::srgba(0.18, 0.18, 0.22, 0.95);
const BUTTON_HOVERED: Color = Color::srgba(0.26, 0.26, 0.32, 0.95);
const BUTTON_PRESSED: Color = Color::srgba(0.35, 0.3, 0.2, 0.95);
const BUTTON_BORDER: Color = Color::srgb(0.4, 0.4, 0.45);
const TOOLTIP_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.75);
const TEXT_COLOR: Color = Color::WHITE;
const TITLE_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const MUTED_COLOR: Color = Color::srgb(0.7, 0.7, 0.72);

const TITLE_FONT_SIZE: f32 = 22.0;
const BODY_FONT_SIZE: f32 = 16.0;
const BUTTON_FONT_SIZE: f32 = 15.0;

const ENTRY_Z: i32 = 30;
const TOOLTIP_Z: i32 = 20;
const CHEATSHEET_Z: i32 = 10;

fn display_for(visible: bool) -> Display {
    if visible {
        Display::Flex
    } else {
        Display::None
    }
}

fn set_display(nodes: &mut Query<&mut Node>, entity: Entity, visible: bool) {
    let Ok(mut node) = nodes.get_mut(entity) else {
        return;
    };
    let display = display_for(visible);
    if node.display != display {
        node.display = display;
    }
}

fn set_text(texts: &mut Query<&mut Text>, entity: Entity, value: &str) {
    let Ok(mut text) = texts.get_mut(entity) else {
        return;
    };
    if text.0 != value {
        text.0 = value.to_string();
    }
}

fn text_bundle(value: impl Into<String>, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(value),
        TextFont {
            font_size,
            ..Default::default()
        },
        TextColor(color),
    )
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
        border: UiRect::all(Val::Px(1.5)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..Default::default()
    }
}

fn spawn_button(parent: &mut ChildSpawnerCommands, label: &str, node: Node, marker: impl Bundle) {
    parent
        .spawn((
            node,
            Button,
            Interaction::None,
            BackgroundColor(BUTTON_COLOR),
            BorderColor::from(BUTTON_BORDER),
            marker,
            Name::new(format!("{} Button", label)),
        ))
        .with_children(|button| {
            button.spawn(text_bundle(label, BUTTON_FONT_SIZE, TEXT_COLOR));
        });
}

/// Header row with the panel title and its close button.
fn spawn_panel_header(parent: &mut ChildSpawnerCommands, panel: Panel, title: &str) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            ..Default::default()
        })
        .with_children(|header| {
            header.spawn(text_bundle(title, TITLE_FONT_SIZE, TITLE_COLOR));
            spawn_button(header, "x", button_node(), PanelCloseButton(panel));
        });
}

fn panel_node(panel: Panel) -> Node {
    let mut node = Node {
        display: Display::None,
        position_type: PositionType::Absolute,
        top: Val::Percent(12.0),
        left: Val::Percent(25.0),
        width: Val::Percent(50.0),
        max_height: Val::Percent(76.0),
        padding: UiRect::all(Val::Px(18.0)),
        border: UiRect::all(Val::Px(2.0)),
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(12.0),
        overflow: Overflow::clip_y(),
        ..Default::default()
    };
    if panel == Panel::Cheatsheet {
        node.top = Val::Px(64.0);
        node.left = Val::Auto;
        node.right = Val::Px(16.0);
        node.width = Val::Px(260.0);
    }
    node
}

fn spawn_map_body(parent: &mut ChildSpawnerCommands, content: &PortfolioContent) {
    parent.spawn((
        text_bundle("loading map...", BODY_FONT_SIZE, MUTED_COLOR),
        OverlayPart::MapLoading,
    ));

    parent
        .spawn((
            Node {
                display: Display::None,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(10.0),
                ..Default::default()
            },
            OverlayPart::MapContent,
        ))
        .with_children(|map| {
            map.spawn(text_bundle(
                content.panel(Panel::Map).body.clone(),
                BODY_FONT_SIZE,
                TEXT_COLOR,
            ));
            map.spawn(Node {
                flex_direction: FlexDirection::Row,
                flex_wrap: FlexWrap::Wrap,
                column_gap: Val::Px(8.0),
                row_gap: Val::Px(8.0),
                ..Default::default()
            })
            .with_children(|row| {
                for continent in content.continents() {
                    spawn_button(row, continent, button_node(), ContinentButton(continent.clone()));
                }
            });
        });

    parent
        .spawn((
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                top: Val::Px(60.0),
                right: Val::Px(18.0),
                width: Val::Px(220.0),
                padding: UiRect::all(Val::Px(12.0)),
                border: UiRect::all(Val::Px(1.5)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..Default::default()
            },
            BackgroundColor(POPUP_COLOR),
            BorderColor::from(PANEL_BORDER),
            OverlayPart::ContinentPopup,
            Name::new("Continent Detail"),
        ))
        .with_children(|popup| {
            popup.spawn((
                text_bundle("", TITLE_FONT_SIZE, TITLE_COLOR),
                OverlayPart::ContinentTitle,
            ));
            spawn_button(popup, "back", button_node(), ContinentCloseButton);
        });
}

fn spawn_leaderboard_body(parent: &mut ChildSpawnerCommands, content: &PortfolioContent) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..Default::default()
        })
        .with_children(|list| {
            for (rank, film) in content.films().iter().enumerate() {
                let label = format!("{}. {}", rank + 1, film.title);
                let node = Node {
                    justify_content: JustifyContent::FlexStart,
                    ..button_node()
                };
                spawn_button(list, &label, node, FilmButton(FilmId(film.id)));
            }
        });

    parent.spawn((
        text_bundle(content.leaderboard_placeholder(), BODY_FONT_SIZE, MUTED_COLOR),
        OverlayPart::FilmPlaceholder,
    ));

    parent
        .spawn((
            Node {
                display: Display::None,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..Default::default()
            },
            OverlayPart::FilmDetail,
        ))
        .with_children(|detail| {
            detail.spawn((
                text_bundle("", BODY_FONT_SIZE + 2.0, TITLE_COLOR),
                OverlayPart::FilmTitle,
            ));
            detail.spawn((
                text_bundle("", BODY_FONT_SIZE, TEXT_COLOR),
                OverlayPart::FilmReview,
            ));
        });
}

/// Spawns the entry overlay, tooltip, help button, and one hidden root per panel.
pub fn spawn_overlays(
    mut commands: Commands,
    content: Res<PortfolioContent>,
    mut registry: ResMut<PanelRegistry>,
) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..Default::default()
            },
            BackgroundColor(OVERLAY_COLOR),
            GlobalZIndex(ENTRY_Z),
            Interaction::None,
            FocusPolicy::Block,
            EntryOverlay::default(),
            Name::new("Entry Overlay"),
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(16.0),
                        ..Default::default()
                    },
                    EntryContent,
                ))
                .with_children(|column| {
                    column.spawn(text_bundle("welcome to my room", 32.0, TITLE_COLOR));
                    column.spawn((
                        text_bundle("loading...", BODY_FONT_SIZE, MUTED_COLOR),
                        EntryLoadingText,
                    ));
                    let node = Node {
                        display: Display::None,
                        padding: UiRect::axes(Val::Px(28.0), Val::Px(10.0)),
                        ..button_node()
                    };
                    spawn_button(column, "Enter", node, EnterButton);
                });
        });

    commands.spawn((
        text_bundle("", BUTTON_FONT_SIZE, TEXT_COLOR),
        Node {
            display: Display::None,
            position_type: PositionType::Absolute,
            padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
            ..Default::default()
        },
        BackgroundColor(TOOLTIP_COLOR),
        GlobalZIndex(TOOLTIP_Z),
        TooltipNode,
        Name::new("Tooltip"),
    ));

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            right: Val::Px(16.0),
            ..Default::default()
        })
        .with_children(|corner| {
            spawn_button(corner, "?", button_node(), HelpButton);
        });

    for panel in Panel::ALL {
        let copy = content.panel(panel);
        let mut root = commands.spawn((
            panel_node(panel),
            BackgroundColor(PANEL_COLOR),
            BorderColor::from(PANEL_BORDER),
            // Panel bodies absorb the pointer so the scene behind them stays inert.
            Interaction::None,
            FocusPolicy::Block,
            Name::new(format!("{} Panel", panel)),
        ));
        if panel == Panel::Cheatsheet {
            root.insert(GlobalZIndex(CHEATSHEET_Z));
        }

        root.with_children(|parent| {
            spawn_panel_header(parent, panel, &copy.title);
            match panel {
                Panel::Map => spawn_map_body(parent, &content),
                Panel::Leaderboard => spawn_leaderboard_body(parent, &content),
                _ => {
                    parent.spawn(text_bundle(copy.body.clone(), BODY_FONT_SIZE, TEXT_COLOR));
                }
            }
        });

        registry.register(panel, root.id());
    }

    let missing = registry.missing();
    if missing.is_empty() {
        info!("Spawned {} panel overlays", Panel::ALL.len());
    } else {
        warn!("Panels without an overlay: {:?}", missing);
    }
}

/// Swaps the loading caption for the Enter button once the room load has settled.
pub fn reveal_enter_button(
    status: Res<RoomLoadStatus>,
    enter_buttons: Query<Entity, With<EnterButton>>,
    captions: Query<Entity, With<EntryLoadingText>>,
    mut nodes: Query<&mut Node>,
) {
    if !status.is_settled() {
        return;
    }
    for entity in &enter_buttons {
        set_display(&mut nodes, entity, true);
    }
    for entity in &captions {
        set_display(&mut nodes, entity, false);
    }
}

/// Enter (button or key) opens the gate, waves, and starts the overlay fade.
#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn handle_enter(
    status: Res<RoomLoadStatus>,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<PanelSettings>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<EnterButton>)>,
    entry_content: Query<Entity, With<EntryContent>>,
    mut overlays: Query<&mut EntryOverlay>,
    mut nodes: Query<&mut Node>,
    mut gate: ResMut<EntryGate>,
    mut wave_writer: MessageWriter<WaveRequested>,
) {
    if !status.is_settled() || gate.is_entered() {
        return;
    }

    let pressed = buttons
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
        || keyboard.just_pressed(KeyCode::Enter);
    if !pressed || !gate.enter() {
        return;
    }

    wave_writer.write(WaveRequested {
        reason: WaveReason::Entry,
    });
    for mut overlay in &mut overlays {
        overlay.start_fade(settings.entry_fade_seconds);
    }
    for entity in &entry_content {
        set_display(&mut nodes, entity, false);
    }
    info!("Visitor entered the room ({:?})", *status);
}

/// Fades the entry overlay out and despawns it.
pub fn fade_entry_overlay(
    mut commands: Commands,
    time: Res<Time>,
    mut overlays: Query<(Entity, &mut EntryOverlay, &mut BackgroundColor)>,
) {
    for (entity, mut overlay, mut background) in overlays.iter_mut() {
        if !overlay.is_fading() {
            continue;
        }
        overlay.tick(time.delta());

        if overlay.is_finished() {
            commands.entity(entity).despawn();
            debug!("Entry overlay removed");
            continue;
        }
        background.0 = OVERLAY_COLOR.with_alpha(overlay.alpha());
    }
}

/// Mirrors the modal state onto panel roots and their sub-nodes.
pub fn sync_panel_visibility(
    modal: Res<ModalState>,
    content: Res<PortfolioContent>,
    registry: Res<PanelRegistry>,
    parts: Query<(Entity, &OverlayPart)>,
    mut nodes: Query<&mut Node>,
    mut texts: Query<&mut Text>,
) {
    if !modal.is_changed() && !registry.is_changed() {
        return;
    }

    for panel in Panel::ALL {
        if let Some(root) = registry.get(panel) {
            set_display(&mut nodes, root, modal.is_open(panel));
        }
    }

    let map_ready = modal.map_phase() == MapPhase::Ready;
    let view = leaderboard_view(&content, modal.selected_film());

    for (entity, part) in &parts {
        match part {
            OverlayPart::MapLoading => set_display(&mut nodes, entity, !map_ready),
            OverlayPart::MapContent => set_display(&mut nodes, entity, map_ready),
            OverlayPart::ContinentPopup => {
                set_display(&mut nodes, entity, modal.continent().is_some());
            }
            OverlayPart::ContinentTitle => {
                if let Some(name) = modal.continent() {
                    set_text(&mut texts, entity, name);
                }
            }
            OverlayPart::FilmPlaceholder => match view {
                LeaderboardView::Placeholder(placeholder) => {
                    set_text(&mut texts, entity, placeholder);
                    set_display(&mut nodes, entity, true);
                }
                LeaderboardView::Film { .. } => set_display(&mut nodes, entity, false),
            },
            OverlayPart::FilmDetail => {
                let showing_film = matches!(view, LeaderboardView::Film { .. });
                set_display(&mut nodes, entity, showing_film);
            }
            OverlayPart::FilmTitle => {
                if let LeaderboardView::Film { title, .. } = view {
                    set_text(&mut texts, entity, title);
                }
            }
            OverlayPart::FilmReview => {
                if let LeaderboardView::Film { review, .. } = view {
                    set_text(&mut texts, entity, review);
                }
            }
        }
    }
}

/// Places the tooltip above the cursor with the hovered object's label.
pub fn sync_tooltip(
    hover: Res<HoverState>,
    modal: Res<ModalState>,
    settings: Res<HoverSettings>,
    mut tooltip: Query<(&mut Node, &mut Text), With<TooltipNode>>,
) {
    if !hover.is_changed() && !modal.is_changed() {
        return;
    }
    let Ok((mut node, mut text)) = tooltip.single_mut() else {
        return;
    };

    let shown = hover
        .current()
        .filter(|_| !modal.any_popup_open())
        .zip(hover.pointer());

    match shown {
        Some((kind, pointer)) => {
            node.display = Display::Flex;
            node.left = Val::Px(pointer.x);
            node.top = Val::Px(pointer.y - settings.tooltip_offset_px);
            if text.0 != kind.tooltip() {
                text.0 = kind.tooltip().to_string();
            }
        }
        None => {
            if node.display != Display::None {
                node.display = Display::None;
            }
        }
    }
}

/// Pointer cursor while a hot object is hovered, default otherwise.
pub fn sync_cursor_icon(
    mut commands: Commands,
    hover: Res<HoverState>,
    modal: Res<ModalState>,
    window: Query<Entity, With<PrimaryWindow>>,
    mut pointing: Local<bool>,
) {
    let wants_pointer = hover.current().is_some() && !modal.any_popup_open();
    if wants_pointer == *pointing {
        return;
    }
    let Ok(window) = window.single() else {
        return;
    };

    let icon = if wants_pointer {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    };
    commands.entity(window).insert(CursorIcon::from(icon));
    *pointing = wants_pointer;
}

#[allow(clippy::type_complexity)]
pub fn handle_close_buttons(
    buttons: Query<(&Interaction, &PanelCloseButton), (Changed<Interaction>, With<Button>)>,
    mut modal: ResMut<ModalState>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if modal.close(button.0) {
            debug!("Closed {} panel", button.0);
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn handle_help_button(
    buttons: Query<&Interaction, (Changed<Interaction>, With<HelpButton>)>,
    gate: Res<EntryGate>,
    mut modal: ResMut<ModalState>,
) {
    if !gate.is_entered() {
        return;
    }
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            let open = modal.toggle_cheatsheet();
            debug!("Cheatsheet {}", if open { "shown" } else { "hidden" });
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn handle_continent_buttons(
    buttons: Query<(&Interaction, &ContinentButton), (Changed<Interaction>, With<Button>)>,
    back_buttons: Query<&Interaction, (Changed<Interaction>, With<ContinentCloseButton>)>,
    mut modal: ResMut<ModalState>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed && modal.show_continent(button.0.clone()) {
            debug!("Continent detail: {}", button.0);
        }
    }
    for interaction in &back_buttons {
        if *interaction == Interaction::Pressed {
            modal.hide_continent();
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn handle_film_buttons(
    buttons: Query<(&Interaction, &FilmButton), (Changed<Interaction>, With<Button>)>,
    mut modal: ResMut<ModalState>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed && modal.select_film(button.0) {
            debug!("Selected film {:?}", button.0);
        }
    }
}

/// Hover and press feedback shared by every overlay button.
#[allow(clippy::type_complexity)]
pub fn button_feedback(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_COLOR,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::config::PortfolioSettings,
        scene::{
            components::PlaceholderCube, errors::SceneError, events::RoomModelSettled,
            systems::apply_room_model,
        },
    };

    fn overlay_app(status: RoomLoadStatus) -> App {
        let mut app = App::new();
        app.insert_resource(PortfolioContent::default())
            .insert_resource(status)
            .insert_resource(ModalState::default())
            .init_resource::<PanelRegistry>()
            .add_systems(Startup, spawn_overlays)
            .add_systems(Update, (reveal_enter_button, sync_panel_visibility));
        app
    }

    fn enter_button_display(app: &mut App) -> Display {
        let mut query = app
            .world_mut()
            .query_filtered::<&Node, With<EnterButton>>();
        query.single(app.world()).expect("one enter button").display
    }

    #[test]
    fn failed_load_still_reveals_enter_button() {
        let mut app = overlay_app(RoomLoadStatus::Failed);
        app.update();
        assert_eq!(enter_button_display(&mut app), Display::Flex);
    }

    #[test]
    fn model_load_failure_shows_enter_over_placeholder() {
        let mut app = overlay_app(RoomLoadStatus::Loading);
        app.insert_resource(PortfolioSettings::default().scene)
            .add_message::<RoomModelSettled>()
            .add_systems(Update, apply_room_model.before(reveal_enter_button));
        app.world_mut()
            .spawn((PlaceholderCube, Visibility::Inherited));
        app.update();
        assert_eq!(enter_button_display(&mut app), Display::None);

        app.world_mut()
            .resource_mut::<Messages<RoomModelSettled>>()
            .write(RoomModelSettled::Failed(SceneError::asset_load(
                "models/room.glb",
                "file not found",
            )));
        app.update();

        assert_eq!(*app.world().resource::<RoomLoadStatus>(), RoomLoadStatus::Failed);
        assert_eq!(enter_button_display(&mut app), Display::Flex);
        let mut cubes = app
            .world_mut()
            .query_filtered::<&Visibility, With<PlaceholderCube>>();
        let visibility = cubes.single(app.world()).expect("one placeholder");
        assert_ne!(*visibility, Visibility::Hidden);
    }

    #[test]
    fn panel_roots_absorb_the_pointer() {
        let mut app = overlay_app(RoomLoadStatus::Loading);
        app.update();

        let registry = app.world().resource::<PanelRegistry>();
        let roots: Vec<Entity> = Panel::ALL
            .into_iter()
            .filter_map(|panel| registry.get(panel))
            .collect();
        assert_eq!(roots.len(), Panel::ALL.len());
        for root in roots {
            assert!(app.world().get::<Interaction>(root).is_some());
            assert_eq!(
                app.world().get::<FocusPolicy>(root),
                Some(&FocusPolicy::Block)
            );
        }
    }

    fn help_app(gate: EntryGate) -> App {
        let mut app = App::new();
        app.insert_resource(ModalState::default())
            .insert_resource(gate)
            .add_systems(Update, handle_help_button);
        app.world_mut()
            .spawn((Button, Interaction::Pressed, HelpButton));
        app
    }

    #[test]
    fn help_button_is_inert_before_entry() {
        let mut app = help_app(EntryGate::default());
        app.update();
        assert!(!app.world().resource::<ModalState>().is_cheatsheet_open());

        let mut gate = EntryGate::default();
        gate.enter();
        let mut app = help_app(gate);
        app.update();
        assert!(app.world().resource::<ModalState>().is_cheatsheet_open());
    }

    #[test]
    fn enter_button_stays_hidden_while_loading() {
        let mut app = overlay_app(RoomLoadStatus::Loading);
        app.update();
        assert_eq!(enter_button_display(&mut app), Display::None);

        *app.world_mut().resource_mut::<RoomLoadStatus>() = RoomLoadStatus::Ready;
        app.update();
        assert_eq!(enter_button_display(&mut app), Display::Flex);
    }

    #[test]
    fn every_panel_has_a_registered_root() {
        let mut app = overlay_app(RoomLoadStatus::Loading);
        app.update();
        assert!(app.world().resource::<PanelRegistry>().missing().is_empty());
    }

    #[test]
    fn opened_panel_root_becomes_visible() {
        let mut app = overlay_app(RoomLoadStatus::Ready);
        app.update();

        app.world_mut()
            .resource_mut::<ModalState>()
            .open(Panel::Leaderboard);
        app.update();

        let registry = app.world().resource::<PanelRegistry>();
        let leaderboard = registry.get(Panel::Leaderboard).expect("leaderboard root");
        let about = registry.get(Panel::About).expect("about root");
        let world = app.world();
        assert_eq!(
            world.get::<Node>(leaderboard).map(|node| node.display),
            Some(Display::Flex)
        );
        assert_eq!(
            world.get::<Node>(about).map(|node| node.display),
            Some(Display::None)
        );
    }

    #[test]
    fn close_button_press_closes_its_panel() {
        let mut modal = ModalState::default();
        modal.open(Panel::Podcast);

        let mut app = App::new();
        app.insert_resource(modal)
            .add_systems(Update, handle_close_buttons);
        app.world_mut()
            .spawn((Button, Interaction::Pressed, PanelCloseButton(Panel::Podcast)));
        app.update();

        assert!(!app.world().resource::<ModalState>().is_open(Panel::Podcast));
    }
}

//! InteractionPlugin wires hover, click, and Escape handling around the shared state.
use bevy::prelude::*;

use crate::{
    camera::systems::orbit_drag_input,
    core::config::{HoverSettings, PanelSettings},
    interaction::{
        components::EntryGate,
        events::WaveRequested,
        hover::HoverState,
        modal::ModalState,
        systems::{
            advance_modal_timers, close_on_escape, open_panel_on_click, resolve_pointer_hover,
            tick_hover_hold,
        },
    },
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        let hold_seconds = app
            .world()
            .get_resource::<HoverSettings>()
            .map_or(0.5, |settings| settings.hold_seconds);
        let (loading, reset) = app
            .world()
            .get_resource::<PanelSettings>()
            .map_or((1.5, 0.5), |settings| {
                (settings.map_loading_seconds, settings.map_reset_seconds)
            });

        info!(
            "InteractionPlugin registered (hover hold {:.2}s, map loading {:.2}s)",
            hold_seconds, loading
        );

        app.insert_resource(HoverState::new(hold_seconds))
            .insert_resource(ModalState::new(loading, reset))
            .init_resource::<EntryGate>()
            .add_message::<WaveRequested>()
            .add_systems(
                Update,
                (
                    resolve_pointer_hover,
                    tick_hover_hold.after(resolve_pointer_hover),
                    open_panel_on_click
                        .after(resolve_pointer_hover)
                        .before(orbit_drag_input),
                    close_on_escape,
                    advance_modal_timers.after(close_on_escape),
                ),
            );
    }
}

// src/ui/plugin.rs
//
// UiPlugin spawns the overlays and keeps them in step with the interaction state.

use bevy::prelude::*;

use crate::{
    core::config::PanelSettings,
    interaction::systems::{advance_modal_timers, close_on_escape, resolve_pointer_hover},
};

use super::components::PanelRegistry;
use super::content::PortfolioContent;
use super::systems::{
    button_feedback, fade_entry_overlay, handle_close_buttons, handle_continent_buttons,
    handle_enter, handle_film_buttons, handle_help_button, reveal_enter_button, spawn_overlays,
    sync_cursor_icon, sync_panel_visibility, sync_tooltip,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        let content_path = app
            .world()
            .get_resource::<PanelSettings>()
            .map(|settings| settings.content_path.clone());
        let content = match content_path {
            Some(path) => PortfolioContent::load_or_default(&path),
            None => PortfolioContent::default(),
        };

        info!(
            "UiPlugin registered ({} films, {} continents)",
            content.films().len(),
            content.continents().len()
        );

        app.insert_resource(content)
            .init_resource::<PanelRegistry>()
            .add_systems(Startup, spawn_overlays)
            .add_systems(
                Update,
                (
                    reveal_enter_button,
                    handle_enter.after(reveal_enter_button),
                    fade_entry_overlay.after(handle_enter),
                    (
                        handle_close_buttons,
                        handle_help_button,
                        handle_continent_buttons,
                        handle_film_buttons,
                    )
                        .before(close_on_escape),
                    button_feedback,
                    sync_panel_visibility
                        .after(advance_modal_timers)
                        .after(handle_close_buttons)
                        .after(handle_help_button)
                        .after(handle_continent_buttons)
                        .after(handle_film_buttons),
                    (sync_tooltip, sync_cursor_icon)
                        .after(resolve_pointer_hover)
                        .after(sync_panel_visibility),
                ),
            );
    }
}

// src/ui/components.rs
//
// Marker components and the panel registry for the screen-space overlays.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::interaction::modal::{FilmId, Panel};

/// Full-screen overlay shown until the visitor enters the room.
#[derive(Component, Debug, Default)]
pub struct EntryOverlay {
    /// Running once Enter has been pressed. The overlay despawns when it finishes.
    fade: Option<Timer>,
}

impl EntryOverlay {
    pub fn start_fade(&mut self, seconds: f32) {
        if self.fade.is_none() {
            self.fade = Some(Timer::from_seconds(seconds.max(0.0), TimerMode::Once));
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        if let Some(fade) = self.fade.as_mut() {
            fade.tick(delta);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.fade.as_ref().is_some_and(Timer::is_finished)
    }

    /// 1.0 before the fade starts, falling to 0.0 when it completes.
    pub fn alpha(&self) -> f32 {
        match &self.fade {
            Some(fade) => 1.0 - fade.fraction(),
            None => 1.0,
        }
    }
}

/// Title and button column inside the entry overlay. Hidden as soon as the fade starts.
#[derive(Component, Debug)]
pub struct EntryContent;

/// "loading..." caption replaced by the Enter button once the room settles.
#[derive(Component, Debug)]
pub struct EntryLoadingText;

#[derive(Component, Debug)]
pub struct EnterButton;

#[derive(Component, Debug)]
pub struct HelpButton;

#[derive(Component, Debug)]
pub struct TooltipNode;

#[derive(Component, Debug, Clone, Copy)]
pub struct PanelCloseButton(pub Panel);

#[derive(Component, Debug, Clone)]
pub struct ContinentButton(pub String);

#[derive(Component, Debug)]
pub struct ContinentCloseButton;

#[derive(Component, Debug, Clone, Copy)]
pub struct FilmButton(pub FilmId);

/// Panel sub-nodes whose visibility or text follows the modal state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPart {
    MapLoading,
    MapContent,
    ContinentPopup,
    ContinentTitle,
    FilmPlaceholder,
    FilmDetail,
    FilmTitle,
    FilmReview,
}

/// Maps each panel to the root node that shows it.
#[derive(Resource, Debug, Default)]
pub struct PanelRegistry {
    roots: HashMap<Panel, Entity>,
}

impl PanelRegistry {
    pub fn register(&mut self, panel: Panel, root: Entity) {
        if let Some(previous) = self.roots.insert(panel, root) {
            warn!("Panel {} registered twice (replacing {:?})", panel, previous);
        }
    }

    pub fn get(&self, panel: Panel) -> Option<Entity> {
        self.roots.get(&panel).copied()
    }

    pub fn missing(&self) -> Vec<Panel> {
        Panel::ALL
            .into_iter()
            .filter(|panel| !self.roots.contains_key(panel))
            .collect()
    }
}

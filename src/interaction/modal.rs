//! Modal arbitration: which overlay is open, and what Escape closes next.
use std::{fmt, time::Duration};

use bevy::prelude::*;

/// Overlay panels reachable from the scene or the help button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    About,
    Map,
    Podcast,
    Leaderboard,
    Reflection,
    Tv,
    Cheatsheet,
}

impl Panel {
    pub const ALL: [Self; 7] = [
        Self::About,
        Self::Map,
        Self::Podcast,
        Self::Leaderboard,
        Self::Reflection,
        Self::Tv,
        Self::Cheatsheet,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Map => "map",
            Self::Podcast => "podcast",
            Self::Leaderboard => "leaderboard",
            Self::Reflection => "reflection",
            Self::Tv => "tv",
            Self::Cheatsheet => "cheatsheet",
        }
    }

    /// Cheatsheet hangs off its own toggle and is not bound by the single-open guard.
    pub fn is_exclusive(self) -> bool {
        !matches!(self, Self::Cheatsheet)
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Identifier of a film in the leaderboard catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilmId(pub u32);

/// Map panel sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapPhase {
    /// Loading placeholder visible, content hidden.
    Loading,
    /// Continents visible and clickable.
    Ready,
}

/// One layer removed by the Escape key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalLayer {
    Panel(Panel),
    ContinentDetail,
}

#[derive(Debug)]
struct MapView {
    phase: MapPhase,
    loading: Timer,
    reset: Option<Timer>,
    reset_duration: Duration,
}

impl MapView {
    fn new(loading: Duration, reset: Duration) -> Self {
        Self {
            phase: MapPhase::Loading,
            loading: Timer::new(loading, TimerMode::Once),
            reset: None,
            reset_duration: reset,
        }
    }

    fn begin_loading(&mut self) {
        self.phase = MapPhase::Loading;
        self.loading.reset();
        self.reset = None;
    }

    fn schedule_reset(&mut self) {
        self.reset = Some(Timer::new(self.reset_duration, TimerMode::Once));
    }
}

/// Single source of truth for overlay state.
///
/// At most one exclusive panel is open. The cheatsheet is an independent flag
/// and the continent detail only exists while the map is open.
#[derive(Resource, Debug)]
pub struct ModalState {
    active: Option<Panel>,
    cheatsheet: bool,
    continent: Option<String>,
    film: Option<FilmId>,
    map: MapView,
}

impl ModalState {
    pub fn new(map_loading_seconds: f32, map_reset_seconds: f32) -> Self {
        Self {
            active: None,
            cheatsheet: false,
            continent: None,
            film: None,
            map: MapView::new(
                Duration::from_secs_f32(map_loading_seconds.max(0.0)),
                Duration::from_secs_f32(map_reset_seconds.max(0.0)),
            ),
        }
    }

    /// Open exclusive panel, if any.
    #[cfg_attr(not(feature = "interaction_debug"), allow(dead_code))]
    pub fn active(&self) -> Option<Panel> {
        self.active
    }

    /// True while one of the scene-triggered panels is open.
    pub fn any_popup_open(&self) -> bool {
        self.active.is_some()
    }

    #[cfg_attr(not(feature = "interaction_debug"), allow(dead_code))]
    pub fn is_cheatsheet_open(&self) -> bool {
        self.cheatsheet
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        match panel {
            Panel::Cheatsheet => self.cheatsheet,
            other => self.active == Some(other),
        }
    }

    pub fn continent(&self) -> Option<&str> {
        self.continent.as_deref()
    }

    pub fn selected_film(&self) -> Option<FilmId> {
        self.film
    }

    pub fn map_phase(&self) -> MapPhase {
        self.map.phase
    }

    /// Opens a panel. Exclusive panels are refused while another one is open.
    pub fn open(&mut self, panel: Panel) -> bool {
        if !panel.is_exclusive() {
            if self.cheatsheet {
                return false;
            }
            self.cheatsheet = true;
            return true;
        }

        if self.active.is_some() {
            return false;
        }

        self.active = Some(panel);
        match panel {
            Panel::Map => self.map.begin_loading(),
            Panel::Leaderboard => self.film = None,
            _ => {}
        }
        true
    }

    /// Closes a panel if it is open, applying its teardown.
    pub fn close(&mut self, panel: Panel) -> bool {
        if !panel.is_exclusive() {
            let was_open = self.cheatsheet;
            self.cheatsheet = false;
            return was_open;
        }

        if self.active != Some(panel) {
            return false;
        }

        self.active = None;
        match panel {
            Panel::Map => {
                self.continent = None;
                self.map.schedule_reset();
            }
            Panel::Leaderboard => self.film = None,
            _ => {}
        }
        true
    }

    /// Flips the cheatsheet and returns its new state.
    pub fn toggle_cheatsheet(&mut self) -> bool {
        self.cheatsheet = !self.cheatsheet;
        self.cheatsheet
    }

    /// Shows the continent detail popup. Only valid once the map content is visible.
    pub fn show_continent(&mut self, name: impl Into<String>) -> bool {
        if self.active != Some(Panel::Map) || self.map.phase != MapPhase::Ready {
            return false;
        }
        self.continent = Some(name.into());
        true
    }

    pub fn hide_continent(&mut self) -> bool {
        self.continent.take().is_some()
    }

    /// Replaces the leaderboard selection. Ignored unless the leaderboard is open.
    pub fn select_film(&mut self, film: FilmId) -> bool {
        if self.active != Some(Panel::Leaderboard) {
            return false;
        }
        self.film = Some(film);
        true
    }

    /// Closes the innermost layer:
    /// tv, reflection, leaderboard, podcast, continent detail, map, cheatsheet, about.
    pub fn escape(&mut self) -> Option<ModalLayer> {
        for panel in [Panel::Tv, Panel::Reflection, Panel::Leaderboard, Panel::Podcast] {
            if self.close(panel) {
                return Some(ModalLayer::Panel(panel));
            }
        }

        if self.hide_continent() {
            return Some(ModalLayer::ContinentDetail);
        }

        for panel in [Panel::Map, Panel::Cheatsheet, Panel::About] {
            if self.close(panel) {
                return Some(ModalLayer::Panel(panel));
            }
        }

        None
    }

    /// Advances the map loading and reset timers. Returns true when the map phase changed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let previous = self.map.phase;

        if let Some(reset) = self.map.reset.as_mut() {
            reset.tick(delta);
            if reset.is_finished() {
                self.map.reset = None;
                self.map.phase = MapPhase::Loading;
            }
        }

        if self.active == Some(Panel::Map) && self.map.phase == MapPhase::Loading {
            self.map.loading.tick(delta);
            if self.map.loading.is_finished() {
                self.map.phase = MapPhase::Ready;
            }
        }

        self.map.phase != previous
    }
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new(1.5, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXCLUSIVE: [Panel; 6] = [
        Panel::About,
        Panel::Map,
        Panel::Podcast,
        Panel::Leaderboard,
        Panel::Reflection,
        Panel::Tv,
    ];

    fn ready_map() -> ModalState {
        let mut modal = ModalState::default();
        assert!(modal.open(Panel::Map));
        modal.tick(Duration::from_secs(2));
        assert_eq!(modal.map_phase(), MapPhase::Ready);
        modal
    }

    #[test]
    fn opening_second_exclusive_panel_is_noop() {
        for first in EXCLUSIVE {
            for second in EXCLUSIVE {
                let mut modal = ModalState::default();
                assert!(modal.open(first));
                if first != second {
                    assert!(!modal.open(second));
                }
                assert_eq!(modal.active(), Some(first));
            }
        }
    }

    #[test]
    fn cheatsheet_is_independent_of_exclusive_guard() {
        let mut modal = ModalState::default();
        assert!(modal.open(Panel::About));
        assert!(modal.open(Panel::Cheatsheet));
        assert!(modal.is_open(Panel::About));
        assert!(modal.is_cheatsheet_open());

        let mut modal = ModalState::default();
        assert!(modal.toggle_cheatsheet());
        assert!(!modal.any_popup_open());
        assert!(modal.open(Panel::Podcast));
        assert!(!modal.toggle_cheatsheet());
    }

    #[test]
    fn escape_follows_priority_chain() {
        let mut modal = ready_map();
        modal.open(Panel::Cheatsheet);
        modal.show_continent("Asia");

        assert_eq!(modal.escape(), Some(ModalLayer::ContinentDetail));
        assert!(modal.is_open(Panel::Map));
        assert_eq!(modal.escape(), Some(ModalLayer::Panel(Panel::Map)));
        assert!(modal.is_cheatsheet_open());
        assert_eq!(modal.escape(), Some(ModalLayer::Panel(Panel::Cheatsheet)));
        assert_eq!(modal.escape(), None);
    }

    #[test]
    fn escape_closes_cheatsheet_before_about() {
        let mut modal = ModalState::default();
        modal.open(Panel::About);
        modal.open(Panel::Cheatsheet);

        assert_eq!(modal.escape(), Some(ModalLayer::Panel(Panel::Cheatsheet)));
        assert!(modal.is_open(Panel::About));
        assert_eq!(modal.escape(), Some(ModalLayer::Panel(Panel::About)));
        assert!(!modal.any_popup_open());
    }

    #[test]
    fn escape_closes_top_panels_before_cheatsheet() {
        for panel in [Panel::Tv, Panel::Reflection, Panel::Leaderboard, Panel::Podcast] {
            let mut modal = ModalState::default();
            modal.open(panel);
            modal.open(Panel::Cheatsheet);

            assert_eq!(modal.escape(), Some(ModalLayer::Panel(panel)));
            assert!(modal.is_cheatsheet_open());
        }
    }

    #[test]
    fn escape_with_nothing_open_changes_nothing() {
        let mut modal = ModalState::default();
        assert_eq!(modal.escape(), None);
        assert_eq!(modal.active(), None);
        assert!(!modal.is_cheatsheet_open());
        assert_eq!(modal.map_phase(), MapPhase::Loading);
    }

    #[test]
    fn map_content_appears_after_loading_delay() {
        let mut modal = ModalState::default();
        modal.open(Panel::Map);
        assert!(!modal.tick(Duration::from_millis(1000)));
        assert_eq!(modal.map_phase(), MapPhase::Loading);
        assert!(modal.tick(Duration::from_millis(600)));
        assert_eq!(modal.map_phase(), MapPhase::Ready);
    }

    #[test]
    fn reopened_map_always_starts_loading() {
        let mut modal = ready_map();
        modal.close(Panel::Map);
        assert!(modal.open(Panel::Map));
        assert_eq!(modal.map_phase(), MapPhase::Loading);

        let mut modal = ready_map();
        modal.close(Panel::Map);
        modal.tick(Duration::from_millis(600));
        assert_eq!(modal.map_phase(), MapPhase::Loading);
        modal.open(Panel::Map);
        assert_eq!(modal.map_phase(), MapPhase::Loading);
        modal.tick(Duration::from_millis(600));
        assert_eq!(modal.map_phase(), MapPhase::Loading);
    }

    #[test]
    fn pending_reset_does_not_fire_after_quick_reopen() {
        let mut modal = ready_map();
        modal.close(Panel::Map);
        modal.open(Panel::Map);
        modal.tick(Duration::from_millis(1600));
        assert_eq!(modal.map_phase(), MapPhase::Ready);
        modal.tick(Duration::from_millis(600));
        assert_eq!(modal.map_phase(), MapPhase::Ready);
    }

    #[test]
    fn continent_requires_ready_map_and_clears_on_close() {
        let mut modal = ModalState::default();
        assert!(!modal.show_continent("Europe"));
        modal.open(Panel::Map);
        assert!(!modal.show_continent("Europe"));

        let mut modal = ready_map();
        assert!(modal.show_continent("Europe"));
        assert_eq!(modal.continent(), Some("Europe"));
        modal.close(Panel::Map);
        assert_eq!(modal.continent(), None);
    }

    #[test]
    fn leaderboard_selection_resets_on_close() {
        let mut modal = ModalState::default();
        assert!(!modal.select_film(FilmId(2)));

        modal.open(Panel::Leaderboard);
        assert_eq!(modal.selected_film(), None);
        assert!(modal.select_film(FilmId(1)));
        assert!(modal.select_film(FilmId(2)));
        assert_eq!(modal.selected_film(), Some(FilmId(2)));

        modal.close(Panel::Leaderboard);
        assert_eq!(modal.selected_film(), None);
        modal.open(Panel::Leaderboard);
        assert_eq!(modal.selected_film(), None);
    }

    #[test]
    fn closing_panel_that_is_not_open_is_noop() {
        let mut modal = ModalState::default();
        modal.open(Panel::Tv);
        assert!(!modal.close(Panel::About));
        assert!(!modal.close(Panel::Cheatsheet));
        assert_eq!(modal.active(), Some(Panel::Tv));
        assert!(modal.close(Panel::Tv));
        assert_eq!(modal.active(), None);
    }
}

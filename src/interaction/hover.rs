//! Hot object identities, pointer projection, and the hover-hold debounce.
use std::time::Duration;

use bevy::prelude::*;

use super::modal::Panel;

/// Named scene regions that react to hover and click.
///
/// Variant order is the hover priority: when a ray crosses several hot
/// objects the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HotObjectKind {
    Character,
    Map,
    Mic,
    Trophy,
    Bubble,
    Birdies,
    Tv,
}

impl HotObjectKind {
    pub const ALL: [Self; 7] = [
        Self::Character,
        Self::Map,
        Self::Mic,
        Self::Trophy,
        Self::Bubble,
        Self::Birdies,
        Self::Tv,
    ];

    /// Key used in config files.
    pub fn key(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Map => "map",
            Self::Mic => "mic",
            Self::Trophy => "trophy",
            Self::Bubble => "bubble",
            Self::Birdies => "birdies",
            Self::Tv => "tv",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Node name searched for in the room model when no override is configured.
    pub fn default_node_name(self) -> &'static str {
        match self {
            Self::Character => "jingkai",
            Self::Map => "map",
            Self::Mic => "macbook",
            Self::Trophy => "trophy",
            Self::Bubble => "bubble",
            Self::Birdies => "birdies",
            Self::Tv => "tv",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            Self::Character => "about me",
            Self::Map => "map",
            Self::Mic => "podcast",
            Self::Trophy => "leaderboard",
            Self::Bubble => "reflections",
            Self::Birdies => "badminton",
            Self::Tv => "tv",
        }
    }

    /// Panel opened by clicking this object. Birdies are decorative.
    pub fn panel(self) -> Option<Panel> {
        match self {
            Self::Character => Some(Panel::About),
            Self::Map => Some(Panel::Map),
            Self::Mic => Some(Panel::Podcast),
            Self::Trophy => Some(Panel::Leaderboard),
            Self::Bubble => Some(Panel::Reflection),
            Self::Birdies => None,
            Self::Tv => Some(Panel::Tv),
        }
    }
}

/// Tags the scene node that stands for a hot object.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotObject(pub HotObjectKind);

/// Picks the single hover identity among every hot object the ray crossed.
pub fn resolve_hover(hits: impl IntoIterator<Item = HotObjectKind>) -> Option<HotObjectKind> {
    hits.into_iter().min()
}

/// Converts a cursor position in logical pixels into normalized device coordinates.
///
/// Returns `None` for a degenerate viewport.
pub fn pointer_to_ndc(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (cursor.x / viewport.x) * 2.0 - 1.0,
        -(cursor.y / viewport.y) * 2.0 + 1.0,
    ))
}

/// Current hover identity plus the pending character hover-hold countdown.
#[derive(Resource, Debug)]
pub struct HoverState {
    current: Option<HotObjectKind>,
    pointer: Option<Vec2>,
    hold: Option<Timer>,
    hold_duration: Duration,
}

impl HoverState {
    pub fn new(hold_seconds: f32) -> Self {
        Self {
            current: None,
            pointer: None,
            hold: None,
            hold_duration: Duration::from_secs_f32(hold_seconds.max(0.0)),
        }
    }

    pub fn current(&self) -> Option<HotObjectKind> {
        self.current
    }

    /// Last cursor position seen while resolving hover, in window pixels.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn is_hold_pending(&self) -> bool {
        self.hold.is_some()
    }

    /// Records the resolved hover. Returns true when the identity changed.
    ///
    /// A change always clears the pending countdown; entering the character
    /// from anything else starts a fresh one.
    pub fn update(&mut self, next: Option<HotObjectKind>, pointer: Option<Vec2>) -> bool {
        self.pointer = pointer;
        if next == self.current {
            return false;
        }

        self.hold = None;
        if next == Some(HotObjectKind::Character) {
            self.hold = Some(Timer::new(self.hold_duration, TimerMode::Once));
        }
        self.current = next;
        true
    }

    /// Drops the hover identity and any countdown.
    pub fn clear(&mut self) -> bool {
        let pointer = self.pointer;
        self.update(None, pointer)
    }

    /// Advances the countdown. Returns true exactly once when the hold completes.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.hold.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if !timer.is_finished() {
            return false;
        }

        self.hold = None;
        self.current == Some(HotObjectKind::Character)
    }
}

impl Default for HoverState {
    fn default() -> Self {
        Self::new(0.5)
    }
}

//! Panel copy, film catalog, and continents loaded from `assets/content/portfolio.json`.
use std::{fmt, fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::interaction::modal::{FilmId, Panel};

const LEADERBOARD_PLACEHOLDER: &str = "Pick a film to read the review.";

#[derive(Debug)]
pub enum ContentError {
    Read { path: String, message: String },
    Parse { path: String, message: String },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "failed to read {}: {}", path, message),
            Self::Parse { path, message } => write!(f, "failed to parse {}: {}", path, message),
        }
    }
}

impl std::error::Error for ContentError {}

/// Title and body text for a panel.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PanelCopy {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl PanelCopy {
    fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Film {
    pub id: u32,
    pub title: String,
    pub review: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPanels {
    about: PanelCopy,
    map: PanelCopy,
    podcast: PanelCopy,
    leaderboard: PanelCopy,
    reflection: PanelCopy,
    tv: PanelCopy,
    cheatsheet: PanelCopy,
}

impl Default for RawPanels {
    fn default() -> Self {
        Self {
            about: PanelCopy::new(
                "about me",
                "Hi, I'm Jingkai. I build things for the web and the occasional 3D room.",
            ),
            map: PanelCopy::new("places I've been", "Pick a continent."),
            podcast: PanelCopy::new(
                "podcast",
                "Conversations about building, learning, and shipping small things.",
            ),
            leaderboard: PanelCopy::new("film leaderboard", ""),
            reflection: PanelCopy::new(
                "reflections",
                "Notes to self: ship early, write things down, rest on purpose.",
            ),
            tv: PanelCopy::new("now playing", "Nothing on right now. Check back later."),
            cheatsheet: PanelCopy::new(
                "controls",
                "Drag to look around\nScroll to zoom\nZ to focus\nHover objects for hints\nClick to open\nEsc to close",
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawContent {
    panels: RawPanels,
    films: Vec<Film>,
    continents: Vec<String>,
    leaderboard_placeholder: String,
}

impl Default for RawContent {
    fn default() -> Self {
        Self {
            panels: RawPanels::default(),
            films: default_films(),
            continents: [
                "North America",
                "South America",
                "Europe",
                "Africa",
                "Asia",
                "Oceania",
                "Antarctica",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            leaderboard_placeholder: LEADERBOARD_PLACEHOLDER.to_string(),
        }
    }
}

fn default_films() -> Vec<Film> {
    [
        (
            1,
            "Decision to Leave",
            "A detective story that keeps folding into a love story. Every frame is doing two jobs.",
        ),
        (
            2,
            "Joint Security Area",
            "Four soldiers, one border, and a friendship that cannot survive daylight. Still my number one.",
        ),
        (
            3,
            "Memories of Murder",
            "Funny until it suddenly is not. The final look into the camera stays with you.",
        ),
        (
            4,
            "Burning",
            "A slow burn in every sense. The ambiguity is the point and it works.",
        ),
    ]
    .into_iter()
    .map(|(id, title, review)| Film {
        id,
        title: title.to_string(),
        review: review.to_string(),
    })
    .collect()
}

/// Everything the overlays display.
#[derive(Resource, Debug, Clone)]
pub struct PortfolioContent {
    panels: RawPanels,
    films: Vec<Film>,
    continents: Vec<String>,
    leaderboard_placeholder: String,
}

impl PortfolioContent {
    pub fn load(path: &str) -> Result<Self, ContentError> {
        let data = fs::read_to_string(Path::new(path)).map_err(|err| ContentError::Read {
            path: path.to_string(),
            message: err.to_string(),
        })?;
        Self::from_json(path, &data)
    }

    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("{}. Falling back to built-in content.", err);
                Self::default()
            }
        }
    }

    fn from_json(path: &str, data: &str) -> Result<Self, ContentError> {
        let raw: RawContent = serde_json::from_str(data).map_err(|err| ContentError::Parse {
            path: path.to_string(),
            message: err.to_string(),
        })?;
        Ok(raw.into())
    }

    pub fn panel(&self, panel: Panel) -> &PanelCopy {
        match panel {
            Panel::About => &self.panels.about,
            Panel::Map => &self.panels.map,
            Panel::Podcast => &self.panels.podcast,
            Panel::Leaderboard => &self.panels.leaderboard,
            Panel::Reflection => &self.panels.reflection,
            Panel::Tv => &self.panels.tv,
            Panel::Cheatsheet => &self.panels.cheatsheet,
        }
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn film(&self, id: FilmId) -> Option<&Film> {
        self.films.iter().find(|film| film.id == id.0)
    }

    pub fn continents(&self) -> &[String] {
        &self.continents
    }

    pub fn leaderboard_placeholder(&self) -> &str {
        &self.leaderboard_placeholder
    }
}

impl Default for PortfolioContent {
    fn default() -> Self {
        RawContent::default().into()
    }
}

impl From<RawContent> for PortfolioContent {
    fn from(value: RawContent) -> Self {
        let mut films = value.films;
        films.sort_by_key(|film| film.id);
        films.dedup_by_key(|film| film.id);

        Self {
            panels: value.panels,
            films,
            continents: value.continents,
            leaderboard_placeholder: value.leaderboard_placeholder,
        }
    }
}

/// What the leaderboard detail pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardView<'a> {
    Placeholder(&'a str),
    Film { title: &'a str, review: &'a str },
}

/// Resolves the detail pane for a selection. Unknown ids fall back to the placeholder.
pub fn leaderboard_view(content: &PortfolioContent, selected: Option<FilmId>) -> LeaderboardView<'_> {
    match selected.and_then(|id| content.film(id)) {
        Some(film) => LeaderboardView::Film {
            title: &film.title,
            review: &film.review,
        },
        None => LeaderboardView::Placeholder(content.leaderboard_placeholder()),
    }
}

use bevy::prelude::*;

mod camera;
mod character;
mod core;
mod interaction;
mod scene;
mod ui;

use crate::{
    camera::CameraPlugin, character::CharacterPlugin, core::CorePlugin,
    interaction::InteractionPlugin, scene::ScenePlugin, ui::UiPlugin,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Jingkai's Room".into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins((
            CorePlugin::default(), // First: every other plugin reads its settings
            ScenePlugin,
            CameraPlugin,
            InteractionPlugin,
            CharacterPlugin,
            UiPlugin,
        ))
        .run();
}

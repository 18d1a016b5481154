mod camera;
mod game_manager;
mod input;
mod interaction;
mod menu;
mod player;
mod settings;
mod world;

use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::PresentMode,
};

use camera::CameraPlugin;
use game_manager::GameManagerPlugin;
use input::ActionInputPlugin;
use interaction::InteractionPlugin;
use menu::MenuPlugin;
use player::PlayerPlugin;
use settings::SettingsPlugin;
use world::WorldPlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Vestibule".to_string(),
                    present_mode: PresentMode::AutoNoVsync,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            LogDiagnosticsPlugin::default(),
        ))
        .add_plugins((SettingsPlugin, ActionInputPlugin, GameManagerPlugin))
        .add_plugins((
            InteractionPlugin,
            WorldPlugin,
            PlayerPlugin,
            CameraPlugin,
            MenuPlugin,
        ))
        .run();
}

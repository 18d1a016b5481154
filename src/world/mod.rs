pub mod crosshair;
pub mod setup;
pub mod wiring;

use bevy::prelude::*;

use crosshair::{setup_crosshair, update_crosshair};
use setup::setup_world;
use wiring::fire_wires;

// Room dimensions
pub const ROOM_WIDTH: f32 = 10.0;
pub const ROOM_DEPTH: f32 = 10.0;
pub const ROOM_HEIGHT: f32 = 4.0;
pub const WALL_THICKNESS: f32 = 0.2;

// Room bounds for collision (slightly less than actual size to account for walls)
pub const ROOM_HALF_WIDTH: f32 = 4.8;
pub const ROOM_HALF_DEPTH: f32 = 4.8;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_world, setup_crosshair))
            .add_systems(Update, (update_crosshair, fire_wires));
    }
}

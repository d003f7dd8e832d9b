mod movement;
mod spawn;

pub use movement::*;
pub use spawn::*;

use bevy::prelude::*;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // -- Systems that run every frame while Playing --
        app.add_systems(
            Update,
            movement::player_movement.run_if(in_state(GameState::Playing)),
        );
    }
}

/// Walking speed in world units per second.
pub const PLAYER_SPEED: f32 = 4.0;

/// Half extents of the walkable wharf.
pub const WALK_BOUNDS: Vec2 = Vec2::new(14.0, 7.5);

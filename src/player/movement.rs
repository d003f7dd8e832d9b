use bevy::prelude::*;
use crate::shared::*;
use super::{PLAYER_SPEED, WALK_BOUNDS};

/// Next position for a move along `axis`, kept inside the wharf.
pub fn next_position(current: Vec2, axis: Vec2, dt: f32) -> Vec2 {
    let moved = current + axis * PLAYER_SPEED * dt;
    moved.clamp(-WALK_BOUNDS, WALK_BOUNDS)
}

pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    if input.move_axis == Vec2::ZERO {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };

    let next = next_position(
        transform.translation.truncate(),
        input.move_axis,
        time.delta_secs(),
    );
    transform.translation.x = next.x;
    transform.translation.y = next.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_at_player_speed() {
        let next = next_position(Vec2::ZERO, Vec2::X, 0.5);
        assert_eq!(next, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_clamped_to_wharf() {
        let next = next_position(Vec2::new(13.9, 0.0), Vec2::X, 1.0);
        assert_eq!(next.x, WALK_BOUNDS.x);
    }
}

use bevy::prelude::*;
use crate::shared::*;
use super::{Cat, CatState};

// ─────────────────────────────────────────────────────────────────────────────
// Walking to fish
// Moving cats head straight for their target fish and start eating once they
// are within arrival distance. A fish that vanished sends them back to waiting.
// ─────────────────────────────────────────────────────────────────────────────

/// One step from `from` toward `to`, never overshooting.
pub fn step_toward(from: Vec2, to: Vec2, speed: f32, dt: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= f32::EPSILON {
        return to;
    }
    let step = speed * dt;
    from + delta.normalize() * step.min(dist)
}

pub fn walk_to_fish(
    time: Res<Time>,
    mut cats: Query<(&mut Cat, &mut Transform)>,
    fish: Query<&Transform, (With<Fish>, Without<Cat>)>,
) {
    let dt = time.delta_secs();
    for (mut cat, mut transform) in &mut cats {
        if cat.state != CatState::Moving {
            continue;
        }
        let Some(target_pos) = cat
            .target
            .and_then(|t| fish.get(t).ok())
            .map(|t| t.translation.truncate())
        else {
            info!("[Cats] {} lost track of its fish.", cat.breed);
            cat.enter_state(CatState::Waiting);
            continue;
        };

        let current = transform.translation.truncate();
        let next = step_toward(current, target_pos, cat.effective_speed(), dt);
        transform.translation.x = next.x;
        transform.translation.y = next.y;

        // Face the direction of travel.
        let dx = target_pos.x - current.x;
        if dx.abs() > 0.01 {
            transform.scale.x = transform.scale.x.abs() * dx.signum();
        }

        if next.distance(target_pos) <= cat.arrive_distance {
            cat.enter_state(CatState::Eating);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_is_capped_by_speed() {
        let next = step_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, 0.5);
        assert_eq!(next, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_step_does_not_overshoot() {
        let target = Vec2::new(0.3, 0.4);
        assert_eq!(step_toward(Vec2::ZERO, target, 10.0, 1.0), target);
        assert_eq!(step_toward(target, target, 10.0, 1.0), target);
    }
}

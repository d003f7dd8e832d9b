use bevy::prelude::*;
use crate::shared::*;

const PLAYER_RADIUS: f32 = 0.4;
const Z_PLAYER: f32 = 10.0;

/// Spawn the player entity with all necessary components.
/// Runs once on `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    layout: Res<WharfLayout>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn if returning to Playing state.
    if !existing.is_empty() {
        return;
    }

    let start = Vec2::from_array(layout.player_start);
    commands.spawn((
        Player,
        Tag::new(DEFAULT_PLAYER_TAG),
        TriggerBody {
            radius: PLAYER_RADIUS,
        },
        // Placeholder sprite: a blue square
        Sprite {
            color: Color::srgb(0.2, 0.5, 0.8),
            custom_size: Some(Vec2::splat(PLAYER_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_translation(start.extend(Z_PLAYER)),
        Visibility::default(),
    ));
    info!("[Player] Spawned at ({:.1}, {:.1}).", start.x, start.y);
}

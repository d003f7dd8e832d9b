//! Minigame frame sprites and the fishing status line.

use bevy::prelude::*;

use crate::shared::*;
use super::{FishSelection, FishingMinigame, FishingPhase, FishingPhaseChanged, FishingState};

// ─── Colors ───────────────────────────────────────────────────────────────────

const COLOR_FRAME: Color = Color::srgba(0.15, 0.15, 0.15, 0.85);
const COLOR_ZONE: Color = Color::srgb(0.2, 0.85, 0.3);
const COLOR_ZONE_HIT: Color = Color::srgb(0.95, 0.85, 0.1);
const COLOR_FISH_ICON: Color = Color::srgb(0.9, 0.35, 0.1);

// ─── Layout (world units) ─────────────────────────────────────────────────────

const FRAME_X: f32 = 12.5;
const FRAME_WIDTH: f32 = 1.2;
const ICON_SIZE: f32 = 0.5;
const Z_FRAME: f32 = 50.0;

#[derive(Component, Debug)]
pub struct MinigameRoot;

#[derive(Component, Debug)]
pub struct MinigameZone;

#[derive(Component, Debug)]
pub struct MinigameFishIcon;

#[derive(Component, Debug)]
pub struct FishingStatusText;

/// Keeps the frame in step with the minigame: spawned when it starts,
/// moved every frame, despawned when it ends.
pub fn sync_minigame_ui(
    mut commands: Commands,
    minigame: Res<FishingMinigame>,
    roots: Query<Entity, With<MinigameRoot>>,
    mut zones: Query<(&mut Transform, &mut Sprite), (With<MinigameZone>, Without<MinigameFishIcon>)>,
    mut icons: Query<&mut Transform, (With<MinigameFishIcon>, Without<MinigameZone>)>,
) {
    if !minigame.active {
        for root in &roots {
            commands.entity(root).despawn_recursive();
        }
        return;
    }

    if roots.is_empty() {
        spawn_minigame_ui(&mut commands, &minigame);
        return;
    }

    for (mut transform, mut sprite) in &mut zones {
        transform.translation.y = minigame.zone_center;
        sprite.custom_size = Some(Vec2::new(FRAME_WIDTH, minigame.zone_half * 2.0));
        sprite.color = if minigame.in_area { COLOR_ZONE_HIT } else { COLOR_ZONE };
    }
    for mut transform in &mut icons {
        transform.translation.y = minigame.fish_y;
    }
}

fn spawn_minigame_ui(commands: &mut Commands, minigame: &FishingMinigame) {
    let height = minigame.frame_top - minigame.frame_bottom;
    let mid = (minigame.frame_top + minigame.frame_bottom) / 2.0;

    commands
        .spawn((
            Transform::from_translation(Vec3::new(FRAME_X, 0.0, Z_FRAME)),
            Visibility::default(),
            MinigameRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Sprite {
                    color: COLOR_FRAME,
                    custom_size: Some(Vec2::new(FRAME_WIDTH + 0.3, height)),
                    ..default()
                },
                Transform::from_translation(Vec3::new(0.0, mid, 0.0)),
            ));
            parent.spawn((
                Sprite {
                    color: COLOR_ZONE,
                    custom_size: Some(Vec2::new(FRAME_WIDTH, minigame.zone_half * 2.0)),
                    ..default()
                },
                Transform::from_translation(Vec3::new(0.0, minigame.zone_center, 1.0)),
                MinigameZone,
            ));
            parent.spawn((
                Sprite {
                    color: COLOR_FISH_ICON,
                    custom_size: Some(Vec2::splat(ICON_SIZE)),
                    ..default()
                },
                Transform::from_translation(Vec3::new(0.0, minigame.fish_y, 2.0)),
                MinigameFishIcon,
            ));
        });
}

// ─── Status line ──────────────────────────────────────────────────────────────

pub fn status_text(phase: FishingPhase) -> &'static str {
    match phase {
        FishingPhase::Idle => "Space: cast   F: put out a fish   Q/E: switch pole",
        FishingPhase::Casting => "Casting...",
        FishingPhase::Waiting => "Waiting for a bite... (Space or Esc to reel in)",
        FishingPhase::Biting => "Something bit! Press Space! (Esc lets it go)",
        FishingPhase::Minigame => "Press Space while the fish is in the green zone!",
        FishingPhase::Rewarding => "Caught one! Space to continue.",
        FishingPhase::Failed => "It got away. Space to continue.",
    }
}

pub fn spawn_fishing_status(mut commands: Commands, state: Res<FishingState>) {
    commands.spawn((
        Text::new(status_text(state.phase)),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            bottom: Val::Px(10.0),
            ..default()
        },
        FishingStatusText,
    ));
}

/// Status line and its colour. A landed fish is named in its rarity colour.
pub fn status_line(phase: FishingPhase, hooked: Option<&FishDef>) -> (String, Color) {
    match (phase, hooked) {
        (FishingPhase::Rewarding, Some(fish)) => (
            format!("Caught a {}! Space to continue.", fish.name),
            fish.rarity.color(),
        ),
        _ => (status_text(phase).to_string(), Color::WHITE),
    }
}

pub fn update_fishing_status(
    mut changes: EventReader<FishingPhaseChanged>,
    selection: Res<FishSelection>,
    registry: Res<FishRegistry>,
    mut texts: Query<(&mut Text, &mut TextColor), With<FishingStatusText>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    let hooked = selection.current.as_deref().and_then(|id| registry.get(id));
    let (line, color) = status_line(change.to, hooked);
    for (mut text, mut text_color) in &mut texts {
        **text = line.clone();
        text_color.0 = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_line_names_fish_in_rarity_color() {
        let koi = FishDef {
            id: "koi".into(),
            name: "Koi".into(),
            rarity: Rarity::Rare,
            ..Default::default()
        };
        let (line, color) = status_line(FishingPhase::Rewarding, Some(&koi));
        assert_eq!(line, "Caught a Koi! Space to continue.");
        assert_eq!(color, Rarity::Rare.color());
    }

    #[test]
    fn test_other_phases_use_plain_text() {
        let koi = FishDef::default();
        let (line, color) = status_line(FishingPhase::Minigame, Some(&koi));
        assert_eq!(line, status_text(FishingPhase::Minigame));
        assert_eq!(color, Color::WHITE);
        let (line, _) = status_line(FishingPhase::Rewarding, None);
        assert_eq!(line, status_text(FishingPhase::Rewarding));
    }
}

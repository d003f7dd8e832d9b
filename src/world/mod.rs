//! World domain plugin for Whisker Wharf.
//!
//! Responsible for:
//! - The wharf backdrop (water, boards, the cat café door)
//! - The dock trigger zone and the café door fade
//! - The first cats of the day

use bevy::prelude::*;

use crate::shared::*;
use crate::triggers::{TriggerBinding, TriggerZone};
use crate::ui::FadeTrigger;

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::Playing),
            (spawn_wharf, spawn_first_cats),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug)]
pub struct WharfScenery;

/// Where the player stands to fish.
#[derive(Component, Debug)]
pub struct Dock;

/// Walking in here fades the screen and lets a new cat out of the café.
#[derive(Component, Debug)]
pub struct CafeDoor;

/// Custom action name fired when the player steps onto the dock.
pub const DOCK_ENTERED: &str = "dock_entered";
pub const DOCK_LEFT: &str = "dock_left";

const COLOR_WATER: Color = Color::srgb(0.12, 0.3, 0.5);
const COLOR_BOARDS: Color = Color::srgb(0.45, 0.32, 0.2);
const COLOR_DOCK: Color = Color::srgb(0.38, 0.26, 0.16);
const COLOR_DOOR: Color = Color::srgb(0.7, 0.25, 0.3);

// ═══════════════════════════════════════════════════════════════════════
// SETUP
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_wharf(mut commands: Commands, layout: Res<WharfLayout>) {
    let view = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) / PIXELS_PER_UNIT;

    // Water fills the top half, boards the bottom.
    commands.spawn((
        WharfScenery,
        Sprite {
            color: COLOR_WATER,
            custom_size: Some(Vec2::new(view.x, view.y / 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, view.y / 4.0, 0.0),
    ));
    commands.spawn((
        WharfScenery,
        Sprite {
            color: COLOR_BOARDS,
            custom_size: Some(Vec2::new(view.x, view.y / 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -view.y / 4.0, 0.0),
    ));

    let dock = Vec2::from_array(layout.dock_position);
    commands.spawn((
        Dock,
        Sprite {
            color: COLOR_DOCK,
            custom_size: Some(Vec2::splat(layout.dock_radius * 2.0)),
            ..default()
        },
        Transform::from_translation(dock.extend(1.0)),
        TriggerZone::new(layout.dock_radius)
            .on_enter(TriggerBinding::new(
                "",
                vec![
                    GameAction::Custom(DOCK_ENTERED.to_string()),
                    GameAction::Log("On the dock. Space to cast.".to_string()),
                ],
            ))
            .on_exit(TriggerBinding::new(
                "",
                vec![GameAction::Custom(DOCK_LEFT.to_string())],
            )),
    ));

    let door_pos = Vec2::from_array(layout.cafe_door_position);
    let door = commands
        .spawn((
            CafeDoor,
            Sprite {
                color: COLOR_DOOR,
                custom_size: Some(Vec2::new(1.0, 1.6)),
                ..default()
            },
            Transform::from_translation(door_pos.extend(1.0)),
        ))
        .id();
    let cat_exit = door_pos + Vec2::new(1.5, 0.0);
    commands.entity(door).insert((
        FadeTrigger {
            kind: FadeKind::FadeOnce,
            on_black: vec![GameAction::SpawnCat {
                kind: CatKind::Common,
                position: cat_exit,
            }],
        },
        TriggerZone::new(layout.cafe_door_radius).on_enter(TriggerBinding::new(
            "",
            vec![GameAction::Fade {
                trigger: door,
                kind: None,
            }],
        )),
    ));

    info!("[World] Wharf ready.");
}

/// One common cat and one orange cat are already waiting when play starts.
pub fn spawn_first_cats(
    config: Res<CatSpawnerConfig>,
    mut requests: EventWriter<SpawnCatEvent>,
) {
    let kinds = [CatKind::Common, CatKind::Orange];
    for (kind, point) in kinds.iter().zip(config.spawn_points.iter()) {
        requests.send(SpawnCatEvent {
            kind: *kind,
            position: Vec2::from_array(*point),
        });
    }
}

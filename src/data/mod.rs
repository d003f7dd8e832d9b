//! Data layer: populates all registries at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading). It reads the RON game
//! config (falling back to the built-in data when the file is missing or
//! broken), validates it, fills FishRegistry and PoleLoadout, inserts every
//! tuning resource, then transitions the game into GameState::Playing.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once GameState has advanced past Loading.

mod config;
mod fish;
mod poles;

pub use config::*;

use bevy::prelude::*;
use crate::shared::*;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.ron";

/// Where the game config is read from. Tests point this at a missing file
/// to get the built-in data.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub String);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(DEFAULT_CONFIG_PATH.to_string())
    }
}

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfigPath>()
            .init_resource::<FishRegistry>()
            .init_resource::<PoleLoadout>()
            // Defaults until the config replaces them.
            .init_resource::<FishingTuning>()
            .init_resource::<MinigameTuning>()
            .init_resource::<CatTuning>()
            .init_resource::<CatSpawnerConfig>()
            .init_resource::<WharfLayout>()
            .add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that loads the config, fills every registry and tuning
/// resource, and then transitions to Playing.
fn load_all_data(
    mut commands: Commands,
    path: Res<ConfigPath>,
    mut fish_registry: ResMut<FishRegistry>,
    mut loadout: ResMut<PoleLoadout>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Loading game config from '{}'...", path.0);

    let mut config = match load_config_file(&path.0) {
        Ok(config) => config,
        Err(e) => {
            warn!("[Data] {}; using built-in data", e);
            GameConfig::default()
        }
    };

    for issue in config.validate() {
        warn!("[Data] Config fixed up: {}", issue);
    }

    if config.fish.is_empty() {
        warn!("[Data] No fish configured; nothing will ever bite.");
    }
    fish_registry.fish = std::mem::take(&mut config.fish);
    info!("[Data]   Fish loaded: {}", fish_registry.fish.len());

    loadout.poles = std::mem::take(&mut config.poles);
    loadout.current = None;
    if loadout.poles.is_empty() {
        warn!("[Data] No poles configured.");
    } else if let Err(e) = loadout.set_current(config.starting_pole) {
        warn!("[Data] Starting pole: {}; no pole equipped.", e);
    }
    info!(
        "[Data]   Poles loaded: {} (equipped: {})",
        loadout.poles.len(),
        loadout.current_name()
    );

    commands.insert_resource(config.fishing);
    commands.insert_resource(config.minigame);
    commands.insert_resource(config.cats);
    commands.insert_resource(config.spawner);
    commands.insert_resource(config.wharf);

    next_state.set(GameState::Playing);
}

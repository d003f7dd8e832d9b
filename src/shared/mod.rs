//! Shared components, resources, events, and states for Whisker Wharf.
//!
//! This is the type contract. Every domain plugin imports from here.
//! Domains talk through these types and events; only the world setup reaches
//! into `triggers` and `ui` directly, to build its zones and fade triggers.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// FISH DATA
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every fish species.
pub type FishId = String;

pub const UNKNOWN_FISH_NAME: &str = "Unknown Fish";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Tint for a caught fish's name on the status line.
    pub fn color(self) -> Color {
        match self {
            Rarity::Common => Color::WHITE,
            Rarity::Uncommon => Color::srgb(0.0, 1.0, 0.0),
            Rarity::Rare => Color::srgb(0.0, 0.0, 1.0),
            Rarity::Epic => Color::srgb(1.0, 0.0, 1.0),
            Rarity::Legendary => Color::srgb(1.0, 0.92, 0.016),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishDef {
    pub id: FishId,
    pub name: String,
    pub description: String,
    /// How much appetite a cat gains from eating this fish (1-100).
    pub satiety: u32,
    /// Minigame difficulty (1-5).
    pub difficulty: u8,
    pub rarity: Rarity,
    /// Relative weight in the selection pool (1-100).
    pub spawn_weight: u32,
    /// Lowest pole level that can hook this fish (1-5).
    pub min_pole_level: u8,
    /// Highest pole level that can hook this fish; 0 = no upper bound.
    pub max_pole_level: u8,
    /// sRGB tint for the world sprite.
    pub color: [f32; 3],
    /// Sprite scale multiplier (0.5-2.0).
    pub size_scale: f32,
}

impl Default for FishDef {
    fn default() -> Self {
        Self {
            id: "common_fish".into(),
            name: "Common Fish".into(),
            description: "Just a fish.".into(),
            satiety: 20,
            difficulty: 1,
            rarity: Rarity::Common,
            spawn_weight: 10,
            min_pole_level: 1,
            max_pole_level: 0,
            color: [1.0, 1.0, 1.0],
            size_scale: 1.0,
        }
    }
}

impl FishDef {
    pub fn meets_pole_requirement(&self, pole_level: u8) -> bool {
        if pole_level < self.min_pole_level {
            return false;
        }
        if self.max_pole_level > 0 && pole_level > self.max_pole_level {
            return false;
        }
        true
    }

    pub fn tint(&self) -> Color {
        Color::srgb(self.color[0], self.color[1], self.color[2])
    }
}

/// All configured fish, in configuration order. Order matters: the weighted
/// pick walks the list front to back.
#[derive(Resource, Debug, Clone, Default)]
pub struct FishRegistry {
    pub fish: Vec<FishDef>,
}

impl FishRegistry {
    pub fn get(&self, id: &str) -> Option<&FishDef> {
        self.fish.iter().find(|f| f.id == id)
    }

    pub fn count_by_rarity(&self, rarity: Rarity) -> usize {
        self.fish.iter().filter(|f| f.rarity == rarity).count()
    }

    pub fn all_names(&self) -> Vec<String> {
        self.fish.iter().map(|f| f.name.clone()).collect()
    }

    pub fn name_of(&self, id: &str) -> &str {
        self.get(id).map(|f| f.name.as_str()).unwrap_or(UNKNOWN_FISH_NAME)
    }

    /// Satiety of a species, or 0 when it is not registered.
    pub fn satiety_of(&self, id: &str) -> u32 {
        self.get(id).map(|f| f.satiety).unwrap_or(0)
    }

    /// Minigame difficulty of a species, or 1 when it is not registered.
    pub fn difficulty_of(&self, id: &str) -> u8 {
        self.get(id).map(|f| f.difficulty).unwrap_or(1)
    }
}

/// A fish lying in the world, waiting to be eaten.
#[derive(Component, Debug, Clone)]
pub struct Fish {
    pub species: FishId,
}

// ═══════════════════════════════════════════════════════════════════════
// POLE DATA
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoleDef {
    pub name: String,
    /// Pole level (1-5). Gates which fish can bite.
    pub level: u8,
    /// Widens the minigame target zone (0.0-1.0).
    pub success_bonus: f32,
    /// Seconds taken off the bite window.
    pub biting_time_reduction: f32,
    /// Seconds taken off the wait for a bite.
    pub wait_time_reduction: f32,
}

impl Default for PoleDef {
    fn default() -> Self {
        Self {
            name: "Bamboo Pole".into(),
            level: 1,
            success_bonus: 0.0,
            biting_time_reduction: 0.0,
            wait_time_reduction: 0.0,
        }
    }
}

pub const NO_POLE_NAME: &str = "No Pole";

/// Configured poles plus which one is in hand.
#[derive(Resource, Debug, Clone, Default)]
pub struct PoleLoadout {
    pub poles: Vec<PoleDef>,
    pub current: Option<usize>,
}

impl PoleLoadout {
    pub fn current(&self) -> Option<&PoleDef> {
        self.current.and_then(|i| self.poles.get(i))
    }

    pub fn current_level(&self) -> u8 {
        self.current().map(|p| p.level).unwrap_or(1)
    }

    pub fn current_name(&self) -> &str {
        self.current().map(|p| p.name.as_str()).unwrap_or(NO_POLE_NAME)
    }

    pub fn success_bonus(&self) -> f32 {
        self.current().map(|p| p.success_bonus).unwrap_or(0.0)
    }

    pub fn biting_time_reduction(&self) -> f32 {
        self.current().map(|p| p.biting_time_reduction).unwrap_or(0.0)
    }

    pub fn wait_time_reduction(&self) -> f32 {
        self.current().map(|p| p.wait_time_reduction).unwrap_or(0.0)
    }

    pub fn has_level(&self, level: u8) -> bool {
        self.poles.iter().any(|p| p.level == level)
    }

    pub fn names(&self) -> Vec<String> {
        self.poles.iter().map(|p| p.name.clone()).collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CATS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CatKind {
    #[default]
    Common,
    Orange,
}

// ═══════════════════════════════════════════════════════════════════════
// FADES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FadeKind {
    /// Transparent to opaque black.
    FadeIn,
    /// Opaque black to transparent.
    FadeOut,
    /// Transparent to black and back again.
    #[default]
    FadeOnce,
}

// ═══════════════════════════════════════════════════════════════════════
// GAME ACTIONS: data-driven callbacks wired onto triggers and fades
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    StartFishing,
    ReelRod,
    NextPole,
    PreviousPole,
    EquipPole(usize),
    SpawnCat { kind: CatKind, position: Vec2 },
    /// Put the most recently caught fish from the basket at `position`.
    PlaceFish { position: Vec2 },
    /// Run a fade on the given `FadeTrigger` entity; `None` uses its own kind.
    Fade { trigger: Entity, kind: Option<FadeKind> },
    Log(String),
    /// Named hook for game-specific listeners.
    Custom(String),
}

/// An action to run, along with the entity that fired it.
#[derive(Event, Debug, Clone)]
pub struct GameActionEvent {
    pub action: GameAction,
    pub source: Option<Entity>,
}

/// Fired for `GameAction::Custom`.
#[derive(Event, Debug, Clone)]
pub struct CustomActionEvent {
    pub name: String,
    pub source: Option<Entity>,
}

// ═══════════════════════════════════════════════════════════════════════
// CROSS-DOMAIN EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishingCommand {
    Start,
    Reel,
}

/// Drive the fishing flow without keyboard input.
#[derive(Event, Debug, Clone, Copy)]
pub struct FishingCommandEvent(pub FishingCommand);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoleCommand {
    Next,
    Previous,
    Equip(usize),
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PoleCommandEvent(pub PoleCommand);

/// The equipped pole changed.
#[derive(Event, Debug, Clone)]
pub struct PoleChangedEvent {
    pub index: usize,
    pub name: String,
    pub level: u8,
}

/// Request a new cat at `position`.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnCatEvent {
    pub kind: CatKind,
    pub position: Vec2,
}

/// Put a fish in the world. `species: None` takes the newest fish from the basket.
#[derive(Event, Debug, Clone)]
pub struct PlaceFishEvent {
    pub species: Option<FishId>,
    pub position: Vec2,
}

/// Start a screen fade through a `FadeTrigger` entity.
#[derive(Event, Debug, Clone)]
pub struct FadeRequest {
    pub trigger: Entity,
    pub kind: Option<FadeKind>,
    /// Replaces the trigger's black-point actions before fading.
    pub replace_actions: Option<Vec<GameAction>>,
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Game actions read from hardware this frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub interact: bool,
    pub cancel: bool,
    pub next_pole: bool,
    pub prev_pole: bool,
    pub place_fish: bool,
    /// World-space position of a left click this frame.
    pub click_world: Option<Vec2>,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub interact: KeyCode,
    pub cancel: KeyCode,
    pub next_pole: KeyCode,
    pub prev_pole: KeyCode,
    pub place_fish: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            interact: KeyCode::Space,
            cancel: KeyCode::Escape,
            next_pole: KeyCode::KeyE,
            prev_pole: KeyCode::KeyQ,
            place_fish: KeyCode::KeyF,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TAGS & BODIES
// ═══════════════════════════════════════════════════════════════════════

/// Free-form tag compared by trigger zones.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

/// Anything that can touch a trigger zone.
#[derive(Component, Debug, Clone, Copy)]
pub struct TriggerBody {
    pub radius: f32,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

// ═══════════════════════════════════════════════════════════════════════
// BASKET
// ═══════════════════════════════════════════════════════════════════════

/// Caught fish, newest last.
#[derive(Resource, Debug, Clone, Default)]
pub struct FishBasket {
    pub fish: Vec<FishId>,
    pub caught_by_species: HashMap<FishId, u32>,
}

impl FishBasket {
    pub fn add(&mut self, id: &str) {
        self.fish.push(id.to_string());
        *self.caught_by_species.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn take_latest(&mut self) -> Option<FishId> {
        self.fish.pop()
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TUNING: filled from GameConfig during Loading
// ═══════════════════════════════════════════════════════════════════════

/// Base timings of the fishing flow, before pole bonuses.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishingTuning {
    pub min_wait_time: f32,
    pub max_wait_time: f32,
    /// How long a bite stays on the hook.
    pub biting_duration: f32,
    /// Delay between the cast and the start of the wait.
    pub cast_delay: f32,
}

impl Default for FishingTuning {
    fn default() -> Self {
        Self {
            min_wait_time: 3.0,
            max_wait_time: 10.0,
            biting_duration: 3.0,
            cast_delay: 1.0,
        }
    }
}

/// Minigame frame is a vertical strip from `fish_start_y` to `frame_top`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinigameTuning {
    pub fish_start_y: f32,
    pub frame_top: f32,
    pub base_speed: f32,
    pub acceleration_per_level: f32,
    pub zone_half_base: f32,
    pub zone_half_per_level: f32,
    pub zone_amplitude: f32,
    pub zone_frequency_base: f32,
    pub zone_frequency_per_level: f32,
}

impl Default for MinigameTuning {
    fn default() -> Self {
        Self {
            fish_start_y: -4.0,
            frame_top: 4.0,
            base_speed: 0.6,
            acceleration_per_level: 0.25,
            zone_half_base: 1.2,
            zone_half_per_level: 0.15,
            zone_amplitude: 2.0,
            zone_frequency_base: 0.8,
            zone_frequency_per_level: 0.35,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatTuning {
    pub starting_patience: f32,
    /// Patience lost per second.
    pub patience_decay: f32,
    pub detection_range: f32,
    /// Walking speed in world units per second.
    pub speed: f32,
    pub arrive_distance: f32,
    pub appear_duration: f32,
    pub groom_duration: f32,
    pub leave_duration: f32,
    /// Orange cats: range and speed multiplier (1-3).
    pub greediness: f32,
    /// Orange cats: grooming time multiplier (1-2).
    pub laziness: f32,
    /// Orange cats: extra satiety as a fraction of the fish's.
    pub orange_bonus_ratio: f32,
    /// Orange cats: patience decay multiplier while fish are in range.
    pub orange_patience_damping: f32,
}

impl Default for CatTuning {
    fn default() -> Self {
        Self {
            starting_patience: 10.0,
            patience_decay: 1.0,
            detection_range: 5.0,
            speed: 3.5,
            arrive_distance: 0.5,
            appear_duration: 2.0,
            groom_duration: 3.0,
            leave_duration: 3.0,
            greediness: 2.0,
            laziness: 1.5,
            orange_bonus_ratio: 0.5,
            orange_patience_damping: 0.5,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatSpawnerConfig {
    pub enabled: bool,
    /// Seconds between arrivals.
    pub interval: f32,
    pub max_cats: usize,
    /// Probability (0-1) that an arrival is an orange cat.
    pub orange_chance: f64,
    pub spawn_points: Vec<[f32; 2]>,
}

impl Default for CatSpawnerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 12.0,
            max_cats: 4,
            orange_chance: 0.3,
            spawn_points: vec![[-7.0, 2.5], [7.0, 2.5], [-6.0, -3.5], [6.0, -3.5]],
        }
    }
}

/// Where things sit on the wharf, in world units.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WharfLayout {
    pub player_start: [f32; 2],
    pub feeding_spot: [f32; 2],
    /// Placed fish land up to this far from the feeding spot.
    pub feeding_jitter: f32,
    pub dock_position: [f32; 2],
    pub dock_radius: f32,
    pub cafe_door_position: [f32; 2],
    pub cafe_door_radius: f32,
}

impl Default for WharfLayout {
    fn default() -> Self {
        Self {
            player_start: [0.0, -1.0],
            feeding_spot: [0.0, -2.5],
            feeding_jitter: 1.5,
            dock_position: [0.0, 3.0],
            dock_radius: 1.5,
            cafe_door_position: [-8.0, -1.0],
            cafe_door_radius: 1.0,
        }
    }
}

impl WharfLayout {
    pub fn feeding_spot(&self) -> Vec2 {
        Vec2::from_array(self.feeding_spot)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

/// World units are metres-ish; one unit is this many screen pixels.
pub const PIXELS_PER_UNIT: f32 = 32.0;
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

pub const MAX_APPETITE: f32 = 100.0;
pub const MAX_PATIENCE: f32 = 100.0;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;
pub const MAX_POLE_LEVEL: u8 = 5;

pub const DEFAULT_PLAYER_TAG: &str = "Player";

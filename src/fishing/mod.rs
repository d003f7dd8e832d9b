use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::shared::*;

// ─── Sub-modules ────────────────────────────────────────────────────────────
mod cast;
mod fish_select;
mod minigame;
mod render;
mod resolve;

pub use cast::*;
pub use fish_select::*;
pub use minigame::*;
pub use render::*;
pub use resolve::*;

// ─── Plugin ─────────────────────────────────────────────────────────────────

pub struct FishingPlugin;

impl Plugin for FishingPlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<FishingState>()
            .init_resource::<FishingMinigame>()
            .init_resource::<FishSelection>()
            .init_resource::<FishBasket>()
            // Events
            .add_event::<FishingPhaseChanged>()
            .add_event::<CastRodEvent>()
            .add_event::<ReelRodEvent>()
            .add_event::<BiteEvent>()
            .add_event::<FishCaughtEvent>()
            .add_event::<FishEscapedEvent>()
            .add_event::<MinigameOutcomeEvent>()
            // The minigame reads the key before the flow does, so one press
            // never both lands a fish and dismisses the reward.
            .add_systems(
                Update,
                (
                    minigame::update_minigame,
                    cast::run_fishing_flow,
                    resolve::read_place_fish_input,
                    resolve::handle_place_fish,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::Playing), render::spawn_fishing_status)
            .add_systems(
                Update,
                (
                    render::sync_minigame_ui,
                    render::update_fishing_status,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ─── Fishing State Resource ──────────────────────────────────────────────────

/// Phase of the fishing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FishingPhase {
    #[default]
    Idle,
    /// Line is flying out.
    Casting,
    /// Bobber is in the water, waiting for a bite.
    Waiting,
    /// Fish has bitten; interact within the window to strike.
    Biting,
    Minigame,
    Rewarding,
    Failed,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FishingState {
    pub phase: FishingPhase,
    /// Seconds spent in the current phase.
    pub state_timer: f32,
    /// Wait rolled for this cast, pole bonus applied.
    pub wait_time: f32,
    /// Bite window for this cast, pole bonus applied.
    pub biting_duration: f32,
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FishingPhaseChanged {
    pub from: FishingPhase,
    pub to: FishingPhase,
}

#[derive(Event, Debug, Clone, Default)]
pub struct CastRodEvent;

#[derive(Event, Debug, Clone, Default)]
pub struct ReelRodEvent;

/// Something bit. `fish` is `None` when no fish could be selected.
#[derive(Event, Debug, Clone)]
pub struct BiteEvent {
    pub fish: Option<FishId>,
}

#[derive(Event, Debug, Clone)]
pub struct FishCaughtEvent {
    pub fish_id: Option<FishId>,
}

#[derive(Event, Debug, Clone)]
pub struct FishEscapedEvent {
    pub fish_id: Option<FishId>,
}

// ─── Phase context ───────────────────────────────────────────────────────────

/// Everything a phase change may touch.
#[derive(SystemParam)]
pub struct FishingContext<'w> {
    pub tuning: Res<'w, FishingTuning>,
    pub minigame_tuning: Res<'w, MinigameTuning>,
    pub loadout: Res<'w, PoleLoadout>,
    pub registry: Res<'w, FishRegistry>,
    pub selection: ResMut<'w, FishSelection>,
    pub minigame: ResMut<'w, FishingMinigame>,
    pub basket: ResMut<'w, FishBasket>,
    pub phase_changed: EventWriter<'w, FishingPhaseChanged>,
    pub cast: EventWriter<'w, CastRodEvent>,
    pub reel: EventWriter<'w, ReelRodEvent>,
    pub bite: EventWriter<'w, BiteEvent>,
    pub caught: EventWriter<'w, FishCaughtEvent>,
    pub escaped: EventWriter<'w, FishEscapedEvent>,
}

use bevy::prelude::*;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Sub-modules
// ─────────────────────────────────────────────────────────────────────────────
mod behavior;
mod feeding;
mod interaction;
mod movement;
mod spawning;

pub use behavior::*;
pub use feeding::*;
pub use interaction::*;
pub use movement::*;
pub use spawning::*;

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct CatsPlugin;

impl Plugin for CatsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CatSpawner>()
            .add_event::<CatAppearedEvent>()
            .add_event::<CatFedEvent>()
            .add_event::<CatLeftEvent>()
            .add_event::<CatInfoEvent>()
            .add_systems(OnEnter(GameState::Playing), spawning::reset_cat_spawner)
            .add_systems(
                Update,
                (
                    spawning::tick_cat_spawner,
                    spawning::spawn_requested_cats,
                    behavior::tick_cats,
                    behavior::look_for_fish,
                    movement::walk_to_fish,
                    feeding::eat_fish,
                    behavior::leave_wharf,
                    behavior::check_patience,
                    interaction::toggle_cat_info,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Components
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatState {
    #[default]
    Appearing,
    Waiting,
    Moving,
    Eating,
    Grooming,
    Leaving,
}

/// Extra knobs carried by orange cats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrangeTraits {
    /// Multiplies detection range and walking speed (1-3).
    pub greediness: f32,
    /// Multiplies grooming time (1-2).
    pub laziness: f32,
    /// Extra satiety as a fraction of the fish's.
    pub bonus_ratio: f32,
    /// Patience decay multiplier while fish are in range.
    pub patience_damping: f32,
}

#[derive(Component, Debug, Clone)]
pub struct Cat {
    pub breed: String,
    pub state: CatState,
    /// 0-100; grows with every fish eaten.
    pub appetite: f32,
    /// 0-100; the cat leaves at 0.
    pub patience: f32,
    /// Patience lost per second.
    pub patience_decay: f32,
    pub detection_range: f32,
    pub speed: f32,
    pub arrive_distance: f32,
    pub appear_duration: f32,
    pub groom_duration: f32,
    pub leave_duration: f32,
    pub orange: Option<OrangeTraits>,
    /// Fish being walked to or eaten.
    pub target: Option<Entity>,
    /// Delayed state change. Entering any state replaces it.
    pub pending: Option<(CatState, Timer)>,
    /// Seconds spent in the current state.
    pub state_time: f32,
    pub info_visible: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Event, Debug, Clone)]
pub struct CatAppearedEvent {
    pub cat: Entity,
    pub kind: CatKind,
    pub position: Vec2,
}

#[derive(Event, Debug, Clone)]
pub struct CatFedEvent {
    pub cat: Entity,
    pub fish: FishId,
    /// Appetite actually gained, orange bonus included.
    pub gained: u32,
    pub appetite: f32,
}

#[derive(Event, Debug, Clone)]
pub struct CatLeftEvent {
    pub cat: Entity,
    pub kind: CatKind,
    pub appetite: f32,
}

/// A cat's info panel was toggled by a click.
#[derive(Event, Debug, Clone)]
pub struct CatInfoEvent {
    pub cat: Entity,
    pub visible: bool,
    pub line: String,
}

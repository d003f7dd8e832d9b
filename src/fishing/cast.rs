//! Fishing flow: cast, wait, bite, strike, and the phase transitions between.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::{
    prepare_fish_for_minigame, resolve, FishingContext, FishingPhase, FishingPhaseChanged,
    FishingState, MinigameOutcome, MinigameOutcomeEvent,
};

// ─── Pole bonuses ────────────────────────────────────────────────────────────

/// Wait range with the pole's reduction applied. Never below (1, 2).
pub fn effective_wait_range(tuning: &FishingTuning, wait_reduction: f32) -> (f32, f32) {
    let min = (tuning.min_wait_time - wait_reduction).max(1.0);
    let max = (tuning.max_wait_time - wait_reduction).max(2.0);
    (min, max)
}

/// Bite window with the pole's reduction applied. Never below 1 second.
pub fn effective_biting_duration(tuning: &FishingTuning, biting_reduction: f32) -> f32 {
    (tuning.biting_duration - biting_reduction).max(1.0)
}

/// Uniform roll in `[min, max)`; a collapsed range yields `min`.
pub fn roll_wait_time(min: f32, max: f32, rng: &mut impl Rng) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

// ─── Transitions ─────────────────────────────────────────────────────────────

impl FishingContext<'_> {
    /// Leave the current phase and enter `next`, running the entry work.
    pub fn set_phase(&mut self, state: &mut FishingState, next: FishingPhase, rng: &mut impl Rng) {
        let from = state.phase;
        if from == FishingPhase::Minigame {
            self.minigame.stop();
        }

        state.phase = next;
        state.state_timer = 0.0;

        match next {
            FishingPhase::Idle => self.selection.clear(),
            FishingPhase::Waiting => {
                let (min, max) =
                    effective_wait_range(&self.tuning, self.loadout.wait_time_reduction());
                state.wait_time = roll_wait_time(min, max, rng);
            }
            FishingPhase::Biting => {
                state.biting_duration =
                    effective_biting_duration(&self.tuning, self.loadout.biting_time_reduction());
                let fish = prepare_fish_for_minigame(
                    &mut self.selection,
                    &self.registry,
                    self.loadout.current_level(),
                    rng,
                );
                self.bite.send(super::BiteEvent { fish });
            }
            FishingPhase::Minigame => {
                let difficulty = match self.selection.current.as_deref() {
                    Some(id) => self.registry.difficulty_of(id),
                    None => {
                        warn!("[Fishing] No fish selected; minigame uses difficulty 1.");
                        1
                    }
                };
                let bonus = self.loadout.success_bonus();
                self.minigame.start(difficulty, bonus, &self.minigame_tuning, rng);
            }
            FishingPhase::Casting | FishingPhase::Rewarding | FishingPhase::Failed => {}
        }

        info!("[Fishing] {:?} -> {:?}", from, next);
        self.phase_changed.send(FishingPhaseChanged { from, to: next });
    }
}

/// Cast the line. Only works from Idle.
pub fn start_fishing(ctx: &mut FishingContext, state: &mut FishingState, rng: &mut impl Rng) -> bool {
    if state.phase != FishingPhase::Idle {
        return false;
    }
    ctx.set_phase(state, FishingPhase::Casting, rng);
    ctx.cast.send(super::CastRodEvent);
    true
}

/// Pull the line back in. Only works while waiting or biting.
pub fn reel_rod(ctx: &mut FishingContext, state: &mut FishingState, rng: &mut impl Rng) -> bool {
    if !matches!(state.phase, FishingPhase::Waiting | FishingPhase::Biting) {
        return false;
    }
    ctx.reel.send(super::ReelRodEvent);
    ctx.set_phase(state, FishingPhase::Idle, rng);
    true
}

// ─── Flow system ─────────────────────────────────────────────────────────────

/// Drives the phase machine. At most one phase change per frame.
pub fn run_fishing_flow(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut state: ResMut<FishingState>,
    mut commands: EventReader<FishingCommandEvent>,
    mut outcomes: EventReader<MinigameOutcomeEvent>,
    mut ctx: FishingContext,
) {
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    let mut start_requested = false;
    let mut reel_requested = false;
    for FishingCommandEvent(command) in commands.read() {
        match command {
            FishingCommand::Start => start_requested = true,
            FishingCommand::Reel => reel_requested = true,
        }
    }

    // Minigame results come first and consume this frame's input.
    let mut resolved = false;
    for MinigameOutcomeEvent(outcome) in outcomes.read() {
        if state.phase != FishingPhase::Minigame || resolved {
            continue;
        }
        match outcome {
            MinigameOutcome::Caught => resolve::resolve_catch(&mut ctx, &mut state, &mut rng),
            MinigameOutcome::Escaped => resolve::resolve_escape(&mut ctx, &mut state, &mut rng),
        }
        resolved = true;
    }
    if resolved {
        return;
    }

    let interact = input.interact;
    // Cancel pulls the line back in; it never starts or strikes.
    let reel = reel_requested || input.cancel;

    match state.phase {
        FishingPhase::Idle => {
            if interact || start_requested {
                start_fishing(&mut ctx, &mut state, &mut rng);
            }
        }
        FishingPhase::Casting => {
            state.state_timer += dt;
            if state.state_timer >= ctx.tuning.cast_delay {
                ctx.set_phase(&mut state, FishingPhase::Waiting, &mut rng);
            }
        }
        FishingPhase::Waiting => {
            state.state_timer += dt;
            if interact || reel {
                reel_rod(&mut ctx, &mut state, &mut rng);
            } else if state.state_timer >= state.wait_time {
                ctx.set_phase(&mut state, FishingPhase::Biting, &mut rng);
            }
        }
        FishingPhase::Biting => {
            state.state_timer += dt;
            if interact {
                ctx.set_phase(&mut state, FishingPhase::Minigame, &mut rng);
            } else if reel {
                reel_rod(&mut ctx, &mut state, &mut rng);
            } else if state.state_timer >= state.biting_duration {
                info!("[Fishing] Too slow; the fish got away.");
                ctx.set_phase(&mut state, FishingPhase::Failed, &mut rng);
            }
        }
        FishingPhase::Minigame => {
            state.state_timer += dt;
        }
        FishingPhase::Rewarding | FishingPhase::Failed => {
            if interact {
                ctx.set_phase(&mut state, FishingPhase::Idle, &mut rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_wait_range_without_pole() {
        let tuning = FishingTuning::default();
        assert_eq!(effective_wait_range(&tuning, 0.0), (3.0, 10.0));
        assert_eq!(effective_biting_duration(&tuning, 0.0), 3.0);
    }

    #[test]
    fn test_pole_reductions_have_floors() {
        let tuning = FishingTuning::default();
        assert_eq!(effective_wait_range(&tuning, 2.0), (1.0, 8.0));
        assert_eq!(effective_wait_range(&tuning, 20.0), (1.0, 2.0));
        assert_eq!(effective_biting_duration(&tuning, 0.5), 2.5);
        assert_eq!(effective_biting_duration(&tuning, 5.0), 1.0);
    }

    #[test]
    fn test_reductions_do_not_accumulate() {
        let tuning = FishingTuning::default();
        let first = effective_wait_range(&tuning, 1.0);
        let second = effective_wait_range(&tuning, 1.0);
        assert_eq!(first, second);
        assert_eq!(tuning.min_wait_time, 3.0, "base tuning is never mutated");
    }

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..500 {
            let t = roll_wait_time(3.0, 10.0, &mut rng);
            assert!((3.0..10.0).contains(&t));
        }
        assert_eq!(roll_wait_time(4.0, 4.0, &mut rng), 4.0);
    }
}

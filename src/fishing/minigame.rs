//! Timing minigame: a fish icon rises through a vertical frame while a target
//! zone bobs up and down. Pressing interact while the icon is inside the zone
//! lands the fish; letting the icon reach the top loses it.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinigameOutcome {
    Caught,
    Escaped,
}

/// Sent once when a running minigame ends.
#[derive(Event, Debug, Clone, Copy)]
pub struct MinigameOutcomeEvent(pub MinigameOutcome);

#[derive(Resource, Debug, Clone, Default)]
pub struct FishingMinigame {
    pub active: bool,
    /// Whether the fish icon is inside the target zone.
    pub in_area: bool,
    difficulty: u8,
    /// Overrides the tuned start height for the next game.
    start_y_override: Option<f32>,
    pub frame_bottom: f32,
    pub frame_top: f32,
    pub fish_y: f32,
    pub fish_speed: f32,
    acceleration: f32,
    pub zone_center: f32,
    pub zone_half: f32,
    zone_mid: f32,
    zone_amplitude: f32,
    zone_frequency: f32,
    zone_phase: f32,
    pub elapsed: f32,
}

impl FishingMinigame {
    /// Begin a game. Does nothing while one is already running.
    pub fn start(
        &mut self,
        difficulty: u8,
        success_bonus: f32,
        tuning: &MinigameTuning,
        rng: &mut impl Rng,
    ) -> bool {
        if self.active {
            return false;
        }

        let level = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        let level_f = level as f32;
        self.difficulty = level;

        self.frame_bottom = self.start_y_override.unwrap_or(tuning.fish_start_y);
        self.frame_top = tuning.frame_top.max(self.frame_bottom + 1.0);
        self.fish_y = self.frame_bottom;
        self.fish_speed = tuning.base_speed;
        self.acceleration = tuning.acceleration_per_level * level_f;

        let base_half = (tuning.zone_half_base - tuning.zone_half_per_level * level_f).max(0.1);
        self.zone_half = base_half * (1.0 + success_bonus.clamp(0.0, 1.0));
        self.zone_mid = (self.frame_bottom + self.frame_top) / 2.0;
        self.zone_amplitude = tuning.zone_amplitude;
        self.zone_frequency = tuning.zone_frequency_base + tuning.zone_frequency_per_level * level_f;
        self.zone_phase = rng.gen_range(0.0..TAU);

        self.elapsed = 0.0;
        self.active = true;
        self.update_zone();
        true
    }

    /// Advance the game. Returns `Escaped` when the icon reaches the top.
    pub fn tick(&mut self, dt: f32) -> Option<MinigameOutcome> {
        if !self.active {
            return None;
        }

        self.elapsed += dt;
        self.fish_speed += self.acceleration * dt;
        self.fish_y += self.fish_speed * dt;
        self.update_zone();

        if self.fish_y >= self.frame_top {
            self.fish_y = self.frame_top;
            return self.trigger_fish_escaped();
        }
        None
    }

    /// The success key. Only lands the fish while inside the zone.
    pub fn press(&mut self) -> Option<MinigameOutcome> {
        if !self.active || !self.in_area {
            return None;
        }
        self.stop();
        Some(MinigameOutcome::Caught)
    }

    pub fn trigger_fish_escaped(&mut self) -> Option<MinigameOutcome> {
        if !self.active {
            return None;
        }
        self.stop();
        Some(MinigameOutcome::Escaped)
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.in_area = false;
    }

    pub fn set_fish_start_y(&mut self, y: f32) {
        self.start_y_override = Some(y);
    }

    pub fn difficulty_level(&self) -> u8 {
        self.difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
    }

    fn update_zone(&mut self) {
        let wave = (self.zone_phase + self.elapsed * self.zone_frequency * TAU).sin();
        let lo = self.frame_bottom + self.zone_half;
        let hi = self.frame_top - self.zone_half;
        let center = self.zone_mid + self.zone_amplitude * wave;
        // Zones taller than the frame just sit in the middle.
        self.zone_center = if lo <= hi { center.clamp(lo, hi) } else { self.zone_mid };
        self.in_area = (self.fish_y - self.zone_center).abs() <= self.zone_half;
    }
}

/// Reads the success key first, against the zone the player saw last frame,
/// then advances the game.
pub fn update_minigame(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut minigame: ResMut<FishingMinigame>,
    mut outcomes: EventWriter<MinigameOutcomeEvent>,
) {
    if !minigame.active {
        return;
    }

    let outcome = if input.interact {
        minigame.press()
    } else {
        None
    };
    let outcome = outcome.or_else(|| minigame.tick(time.delta_secs()));

    if let Some(outcome) = outcome {
        info!("[Fishing] Minigame over: {:?}", outcome);
        outcomes.send(MinigameOutcomeEvent(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn started(difficulty: u8, bonus: f32) -> FishingMinigame {
        let mut game = FishingMinigame::default();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(game.start(difficulty, bonus, &MinigameTuning::default(), &mut rng));
        game
    }

    #[test]
    fn test_start_resets_icon_and_clamps_difficulty() {
        let game = started(9, 0.0);
        assert!(game.active);
        assert_eq!(game.fish_y, -4.0);
        assert_eq!(game.difficulty_level(), 5);
        assert_eq!(started(0, 0.0).difficulty_level(), 1);
    }

    #[test]
    fn test_start_is_ignored_while_running() {
        let mut game = started(1, 0.0);
        game.tick(0.5);
        let y = game.fish_y;
        let mut rng = StdRng::seed_from_u64(9);
        assert!(!game.start(3, 0.0, &MinigameTuning::default(), &mut rng));
        assert_eq!(game.fish_y, y);
        assert_eq!(game.difficulty_level(), 1);
    }

    #[test]
    fn test_success_bonus_widens_zone() {
        let plain = started(3, 0.0);
        let boosted = started(3, 0.5);
        assert!((boosted.zone_half - plain.zone_half * 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_harder_fish_have_smaller_zones() {
        assert!(started(5, 0.0).zone_half < started(1, 0.0).zone_half);
    }

    #[test]
    fn test_icon_escapes_at_top() {
        let mut game = started(1, 0.0);
        let mut outcome = None;
        for _ in 0..2000 {
            outcome = game.tick(1.0 / 60.0);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(MinigameOutcome::Escaped));
        assert!(!game.active);
        assert_eq!(game.fish_y, game.frame_top);
        assert_eq!(game.tick(1.0), None, "a stopped game reports nothing");
    }

    #[test]
    fn test_press_outside_zone_does_nothing() {
        let mut game = started(1, 0.0);
        game.in_area = false;
        assert_eq!(game.press(), None);
        assert!(game.active);
    }

    #[test]
    fn test_press_inside_zone_catches() {
        let tuning = MinigameTuning {
            zone_half_base: 50.0,
            ..Default::default()
        };
        let mut game = FishingMinigame::default();
        let mut rng = StdRng::seed_from_u64(1);
        game.start(1, 0.0, &tuning, &mut rng);
        game.tick(0.1);
        assert!(game.in_area);
        assert_eq!(game.press(), Some(MinigameOutcome::Caught));
        assert!(!game.active);
        assert!(!game.in_area);
    }

    #[test]
    fn test_zone_stays_inside_frame() {
        let mut game = started(5, 0.0);
        for _ in 0..300 {
            game.tick(1.0 / 60.0);
            if !game.active {
                break;
            }
            assert!(game.zone_center - game.zone_half >= game.frame_bottom - 1e-4);
            assert!(game.zone_center + game.zone_half <= game.frame_top + 1e-4);
        }
    }

    #[test]
    fn test_custom_start_height() {
        let mut game = FishingMinigame::default();
        game.set_fish_start_y(-2.0);
        let mut rng = StdRng::seed_from_u64(2);
        game.start(2, 0.0, &MinigameTuning::default(), &mut rng);
        assert_eq!(game.fish_y, -2.0);
    }
}

//! Cat state machine.
//!
//! Appearing -> Waiting -> Moving -> Eating -> Grooming -> Waiting, looping
//! until patience runs out, at which point the cat enters Leaving and is
//! despawned once the leave duration has passed.

use bevy::prelude::*;
use std::time::Duration;

use crate::shared::*;
use super::{Cat, CatLeftEvent, CatState, OrangeTraits};

pub const CAT_BREED: &str = "Cat";
pub const ORANGE_CAT_BREED: &str = "Orange Cat";

impl Cat {
    /// A freshly arrived cat, already in Appearing with Waiting scheduled.
    pub fn new(kind: CatKind, tuning: &CatTuning) -> Self {
        let orange = match kind {
            CatKind::Common => None,
            CatKind::Orange => Some(OrangeTraits {
                greediness: tuning.greediness.clamp(1.0, 3.0),
                laziness: tuning.laziness.clamp(1.0, 2.0),
                bonus_ratio: tuning.orange_bonus_ratio,
                patience_damping: tuning.orange_patience_damping,
            }),
        };
        let mut cat = Self {
            breed: match kind {
                CatKind::Common => CAT_BREED.to_string(),
                CatKind::Orange => ORANGE_CAT_BREED.to_string(),
            },
            state: CatState::Appearing,
            appetite: 0.0,
            patience: tuning.starting_patience.clamp(0.0, MAX_PATIENCE),
            patience_decay: tuning.patience_decay,
            detection_range: tuning.detection_range,
            speed: tuning.speed,
            arrive_distance: tuning.arrive_distance,
            appear_duration: tuning.appear_duration,
            groom_duration: tuning.groom_duration,
            leave_duration: tuning.leave_duration,
            orange,
            target: None,
            pending: None,
            state_time: 0.0,
            info_visible: false,
        };
        cat.enter_state(CatState::Appearing);
        cat
    }

    pub fn kind(&self) -> CatKind {
        if self.orange.is_some() {
            CatKind::Orange
        } else {
            CatKind::Common
        }
    }

    fn greediness(&self) -> f32 {
        self.orange.map(|o| o.greediness).unwrap_or(1.0)
    }

    pub fn effective_detection_range(&self) -> f32 {
        self.detection_range * self.greediness()
    }

    pub fn effective_speed(&self) -> f32 {
        self.speed * self.greediness()
    }

    pub fn effective_groom_duration(&self) -> f32 {
        self.groom_duration * self.orange.map(|o| o.laziness).unwrap_or(1.0)
    }

    /// Switch state. Replaces any pending change and schedules the next one
    /// for timed states.
    pub fn enter_state(&mut self, state: CatState) {
        self.state = state;
        self.state_time = 0.0;
        self.pending = match state {
            CatState::Appearing => Some(self.schedule(CatState::Waiting, self.appear_duration)),
            CatState::Grooming => {
                Some(self.schedule(CatState::Waiting, self.effective_groom_duration()))
            }
            _ => None,
        };
        if matches!(state, CatState::Waiting | CatState::Leaving) {
            self.target = None;
        }
    }

    fn schedule(&self, next: CatState, seconds: f32) -> (CatState, Timer) {
        (next, Timer::from_seconds(seconds.max(0.0), TimerMode::Once))
    }

    /// Advance the pending change; applies and returns it once due.
    pub fn tick_pending(&mut self, delta: Duration) -> Option<CatState> {
        let (next, timer) = self.pending.as_mut()?;
        timer.tick(delta);
        if !timer.finished() {
            return None;
        }
        let next = *next;
        self.enter_state(next);
        Some(next)
    }

    pub fn decays_patience(&self) -> bool {
        !matches!(
            self.state,
            CatState::Eating | CatState::Grooming | CatState::Leaving
        )
    }

    /// Lose patience for `dt` seconds. Orange cats lose it slower while
    /// fish are in range.
    pub fn decay_patience(&mut self, dt: f32, fish_in_range: bool) {
        if !self.decays_patience() {
            return;
        }
        let damping = match self.orange {
            Some(o) if fish_in_range => o.patience_damping,
            _ => 1.0,
        };
        self.patience = (self.patience - self.patience_decay * damping * dt).clamp(0.0, MAX_PATIENCE);
    }

    /// Eat a fish worth `satiety`. Returns the appetite gained.
    pub fn feed(&mut self, satiety: u32) -> u32 {
        let bonus = match self.orange {
            Some(o) => (satiety as f32 * o.bonus_ratio).round() as u32,
            None => 0,
        };
        let gained = satiety + bonus;
        self.appetite = (self.appetite + gained as f32).clamp(0.0, MAX_APPETITE);
        gained
    }

    pub fn in_range(&self, own: Vec2, fish: Vec2) -> bool {
        own.distance(fish) <= self.effective_detection_range()
    }

    /// Pick a fish to walk to. Common cats take the first one in range;
    /// orange cats take the closest.
    pub fn choose_target(
        &self,
        own: Vec2,
        fish: impl IntoIterator<Item = (Entity, Vec2)>,
    ) -> Option<Entity> {
        let mut in_range = fish.into_iter().filter(|(_, pos)| self.in_range(own, *pos));
        match self.orange {
            None => in_range.next().map(|(e, _)| e),
            Some(_) => in_range
                .min_by(|(_, a), (_, b)| own.distance(*a).total_cmp(&own.distance(*b)))
                .map(|(e, _)| e),
        }
    }

    pub fn info_line(&self) -> String {
        let mut line = format!(
            "{}: appetite {:.0}/{:.0}, patience {:.1}",
            self.breed, self.appetite, MAX_APPETITE, self.patience
        );
        if let Some(o) = self.orange {
            line.push_str(&format!(
                ", greediness {:.1}, laziness {:.1}",
                o.greediness, o.laziness
            ));
        }
        line
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Patience decay and delayed state changes.
pub fn tick_cats(
    time: Res<Time>,
    mut cats: Query<(&mut Cat, &Transform)>,
    fish: Query<&Transform, (With<Fish>, Without<Cat>)>,
) {
    let dt = time.delta_secs();
    for (mut cat, transform) in &mut cats {
        let own = transform.translation.truncate();
        let fish_in_range = cat.orange.is_some()
            && fish
                .iter()
                .any(|f| cat.in_range(own, f.translation.truncate()));
        cat.decay_patience(dt, fish_in_range);

        if let Some(next) = cat.tick_pending(time.delta()) {
            debug!("[Cats] {} is now {:?}", cat.breed, next);
        }
    }
}

/// Waiting cats look for fish in range.
pub fn look_for_fish(
    mut cats: Query<(&mut Cat, &Transform)>,
    fish: Query<(Entity, &Transform), (With<Fish>, Without<Cat>)>,
) {
    for (mut cat, transform) in &mut cats {
        if cat.state != CatState::Waiting {
            continue;
        }
        let own = transform.translation.truncate();
        let candidates = fish.iter().map(|(e, t)| (e, t.translation.truncate()));
        if let Some(target) = cat.choose_target(own, candidates) {
            cat.enter_state(CatState::Moving);
            cat.target = Some(target);
            info!("[Cats] {} spotted a fish.", cat.breed);
        }
    }
}

/// Leaving cats go once the leave duration has passed.
pub fn leave_wharf(
    mut commands: Commands,
    time: Res<Time>,
    mut cats: Query<(Entity, &mut Cat)>,
    mut left: EventWriter<CatLeftEvent>,
) {
    for (entity, mut cat) in &mut cats {
        if cat.state != CatState::Leaving {
            continue;
        }
        cat.state_time += time.delta_secs();
        if cat.state_time >= cat.leave_duration {
            info!(
                "[Cats] {} left the wharf (appetite {:.0}).",
                cat.breed, cat.appetite
            );
            left.send(CatLeftEvent {
                cat: entity,
                kind: cat.kind(),
                appetite: cat.appetite,
            });
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Out of patience means out of here.
pub fn check_patience(mut cats: Query<&mut Cat>) {
    for mut cat in &mut cats {
        if cat.patience <= 0.0 && cat.state != CatState::Leaving {
            info!("[Cats] {} ran out of patience.", cat.breed);
            cat.enter_state(CatState::Leaving);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(kind: CatKind) -> Cat {
        Cat::new(kind, &CatTuning::default())
    }

    #[test]
    fn test_new_cat_defaults() {
        let c = cat(CatKind::Common);
        assert_eq!(c.breed, "Cat");
        assert_eq!(c.state, CatState::Appearing);
        assert_eq!(c.appetite, 0.0);
        assert_eq!(c.patience, 10.0);
        assert!(matches!(c.pending, Some((CatState::Waiting, _))));
        assert_eq!(cat(CatKind::Orange).breed, "Orange Cat");
    }

    #[test]
    fn test_appearing_becomes_waiting_after_delay() {
        let mut c = cat(CatKind::Common);
        assert_eq!(c.tick_pending(Duration::from_secs_f32(1.5)), None);
        assert_eq!(c.tick_pending(Duration::from_secs_f32(0.6)), Some(CatState::Waiting));
        assert_eq!(c.state, CatState::Waiting);
        assert!(c.pending.is_none());
    }

    #[test]
    fn test_entering_leaving_cancels_pending_waiting() {
        let mut c = cat(CatKind::Common);
        c.enter_state(CatState::Leaving);
        assert!(c.pending.is_none());
        assert_eq!(c.tick_pending(Duration::from_secs(5)), None);
        assert_eq!(c.state, CatState::Leaving);
    }

    #[test]
    fn test_patience_decays_only_while_idle() {
        let mut c = cat(CatKind::Common);
        c.decay_patience(2.0, false);
        assert_eq!(c.patience, 8.0);
        c.enter_state(CatState::Grooming);
        c.decay_patience(2.0, false);
        assert_eq!(c.patience, 8.0);
        c.enter_state(CatState::Waiting);
        c.decay_patience(100.0, false);
        assert_eq!(c.patience, 0.0, "patience never goes negative");
    }

    #[test]
    fn test_orange_patience_damped_near_fish() {
        let mut orange = cat(CatKind::Orange);
        orange.decay_patience(2.0, true);
        assert_eq!(orange.patience, 9.0);
        orange.decay_patience(2.0, false);
        assert_eq!(orange.patience, 7.0);

        let mut common = cat(CatKind::Common);
        common.decay_patience(2.0, true);
        assert_eq!(common.patience, 8.0, "common cats ignore nearby fish");
    }

    #[test]
    fn test_feed_adds_orange_bonus_and_clamps() {
        let mut common = cat(CatKind::Common);
        assert_eq!(common.feed(25), 25);
        assert_eq!(common.appetite, 25.0);

        let mut orange = cat(CatKind::Orange);
        assert_eq!(orange.feed(25), 38, "25 + round(12.5)");
        orange.feed(100);
        assert_eq!(orange.appetite, MAX_APPETITE);
    }

    #[test]
    fn test_orange_multipliers() {
        let c = cat(CatKind::Common);
        let o = cat(CatKind::Orange);
        assert_eq!(o.effective_detection_range(), c.effective_detection_range() * 2.0);
        assert_eq!(o.effective_speed(), c.effective_speed() * 2.0);
        assert_eq!(o.effective_groom_duration(), 4.5);
        assert_eq!(c.effective_groom_duration(), 3.0);
    }

    #[test]
    fn test_common_cat_takes_first_fish_in_range() {
        let c = cat(CatKind::Common);
        let far = Entity::from_raw(1);
        let near_second = Entity::from_raw(2);
        let near_first = Entity::from_raw(3);
        let fish = vec![
            (far, Vec2::new(50.0, 0.0)),
            (near_first, Vec2::new(4.0, 0.0)),
            (near_second, Vec2::new(1.0, 0.0)),
        ];
        assert_eq!(c.choose_target(Vec2::ZERO, fish), Some(near_first));
    }

    #[test]
    fn test_orange_cat_takes_closest_fish() {
        let o = cat(CatKind::Orange);
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let fish = vec![(a, Vec2::new(8.0, 0.0)), (b, Vec2::new(0.0, 3.0))];
        assert_eq!(o.choose_target(Vec2::ZERO, fish), Some(b));
        assert_eq!(o.choose_target(Vec2::ZERO, vec![(a, Vec2::new(11.0, 0.0))]), None);
    }

    #[test]
    fn test_info_line_mentions_orange_traits() {
        let c = cat(CatKind::Common);
        assert!(c.info_line().starts_with("Cat: appetite 0/100"));
        assert!(!c.info_line().contains("greediness"));
        let o = cat(CatKind::Orange);
        assert!(o.info_line().contains("greediness 2.0, laziness 1.5"));
    }
}

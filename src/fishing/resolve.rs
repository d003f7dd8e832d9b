//! Catch and escape resolution, and putting caught fish out on the wharf.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::{spawn_fish, FishCaughtEvent, FishEscapedEvent, FishingContext, FishingPhase, FishingState};

/// The minigame was won: bank the fish and show the reward.
pub fn resolve_catch(ctx: &mut FishingContext, state: &mut FishingState, rng: &mut impl Rng) {
    let fish_id = ctx.selection.current.clone();
    match &fish_id {
        Some(id) => {
            ctx.basket.add(id);
            info!(
                "[Fishing] Caught a {}! ({} in the basket)",
                ctx.registry.name_of(id),
                ctx.basket.len()
            );
        }
        None => warn!("[Fishing] Caught nothing in particular; no fish was selected."),
    }
    ctx.caught.send(FishCaughtEvent { fish_id });
    ctx.set_phase(state, FishingPhase::Rewarding, rng);
}

/// The fish reached the top of the frame.
pub fn resolve_escape(ctx: &mut FishingContext, state: &mut FishingState, rng: &mut impl Rng) {
    let fish_id = ctx.selection.current.clone();
    if let Some(id) = &fish_id {
        info!("[Fishing] The {} escaped.", ctx.registry.name_of(id));
    }
    ctx.escaped.send(FishEscapedEvent { fish_id });
    ctx.set_phase(state, FishingPhase::Failed, rng);
}

// ─── Placing fish ────────────────────────────────────────────────────────────

/// Random point within `jitter` of `center`.
pub fn jittered(center: Vec2, jitter: f32, rng: &mut impl Rng) -> Vec2 {
    if jitter <= 0.0 {
        return center;
    }
    center + Vec2::new(rng.gen_range(-jitter..jitter), rng.gen_range(-jitter..jitter))
}

pub fn read_place_fish_input(
    input: Res<PlayerInput>,
    layout: Res<WharfLayout>,
    mut place: EventWriter<PlaceFishEvent>,
) {
    if !input.place_fish {
        return;
    }
    let mut rng = rand::thread_rng();
    place.send(PlaceFishEvent {
        species: None,
        position: jittered(layout.feeding_spot(), layout.feeding_jitter, &mut rng),
    });
}

pub fn handle_place_fish(
    mut commands: Commands,
    mut events: EventReader<PlaceFishEvent>,
    mut basket: ResMut<FishBasket>,
    registry: Res<FishRegistry>,
) {
    for event in events.read() {
        let species = match event.species.clone().or_else(|| basket.take_latest()) {
            Some(species) => species,
            None => {
                info!("[Fishing] The basket is empty.");
                continue;
            }
        };
        spawn_fish(&mut commands, &registry, &species, event.position);
        info!(
            "[Fishing] Put a {} out at ({:.1}, {:.1}).",
            registry.name_of(&species),
            event.position.x,
            event.position.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_jitter_stays_near_center() {
        let mut rng = StdRng::seed_from_u64(4);
        let center = Vec2::new(1.0, -2.0);
        for _ in 0..100 {
            let p = jittered(center, 1.5, &mut rng);
            assert!((p.x - center.x).abs() <= 1.5);
            assert!((p.y - center.y).abs() <= 1.5);
        }
        assert_eq!(jittered(center, 0.0, &mut rng), center);
    }
}

use bevy::prelude::*;
use std::collections::HashSet;

use crate::shared::*;
use super::{Cat, CatFedEvent, CatState};

// ─────────────────────────────────────────────────────────────────────────────
// Eating
// An eating cat gains the fish's satiety, the fish is removed, and the cat
// grooms before waiting again. Two cats reaching the same fish on the same
// frame: the first one gets it, the other goes back to waiting.
// ─────────────────────────────────────────────────────────────────────────────

pub fn eat_fish(
    mut commands: Commands,
    registry: Res<FishRegistry>,
    mut cats: Query<(Entity, &mut Cat)>,
    fish: Query<&Fish, Without<Cat>>,
    mut fed: EventWriter<CatFedEvent>,
) {
    let mut eaten: HashSet<Entity> = HashSet::new();

    for (entity, mut cat) in &mut cats {
        if cat.state != CatState::Eating {
            continue;
        }

        let meal = cat
            .target
            .filter(|t| !eaten.contains(t))
            .and_then(|t| fish.get(t).ok().map(|f| (t, f.species.clone())));

        let Some((fish_entity, species)) = meal else {
            cat.enter_state(CatState::Waiting);
            continue;
        };

        let gained = cat.feed(registry.satiety_of(&species));
        eaten.insert(fish_entity);
        commands.entity(fish_entity).despawn_recursive();
        info!(
            "[Cats] {} ate a {} (+{}, appetite {:.0}).",
            cat.breed,
            registry.name_of(&species),
            gained,
            cat.appetite
        );
        fed.send(CatFedEvent {
            cat: entity,
            fish: species,
            gained,
            appetite: cat.appetite,
        });

        cat.target = None;
        cat.enter_state(CatState::Grooming);
    }
}

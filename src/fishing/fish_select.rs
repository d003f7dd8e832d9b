//! Fish selection: eligibility by pole level, then a weighted pick.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

// ─── Selection state ─────────────────────────────────────────────────────────

/// The fish hooked for the current cast.
#[derive(Resource, Debug, Clone, Default)]
pub struct FishSelection {
    pub current: Option<FishId>,
}

impl FishSelection {
    pub fn clear(&mut self) {
        self.current = None;
    }
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// Pick a fish the given pole level can hook.
///
/// Fish are filtered in configuration order, then drawn by `spawn_weight`.
/// Returns `None` when nothing is configured or nothing is eligible.
pub fn select_fish<'a>(
    registry: &'a FishRegistry,
    pole_level: u8,
    rng: &mut impl Rng,
) -> Option<&'a FishDef> {
    if registry.fish.is_empty() {
        warn!("[Fishing] No fish configured.");
        return None;
    }

    let eligible: Vec<(&FishDef, u32)> = registry
        .fish
        .iter()
        .filter(|f| f.meets_pole_requirement(pole_level))
        .map(|f| (f, f.spawn_weight))
        .collect();

    if eligible.is_empty() {
        warn!("[Fishing] No fish can be caught with a level {} pole.", pole_level);
        return None;
    }

    weighted_pick(&eligible, rng).copied()
}

/// Weighted random pick from a slice of (item, weight) pairs.
pub fn weighted_pick<'a, T>(items: &'a [(T, u32)], rng: &mut impl Rng) -> Option<&'a T> {
    let total: u32 = items.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return items.last().map(|(item, _)| item);
    }

    let roll = rng.gen_range(0..total);
    let mut cumulative = 0;
    for (item, weight) in items {
        cumulative += weight;
        if roll < cumulative {
            return Some(item);
        }
    }

    // Fallback: last item
    items.last().map(|(item, _)| item)
}

/// Select the fish for the upcoming minigame and remember it.
pub fn prepare_fish_for_minigame(
    selection: &mut FishSelection,
    registry: &FishRegistry,
    pole_level: u8,
    rng: &mut impl Rng,
) -> Option<FishId> {
    selection.current = select_fish(registry, pole_level, rng).map(|f| f.id.clone());
    if let Some(id) = &selection.current {
        info!(
            "[Fishing] {} is on the line (pole level {}).",
            registry.name_of(id),
            pole_level
        );
    }
    selection.current.clone()
}

// ─── World fish ──────────────────────────────────────────────────────────────

const FISH_SPRITE_SIZE: Vec2 = Vec2::new(0.6, 0.3);
const Z_FISH: f32 = 2.0;

/// Spawn a fish lying on the wharf. Unknown species get a plain white sprite.
pub fn spawn_fish(
    commands: &mut Commands,
    registry: &FishRegistry,
    species: &str,
    position: Vec2,
) -> Entity {
    let (color, scale) = match registry.get(species) {
        Some(def) => (def.tint(), def.size_scale),
        None => {
            warn!("[Fishing] Spawning unregistered fish '{}'.", species);
            (Color::WHITE, 1.0)
        }
    };

    commands
        .spawn((
            Fish {
                species: species.to_string(),
            },
            Sprite {
                color,
                custom_size: Some(FISH_SPRITE_SIZE * scale),
                ..default()
            },
            Transform::from_translation(position.extend(Z_FISH)),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registry() -> FishRegistry {
        FishRegistry {
            fish: vec![
                FishDef {
                    id: "minnow".into(),
                    spawn_weight: 50,
                    max_pole_level: 1,
                    ..Default::default()
                },
                FishDef {
                    id: "carp".into(),
                    spawn_weight: 30,
                    ..Default::default()
                },
                FishDef {
                    id: "koi".into(),
                    spawn_weight: 20,
                    min_pole_level: 3,
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_empty_registry_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_fish(&FishRegistry::default(), 1, &mut rng).is_none());
    }

    #[test]
    fn test_no_eligible_fish_selects_nothing() {
        let registry = FishRegistry {
            fish: vec![FishDef {
                min_pole_level: 4,
                ..Default::default()
            }],
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_fish(&registry, 2, &mut rng).is_none());
    }

    #[test]
    fn test_selection_respects_pole_level() {
        let registry = registry();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let low = select_fish(&registry, 1, &mut rng).map(|f| f.id.as_str());
            assert!(matches!(low, Some("minnow") | Some("carp")));
            let high = select_fish(&registry, 3, &mut rng).map(|f| f.id.as_str());
            assert!(matches!(high, Some("carp") | Some("koi")));
        }
    }

    #[test]
    fn test_weighted_pick_follows_weights() {
        let items = [("a", 90u32), ("b", 10u32)];
        let mut rng = StdRng::seed_from_u64(42);
        let mut a = 0;
        for _ in 0..1000 {
            if weighted_pick(&items, &mut rng) == Some(&"a") {
                a += 1;
            }
        }
        assert!((850..=950).contains(&a), "expected ~900 picks of 'a', got {}", a);
    }

    #[test]
    fn test_weighted_pick_edge_cases() {
        let mut rng = StdRng::seed_from_u64(3);
        let empty: [(&str, u32); 0] = [];
        assert_eq!(weighted_pick(&empty, &mut rng), None);
        let zero = [("x", 0u32), ("y", 0u32)];
        assert_eq!(weighted_pick(&zero, &mut rng), Some(&"y"));
        let single = [("only", 5u32)];
        assert_eq!(weighted_pick(&single, &mut rng), Some(&"only"));
    }

    #[test]
    fn test_prepare_remembers_selection() {
        let registry = registry();
        let mut selection = FishSelection::default();
        let mut rng = StdRng::seed_from_u64(11);
        let picked = prepare_fish_for_minigame(&mut selection, &registry, 5, &mut rng);
        assert!(matches!(picked.as_deref(), Some("carp") | Some("koi")));
        assert_eq!(selection.current, picked);
        selection.clear();
        assert!(selection.current.is_none());
    }
}

use crate::shared::*;

/// The built-in fish list.
///
/// Order is the selection order. Weights are relative within whatever subset
/// the equipped pole can reach:
///   - level 1 reaches minnow, sardine, carp, mackerel, pufferfish
///   - level 2 adds koi; level 3 adds golden carp; level 4+ adds moonfish
///   - minnows stop biting above level 2 (max_pole_level = 2)
pub fn default_fish() -> Vec<FishDef> {
    vec![
        FishDef {
            id: "minnow".into(),
            name: "Minnow".into(),
            description: "Barely a snack, but the kittens love it.".into(),
            satiety: 8,
            difficulty: 1,
            rarity: Rarity::Common,
            spawn_weight: 40,
            min_pole_level: 1,
            max_pole_level: 2,
            color: [0.75, 0.78, 0.8],
            size_scale: 0.6,
        },
        FishDef {
            id: "sardine".into(),
            name: "Sardine".into(),
            description: "Silvery and oily. Every cat's first choice.".into(),
            satiety: 15,
            difficulty: 1,
            rarity: Rarity::Common,
            spawn_weight: 35,
            min_pole_level: 1,
            max_pole_level: 0,
            color: [0.6, 0.7, 0.85],
            size_scale: 0.8,
        },
        FishDef {
            id: "carp".into(),
            name: "Carp".into(),
            description: "A patient bottom feeder.".into(),
            satiety: 25,
            difficulty: 2,
            rarity: Rarity::Common,
            spawn_weight: 25,
            min_pole_level: 1,
            max_pole_level: 0,
            color: [0.7, 0.6, 0.35],
            size_scale: 1.0,
        },
        FishDef {
            id: "mackerel".into(),
            name: "Mackerel".into(),
            description: "Striped, fast, and stubborn on the line.".into(),
            satiety: 30,
            difficulty: 2,
            rarity: Rarity::Uncommon,
            spawn_weight: 15,
            min_pole_level: 1,
            max_pole_level: 0,
            color: [0.3, 0.55, 0.6],
            size_scale: 1.0,
        },
        FishDef {
            id: "pufferfish".into(),
            name: "Pufferfish".into(),
            description: "Puffs up when hooked. Cats eat around the spines.".into(),
            satiety: 20,
            difficulty: 3,
            rarity: Rarity::Uncommon,
            spawn_weight: 10,
            min_pole_level: 1,
            max_pole_level: 0,
            color: [0.9, 0.85, 0.4],
            size_scale: 0.9,
        },
        FishDef {
            id: "koi".into(),
            name: "Koi".into(),
            description: "Someone's pond escaped into the harbour.".into(),
            satiety: 35,
            difficulty: 3,
            rarity: Rarity::Rare,
            spawn_weight: 8,
            min_pole_level: 2,
            max_pole_level: 0,
            color: [0.95, 0.45, 0.2],
            size_scale: 1.2,
        },
        FishDef {
            id: "golden_carp".into(),
            name: "Golden Carp".into(),
            description: "Said to bring luck to whoever feeds it to a cat.".into(),
            satiety: 60,
            difficulty: 4,
            rarity: Rarity::Epic,
            spawn_weight: 4,
            min_pole_level: 3,
            max_pole_level: 0,
            color: [1.0, 0.8, 0.1],
            size_scale: 1.4,
        },
        FishDef {
            id: "moonfish".into(),
            name: "Moonfish".into(),
            description: "Only bites for the finest rods.".into(),
            satiety: 100,
            difficulty: 5,
            rarity: Rarity::Legendary,
            spawn_weight: 1,
            min_pole_level: 4,
            max_pole_level: 0,
            color: [0.85, 0.9, 1.0],
            size_scale: 1.8,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_has_something_to_catch() {
        let fish = default_fish();
        for level in 1..=MAX_POLE_LEVEL {
            assert!(
                fish.iter().any(|f| f.meets_pole_requirement(level)),
                "Pole level {} should reach at least one fish",
                level
            );
        }
    }

    #[test]
    fn test_every_rarity_is_represented() {
        let registry = FishRegistry { fish: default_fish() };
        for rarity in Rarity::ALL {
            assert!(registry.count_by_rarity(rarity) > 0, "{:?} missing", rarity);
        }
    }
}

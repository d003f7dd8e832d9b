//! RON game config: fish, poles, and every tuning block.

use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;

use crate::shared::*;
use super::fish::default_fish;
use super::poles::default_poles;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub fish: Vec<FishDef>,
    pub poles: Vec<PoleDef>,
    pub starting_pole: usize,
    pub fishing: FishingTuning,
    pub minigame: MinigameTuning,
    pub cats: CatTuning,
    pub spawner: CatSpawnerConfig,
    pub wharf: WharfLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fish: default_fish(),
            poles: default_poles(),
            starting_pole: 0,
            fishing: FishingTuning::default(),
            minigame: MinigameTuning::default(),
            cats: CatTuning::default(),
            spawner: CatSpawnerConfig::default(),
            wharf: WharfLayout::default(),
        }
    }
}

pub fn parse_config(text: &str) -> Result<GameConfig, String> {
    ron::from_str(text).map_err(|e| format!("Config parse failed: {}", e))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config_file(path: &str) -> Result<GameConfig, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Could not read config '{}': {}", path, e))?;
    parse_config(&text)
}

#[cfg(target_arch = "wasm32")]
pub fn load_config_file(path: &str) -> Result<GameConfig, String> {
    Err(format!("No filesystem on wasm; skipped '{}'", path))
}

fn clamp_u32(value: &mut u32, lo: u32, hi: u32, what: &str, issues: &mut Vec<String>) {
    let clamped = (*value).clamp(lo, hi);
    if clamped != *value {
        issues.push(format!("{} {} clamped to {}", what, value, clamped));
        *value = clamped;
    }
}

fn clamp_u8(value: &mut u8, lo: u8, hi: u8, what: &str, issues: &mut Vec<String>) {
    let clamped = (*value).clamp(lo, hi);
    if clamped != *value {
        issues.push(format!("{} {} clamped to {}", what, value, clamped));
        *value = clamped;
    }
}

/// NaN has no place in any range; it becomes `lo`.
fn clamp_f32(value: &mut f32, lo: f32, hi: f32, what: &str, issues: &mut Vec<String>) {
    if value.is_nan() {
        issues.push(format!("{} is NaN; set to {}", what, lo));
        *value = lo;
        return;
    }
    let clamped = value.clamp(lo, hi);
    if clamped != *value {
        issues.push(format!("{} {} clamped to {}", what, value, clamped));
        *value = clamped;
    }
}

impl GameConfig {
    /// Pulls every value back into its legal range. Returns one message per fix.
    pub fn validate(&mut self) -> Vec<String> {
        let mut issues = Vec::new();

        let mut seen: Vec<&str> = Vec::new();
        for fish in &self.fish {
            if seen.contains(&fish.id.as_str()) {
                issues.push(format!("duplicate fish id '{}'", fish.id));
            }
            seen.push(&fish.id);
        }

        for fish in &mut self.fish {
            let tag = format!("fish '{}'", fish.id);
            clamp_u32(&mut fish.satiety, 1, 100, &format!("{} satiety", tag), &mut issues);
            clamp_u8(
                &mut fish.difficulty,
                MIN_DIFFICULTY,
                MAX_DIFFICULTY,
                &format!("{} difficulty", tag),
                &mut issues,
            );
            clamp_u32(&mut fish.spawn_weight, 1, 100, &format!("{} spawn_weight", tag), &mut issues);
            clamp_u8(
                &mut fish.min_pole_level,
                1,
                MAX_POLE_LEVEL,
                &format!("{} min_pole_level", tag),
                &mut issues,
            );
            clamp_u8(
                &mut fish.max_pole_level,
                0,
                MAX_POLE_LEVEL,
                &format!("{} max_pole_level", tag),
                &mut issues,
            );
            clamp_f32(&mut fish.size_scale, 0.5, 2.0, &format!("{} size_scale", tag), &mut issues);
            for channel in fish.color.iter_mut() {
                clamp_f32(channel, 0.0, 1.0, &format!("{} color", tag), &mut issues);
            }
        }

        for pole in &mut self.poles {
            let tag = format!("pole '{}'", pole.name);
            clamp_u8(&mut pole.level, 1, MAX_POLE_LEVEL, &format!("{} level", tag), &mut issues);
            clamp_f32(
                &mut pole.success_bonus,
                0.0,
                1.0,
                &format!("{} success_bonus", tag),
                &mut issues,
            );
            clamp_f32(
                &mut pole.biting_time_reduction,
                0.0,
                f32::MAX,
                &format!("{} biting_time_reduction", tag),
                &mut issues,
            );
            clamp_f32(
                &mut pole.wait_time_reduction,
                0.0,
                f32::MAX,
                &format!("{} wait_time_reduction", tag),
                &mut issues,
            );
        }

        let fishing = &mut self.fishing;
        clamp_f32(&mut fishing.min_wait_time, 0.0, f32::MAX, "min_wait_time", &mut issues);
        clamp_f32(&mut fishing.max_wait_time, 0.0, f32::MAX, "max_wait_time", &mut issues);
        clamp_f32(&mut fishing.biting_duration, 0.0, f32::MAX, "biting_duration", &mut issues);
        clamp_f32(&mut fishing.cast_delay, 0.0, f32::MAX, "cast_delay", &mut issues);
        if fishing.min_wait_time > fishing.max_wait_time {
            issues.push(format!(
                "min_wait_time {} above max_wait_time {}; swapped",
                fishing.min_wait_time, fishing.max_wait_time
            ));
            std::mem::swap(&mut fishing.min_wait_time, &mut fishing.max_wait_time);
        }

        let minigame = &mut self.minigame;
        let frame_ok = minigame.fish_start_y.is_finite()
            && minigame.frame_top.is_finite()
            && minigame.frame_top > minigame.fish_start_y;
        if !frame_ok {
            issues.push(format!(
                "minigame frame_top {} not above fish_start_y {}; reset to defaults",
                minigame.frame_top, minigame.fish_start_y
            ));
            let defaults = MinigameTuning::default();
            minigame.fish_start_y = defaults.fish_start_y;
            minigame.frame_top = defaults.frame_top;
        }
        // The icon has to climb, or the game never ends.
        clamp_f32(&mut minigame.base_speed, 0.1, 50.0, "minigame base_speed", &mut issues);
        clamp_f32(
            &mut minigame.acceleration_per_level,
            0.0,
            10.0,
            "minigame acceleration_per_level",
            &mut issues,
        );
        clamp_f32(&mut minigame.zone_half_base, 0.1, 50.0, "minigame zone_half_base", &mut issues);
        clamp_f32(
            &mut minigame.zone_half_per_level,
            0.0,
            10.0,
            "minigame zone_half_per_level",
            &mut issues,
        );
        clamp_f32(&mut minigame.zone_amplitude, 0.0, 50.0, "minigame zone_amplitude", &mut issues);
        clamp_f32(
            &mut minigame.zone_frequency_base,
            0.0,
            10.0,
            "minigame zone_frequency_base",
            &mut issues,
        );
        clamp_f32(
            &mut minigame.zone_frequency_per_level,
            0.0,
            10.0,
            "minigame zone_frequency_per_level",
            &mut issues,
        );

        let cats = &mut self.cats;
        clamp_f32(&mut cats.starting_patience, 0.0, MAX_PATIENCE, "starting_patience", &mut issues);
        clamp_f32(&mut cats.patience_decay, 0.0, 100.0, "patience_decay", &mut issues);
        clamp_f32(&mut cats.detection_range, 0.1, 100.0, "detection_range", &mut issues);
        clamp_f32(&mut cats.speed, 0.1, 50.0, "cat speed", &mut issues);
        clamp_f32(&mut cats.arrive_distance, 0.05, 10.0, "arrive_distance", &mut issues);
        clamp_f32(&mut cats.appear_duration, 0.0, 60.0, "appear_duration", &mut issues);
        clamp_f32(&mut cats.groom_duration, 0.0, 60.0, "groom_duration", &mut issues);
        clamp_f32(&mut cats.leave_duration, 0.0, 60.0, "leave_duration", &mut issues);
        clamp_f32(&mut cats.greediness, 1.0, 3.0, "greediness", &mut issues);
        clamp_f32(&mut cats.laziness, 1.0, 2.0, "laziness", &mut issues);
        clamp_f32(&mut cats.orange_bonus_ratio, 0.0, 2.0, "orange_bonus_ratio", &mut issues);
        clamp_f32(
            &mut cats.orange_patience_damping,
            0.0,
            1.0,
            "orange_patience_damping",
            &mut issues,
        );

        let spawner = &mut self.spawner;
        if !spawner.orange_chance.is_finite() {
            let fallback = CatSpawnerConfig::default().orange_chance;
            issues.push(format!(
                "orange_chance {} is not a number; set to {}",
                spawner.orange_chance, fallback
            ));
            spawner.orange_chance = fallback;
        } else if !(0.0..=1.0).contains(&spawner.orange_chance) {
            issues.push(format!("orange_chance {} clamped", spawner.orange_chance));
            spawner.orange_chance = spawner.orange_chance.clamp(0.0, 1.0);
        }
        clamp_f32(&mut spawner.interval, 0.1, 3600.0, "spawner interval", &mut issues);
        let point_count = spawner.spawn_points.len();
        spawner
            .spawn_points
            .retain(|p| p.iter().all(|c| c.is_finite()));
        if spawner.spawn_points.len() != point_count {
            issues.push("dropped spawn points with non-finite coordinates".to_string());
        }
        if spawner.enabled && spawner.spawn_points.is_empty() {
            issues.push("cat spawner has no spawn points; disabled".to_string());
            spawner.enabled = false;
        }

        let wharf = &mut self.wharf;
        clamp_f32(&mut wharf.feeding_jitter, 0.0, 10.0, "feeding_jitter", &mut issues);
        clamp_f32(&mut wharf.dock_radius, 0.1, 20.0, "dock_radius", &mut issues);
        clamp_f32(&mut wharf.cafe_door_radius, 0.1, 20.0, "cafe_door_radius", &mut issues);

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_already_valid() {
        let mut config = GameConfig::default();
        let issues = config.validate();
        assert!(issues.is_empty(), "Built-in data should not need fixing: {:?}", issues);
        assert!(!config.fish.is_empty());
        assert!(!config.poles.is_empty());
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let text = r#"(
            starting_pole: 1,
            fishing: (min_wait_time: 1.0, max_wait_time: 2.0),
        )"#;
        let config = parse_config(text).expect("partial config should parse");
        assert_eq!(config.starting_pole, 1);
        assert_eq!(config.fishing.min_wait_time, 1.0);
        assert_eq!(config.fishing.biting_duration, 3.0, "unset fields keep defaults");
        assert_eq!(config.fish, default_fish());
    }

    #[test]
    fn test_parse_fish_list() {
        let text = r#"(
            fish: [
                (id: "eel", name: "Eel", rarity: Epic, min_pole_level: 3, color: (0.2, 0.3, 0.1)),
            ],
        )"#;
        let config = parse_config(text).expect("fish list should parse");
        assert_eq!(config.fish.len(), 1);
        assert_eq!(config.fish[0].rarity, Rarity::Epic);
        assert_eq!(config.fish[0].min_pole_level, 3);
        assert_eq!(config.fish[0].satiety, 20);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_config("(fish: [ (id: ").unwrap_err();
        assert!(err.starts_with("Config parse failed"));
    }

    #[test]
    fn test_validate_clamps_out_of_range_values() {
        let mut config = GameConfig {
            fish: vec![FishDef {
                id: "whale".into(),
                satiety: 500,
                difficulty: 9,
                spawn_weight: 0,
                max_pole_level: 7,
                size_scale: 10.0,
                ..Default::default()
            }],
            poles: vec![PoleDef {
                level: 0,
                success_bonus: 3.0,
                wait_time_reduction: -1.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        let issues = config.validate();
        let fish = &config.fish[0];
        assert_eq!(fish.satiety, 100);
        assert_eq!(fish.difficulty, 5);
        assert_eq!(fish.spawn_weight, 1);
        assert_eq!(fish.max_pole_level, 5);
        assert_eq!(fish.size_scale, 2.0);
        let pole = &config.poles[0];
        assert_eq!(pole.level, 1);
        assert_eq!(pole.success_bonus, 1.0);
        assert_eq!(pole.wait_time_reduction, 0.0);
        assert_eq!(issues.len(), 8);
    }

    #[test]
    fn test_validate_swaps_inverted_wait_range() {
        let mut config = GameConfig::default();
        config.fishing.min_wait_time = 9.0;
        config.fishing.max_wait_time = 4.0;
        let issues = config.validate();
        assert_eq!(config.fishing.min_wait_time, 4.0);
        assert_eq!(config.fishing.max_wait_time, 9.0);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_validate_flags_duplicate_ids() {
        let mut config = GameConfig {
            fish: vec![
                FishDef { id: "carp".into(), ..Default::default() },
                FishDef { id: "carp".into(), ..Default::default() },
            ],
            ..Default::default()
        };
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("duplicate fish id 'carp'")));
    }

    #[test]
    fn test_spawner_without_points_is_disabled() {
        let mut config = GameConfig::default();
        config.spawner.spawn_points.clear();
        config.validate();
        assert!(!config.spawner.enabled);
    }

    #[test]
    fn test_shipped_config_matches_built_in_data() {
        let mut config = parse_config(include_str!("../../assets/config/game.ron"))
            .expect("shipped config should parse");
        assert!(config.validate().is_empty());
        assert_eq!(config.fish, default_fish());
        assert_eq!(config.poles, default_poles());
        assert_eq!(config.spawner, CatSpawnerConfig::default());
    }

    #[test]
    fn test_nan_orange_chance_falls_back_to_default() {
        let mut config = parse_config("(spawner: (orange_chance: NaN))")
            .expect("NaN is valid RON");
        assert!(config.spawner.orange_chance.is_nan());
        let issues = config.validate();
        assert_eq!(config.spawner.orange_chance, CatSpawnerConfig::default().orange_chance);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_stalled_minigame_icon_is_made_to_climb() {
        let mut config = parse_config(
            "(minigame: (base_speed: -1.0, acceleration_per_level: -0.5, zone_half_base: 0.0))",
        )
        .expect("minigame tuning should parse");
        config.validate();
        assert!(config.minigame.base_speed > 0.0);
        assert!(config.minigame.acceleration_per_level >= 0.0);
        assert!(config.minigame.zone_half_base > 0.0);
    }

    #[test]
    fn test_cat_movement_values_kept_positive() {
        let mut config = parse_config(
            "(cats: (speed: -3.0, detection_range: -1.0, arrive_distance: 0.0))",
        )
        .expect("cat tuning should parse");
        let issues = config.validate();
        assert!(config.cats.speed > 0.0);
        assert!(config.cats.detection_range > 0.0);
        assert!(config.cats.arrive_distance > 0.0);
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_validated_config_has_no_nan() {
        let text = r#"(
            fish: [(id: "eel", size_scale: NaN, color: (NaN, 0.5, 0.5))],
            poles: [(name: "Rod", success_bonus: NaN, wait_time_reduction: NaN)],
            fishing: (min_wait_time: NaN, max_wait_time: 4.0, biting_duration: NaN, cast_delay: NaN),
            minigame: (fish_start_y: NaN, base_speed: NaN, zone_amplitude: NaN),
            cats: (starting_patience: NaN, speed: NaN, patience_decay: NaN, greediness: NaN),
            spawner: (interval: NaN, orange_chance: NaN, spawn_points: [(NaN, 1.0), (2.0, 2.0)]),
            wharf: (feeding_jitter: NaN, dock_radius: NaN),
        )"#;
        let mut config = parse_config(text).expect("NaN config should parse");
        assert!(!config.validate().is_empty());

        let fish = &config.fish[0];
        let pole = &config.poles[0];
        let f = &config.fishing;
        let m = &config.minigame;
        let c = &config.cats;
        let values = [
            fish.size_scale,
            fish.color[0],
            pole.success_bonus,
            pole.wait_time_reduction,
            f.min_wait_time,
            f.max_wait_time,
            f.biting_duration,
            f.cast_delay,
            m.fish_start_y,
            m.frame_top,
            m.base_speed,
            m.zone_amplitude,
            c.starting_patience,
            c.speed,
            c.patience_decay,
            c.greediness,
            config.spawner.interval,
            config.wharf.feeding_jitter,
            config.wharf.dock_radius,
        ];
        assert!(values.iter().all(|v| v.is_finite()), "{:?}", values);
        assert!(config.spawner.orange_chance.is_finite());
        assert_eq!(config.spawner.spawn_points, vec![[2.0, 2.0]]);
        assert!(f.min_wait_time <= f.max_wait_time);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config_file("definitely/not/here.ron").unwrap_err();
        assert!(err.contains("definitely/not/here.ron"));
    }
}

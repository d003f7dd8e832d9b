use bevy::prelude::*;
use rand::Rng;
use crate::shared::*;
use super::{Cat, CatAppearedEvent};

// ─────────────────────────────────────────────────────────────────────────────
// Cat visual configuration
// ─────────────────────────────────────────────────────────────────────────────

pub struct CatVisual {
    pub color: Color,
    pub width: f32,
    pub height: f32,
}

pub fn cat_visual(kind: CatKind) -> CatVisual {
    match kind {
        CatKind::Common => CatVisual {
            color: Color::srgb(0.55, 0.55, 0.6),
            width: 0.8,
            height: 0.6,
        },
        CatKind::Orange => CatVisual {
            color: Color::srgb(0.95, 0.55, 0.15),
            width: 0.9,
            height: 0.7,
        },
    }
}

const Z_CAT: f32 = 5.0;

/// Periodic arrivals.
#[derive(Resource, Debug, Clone)]
pub struct CatSpawner {
    pub timer: Timer,
}

impl Default for CatSpawner {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(CatSpawnerConfig::default().interval, TimerMode::Repeating),
        }
    }
}

pub fn spawn_cat(
    commands: &mut Commands,
    kind: CatKind,
    position: Vec2,
    tuning: &CatTuning,
) -> Entity {
    let visual = cat_visual(kind);
    commands
        .spawn((
            Cat::new(kind, tuning),
            Sprite {
                color: visual.color,
                custom_size: Some(Vec2::new(visual.width, visual.height)),
                ..default()
            },
            Transform::from_translation(position.extend(Z_CAT)),
        ))
        .id()
}

pub fn spawn_requested_cats(
    mut commands: Commands,
    tuning: Res<CatTuning>,
    mut requests: EventReader<SpawnCatEvent>,
    mut appeared: EventWriter<CatAppearedEvent>,
) {
    for request in requests.read() {
        let cat = spawn_cat(&mut commands, request.kind, request.position, &tuning);
        info!(
            "[Cats] A {:?} cat appeared at ({:.1}, {:.1}).",
            request.kind, request.position.x, request.position.y
        );
        appeared.send(CatAppearedEvent {
            cat,
            kind: request.kind,
            position: request.position,
        });
    }
}

pub fn reset_cat_spawner(mut spawner: ResMut<CatSpawner>, config: Res<CatSpawnerConfig>) {
    spawner.timer = Timer::from_seconds(config.interval.max(0.1), TimerMode::Repeating);
}

/// Roll the kind and spawn point of the next arrival.
pub fn roll_arrival(config: &CatSpawnerConfig, rng: &mut impl Rng) -> Option<SpawnCatEvent> {
    if config.spawn_points.is_empty() {
        return None;
    }
    let point = config.spawn_points[rng.gen_range(0..config.spawn_points.len())];
    let kind = if rng.gen_bool(config.orange_chance.clamp(0.0, 1.0)) {
        CatKind::Orange
    } else {
        CatKind::Common
    };
    Some(SpawnCatEvent {
        kind,
        position: Vec2::from_array(point),
    })
}

pub fn tick_cat_spawner(
    time: Res<Time>,
    config: Res<CatSpawnerConfig>,
    mut spawner: ResMut<CatSpawner>,
    cats: Query<(), With<Cat>>,
    mut requests: EventWriter<SpawnCatEvent>,
) {
    if !config.enabled {
        return;
    }
    spawner.timer.tick(time.delta());
    if !spawner.timer.just_finished() {
        return;
    }
    if cats.iter().count() >= config.max_cats {
        return;
    }
    let mut rng = rand::thread_rng();
    if let Some(arrival) = roll_arrival(&config, &mut rng) {
        requests.send(arrival);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_uses_configured_points() {
        let config = CatSpawnerConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let arrival = roll_arrival(&config, &mut rng).expect("points configured");
            assert!(config
                .spawn_points
                .iter()
                .any(|p| Vec2::from_array(*p) == arrival.position));
        }
    }

    #[test]
    fn test_orange_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(8);
        let always = CatSpawnerConfig {
            orange_chance: 1.0,
            ..Default::default()
        };
        let never = CatSpawnerConfig {
            orange_chance: 0.0,
            ..Default::default()
        };
        for _ in 0..20 {
            assert_eq!(roll_arrival(&always, &mut rng).map(|a| a.kind), Some(CatKind::Orange));
            assert_eq!(roll_arrival(&never, &mut rng).map(|a| a.kind), Some(CatKind::Common));
        }
    }

    #[test]
    fn test_no_points_no_arrival() {
        let config = CatSpawnerConfig {
            spawn_points: Vec::new(),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        assert!(roll_arrival(&config, &mut rng).is_none());
    }
}

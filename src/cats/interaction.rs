use bevy::prelude::*;
use crate::shared::*;
use super::{Cat, CatInfoEvent};

// ─────────────────────────────────────────────────────────────────────────────
// Info toggle
//
// Left-clicking a cat toggles its info panel. Showing it logs one line with
// the cat's breed, appetite and patience (orange cats add their traits).
// Overlapping cats: the one nearest the click wins.
// ─────────────────────────────────────────────────────────────────────────────

const CLICK_RADIUS: f32 = 0.6;

pub fn toggle_cat_info(
    input: Res<PlayerInput>,
    mut cats: Query<(Entity, &mut Cat, &Transform)>,
    mut info_events: EventWriter<CatInfoEvent>,
) {
    let Some(click) = input.click_world else {
        return;
    };

    let nearest = cats
        .iter()
        .map(|(e, _, t)| (e, t.translation.truncate().distance(click)))
        .filter(|(_, d)| *d <= CLICK_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| e);

    let Some(entity) = nearest else {
        return;
    };
    let Ok((_, mut cat, _)) = cats.get_mut(entity) else {
        return;
    };

    cat.info_visible = !cat.info_visible;
    let line = cat.info_line();
    if cat.info_visible {
        info!("[Cats] {}", line);
    }
    info_events.send(CatInfoEvent {
        cat: entity,
        visible: cat.info_visible,
        line,
    });
}

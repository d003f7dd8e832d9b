//! Proximity trigger zones that relay enter, stay and exit into game actions.
//!
//! A zone either watches one specific entity, or matches bodies by tag. Each
//! phase carries its own list of bindings; a binding with an empty tag uses
//! the zone's default tag.

use bevy::prelude::*;

use crate::shared::*;

pub struct TriggersPlugin;

impl Plugin for TriggersPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TriggerFiredEvent>().add_systems(
            Update,
            update_trigger_zones.run_if(in_state(GameState::Playing)),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerPhase {
    Enter,
    Stay,
    Exit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerBinding {
    /// Tag the other body must carry. Empty means the zone's default tag.
    pub other_tag: String,
    pub actions: Vec<GameAction>,
}

impl TriggerBinding {
    pub fn new(other_tag: impl Into<String>, actions: Vec<GameAction>) -> Self {
        Self {
            other_tag: other_tag.into(),
            actions,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct TriggerZone {
    pub radius: f32,
    pub default_tag: String,
    /// When set, only this entity fires the zone, and it fires every binding.
    pub target: Option<Entity>,
    pub enter: Vec<TriggerBinding>,
    pub stay: Vec<TriggerBinding>,
    pub exit: Vec<TriggerBinding>,
    /// Bodies currently inside, with the tag they had on entry.
    occupants: Vec<(Entity, Option<String>)>,
}

impl TriggerZone {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            default_tag: DEFAULT_PLAYER_TAG.to_string(),
            target: None,
            enter: Vec::new(),
            stay: Vec::new(),
            exit: Vec::new(),
            occupants: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn on_enter(mut self, binding: TriggerBinding) -> Self {
        self.enter.push(binding);
        self
    }

    pub fn on_stay(mut self, binding: TriggerBinding) -> Self {
        self.stay.push(binding);
        self
    }

    pub fn on_exit(mut self, binding: TriggerBinding) -> Self {
        self.exit.push(binding);
        self
    }

    pub fn bindings(&self, phase: TriggerPhase) -> &[TriggerBinding] {
        match phase {
            TriggerPhase::Enter => &self.enter,
            TriggerPhase::Stay => &self.stay,
            TriggerPhase::Exit => &self.exit,
        }
    }

    /// Bindings of `phase` that fire for `other`.
    pub fn matching(
        &self,
        phase: TriggerPhase,
        other: Entity,
        other_tag: Option<&str>,
    ) -> Vec<&TriggerBinding> {
        let bindings = self.bindings(phase);
        if let Some(target) = self.target {
            return if target == other {
                bindings.iter().collect()
            } else {
                Vec::new()
            };
        }
        let Some(other_tag) = other_tag else {
            return Vec::new();
        };
        bindings
            .iter()
            .filter(|b| {
                let wanted = if b.other_tag.is_empty() {
                    self.default_tag.as_str()
                } else {
                    b.other_tag.as_str()
                };
                wanted == other_tag
            })
            .collect()
    }
}

pub fn overlaps(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) <= a_radius + b_radius
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerFiredEvent {
    pub zone: Entity,
    pub other: Entity,
    pub phase: TriggerPhase,
}

fn fire(
    zone_entity: Entity,
    zone: &TriggerZone,
    phase: TriggerPhase,
    other: Entity,
    other_tag: Option<&str>,
    actions: &mut EventWriter<GameActionEvent>,
    fired: &mut EventWriter<TriggerFiredEvent>,
) {
    let bindings = zone.matching(phase, other, other_tag);
    if bindings.is_empty() {
        return;
    }
    for binding in bindings {
        for action in &binding.actions {
            actions.send(GameActionEvent {
                action: action.clone(),
                source: Some(zone_entity),
            });
        }
    }
    if phase != TriggerPhase::Stay {
        debug!("[Trigger] {:?} {:?} by {:?}", zone_entity, phase, other);
    }
    fired.send(TriggerFiredEvent {
        zone: zone_entity,
        other,
        phase,
    });
}

/// Diff each zone's overlapping bodies against last frame's and fire phases.
pub fn update_trigger_zones(
    mut zones: Query<(Entity, &mut TriggerZone, &Transform)>,
    bodies: Query<(Entity, &TriggerBody, &Transform, Option<&Tag>)>,
    mut actions: EventWriter<GameActionEvent>,
    mut fired: EventWriter<TriggerFiredEvent>,
) {
    for (zone_entity, mut zone, zone_transform) in &mut zones {
        let zone_pos = zone_transform.translation.truncate();

        let inside: Vec<(Entity, Option<String>)> = bodies
            .iter()
            .filter(|(e, body, t, _)| {
                *e != zone_entity
                    && overlaps(zone_pos, zone.radius, t.translation.truncate(), body.radius)
            })
            .map(|(e, _, _, tag)| (e, tag.map(|t| t.0.clone())))
            .collect();

        let previous = std::mem::take(&mut zone.occupants);

        for (other, tag) in &previous {
            if !inside.iter().any(|(e, _)| e == other) {
                fire(zone_entity, &zone, TriggerPhase::Exit, *other, tag.as_deref(), &mut actions, &mut fired);
            }
        }
        for (other, tag) in &inside {
            let phase = if previous.iter().any(|(e, _)| e == other) {
                TriggerPhase::Stay
            } else {
                TriggerPhase::Enter
            };
            fire(zone_entity, &zone, phase, *other, tag.as_deref(), &mut actions, &mut fired);
        }

        zone.occupants = inside;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(msg: &str) -> Vec<GameAction> {
        vec![GameAction::Log(msg.to_string())]
    }

    #[test]
    fn test_overlap_uses_sum_of_radii() {
        assert!(overlaps(Vec2::ZERO, 1.0, Vec2::new(1.5, 0.0), 0.5));
        assert!(!overlaps(Vec2::ZERO, 1.0, Vec2::new(1.6, 0.0), 0.5));
    }

    #[test]
    fn test_empty_tag_uses_default() {
        let zone = TriggerZone::new(1.0).on_enter(TriggerBinding::new("", log("hi")));
        let other = Entity::from_raw(9);
        assert_eq!(zone.matching(TriggerPhase::Enter, other, Some("Player")).len(), 1);
        assert!(zone.matching(TriggerPhase::Enter, other, Some("Cat")).is_empty());
        assert!(zone.matching(TriggerPhase::Enter, other, None).is_empty());
        assert!(zone.matching(TriggerPhase::Exit, other, Some("Player")).is_empty());
    }

    #[test]
    fn test_tag_mode_fires_only_matching_bindings() {
        let zone = TriggerZone::new(1.0)
            .on_stay(TriggerBinding::new("Cat", log("cat")))
            .on_stay(TriggerBinding::new("Player", log("player")))
            .on_stay(TriggerBinding::new("", log("default")));
        let hits = zone.matching(TriggerPhase::Stay, Entity::from_raw(1), Some("Player"));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].actions, log("player"));
        assert_eq!(hits[1].actions, log("default"));
    }

    #[test]
    fn test_specific_target_fires_every_binding() {
        let target = Entity::from_raw(4);
        let zone = TriggerZone::new(1.0)
            .with_target(target)
            .on_exit(TriggerBinding::new("Cat", log("a")))
            .on_exit(TriggerBinding::new("Boat", log("b")));
        assert_eq!(zone.matching(TriggerPhase::Exit, target, None).len(), 2);
        assert!(zone
            .matching(TriggerPhase::Exit, Entity::from_raw(5), Some("Cat"))
            .is_empty());
    }
}

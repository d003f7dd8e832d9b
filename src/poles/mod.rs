//! Pole rack: which pole is in hand, and switching between them.

use bevy::prelude::*;

use crate::shared::*;

pub struct PolePlugin;

impl Plugin for PolePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PoleCommandEvent>()
            .add_event::<PoleChangedEvent>()
            .add_systems(
                Update,
                (read_pole_input, handle_pole_commands)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

impl PoleLoadout {
    /// Equip the pole at `index`. Out-of-range indices leave the loadout untouched.
    pub fn set_current(&mut self, index: usize) -> Result<&PoleDef, String> {
        if index >= self.poles.len() {
            return Err(format!(
                "Invalid pole index {} ({} poles configured)",
                index,
                self.poles.len()
            ));
        }
        self.current = Some(index);
        Ok(&self.poles[index])
    }

    /// Index the next pole would be, wrapping. `None` when there is nothing to switch to.
    pub fn next_index(&self) -> Option<usize> {
        if self.poles.len() <= 1 {
            return None;
        }
        let current = self.current.unwrap_or(0);
        Some((current + 1) % self.poles.len())
    }

    pub fn previous_index(&self) -> Option<usize> {
        if self.poles.len() <= 1 {
            return None;
        }
        let len = self.poles.len();
        let current = self.current.unwrap_or(0);
        Some((current + len - 1) % len)
    }
}

fn read_pole_input(input: Res<PlayerInput>, mut commands: EventWriter<PoleCommandEvent>) {
    if input.next_pole {
        commands.send(PoleCommandEvent(PoleCommand::Next));
    }
    if input.prev_pole {
        commands.send(PoleCommandEvent(PoleCommand::Previous));
    }
}

pub fn handle_pole_commands(
    mut commands: EventReader<PoleCommandEvent>,
    mut loadout: ResMut<PoleLoadout>,
    mut changed: EventWriter<PoleChangedEvent>,
) {
    for PoleCommandEvent(command) in commands.read() {
        let target = match command {
            PoleCommand::Next => loadout.next_index(),
            PoleCommand::Previous => loadout.previous_index(),
            PoleCommand::Equip(index) => Some(*index),
        };
        let Some(index) = target else {
            continue;
        };

        match loadout.set_current(index) {
            Ok(pole) => {
                info!("[Poles] Switched to {} (level {})", pole.name, pole.level);
                changed.send(PoleChangedEvent {
                    index,
                    name: pole.name.clone(),
                    level: pole.level,
                });
            }
            Err(e) => warn!("[Poles] {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loadout(levels: &[u8]) -> PoleLoadout {
        PoleLoadout {
            poles: levels
                .iter()
                .map(|&level| PoleDef {
                    name: format!("Pole {}", level),
                    level,
                    ..Default::default()
                })
                .collect(),
            current: Some(0),
        }
    }

    #[test]
    fn test_defaults_without_pole() {
        let empty = PoleLoadout::default();
        assert_eq!(empty.current_level(), 1);
        assert_eq!(empty.current_name(), NO_POLE_NAME);
        assert_eq!(empty.success_bonus(), 0.0);
        assert_eq!(empty.biting_time_reduction(), 0.0);
        assert_eq!(empty.wait_time_reduction(), 0.0);
        assert!(empty.current().is_none());
    }

    #[test]
    fn test_set_current_rejects_bad_index() {
        let mut l = loadout(&[1, 2]);
        assert!(l.set_current(5).is_err());
        assert_eq!(l.current, Some(0), "bad index must not change the pole");
        assert_eq!(l.set_current(1).map(|p| p.level), Ok(2));
        assert_eq!(l.current_level(), 2);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut l = loadout(&[1, 2, 3]);
        assert_eq!(l.previous_index(), Some(2));
        l.current = Some(2);
        assert_eq!(l.next_index(), Some(0));
        assert_eq!(l.previous_index(), Some(1));
    }

    #[test]
    fn test_single_pole_does_not_cycle() {
        let l = loadout(&[3]);
        assert_eq!(l.next_index(), None);
        assert_eq!(l.previous_index(), None);
    }

    #[test]
    fn test_has_level_and_names() {
        let l = loadout(&[1, 3]);
        assert!(l.has_level(3));
        assert!(!l.has_level(2));
        assert_eq!(l.names(), vec!["Pole 1".to_string(), "Pole 3".to_string()]);
    }
}

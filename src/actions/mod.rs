//! Relays `GameActionEvent`s into the events each domain listens for.

use bevy::prelude::*;

use crate::shared::*;

pub struct ActionsPlugin;

impl Plugin for ActionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GameActionEvent>()
            .add_event::<CustomActionEvent>()
            .add_event::<FishingCommandEvent>()
            .add_event::<PoleCommandEvent>()
            .add_event::<PoleChangedEvent>()
            .add_event::<SpawnCatEvent>()
            .add_event::<PlaceFishEvent>()
            .add_event::<FadeRequest>()
            .add_systems(Update, dispatch_actions);
    }
}

/// Every writer an action can end up in.
#[derive(bevy::ecs::system::SystemParam)]
pub struct ActionWriters<'w> {
    fishing: EventWriter<'w, FishingCommandEvent>,
    poles: EventWriter<'w, PoleCommandEvent>,
    cats: EventWriter<'w, SpawnCatEvent>,
    place: EventWriter<'w, PlaceFishEvent>,
    fades: EventWriter<'w, FadeRequest>,
    custom: EventWriter<'w, CustomActionEvent>,
}

pub fn dispatch_actions(mut events: EventReader<GameActionEvent>, mut out: ActionWriters) {
    for GameActionEvent { action, source } in events.read() {
        match action {
            GameAction::StartFishing => {
                out.fishing.send(FishingCommandEvent(FishingCommand::Start));
            }
            GameAction::ReelRod => {
                out.fishing.send(FishingCommandEvent(FishingCommand::Reel));
            }
            GameAction::NextPole => {
                out.poles.send(PoleCommandEvent(PoleCommand::Next));
            }
            GameAction::PreviousPole => {
                out.poles.send(PoleCommandEvent(PoleCommand::Previous));
            }
            GameAction::EquipPole(index) => {
                out.poles.send(PoleCommandEvent(PoleCommand::Equip(*index)));
            }
            GameAction::SpawnCat { kind, position } => {
                out.cats.send(SpawnCatEvent {
                    kind: *kind,
                    position: *position,
                });
            }
            GameAction::PlaceFish { position } => {
                out.place.send(PlaceFishEvent {
                    species: None,
                    position: *position,
                });
            }
            GameAction::Fade { trigger, kind } => {
                out.fades.send(FadeRequest {
                    trigger: *trigger,
                    kind: *kind,
                    replace_actions: None,
                });
            }
            GameAction::Log(message) => info!("[Action] {}", message),
            GameAction::Custom(name) => {
                debug!("[Action] custom '{}' from {:?}", name, source);
                out.custom.send(CustomActionEvent {
                    name: name.clone(),
                    source: *source,
                });
            }
        }
    }
}

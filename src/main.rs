mod shared;
mod input;
mod data;
mod actions;
mod poles;
mod fishing;
mod cats;
mod triggers;
mod player;
mod world;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Whisker Wharf".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<PlayerInput>()
        .init_resource::<KeyBindings>()
        .init_resource::<FishBasket>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(actions::ActionsPlugin)
        .add_plugins(poles::PolePlugin)
        .add_plugins(fishing::FishingPlugin)
        .add_plugins(cats::CatsPlugin)
        .add_plugins(triggers::TriggersPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / PIXELS_PER_UNIT)),
    ));
}

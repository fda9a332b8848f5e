mod arena;
mod behaviour;
mod combat;
mod content;
mod core;
mod movement;
mod navigation;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Scrapline".to_string(),
                resolution: (1280_u32, 720_u32).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity::ZERO)
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            movement::MovementPlugin,
            behaviour::BehaviourPlugin,
            navigation::NavigationPlugin,
            combat::CombatPlugin,
            arena::ArenaPlugin,
        ))
        .run();
}

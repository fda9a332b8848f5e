//! Arena domain: spawns the level and its combatants from arena data.

mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod spawn;


pub use components::Wall;
pub use spawn::{build_nav_grid, wall_rect};

use bevy::prelude::*;

use crate::arena::spawn::spawn_arena;

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_arena);

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            Update,
            (
                dev::dev_hotkeys,
                dev::dump_machines,
                dev::log_collision_impacts,
            ),
        );
    }
}

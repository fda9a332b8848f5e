//! Core domain: frame ordering, run configuration, pause and camera.

mod events;
mod resources;
mod systems;


pub use events::CameraShakeEvent;
pub use resources::{CameraShake, GameplayPaused, RunConfig, SimClock, gameplay_active};

use bevy::prelude::*;

use crate::core::systems::{
    advance_sim_clock, apply_camera_shake_events, follow_player, setup_camera, toggle_pause,
};

/// Per-frame simulation order. Behaviour decides, pathing turns goals into
/// desired moves, movement resolves them, combat settles the consequences.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Behaviour,
    Pathing,
    Movement,
    Combat,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunConfig>()
            .init_resource::<GameplayPaused>()
            .init_resource::<SimClock>()
            .init_resource::<CameraShake>()
            .add_message::<CameraShakeEvent>()
            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Behaviour,
                    SimSet::Pathing,
                    SimSet::Movement,
                    SimSet::Combat,
                )
                    .chain()
                    .run_if(gameplay_active),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (toggle_pause, advance_sim_clock.in_set(SimSet::Input)))
            .add_systems(
                PostUpdate,
                (apply_camera_shake_events, follow_player).chain(),
            );
    }
}

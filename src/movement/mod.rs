//! Movement domain: kinematic collision resolution, impulses and player locomotion.

mod components;
mod events;
mod impulse;
mod latch;
mod mover;
mod raycast;
mod resources;
mod systems;

#[cfg(test)]
pub(crate) mod testing;

pub use components::{
    DesiredMove, GameLayer, Heading, KinematicBody, MechBodyBundle, Player, Turret,
};
pub use events::CollisionImpactEvent;
pub use impulse::ImpulseBody;
pub use latch::{LatchHook, LatchOutcome};
pub use mover::{CollisionState, KinematicMover, MoveResult};
pub use raycast::{RaycastHit, Raycaster, SpatialRaycaster};
pub use resources::{MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::SimSet;
use crate::movement::systems::{
    apply_player_input, handle_latch, move_kinematic_bodies, read_input, sync_turrets,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_message::<CollisionImpactEvent>()
            .add_systems(
                Update,
                (read_input, apply_player_input, handle_latch)
                    .chain()
                    .in_set(SimSet::Input),
            )
            .add_systems(
                Update,
                (move_kinematic_bodies, sync_turrets)
                    .chain()
                    .in_set(SimSet::Movement),
            );
    }
}

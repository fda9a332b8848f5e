//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::components::GameLayer;
use crate::movement::impulse::ImpulseBody;
use crate::movement::mover::KinematicMover;

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Inset margin kept between a mover and blocking geometry.
    pub skin_width: f32,
    pub horizontal_rays: usize,
    pub vertical_rays: usize,
    pub player_speed: f32,
    pub mech_mass: f32,
    /// Fraction of impulse velocity kept each tick, in [0, 1).
    pub impulse_friction: f32,
    pub latch_range: f32,
    pub latch_boost_force: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            skin_width: 0.5,
            horizontal_rays: 3,
            vertical_rays: 3,
            player_speed: 260.0,
            mech_mass: 2.0,
            impulse_friction: 0.88,
            latch_range: 320.0,
            latch_boost_force: 1400.0,
        }
    }
}

impl MovementTuning {
    /// A mover for a box of the given half size using this tuning.
    pub fn mover(&self, half_extents: Vec2) -> KinematicMover {
        KinematicMover::new(half_extents, self.skin_width, GameLayer::movement_mask())
            .with_rays(self.horizontal_rays, self.vertical_rays)
    }

    pub fn impulse(&self, mass_scale: f32) -> ImpulseBody {
        ImpulseBody::new(self.mech_mass * mass_scale, self.impulse_friction)
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub fire_held: bool,
    pub latch_just_pressed: bool,
    pub boost_just_pressed: bool,
}

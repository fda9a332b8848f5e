//! Movement domain: impulse velocity layered on top of the kinematic mover.

use bevy::prelude::*;

/// Accumulated knockback/boost velocity that decays every tick.
#[derive(Component, Debug, Clone)]
pub struct ImpulseBody {
    pub velocity: Vec2,
    pub mass: f32,
    /// Fraction of velocity kept per tick, in [0, 1).
    pub friction: f32,
}

impl ImpulseBody {
    pub fn new(mass: f32, friction: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass,
            friction,
        }
    }

    /// Adds `force / mass` to the impulse velocity. Massless bodies ignore forces.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.mass <= 0.0 {
            return;
        }
        self.velocity += force / self.mass;
    }

    pub fn is_resting(&self) -> bool {
        self.velocity.length_squared() <= 0.0
    }

    /// Per-tick impulse integration: returns the displacement for this tick
    /// and decays the velocity. The caller folds the step into the entity's
    /// single kinematic move for the frame.
    pub fn take_step(&mut self, dt: f32) -> Vec2 {
        if self.is_resting() {
            return Vec2::ZERO;
        }
        let step = self.velocity * dt;
        self.velocity *= self.friction;
        step
    }
}

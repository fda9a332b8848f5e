//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::impulse::ImpulseBody;
use crate::movement::mover::KinematicMover;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Static level geometry, blocks movement and sight
    Wall,
    /// Player and AI mechs
    Mech,
    /// Projectiles in flight
    Projectile,
}

impl GameLayer {
    /// Layers a mech collides with when moving.
    pub fn movement_mask() -> LayerMask {
        LayerMask::from([GameLayer::Wall, GameLayer::Mech])
    }

    /// Layers that block line of sight.
    pub fn sight_mask() -> LayerMask {
        LayerMask::from(GameLayer::Wall)
    }

    /// Layers a projectile can hit.
    pub fn projectile_mask() -> LayerMask {
        LayerMask::from([GameLayer::Wall, GameLayer::Mech])
    }
}

#[derive(Component, Debug)]
pub struct Player;

/// Unit vector a mech is facing (aim/turret direction).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Heading(pub Vec2);

impl Default for Heading {
    fn default() -> Self {
        Self(Vec2::X)
    }
}

/// Velocity the owner wants to travel at this frame, in units per second.
/// Written by input or path following, consumed by the kinematic move step.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct DesiredMove(pub Vec2);

/// Collision-resolved movement for an entity.
#[derive(Component, Debug, Clone)]
pub struct KinematicBody {
    pub mover: KinematicMover,
}

impl KinematicBody {
    pub fn new(mover: KinematicMover) -> Self {
        Self { mover }
    }
}

/// Bundle shared by every mech that moves through the kinematic resolver.
#[derive(Bundle)]
pub struct MechBodyBundle {
    pub body: KinematicBody,
    pub impulse: ImpulseBody,
    pub desired: DesiredMove,
    pub heading: Heading,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
}

impl MechBodyBundle {
    pub fn new(mover: KinematicMover, impulse: ImpulseBody) -> Self {
        let size = mover.half_extents * 2.0;
        Self {
            body: KinematicBody::new(mover),
            impulse,
            desired: DesiredMove::default(),
            heading: Heading::default(),
            rigid_body: RigidBody::Kinematic,
            collider: Collider::rectangle(size.x, size.y),
            collision_layers: CollisionLayers::new(
                GameLayer::Mech,
                [GameLayer::Wall, GameLayer::Mech, GameLayer::Projectile],
            ),
        }
    }
}

/// Visual turret child that follows the parent's [`Heading`].
#[derive(Component, Debug)]
pub struct Turret;

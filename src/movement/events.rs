//! Movement domain: movement-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A mover's probe touched another collider during its move this frame.
#[derive(Debug)]
pub struct CollisionImpactEvent {
    pub mover: Entity,
    pub other: Entity,
    pub point: Vec2,
    pub normal: Vec2,
}

impl Message for CollisionImpactEvent {}

//! Behaviour domain: notifications raised by agents.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct TargetAcquiredEvent {
    pub agent: Entity,
    pub target: Option<Entity>,
}

impl Message for TargetAcquiredEvent {}

#[derive(Debug, Clone, Copy)]
pub struct TargetLostEvent {
    pub agent: Entity,
}

impl Message for TargetLostEvent {}

/// Returns a pooled mech to its home as if freshly spawned.
#[derive(Debug, Clone, Copy)]
pub struct RecycleAgentEvent {
    pub agent: Entity,
}

impl Message for RecycleAgentEvent {}

//! Navigation domain: path request and completion messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::navigation::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRequestEvent {
    pub agent: Entity,
    pub from: Vec2,
    pub to: Vec2,
    pub generation: u64,
}

impl Message for PathRequestEvent {}

#[derive(Debug, Clone)]
pub struct PathCompletedEvent {
    pub agent: Entity,
    pub generation: u64,
    pub path: Path,
}

impl Message for PathCompletedEvent {}

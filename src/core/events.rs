//! Core domain: presentation events raised by gameplay.

use bevy::ecs::message::Message;

/// Adds trauma to the camera. Heavier impacts pass larger values.
#[derive(Debug, Clone, Copy)]
pub struct CameraShakeEvent {
    pub trauma: f32,
}

impl Message for CameraShakeEvent {}

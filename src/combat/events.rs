//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::components::Team;

#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    pub knockback: Vec2,
}

impl Message for DamageEvent {}

#[derive(Debug, Clone, Copy)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// Area damage. The source is destroyed by its own blast.
#[derive(Debug, Clone, Copy)]
pub struct ExplosionEvent {
    pub source: Entity,
    pub origin: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub force: f32,
}

impl Message for ExplosionEvent {}

#[derive(Debug, Clone, Copy)]
pub struct SpawnProjectileEvent {
    pub owner: Entity,
    pub team: Team,
    pub origin: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub knockback: f32,
    pub range: f32,
}

impl Message for SpawnProjectileEvent {}

/// The player's whip wrapped around `victim` and tore its weapon away.
#[derive(Debug, Clone, Copy)]
pub struct WeaponStolenEvent {
    pub thief: Entity,
    pub victim: Entity,
}

impl Message for WeaponStolenEvent {}

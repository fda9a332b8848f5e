//! Combat domain: components for health, weapons and projectiles.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Marks an entity as a combat participant
#[derive(Component, Debug)]
pub struct Combatant;

/// Marks an AI-driven mech
#[derive(Component, Debug)]
pub struct Enemy;

/// Marks the boss mech
#[derive(Component, Debug)]
pub struct Boss;

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Team affiliation to prevent friendly fire
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

/// Boss vulnerability window. Damage is only accepted while open.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct WeakSpot {
    pub open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum WeaponKind {
    Cannon,
    Whip,
}

/// Weapon stats as written in arena data.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WeaponStats {
    pub kind: WeaponKind,
    pub max_range: f32,
    /// Largest angle between facing and target, in radians.
    pub arc_tolerance: f32,
    pub muzzle_offset: f32,
    pub fire_interval: f32,
    pub projectile_speed: f32,
    pub damage: f32,
    pub knockback: f32,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            kind: WeaponKind::Cannon,
            max_range: 420.0,
            arc_tolerance: 0.25,
            muzzle_offset: 28.0,
            fire_interval: 0.18,
            projectile_speed: 720.0,
            damage: 6.0,
            knockback: 300.0,
        }
    }
}

/// Mounted weapon. `firing` is the trigger, `allows_fire` the weapon's own
/// permission (a stolen weapon never fires again).
#[derive(Component, Debug, Clone)]
pub struct WeaponMount {
    pub stats: WeaponStats,
    pub allows_fire: bool,
    pub firing: bool,
    pub cooldown: f32,
}

impl WeaponMount {
    pub fn new(stats: WeaponStats) -> Self {
        Self {
            stats,
            allows_fire: stats.kind == WeaponKind::Cannon,
            firing: false,
            cooldown: 0.0,
        }
    }

    /// Counts the cooldown down and reports whether a shot leaves this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.cooldown = (self.cooldown - dt).max(0.0);
        if !self.firing || !self.allows_fire || self.cooldown > 0.0 {
            return false;
        }
        self.cooldown = self.stats.fire_interval;
        true
    }

    pub fn muzzle(&self, position: Vec2, facing: Vec2) -> Vec2 {
        position + facing.normalize_or_zero() * self.stats.muzzle_offset
    }
}

/// Ray-cast projectile in flight.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub owner: Entity,
    pub team: Team,
    pub velocity: Vec2,
    pub damage: f32,
    pub knockback: f32,
    /// Distance left before the projectile fizzles.
    pub remaining: f32,
}

/// Where a pooled mech returns to when recycled.
#[derive(Component, Debug, Clone, Copy)]
pub struct PoolHome(pub Vec2);

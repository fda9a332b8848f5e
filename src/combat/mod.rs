//! Combat domain: health, weapons, projectiles, explosions and deaths.

mod components;
mod events;
mod systems;
mod weapon;

#[cfg(test)]
mod tests;

pub use components::{
    Boss, Combatant, Enemy, Health, PoolHome, Projectile, Team, WeakSpot, WeaponKind,
    WeaponMount, WeaponStats,
};
pub use events::{
    DamageEvent, DeathEvent, ExplosionEvent, SpawnProjectileEvent, WeaponStolenEvent,
};
pub use weapon::shoot_eligibility;

use bevy::prelude::*;

use crate::core::SimSet;
use crate::combat::systems::{
    advance_projectiles, apply_damage, apply_explosions, apply_player_fire, disarm_victims,
    fire_weapons, handle_deaths, spawn_projectiles,
};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<ExplosionEvent>()
            .add_message::<SpawnProjectileEvent>()
            .add_message::<WeaponStolenEvent>()
            .add_systems(Update, apply_player_fire.in_set(SimSet::Input))
            .add_systems(
                Update,
                (
                    disarm_victims,
                    fire_weapons,
                    spawn_projectiles,
                    advance_projectiles,
                    apply_explosions,
                    apply_damage,
                    handle_deaths,
                )
                    .chain()
                    .in_set(SimSet::Combat),
            );
    }
}

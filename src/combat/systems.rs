//! Combat domain: firing, projectiles, damage, explosions and deaths.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::behaviour::RecycleAgentEvent;
use crate::combat::components::{
    Boss, Health, PoolHome, Projectile, Team, WeakSpot, WeaponMount,
};
use crate::combat::events::{
    DamageEvent, DeathEvent, ExplosionEvent, SpawnProjectileEvent, WeaponStolenEvent,
};
use crate::movement::{
    GameLayer, Heading, ImpulseBody, MovementInput, Player, Raycaster, SpatialRaycaster,
};

const PROJECTILE_SIZE: f32 = 6.0;

pub(crate) fn apply_player_fire(
    input: Res<MovementInput>,
    mut query: Query<&mut WeaponMount, With<Player>>,
) {
    for mut weapon in &mut query {
        weapon.firing = input.fire_held;
    }
}

pub(crate) fn fire_weapons(
    time: Res<Time>,
    mut query: Query<(Entity, &Transform, &Heading, &Team, &mut WeaponMount)>,
    mut spawn_events: MessageWriter<SpawnProjectileEvent>,
) {
    let dt = time.delta_secs();

    for (entity, transform, heading, team, mut weapon) in &mut query {
        if !weapon.tick(dt) {
            continue;
        }
        let position = transform.translation.truncate();
        let stats = weapon.stats;
        spawn_events.write(SpawnProjectileEvent {
            owner: entity,
            team: *team,
            origin: weapon.muzzle(position, heading.0),
            direction: heading.0,
            speed: stats.projectile_speed,
            damage: stats.damage,
            knockback: stats.knockback,
            range: stats.max_range,
        });
    }
}

pub(crate) fn spawn_projectiles(
    mut commands: Commands,
    mut spawn_events: MessageReader<SpawnProjectileEvent>,
) {
    for event in spawn_events.read() {
        let Some(direction) = event.direction.try_normalize() else {
            continue;
        };
        let color = match event.team {
            Team::Player => Color::srgb(0.4, 0.9, 1.0),
            Team::Enemy => Color::srgb(1.0, 0.55, 0.2),
        };

        commands.spawn((
            Sprite {
                color,
                custom_size: Some(Vec2::splat(PROJECTILE_SIZE)),
                ..default()
            },
            Transform::from_translation(event.origin.extend(2.0)),
            Projectile {
                owner: event.owner,
                team: event.team,
                velocity: direction * event.speed,
                damage: event.damage,
                knockback: event.knockback,
                remaining: event.range,
            },
        ));
    }
}

/// Sweeps each projectile along this frame's travel with a ray; the first
/// thing hit (other than the shooter) stops it.
pub(crate) fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut projectiles: Query<(Entity, &mut Transform, &mut Projectile)>,
    targets: Query<&Team, With<Health>>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    let raycaster = SpatialRaycaster::new(&spatial_query);
    let dt = time.delta_secs();

    for (entity, mut transform, mut projectile) in &mut projectiles {
        let position = transform.translation.truncate();
        let step = projectile.velocity * dt;
        let distance = step.length().min(projectile.remaining);
        if distance <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        let direction = step / step.length();

        let hit = raycaster
            .raycast_all(position, direction, distance, GameLayer::projectile_mask())
            .into_iter()
            .find(|hit| hit.entity != projectile.owner);

        if let Some(hit) = hit {
            let hostile = targets
                .get(hit.entity)
                .is_ok_and(|team| *team != projectile.team);
            if hostile {
                damage_events.write(DamageEvent {
                    source: projectile.owner,
                    target: hit.entity,
                    amount: projectile.damage,
                    knockback: direction * projectile.knockback,
                });
            }
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation += step.extend(0.0);
        projectile.remaining -= distance;
        if projectile.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Turns explosions into damage for everything in range, the source included.
pub(crate) fn apply_explosions(
    mut explosion_events: MessageReader<ExplosionEvent>,
    query: Query<(Entity, &Transform), With<Health>>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    for event in explosion_events.read() {
        info!("Explosion at {:?} (radius {})", event.origin, event.radius);

        for (entity, transform) in &query {
            if entity == event.source {
                continue;
            }
            let offset = transform.translation.truncate() - event.origin;
            if offset.length() > event.radius {
                continue;
            }
            damage_events.write(DamageEvent {
                source: event.source,
                target: entity,
                amount: event.damage,
                knockback: offset.normalize_or_zero() * event.force,
            });
        }

        damage_events.write(DamageEvent {
            source: event.source,
            target: event.source,
            amount: f32::MAX,
            knockback: Vec2::ZERO,
        });
    }
}

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<(&mut Health, Option<&WeakSpot>, Option<&mut ImpulseBody>)>,
) {
    for event in damage_events.read() {
        let Ok((mut health, weak_spot, impulse)) = query.get_mut(event.target) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }
        if weak_spot.is_some_and(|spot| !spot.open) {
            debug!("Damage to {:?} absorbed: weak spot closed", event.target);
            continue;
        }

        health.take_damage(event.amount);
        if let Some(mut impulse) = impulse {
            impulse.apply_force(event.knockback);
        }

        if health.is_dead() {
            death_events.write(DeathEvent {
                entity: event.target,
            });
        }
    }
}

/// Disarms the mech whose weapon was stolen.
pub(crate) fn disarm_victims(
    mut stolen_events: MessageReader<WeaponStolenEvent>,
    mut weapons: Query<&mut WeaponMount, Without<Boss>>,
) {
    for event in stolen_events.read() {
        if let Ok(mut weapon) = weapons.get_mut(event.victim) {
            weapon.allows_fire = false;
            weapon.firing = false;
            debug!("{:?} disarmed by {:?}", event.victim, event.thief);
        }
    }
}

pub(crate) fn handle_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    mut recycle_events: MessageWriter<RecycleAgentEvent>,
    query: Query<(Has<Player>, Has<Boss>, Option<&PoolHome>)>,
) {
    for event in death_events.read() {
        let Ok((is_player, is_boss, home)) = query.get(event.entity) else {
            continue;
        };

        if is_boss {
            info!("Boss {:?} destroyed", event.entity);
            commands.entity(event.entity).despawn();
        } else if home.is_some() {
            if is_player {
                info!("Player destroyed, respawning");
            } else {
                debug!("Recycling {:?}", event.entity);
            }
            recycle_events.write(RecycleAgentEvent {
                agent: event.entity,
            });
        } else {
            commands.entity(event.entity).despawn();
        }
    }
}

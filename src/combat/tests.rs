//! Combat domain: tests for health, weapon timing, eligibility and damage.

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::systems::apply_damage;
use super::*;
use crate::movement::ImpulseBody;

fn cannon() -> WeaponMount {
    WeaponMount::new(WeaponStats {
        kind: WeaponKind::Cannon,
        max_range: 100.0,
        arc_tolerance: 0.2,
        muzzle_offset: 10.0,
        fire_interval: 0.5,
        projectile_speed: 300.0,
        damage: 5.0,
        knockback: 0.0,
    })
}

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_health_damage_clamps_at_zero() {
    let mut health = Health::new(20.0);
    assert_eq!(health.take_damage(5.0), 5.0);
    assert_eq!(health.take_damage(50.0), 15.0);
    assert!(health.is_dead());
    assert_eq!(health.take_damage(1.0), 0.0);

    health.restore();
    assert_eq!(health.current, 20.0);
    assert!(!health.is_dead());
}

#[test]
fn test_negative_damage_does_not_heal() {
    let mut health = Health::new(10.0);
    health.take_damage(-5.0);
    assert_eq!(health.current, 10.0);
}

// -----------------------------------------------------------------------------
// Weapon tests
// -----------------------------------------------------------------------------

#[test]
fn test_weapon_fires_at_interval_while_held() {
    let mut weapon = cannon();
    assert!(!weapon.tick(0.1), "trigger not held");

    weapon.firing = true;
    assert!(weapon.tick(0.1));
    assert!(!weapon.tick(0.25));
    assert!(weapon.tick(0.25));
}

#[test]
fn test_whip_never_fires_projectiles() {
    let mut whip = WeaponMount::new(WeaponStats {
        kind: WeaponKind::Whip,
        ..WeaponStats::default()
    });
    whip.firing = true;
    assert!(!whip.tick(1.0));
}

#[test]
fn test_shoot_eligibility_checks_arc_range_and_muzzle() {
    let weapon = cannon();
    let facing = Vec2::X;

    assert!(shoot_eligibility(&weapon, Vec2::ZERO, facing, Vec2::new(50.0, 5.0), true));
    assert!(!shoot_eligibility(&weapon, Vec2::ZERO, facing, Vec2::new(50.0, 5.0), false));
    assert!(!shoot_eligibility(&weapon, Vec2::ZERO, facing, Vec2::new(150.0, 0.0), true));
    assert!(!shoot_eligibility(&weapon, Vec2::ZERO, facing, Vec2::new(0.0, 50.0), true));

    let mut disarmed = cannon();
    disarmed.allows_fire = false;
    assert!(!shoot_eligibility(&disarmed, Vec2::ZERO, facing, Vec2::new(50.0, 0.0), true));
}

// -----------------------------------------------------------------------------
// Damage system tests
// -----------------------------------------------------------------------------

fn damage_app() -> App {
    let mut app = App::new();
    app.add_message::<DamageEvent>()
        .add_message::<DeathEvent>()
        .add_systems(Update, apply_damage);
    app
}

#[test]
fn test_damage_applies_knockback_and_reports_death() {
    let mut app = damage_app();
    let source = app.world_mut().spawn_empty().id();
    let target = app
        .world_mut()
        .spawn((Health::new(10.0), ImpulseBody::new(2.0, 0.9)))
        .id();

    app.world_mut().write_message(DamageEvent {
        source,
        target,
        amount: 12.0,
        knockback: Vec2::new(10.0, 0.0),
    });
    app.update();

    let health = app.world().get::<Health>(target).map(|h| h.current);
    assert_eq!(health, Some(0.0));
    let velocity = app.world().get::<ImpulseBody>(target).map(|b| b.velocity);
    assert_eq!(velocity, Some(Vec2::new(5.0, 0.0)));

    let deaths = app.world().resource::<Messages<DeathEvent>>();
    assert_eq!(deaths.len(), 1);
}

#[test]
fn test_closed_weak_spot_absorbs_damage() {
    let mut app = damage_app();
    let source = app.world_mut().spawn_empty().id();
    let boss = app
        .world_mut()
        .spawn((Health::new(100.0), WeakSpot { open: false }))
        .id();

    app.world_mut().write_message(DamageEvent {
        source,
        target: boss,
        amount: 30.0,
        knockback: Vec2::ZERO,
    });
    app.update();
    assert_eq!(app.world().get::<Health>(boss).map(|h| h.current), Some(100.0));

    if let Some(mut spot) = app.world_mut().get_mut::<WeakSpot>(boss) {
        spot.open = true;
    }
    app.world_mut().write_message(DamageEvent {
        source,
        target: boss,
        amount: 30.0,
        knockback: Vec2::ZERO,
    });
    app.update();
    assert_eq!(app.world().get::<Health>(boss).map(|h| h.current), Some(70.0));
}

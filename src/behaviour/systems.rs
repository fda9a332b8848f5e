//! Behaviour domain: ticking machines and applying outside events.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::behaviour::agent::AgentNotice;
use crate::behaviour::components::{AgentRng, AiController, BossBrain, BossHead, PatrolRoute};
use crate::behaviour::context::{BossCommand, EcsAgent, EcsBoss};
use crate::behaviour::events::{RecycleAgentEvent, TargetAcquiredEvent, TargetLostEvent};
use crate::behaviour::machine::BehaviourStateMachine;
use crate::behaviour::perception::line_of_sight;
use crate::behaviour::state::StateContext;
use crate::behaviour::states::Berserk;
use crate::behaviour::tuning::BehaviourTuning;
use crate::combat::{
    Boss, DamageEvent, ExplosionEvent, Health, PoolHome, SpawnProjectileEvent, Team, WeakSpot,
    WeaponKind, WeaponMount, WeaponStolenEvent,
};
use crate::core::{CameraShakeEvent, SimClock};
use crate::movement::{GameLayer, Heading, ImpulseBody, KinematicBody, SpatialRaycaster};
use crate::navigation::PathFollower;

/// Everything a tick can announce to the rest of the game.
#[derive(SystemParam)]
pub(crate) struct BehaviourOutputs<'w> {
    acquired: MessageWriter<'w, TargetAcquiredEvent>,
    lost: MessageWriter<'w, TargetLostEvent>,
    explosions: MessageWriter<'w, ExplosionEvent>,
    damage: MessageWriter<'w, DamageEvent>,
    shakes: MessageWriter<'w, CameraShakeEvent>,
    projectiles: MessageWriter<'w, SpawnProjectileEvent>,
}

type AgentQuery = (
    Entity,
    &'static Transform,
    &'static mut BehaviourStateMachine,
    &'static mut AiController,
    &'static mut Heading,
    &'static mut AgentRng,
    &'static KinematicBody,
    Option<&'static PatrolRoute>,
    Option<&'static mut WeaponMount>,
    Option<(&'static mut BossBrain, &'static mut WeakSpot)>,
);

/// Ticks every machine exactly once.
pub(crate) fn tick_behaviour(
    clock: Res<SimClock>,
    spatial_query: SpatialQuery,
    tuning: Res<BehaviourTuning>,
    targets: Query<&Transform>,
    mut agents: Query<AgentQuery>,
    mut outputs: BehaviourOutputs,
) {
    let raycaster = SpatialRaycaster::new(&spatial_query);
    let now = clock.elapsed;
    let delta = clock.delta;
    let sight_mask = GameLayer::sight_mask();

    for (
        entity,
        transform,
        mut machine,
        mut controller,
        mut heading,
        mut rng,
        body,
        patrol,
        mut weapon,
        boss,
    ) in &mut agents
    {
        let position = transform.translation.truncate();
        let target = controller.target;
        let target_position = target
            .and_then(|target| targets.get(target).ok())
            .map(|transform| transform.translation.truncate());

        let line_of_sight_to_target = target_position.is_some_and(|target_position| {
            position.distance(target_position) <= controller.sight_range
                && line_of_sight(&raycaster, position, target_position, sight_mask, entity, target)
        });
        let muzzle_clear = match (weapon.as_deref(), target_position) {
            (Some(weapon), Some(target_position)) => line_of_sight(
                &raycaster,
                weapon.muzzle(position, heading.0),
                target_position,
                sight_mask,
                entity,
                target,
            ),
            _ => false,
        };

        controller.direct_move = None;

        let mut agent = EcsAgent {
            now,
            delta,
            position,
            heading: &mut heading.0,
            controller: &mut *controller,
            target_position,
            line_of_sight: line_of_sight_to_target,
            collisions: body.mover.collisions(),
            patrol: patrol.map(|route| route.0.as_slice()),
            weapon: weapon.as_deref_mut(),
            muzzle_clear,
            rng: &mut rng.0,
            notices: Vec::new(),
            self_destructed: false,
        };

        let mut boss_commands = Vec::new();
        match boss {
            Some((mut brain, mut weak_spot)) => {
                let mut controls = EcsBoss {
                    brain: &mut *brain,
                    weak_spot: &mut *weak_spot,
                    tuning: tuning.boss,
                    commands: Vec::new(),
                };
                let mut ctx = StateContext::with_boss(&mut agent, &mut controls);
                machine.tick(&mut ctx);
                boss_commands = controls.commands;
            }
            None => {
                let mut ctx = StateContext::new(&mut agent);
                machine.tick(&mut ctx);
            }
        }

        let notices = std::mem::take(&mut agent.notices);
        let self_destructed = agent.self_destructed;

        for notice in notices {
            match notice {
                AgentNotice::TargetAcquired => {
                    outputs.acquired.write(TargetAcquiredEvent {
                        agent: entity,
                        target,
                    });
                }
                AgentNotice::TargetLost => {
                    outputs.lost.write(TargetLostEvent { agent: entity });
                }
            }
        }

        if self_destructed {
            outputs.explosions.write(ExplosionEvent {
                source: entity,
                origin: position,
                radius: tuning.berserk.explosion_radius,
                damage: tuning.berserk.explosion_damage,
                force: tuning.berserk.explosion_force,
            });
        }

        for command in boss_commands {
            match command {
                BossCommand::Strike { damage, knockback } => {
                    let (Some(target), Some(target_position)) = (target, target_position) else {
                        continue;
                    };
                    outputs.damage.write(DamageEvent {
                        source: entity,
                        target,
                        amount: damage,
                        knockback: (target_position - position).normalize_or_zero() * knockback,
                    });
                }
                BossCommand::Shake(trauma) => {
                    outputs.shakes.write(CameraShakeEvent { trauma });
                }
                BossCommand::Projectile { origin, direction } => {
                    let stats = weapon.as_deref().map(|weapon| weapon.stats).unwrap_or_default();
                    outputs.projectiles.write(SpawnProjectileEvent {
                        owner: entity,
                        team: Team::Enemy,
                        origin: origin + direction.normalize_or_zero() * stats.muzzle_offset,
                        direction,
                        speed: stats.projectile_speed,
                        damage: stats.damage,
                        knockback: stats.knockback,
                        range: stats.max_range,
                    });
                }
            }
        }
    }
}

/// A mech whose weapon was torn away goes berserk on its next tick.
pub(crate) fn handle_weapon_stolen(
    tuning: Res<BehaviourTuning>,
    mut stolen_events: MessageReader<WeaponStolenEvent>,
    mut machines: Query<&mut BehaviourStateMachine, Without<Boss>>,
) {
    for event in stolen_events.read() {
        let Ok(mut machine) = machines.get_mut(event.victim) else {
            continue;
        };
        info!("{:?} lost its weapon and goes berserk", event.victim);
        machine.queue_transition(Box::new(Berserk::new(tuning.berserk)));
    }
}

type RecycleQuery = (
    &'static mut Transform,
    &'static PoolHome,
    Option<&'static mut Health>,
    Option<&'static mut ImpulseBody>,
    Option<&'static mut BehaviourStateMachine>,
    Option<&'static mut AiController>,
    Option<&'static mut PathFollower>,
    Option<&'static mut WeaponMount>,
);

/// Puts a pooled mech back at its home with a clean slate.
pub(crate) fn handle_recycle(
    mut recycle_events: MessageReader<RecycleAgentEvent>,
    mut query: Query<RecycleQuery>,
) {
    for event in recycle_events.read() {
        let Ok((mut transform, home, health, impulse, machine, controller, follower, weapon)) =
            query.get_mut(event.agent)
        else {
            continue;
        };

        transform.translation.x = home.0.x;
        transform.translation.y = home.0.y;
        if let Some(mut health) = health {
            health.restore();
        }
        if let Some(mut impulse) = impulse {
            impulse.velocity = Vec2::ZERO;
        }
        if let Some(mut machine) = machine {
            machine.queue_reset();
        }
        if let Some(mut controller) = controller {
            controller.reset(home.0);
        }
        if let Some(mut follower) = follower {
            follower.interrupt();
        }
        if let Some(mut weapon) = weapon {
            weapon.firing = false;
            weapon.cooldown = 0.0;
            weapon.allows_fire = weapon.stats.kind == WeaponKind::Cannon;
        }
        debug!("Recycled {:?} at {:?}", event.agent, home.0);
    }
}

pub(crate) fn log_target_changes(
    mut acquired: MessageReader<TargetAcquiredEvent>,
    mut lost: MessageReader<TargetLostEvent>,
) {
    for event in acquired.read() {
        debug!("{:?} acquired target {:?}", event.agent, event.target);
    }
    for event in lost.read() {
        debug!("{:?} lost its target", event.agent);
    }
}

/// Shakes the head sprite and tints it while telegraphing or exposed.
pub(crate) fn animate_boss_heads(
    bosses: Query<(&BossBrain, &WeakSpot, &Children)>,
    mut heads: Query<(&mut Transform, &mut Sprite), With<BossHead>>,
) {
    for (brain, weak_spot, children) in &bosses {
        for child in children.iter() {
            let Ok((mut transform, mut sprite)) = heads.get_mut(child) else {
                continue;
            };
            transform.translation.x = brain.head_offset.x;
            transform.translation.y = brain.head_offset.y;
            sprite.color = if weak_spot.open {
                Color::srgb(1.0, 0.95, 0.3)
            } else if brain.telegraphing {
                Color::srgb(1.0, 0.3, 0.2)
            } else {
                Color::srgb(0.55, 0.1, 0.1)
            };
        }
    }
}

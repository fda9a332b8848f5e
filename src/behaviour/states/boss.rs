//! Boss attack cycle: telegraph, then charge or spin-shoot, stunned in between.
//!
//! Every boss state switches path following off when entered and back on
//! when it exits. Boss-only effects go through [`BossControls`] and are
//! skipped when the context has none.
//!
//! [`BossControls`]: crate::behaviour::agent::BossControls

use bevy::prelude::*;
use rand::Rng;

use crate::behaviour::state::{BehaviourState, StateContext, StateResponse};
use crate::behaviour::steering::{direction_or, turn_towards};
use crate::behaviour::tuning::BossTuning;

fn suspend_pathing(ctx: &mut StateContext) {
    ctx.agent.set_pathing_enabled(false);
    ctx.agent.set_direct_move(None);
}

fn restore_pathing(ctx: &mut StateContext) {
    ctx.agent.set_pathing_enabled(true);
    ctx.agent.set_direct_move(None);
}

// -----------------------------------------------------------------------------
// Telegraph
// -----------------------------------------------------------------------------

pub struct BossTelegraphCharge {
    tuning: BossTuning,
    started_at: f32,
}

impl BossTelegraphCharge {
    pub fn new(tuning: BossTuning) -> Self {
        Self {
            tuning,
            started_at: 0.0,
        }
    }
}

impl BehaviourState for BossTelegraphCharge {
    fn name(&self) -> &'static str {
        "BossTelegraphCharge"
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        suspend_pathing(ctx);
        self.started_at = ctx.agent.now();
        if let Some(boss) = ctx.boss.as_deref_mut() {
            boss.begin_telegraph();
        }
    }

    fn update(&mut self, ctx: &mut StateContext) -> StateResponse {
        let agent = &mut *ctx.agent;
        let position = agent.position();
        let facing = agent.facing();
        if let Some(target) = agent.target_position() {
            let max_turn = self.tuning.telegraph_turn_speed * agent.delta();
            agent.set_facing(turn_towards(facing, direction_or(position, target, facing), max_turn));
        }

        let jitter = self.tuning.head_jitter.max(0.0);
        let offset = if jitter > 0.0 {
            let rng = agent.rng();
            Vec2::new(
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
            )
        } else {
            Vec2::ZERO
        };

        let elapsed = agent.now() - self.started_at;
        let Some(boss) = ctx.boss.as_deref_mut() else {
            return StateResponse::no_change();
        };
        boss.set_head_offset(offset);

        if elapsed >= self.tuning.telegraph_duration {
            return StateResponse::abandon_boxed(boss.next_attack());
        }
        StateResponse::no_change()
    }

    fn on_exit(&mut self, ctx: &mut StateContext) {
        if let Some(boss) = ctx.boss.as_deref_mut() {
            boss.set_head_offset(Vec2::ZERO);
        }
        restore_pathing(ctx);
    }
}

// -----------------------------------------------------------------------------
// Charge
// -----------------------------------------------------------------------------

pub struct BossCharge {
    tuning: BossTuning,
    /// Contacts are only trusted once the charge itself has moved the boss.
    moved: bool,
}

impl BossCharge {
    pub fn new(tuning: BossTuning) -> Self {
        Self {
            tuning,
            moved: false,
        }
    }

    /// Turn-rate scale: full inside the falloff distance, shrinking beyond it.
    pub fn turn_scale(&self, distance: f32) -> f32 {
        if distance <= 0.0 {
            return 1.0;
        }
        (self.tuning.charge_falloff_distance / distance).min(1.0)
    }
}

impl BehaviourState for BossCharge {
    fn name(&self) -> &'static str {
        "BossCharge"
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        suspend_pathing(ctx);
    }

    fn update(&mut self, ctx: &mut StateContext) -> StateResponse {
        let agent = &mut *ctx.agent;
        let Some(target) = agent.target_position() else {
            agent.set_direct_move(Some(Vec2::ZERO));
            return StateResponse::no_change();
        };

        let position = agent.position();
        let distance = position.distance(target);
        let facing = agent.facing();
        let max_turn = self.tuning.charge_turn_speed * self.turn_scale(distance) * agent.delta();
        let facing = turn_towards(facing, direction_or(position, target, facing), max_turn);
        agent.set_facing(facing);

        if distance < self.tuning.charge_damage_radius {
            agent.set_direct_move(Some(Vec2::ZERO));
            if let Some(boss) = ctx.boss.as_deref_mut() {
                boss.strike_target(self.tuning.charge_damage, self.tuning.charge_knockback);
                boss.shake_camera(self.tuning.heavy_shake);
            }
            return StateResponse::abandon(BossStunned::new(self.tuning));
        }

        if self.moved && agent.last_collision().has_collision() {
            agent.set_direct_move(Some(Vec2::ZERO));
            if let Some(boss) = ctx.boss.as_deref_mut() {
                boss.open_weak_spot();
                boss.shake_camera(self.tuning.light_shake);
            }
            return StateResponse::abandon(BossStunned::new(self.tuning));
        }

        let speed = agent.move_speed() * self.tuning.charge_speed_multiplier;
        agent.set_direct_move(Some(facing * speed));
        self.moved = true;
        StateResponse::no_change()
    }

    fn on_exit(&mut self, ctx: &mut StateContext) {
        restore_pathing(ctx);
    }
}

// -----------------------------------------------------------------------------
// Stunned
// -----------------------------------------------------------------------------

pub struct BossStunned {
    tuning: BossTuning,
    started_at: f32,
}

impl BossStunned {
    pub fn new(tuning: BossTuning) -> Self {
        Self {
            tuning,
            started_at: 0.0,
        }
    }
}

impl BehaviourState for BossStunned {
    fn name(&self) -> &'static str {
        "BossStunned"
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        suspend_pathing(ctx);
        self.started_at = ctx.agent.now();
    }

    fn update(&mut self, ctx: &mut StateContext) -> StateResponse {
        ctx.agent.set_direct_move(Some(Vec2::ZERO));
        if ctx.agent.now() - self.started_at >= self.tuning.stun_duration {
            return StateResponse::abandon(BossTelegraphCharge::new(self.tuning));
        }
        StateResponse::no_change()
    }

    fn on_exit(&mut self, ctx: &mut StateContext) {
        if let Some(boss) = ctx.boss.as_deref_mut() {
            boss.close_weak_spot();
        }
        restore_pathing(ctx);
    }
}

// -----------------------------------------------------------------------------
// Spin shoot
// -----------------------------------------------------------------------------

pub struct BossSpinShoot {
    tuning: BossTuning,
    started_at: f32,
    next_shot_at: f32,
}

impl BossSpinShoot {
    pub fn new(tuning: BossTuning) -> Self {
        Self {
            tuning,
            started_at: 0.0,
            next_shot_at: 0.0,
        }
    }
}

impl BehaviourState for BossSpinShoot {
    fn name(&self) -> &'static str {
        "BossSpinShoot"
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        suspend_pathing(ctx);
        self.started_at = ctx.agent.now();
        self.next_shot_at = self.started_at;
    }

    fn update(&mut self, ctx: &mut StateContext) -> StateResponse {
        let agent = &mut *ctx.agent;
        let now = agent.now();
        let position = agent.position();

        let spin = Vec2::from_angle(self.tuning.spin_rate * agent.delta());
        let facing = spin.rotate(agent.facing());
        agent.set_facing(facing);

        let chase = match agent.target_position() {
            Some(target) if position.distance(target) > self.tuning.spin_min_distance => {
                direction_or(position, target, Vec2::ZERO)
                    * agent.move_speed()
                    * self.tuning.spin_speed_multiplier
            }
            _ => Vec2::ZERO,
        };
        agent.set_direct_move(Some(chase));

        let elapsed = now - self.started_at;
        let Some(boss) = ctx.boss.as_deref_mut() else {
            return StateResponse::no_change();
        };

        if now >= self.next_shot_at {
            boss.spawn_projectile(position, facing);
            self.next_shot_at = now + self.tuning.spin_fire_delay.max(f32::EPSILON);
        }

        if elapsed >= self.tuning.spin_duration {
            return StateResponse::abandon(BossTelegraphCharge::new(self.tuning));
        }
        StateResponse::no_change()
    }

    fn on_exit(&mut self, ctx: &mut StateContext) {
        if let Some(boss) = ctx.boss.as_deref_mut() {
            boss.close_weak_spot();
        }
        restore_pathing(ctx);
    }
}

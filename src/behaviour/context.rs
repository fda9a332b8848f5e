//! Behaviour domain: ECS-backed implementations of the agent traits.
//!
//! Queries that need the physics world (sight, muzzle clearance) are
//! answered before the tick; effects that need other entities are
//! collected and turned into messages after it.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::behaviour::agent::{Agent, AgentNotice, BossControls};
use crate::behaviour::components::{AiController, BossAttack, BossBrain};
use crate::behaviour::state::BehaviourState;
use crate::behaviour::states::{BossCharge, BossSpinShoot};
use crate::behaviour::tuning::BossTuning;
use crate::combat::{WeakSpot, WeaponMount, shoot_eligibility};
use crate::movement::CollisionState;

pub(crate) struct EcsAgent<'a> {
    pub now: f32,
    pub delta: f32,
    pub position: Vec2,
    pub heading: &'a mut Vec2,
    pub controller: &'a mut AiController,
    pub target_position: Option<Vec2>,
    pub line_of_sight: bool,
    pub collisions: CollisionState,
    pub patrol: Option<&'a [Vec2]>,
    pub weapon: Option<&'a mut WeaponMount>,
    pub muzzle_clear: bool,
    pub rng: &'a mut ChaCha8Rng,
    pub notices: Vec<AgentNotice>,
    pub self_destructed: bool,
}

impl Agent for EcsAgent<'_> {
    fn now(&self) -> f32 {
        self.now
    }

    fn delta(&self) -> f32 {
        self.delta
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn facing(&self) -> Vec2 {
        *self.heading
    }

    fn set_facing(&mut self, facing: Vec2) {
        if let Some(facing) = facing.try_normalize() {
            *self.heading = facing;
        }
    }

    fn move_speed(&self) -> f32 {
        self.controller.move_speed
    }

    fn target_position(&self) -> Option<Vec2> {
        self.target_position
    }

    fn has_line_of_sight(&self) -> bool {
        self.line_of_sight
    }

    fn move_goal(&self) -> Vec2 {
        self.controller.move_goal
    }

    fn set_move_goal(&mut self, goal: Vec2) {
        self.controller.move_goal = goal;
    }

    fn set_direct_move(&mut self, velocity: Option<Vec2>) {
        self.controller.direct_move = velocity;
    }

    fn pathing_enabled(&self) -> bool {
        self.controller.pathing_enabled
    }

    fn set_pathing_enabled(&mut self, enabled: bool) {
        self.controller.pathing_enabled = enabled;
    }

    fn last_collision(&self) -> CollisionState {
        self.collisions
    }

    fn patrol_route(&self) -> Option<&[Vec2]> {
        self.patrol
    }

    fn can_shoot(&self) -> bool {
        match (self.weapon.as_deref(), self.target_position) {
            (Some(weapon), Some(target)) => shoot_eligibility(
                weapon,
                self.position,
                *self.heading,
                target,
                self.muzzle_clear,
            ),
            _ => false,
        }
    }

    fn set_firing(&mut self, firing: bool) {
        if let Some(weapon) = self.weapon.as_deref_mut() {
            weapon.firing = firing;
        }
    }

    fn notify(&mut self, notice: AgentNotice) {
        self.notices.push(notice);
    }

    fn self_destruct(&mut self) {
        self.self_destructed = true;
    }

    fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut *self.rng
    }
}

/// Boss effects that reach outside the boss entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BossCommand {
    Strike { damage: f32, knockback: f32 },
    Shake(f32),
    Projectile { origin: Vec2, direction: Vec2 },
}

pub(crate) struct EcsBoss<'a> {
    pub brain: &'a mut BossBrain,
    pub weak_spot: &'a mut WeakSpot,
    pub tuning: BossTuning,
    pub commands: Vec<BossCommand>,
}

impl BossControls for EcsBoss<'_> {
    fn open_weak_spot(&mut self) {
        self.weak_spot.open = true;
    }

    fn close_weak_spot(&mut self) {
        self.weak_spot.open = false;
    }

    fn weak_spot_open(&self) -> bool {
        self.weak_spot.open
    }

    fn set_head_offset(&mut self, offset: Vec2) {
        self.brain.head_offset = offset;
    }

    fn begin_telegraph(&mut self) {
        self.brain.telegraphing = true;
    }

    fn shake_camera(&mut self, trauma: f32) {
        self.commands.push(BossCommand::Shake(trauma));
    }

    fn strike_target(&mut self, damage: f32, knockback: f32) {
        self.commands.push(BossCommand::Strike { damage, knockback });
    }

    fn spawn_projectile(&mut self, origin: Vec2, direction: Vec2) {
        self.commands.push(BossCommand::Projectile { origin, direction });
    }

    fn next_attack(&mut self) -> Box<dyn BehaviourState> {
        self.brain.telegraphing = false;
        match self.brain.advance_attack() {
            BossAttack::Charge => Box::new(BossCharge::new(self.tuning)),
            BossAttack::SpinShoot => Box::new(BossSpinShoot::new(self.tuning)),
        }
    }
}

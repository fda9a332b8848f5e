//! Behaviour domain: in-memory agent and boss for driving states in tests.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::behaviour::agent::{Agent, AgentNotice, BossControls};
use crate::behaviour::components::{BossAttack, BossBrain};
use crate::behaviour::state::BehaviourState;
use crate::behaviour::states::{BossCharge, BossSpinShoot};
use crate::behaviour::tuning::BossTuning;
use crate::movement::CollisionState;

pub(crate) struct FakeAgent {
    pub now: f32,
    pub delta: f32,
    pub position: Vec2,
    pub facing: Vec2,
    pub move_speed: f32,
    pub target: Option<Vec2>,
    pub line_of_sight: bool,
    pub move_goal: Vec2,
    pub direct_move: Option<Vec2>,
    pub pathing_enabled: bool,
    pub collisions: CollisionState,
    pub patrol: Option<Vec<Vec2>>,
    pub can_shoot: bool,
    pub firing: bool,
    pub notices: Vec<AgentNotice>,
    pub self_destructs: u32,
    pub rng: ChaCha8Rng,
}

impl FakeAgent {
    pub(crate) fn new(position: Vec2) -> Self {
        Self {
            now: 0.0,
            delta: 0.25,
            position,
            facing: Vec2::X,
            move_speed: 100.0,
            target: None,
            line_of_sight: false,
            move_goal: position,
            direct_move: None,
            pathing_enabled: true,
            collisions: CollisionState::default(),
            patrol: None,
            can_shoot: false,
            firing: false,
            notices: Vec::new(),
            self_destructs: 0,
            rng: ChaCha8Rng::seed_from_u64(7),
        }
    }

    /// Sets the clock to `tick * delta` so times stay exact.
    pub(crate) fn at_tick(&mut self, tick: u32) {
        self.now = tick as f32 * self.delta;
    }

    pub(crate) fn with_target(mut self, target: Vec2, line_of_sight: bool) -> Self {
        self.target = Some(target);
        self.line_of_sight = line_of_sight;
        self
    }
}

impl Agent for FakeAgent {
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
        self.facing
    }

    fn set_facing(&mut self, facing: Vec2) {
        self.facing = facing;
    }

    fn move_speed(&self) -> f32 {
        self.move_speed
    }

    fn target_position(&self) -> Option<Vec2> {
        self.target
    }

    fn has_line_of_sight(&self) -> bool {
        self.line_of_sight
    }

    fn move_goal(&self) -> Vec2 {
        self.move_goal
    }

    fn set_move_goal(&mut self, goal: Vec2) {
        self.move_goal = goal;
    }

    fn set_direct_move(&mut self, velocity: Option<Vec2>) {
        self.direct_move = velocity;
    }

    fn pathing_enabled(&self) -> bool {
        self.pathing_enabled
    }

    fn set_pathing_enabled(&mut self, enabled: bool) {
        self.pathing_enabled = enabled;
    }

    fn last_collision(&self) -> CollisionState {
        self.collisions
    }

    fn patrol_route(&self) -> Option<&[Vec2]> {
        self.patrol.as_deref()
    }

    fn can_shoot(&self) -> bool {
        self.can_shoot
    }

    fn set_firing(&mut self, firing: bool) {
        self.firing = firing;
    }

    fn notify(&mut self, notice: AgentNotice) {
        self.notices.push(notice);
    }

    fn self_destruct(&mut self) {
        self.self_destructs += 1;
    }

    fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

pub(crate) struct FakeBoss {
    pub tuning: BossTuning,
    pub brain: BossBrain,
    pub weak_spot_open: bool,
    pub telegraphs: u32,
    pub shakes: Vec<f32>,
    pub strikes: Vec<(f32, f32)>,
    pub projectiles: Vec<(Vec2, Vec2)>,
}

impl FakeBoss {
    pub(crate) fn new(tuning: BossTuning) -> Self {
        Self {
            tuning,
            brain: BossBrain::default(),
            weak_spot_open: false,
            telegraphs: 0,
            shakes: Vec::new(),
            strikes: Vec::new(),
            projectiles: Vec::new(),
        }
    }
}

impl BossControls for FakeBoss {
    fn open_weak_spot(&mut self) {
        self.weak_spot_open = true;
    }

    fn close_weak_spot(&mut self) {
        self.weak_spot_open = false;
    }

    fn weak_spot_open(&self) -> bool {
        self.weak_spot_open
    }

    fn set_head_offset(&mut self, offset: Vec2) {
        self.brain.head_offset = offset;
    }

    fn begin_telegraph(&mut self) {
        self.telegraphs += 1;
    }

    fn shake_camera(&mut self, trauma: f32) {
        self.shakes.push(trauma);
    }

    fn strike_target(&mut self, damage: f32, knockback: f32) {
        self.strikes.push((damage, knockback));
    }

    fn spawn_projectile(&mut self, origin: Vec2, direction: Vec2) {
        self.projectiles.push((origin, direction));
    }

    fn next_attack(&mut self) -> Box<dyn BehaviourState> {
        match self.brain.advance_attack() {
            BossAttack::Charge => Box::new(BossCharge::new(self.tuning)),
            BossAttack::SpinShoot => Box::new(BossSpinShoot::new(self.tuning)),
        }
    }
}

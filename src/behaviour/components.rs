//! Behaviour domain: per-agent components.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Goals and movement switches written by the behaviour states.
#[derive(Component, Debug, Clone)]
pub struct AiController {
    pub target: Option<Entity>,
    pub move_speed: f32,
    pub sight_range: f32,
    pub move_goal: Vec2,
    /// Velocity for this frame that bypasses pathing.
    pub direct_move: Option<Vec2>,
    pub pathing_enabled: bool,
}

impl AiController {
    pub fn new(target: Option<Entity>, move_speed: f32, sight_range: f32, home: Vec2) -> Self {
        Self {
            target,
            move_speed,
            sight_range,
            move_goal: home,
            direct_move: None,
            pathing_enabled: true,
        }
    }

    pub fn reset(&mut self, home: Vec2) {
        self.move_goal = home;
        self.direct_move = None;
        self.pathing_enabled = true;
    }
}

/// Per-agent random stream, seeded from the run seed.
#[derive(Component, Debug, Clone)]
pub struct AgentRng(pub ChaCha8Rng);

impl AgentRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct PatrolRoute(pub Vec<Vec2>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossAttack {
    Charge,
    SpinShoot,
}

/// Boss-side state the behaviour states drive through `BossControls`.
#[derive(Component, Debug, Clone, Default)]
pub struct BossBrain {
    pub last_attack: Option<BossAttack>,
    pub head_offset: Vec2,
    pub telegraphing: bool,
}

impl BossBrain {
    /// Alternates attacks, starting with a charge.
    pub fn advance_attack(&mut self) -> BossAttack {
        let next = match self.last_attack {
            Some(BossAttack::Charge) => BossAttack::SpinShoot,
            Some(BossAttack::SpinShoot) | None => BossAttack::Charge,
        };
        self.last_attack = Some(next);
        next
    }
}

/// Head sprite shaken while the boss telegraphs.
#[derive(Component, Debug)]
pub struct BossHead;

//! Attack: keep the target in sight, hold a firing position and shoot in bursts.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::behaviour::agent::AgentNotice;
use crate::behaviour::state::{BehaviourState, StateContext, StateResponse};
use crate::behaviour::steering::{direction_or, roll_range, turn_towards};
use crate::behaviour::tuning::AttackTuning;

/// Fire-burst timing. A burst runs for its rolled length unless eligibility
/// drops, then the weapon rests for the rolled delay. Both are re-rolled
/// whenever a new burst starts.
#[derive(Debug, Clone, Default)]
pub struct BurstController {
    bursting: bool,
    started_at: f32,
    length: f32,
    delay: f32,
    ready_at: f32,
}

impl BurstController {
    pub fn is_bursting(&self) -> bool {
        self.bursting
    }

    /// Time at which the next burst may start.
    pub fn ready_at(&self) -> f32 {
        self.ready_at
    }

    /// Advances the burst and returns whether the weapon should fire.
    pub fn update(
        &mut self,
        now: f32,
        eligible: bool,
        tuning: &AttackTuning,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        if self.bursting {
            if !eligible || now - self.started_at >= self.length {
                self.bursting = false;
                self.ready_at = now + self.delay;
            }
        } else if eligible && now >= self.ready_at {
            self.bursting = true;
            self.started_at = now;
            self.length = roll_range(rng, tuning.burst_length_min, tuning.burst_length_max);
            self.delay = roll_range(rng, tuning.burst_delay_min, tuning.burst_delay_max);
        }
        self.bursting
    }
}

pub struct Attack {
    tuning: AttackTuning,
    last_seen_at: f32,
    last_known_position: Option<Vec2>,
    next_reposition_at: f32,
    burst: BurstController,
}

impl Attack {
    pub fn new(tuning: AttackTuning) -> Self {
        Self {
            tuning,
            last_seen_at: 0.0,
            last_known_position: None,
            next_reposition_at: 0.0,
            burst: BurstController::default(),
        }
    }

    pub fn burst(&self) -> &BurstController {
        &self.burst
    }

    /// A spot at engagement range on the agent's side of the target,
    /// nudged sideways.
    fn firing_position(&self, position: Vec2, target: Vec2, rng: &mut ChaCha8Rng) -> Vec2 {
        let away = direction_or(target, position, Vec2::X);
        let jitter = self.tuning.lateral_jitter.max(0.0);
        let lateral = if jitter > 0.0 {
            rng.random_range(-jitter..=jitter)
        } else {
            0.0
        };
        target + away * self.tuning.engagement_range + away.perp() * lateral
    }

    fn lose_target(&mut self, ctx: &mut StateContext) -> StateResponse {
        ctx.agent.notify(AgentNotice::TargetLost);
        StateResponse::pop_previous()
    }
}

impl BehaviourState for Attack {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        let now = ctx.agent.now();
        self.last_seen_at = now;
        self.last_known_position = ctx.agent.target_position();
        self.next_reposition_at = now;
    }

    fn update(&mut self, ctx: &mut StateContext) -> StateResponse {
        let agent = &mut *ctx.agent;
        let now = agent.now();
        let position = agent.position();
        let target = agent.target_position();

        let facing = agent.facing();
        let desired = target.map_or(facing, |target| direction_or(position, target, facing));
        agent.set_facing(turn_towards(facing, desired, self.tuning.turn_speed * agent.delta()));

        let Some(target) = target else {
            return self.lose_target(ctx);
        };

        let sighted = agent.has_line_of_sight();
        if sighted {
            self.last_seen_at = now;
            self.last_known_position = Some(target);
        } else if now - self.last_seen_at > self.tuning.attention_span {
            return self.lose_target(ctx);
        }

        if sighted {
            if now >= self.next_reposition_at {
                let goal = self.firing_position(position, target, agent.rng());
                agent.set_move_goal(goal);
                self.next_reposition_at = now
                    + roll_range(
                        agent.rng(),
                        self.tuning.reposition_min,
                        self.tuning.reposition_max,
                    );
            }
        } else {
            agent.set_move_goal(self.last_known_position.unwrap_or(target));
        }

        let eligible = sighted && agent.can_shoot();
        let firing = self.burst.update(now, eligible, &self.tuning, agent.rng());
        agent.set_firing(firing);

        StateResponse::no_change()
    }

    fn on_exit(&mut self, ctx: &mut StateContext) {
        ctx.agent.set_firing(false);
    }
}

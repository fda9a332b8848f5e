//! Idle: look around, walk the patrol route and watch for the target.

use bevy::prelude::*;

use crate::behaviour::agent::AgentNotice;
use crate::behaviour::state::{BehaviourState, StateContext, StateResponse};
use crate::behaviour::states::Attack;
use crate::behaviour::steering::{random_direction, roll_range, turn_towards};
use crate::behaviour::tuning::BehaviourTuning;

pub struct Idle {
    tuning: BehaviourTuning,
    next_look_at: f32,
    look_direction: Option<Vec2>,
    patrol_index: usize,
}

impl Idle {
    pub fn new(tuning: BehaviourTuning) -> Self {
        Self {
            tuning,
            next_look_at: 0.0,
            look_direction: None,
            patrol_index: 0,
        }
    }

    pub fn patrol_index(&self) -> usize {
        self.patrol_index
    }

    fn update_look(&mut self, ctx: &mut StateContext) {
        let agent = &mut *ctx.agent;
        let now = agent.now();
        let idle = self.tuning.idle;

        if now >= self.next_look_at {
            self.look_direction = Some(random_direction(agent.rng()));
            let interval = roll_range(agent.rng(), idle.look_interval_min, idle.look_interval_max);
            self.next_look_at = now + interval;
        }

        if let Some(look) = self.look_direction {
            let facing = turn_towards(agent.facing(), look, idle.turn_speed * agent.delta());
            agent.set_facing(facing);
        }
    }

    fn update_patrol(&mut self, ctx: &mut StateContext) {
        let agent = &mut *ctx.agent;
        let position = agent.position();

        let tolerance = self.tuning.idle.patrol_tolerance;
        let waypoint = match agent.patrol_route() {
            Some(route) if !route.is_empty() => {
                self.patrol_index %= route.len();
                if position.distance(route[self.patrol_index]) <= tolerance {
                    self.patrol_index = (self.patrol_index + 1) % route.len();
                }
                route[self.patrol_index]
            }
            // Without a route the agent holds its ground
            _ => position,
        };
        agent.set_move_goal(waypoint);
    }
}

impl BehaviourState for Idle {
    fn name(&self) -> &'static str {
        "Idle"
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        let agent = &mut *ctx.agent;
        agent.set_firing(false);
        let idle = self.tuning.idle;
        self.next_look_at =
            agent.now() + roll_range(agent.rng(), idle.look_interval_min, idle.look_interval_max);
    }

    fn update(&mut self, ctx: &mut StateContext) -> StateResponse {
        // Both run every tick, whichever one ends up steering.
        self.update_look(ctx);
        self.update_patrol(ctx);

        let agent = &mut *ctx.agent;
        if agent.target_position().is_some() && agent.has_line_of_sight() {
            agent.notify(AgentNotice::TargetAcquired);
            return StateResponse::push(Attack::new(self.tuning.attack));
        }

        StateResponse::no_change()
    }
}

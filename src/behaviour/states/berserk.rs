//! Berserk: chase the target and blow up next to it. There is no way out.

use crate::behaviour::state::{BehaviourState, StateContext, StateResponse};
use crate::behaviour::steering::{direction_or, turn_towards};
use crate::behaviour::tuning::BerserkTuning;

pub struct Berserk {
    tuning: BerserkTuning,
    detonated: bool,
}

impl Berserk {
    pub fn new(tuning: BerserkTuning) -> Self {
        Self {
            tuning,
            detonated: false,
        }
    }

    pub fn detonated(&self) -> bool {
        self.detonated
    }
}

impl BehaviourState for Berserk {
    fn name(&self) -> &'static str {
        "Berserk"
    }

    fn on_enter(&mut self, ctx: &mut StateContext) {
        ctx.agent.set_firing(false);
        ctx.agent.set_pathing_enabled(true);
    }

    fn update(&mut self, ctx: &mut StateContext) -> StateResponse {
        let agent = &mut *ctx.agent;
        if self.detonated {
            return StateResponse::no_change();
        }

        let position = agent.position();
        let Some(target) = agent.target_position() else {
            agent.set_move_goal(position);
            return StateResponse::no_change();
        };

        if position.distance(target) <= self.tuning.suicide_radius {
            self.detonated = true;
            agent.self_destruct();
            return StateResponse::no_change();
        }

        if agent.has_line_of_sight() {
            let facing = agent.facing();
            let max_turn = self.tuning.turn_speed * agent.delta();
            agent.set_facing(turn_towards(facing, direction_or(position, target, facing), max_turn));
            agent.set_move_goal(target);
        }

        StateResponse::no_change()
    }
}

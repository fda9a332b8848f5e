//! Behaviour domain: stack-based AI state machine and the states it runs.

mod agent;
mod components;
mod context;
mod events;
mod machine;
mod perception;
mod state;
mod states;
mod steering;
mod systems;
mod tuning;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentNotice, BossControls};
pub use components::{AgentRng, AiController, BossAttack, BossBrain, BossHead, PatrolRoute};
pub use events::{RecycleAgentEvent, TargetAcquiredEvent, TargetLostEvent};
pub use machine::BehaviourStateMachine;
pub use perception::line_of_sight;
pub use state::{BehaviourState, StateContext, StateResponse, TransitionMode};
pub use states::{
    Attack, Berserk, BossCharge, BossSpinShoot, BossStunned, BossTelegraphCharge,
    BurstController, Idle,
};
pub use steering::turn_towards;
pub use tuning::{AttackTuning, BehaviourTuning, BerserkTuning, BossTuning, IdleTuning};

use bevy::prelude::*;

use crate::behaviour::systems::{
    animate_boss_heads, handle_recycle, handle_weapon_stolen, log_target_changes,
    tick_behaviour,
};
use crate::core::SimSet;

/// Machine for a regular mech: idles until it spots its target.
pub fn agent_machine(tuning: BehaviourTuning) -> BehaviourStateMachine {
    BehaviourStateMachine::new(move || Box::new(Idle::new(tuning)) as Box<dyn BehaviourState>)
}

/// Machine for the boss: loops through its attack cycle from a telegraph.
pub fn boss_machine(tuning: BossTuning) -> BehaviourStateMachine {
    BehaviourStateMachine::new(move || {
        Box::new(BossTelegraphCharge::new(tuning)) as Box<dyn BehaviourState>
    })
}

pub struct BehaviourPlugin;

impl Plugin for BehaviourPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BehaviourTuning>()
            .add_message::<TargetAcquiredEvent>()
            .add_message::<TargetLostEvent>()
            .add_message::<RecycleAgentEvent>()
            .add_systems(
                Update,
                (
                    handle_recycle,
                    handle_weapon_stolen,
                    tick_behaviour,
                    log_target_changes,
                )
                    .chain()
                    .in_set(SimSet::Behaviour),
            )
            .add_systems(PostUpdate, animate_boss_heads);
    }
}

//! Behaviour domain: the state trait and the directive a state returns each tick.

use std::fmt;

use crate::behaviour::agent::{Agent, BossControls};

/// How the machine should treat the current state after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    NoChange,
    /// Discard the current state and resume the one below it.
    PopPrevious,
    /// Suspend the current state on the stack and run `new_state`.
    PushCurrent,
    /// Discard the current state and run `new_state` in its place.
    AbandonCurrent,
}

/// Per-tick decision of a [`BehaviourState`]. `new_state` is only read for
/// [`TransitionMode::PushCurrent`] and [`TransitionMode::AbandonCurrent`].
pub struct StateResponse {
    pub mode: TransitionMode,
    pub new_state: Option<Box<dyn BehaviourState>>,
}

impl StateResponse {
    pub fn new(mode: TransitionMode, new_state: Option<Box<dyn BehaviourState>>) -> Self {
        Self { mode, new_state }
    }

    pub fn no_change() -> Self {
        Self::new(TransitionMode::NoChange, None)
    }

    pub fn pop_previous() -> Self {
        Self::new(TransitionMode::PopPrevious, None)
    }

    pub fn push(state: impl BehaviourState) -> Self {
        Self::new(TransitionMode::PushCurrent, Some(Box::new(state)))
    }

    pub fn abandon(state: impl BehaviourState) -> Self {
        Self::new(TransitionMode::AbandonCurrent, Some(Box::new(state)))
    }

    pub fn abandon_boxed(state: Box<dyn BehaviourState>) -> Self {
        Self::new(TransitionMode::AbandonCurrent, Some(state))
    }

    pub fn new_state_name(&self) -> Option<&'static str> {
        self.new_state.as_ref().map(|state| state.name())
    }
}

impl fmt::Debug for StateResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateResponse")
            .field("mode", &self.mode)
            .field("new_state", &self.new_state_name())
            .finish()
    }
}

/// What a state may touch while it runs. Boss controls are only present for
/// agents that have them.
pub struct StateContext<'a> {
    pub agent: &'a mut dyn Agent,
    pub boss: Option<&'a mut dyn BossControls>,
}

impl<'a> StateContext<'a> {
    pub fn new(agent: &'a mut dyn Agent) -> Self {
        Self { agent, boss: None }
    }

    pub fn with_boss(agent: &'a mut dyn Agent, boss: &'a mut dyn BossControls) -> Self {
        Self {
            agent,
            boss: Some(boss),
        }
    }
}

/// One activation of a behaviour. Instances only own their timers and
/// counters; everything else is reached through the context.
pub trait BehaviourState: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Runs once, when the state first becomes current.
    fn on_enter(&mut self, _ctx: &mut StateContext) {}

    fn update(&mut self, ctx: &mut StateContext) -> StateResponse;

    /// Runs once, when the state is discarded.
    fn on_exit(&mut self, _ctx: &mut StateContext) {}
}

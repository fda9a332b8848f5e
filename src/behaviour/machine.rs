//! Behaviour domain: stack-based state machine.
//!
//! One state is current and ticked; suspended states wait on the stack
//! until everything above them has been popped. A state's `on_enter` runs
//! when it first becomes current and its `on_exit` when it is discarded,
//! so suspending and resuming never re-run hooks.

use std::mem;

use bevy::prelude::*;

use crate::behaviour::state::{BehaviourState, StateContext, StateResponse, TransitionMode};

type StateFactory = Box<dyn Fn() -> Box<dyn BehaviourState> + Send + Sync>;

/// Changes requested from outside a tick, applied before the next update.
enum PendingChange {
    Force(Box<dyn BehaviourState>),
    Reset,
}

#[derive(Component)]
pub struct BehaviourStateMachine {
    stack: Vec<Box<dyn BehaviourState>>,
    current: Box<dyn BehaviourState>,
    /// Whether `current` has had its enter hook run.
    entered: bool,
    default_state: StateFactory,
    /// Applied in request order.
    pending: Vec<PendingChange>,
}

impl BehaviourStateMachine {
    /// Creates a machine whose base state comes from `default_state`. The
    /// first state is entered lazily on the first tick.
    ///
    /// The default is per machine: an empty-stack pop or a reset returns to
    /// whatever this factory builds.
    pub fn new<F>(default_state: F) -> Self
    where
        F: Fn() -> Box<dyn BehaviourState> + Send + Sync + 'static,
    {
        Self {
            stack: Vec::new(),
            current: default_state(),
            entered: false,
            default_state: Box::new(default_state),
            pending: Vec::new(),
        }
    }

    pub fn current_name(&self) -> &'static str {
        self.current.name()
    }

    /// Number of suspended states.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Suspended state names, bottom first.
    pub fn stack_names(&self) -> Vec<&'static str> {
        self.stack.iter().map(|state| state.name()).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Runs the current state once and applies its directive.
    pub fn tick(&mut self, ctx: &mut StateContext) -> TransitionMode {
        self.apply_pending(ctx);
        self.ensure_entered(ctx);

        let response = self.current.update(ctx);
        let mode = response.mode;
        self.apply(response, ctx);
        mode
    }

    /// Applies a directive as if the current state had returned it.
    pub fn apply(&mut self, response: StateResponse, ctx: &mut StateContext) {
        match response.mode {
            TransitionMode::NoChange => {}
            TransitionMode::PopPrevious => {
                let resumed = self.stack.pop();
                let resumed_entered = resumed.is_some();
                let next = resumed.unwrap_or_else(|| (self.default_state)());
                let previous = self.replace_current(next, resumed_entered, ctx);
                debug!(
                    "Behaviour pop: {} -> {} (depth {})",
                    previous,
                    self.current.name(),
                    self.stack.len()
                );
            }
            TransitionMode::PushCurrent => {
                let Some(new_state) = response.new_state else {
                    // Pushing nothing would immediately pop the same state back.
                    debug!("Behaviour push without a state ignored");
                    return;
                };
                self.ensure_entered(ctx);
                let suspended = mem::replace(&mut self.current, new_state);
                debug!(
                    "Behaviour push: {} -> {} (depth {})",
                    suspended.name(),
                    self.current.name(),
                    self.stack.len() + 1
                );
                self.stack.push(suspended);
                self.entered = false;
                self.ensure_entered(ctx);
            }
            TransitionMode::AbandonCurrent => {
                if let Some(new_state) = response.new_state {
                    let previous = self.replace_current(new_state, false, ctx);
                    debug!("Behaviour abandon: {} -> {}", previous, self.current.name());
                }
            }
        }
    }

    /// Discards the whole stack and starts over from a fresh default state.
    pub fn reset_default(&mut self, ctx: &mut StateContext) {
        self.pending.clear();
        self.exit_current(ctx);
        while let Some(mut state) = self.stack.pop() {
            state.on_exit(ctx);
        }
        self.current = (self.default_state)();
        self.entered = false;
        self.ensure_entered(ctx);
        debug!("Behaviour reset to {}", self.current.name());
    }

    /// Abandons the current state in favour of an externally chosen one.
    pub fn force_transition(&mut self, state: Box<dyn BehaviourState>, ctx: &mut StateContext) {
        self.apply(StateResponse::abandon_boxed(state), ctx);
    }

    /// Like [`Self::force_transition`], applied at the start of the next tick.
    pub fn queue_transition(&mut self, state: Box<dyn BehaviourState>) {
        self.pending.push(PendingChange::Force(state));
    }

    /// Like [`Self::reset_default`], applied at the start of the next tick.
    pub fn queue_reset(&mut self) {
        self.pending.push(PendingChange::Reset);
    }

    fn apply_pending(&mut self, ctx: &mut StateContext) {
        for change in mem::take(&mut self.pending) {
            match change {
                PendingChange::Force(state) => self.force_transition(state, ctx),
                PendingChange::Reset => self.reset_default(ctx),
            }
        }
    }

    fn ensure_entered(&mut self, ctx: &mut StateContext) {
        if !self.entered {
            self.entered = true;
            self.current.on_enter(ctx);
        }
    }

    fn exit_current(&mut self, ctx: &mut StateContext) {
        if self.entered {
            self.entered = false;
            self.current.on_exit(ctx);
        }
    }

    /// Exits and drops the current state, installing `next`. Returns the
    /// name of the discarded state.
    fn replace_current(
        &mut self,
        next: Box<dyn BehaviourState>,
        already_entered: bool,
        ctx: &mut StateContext,
    ) -> &'static str {
        self.exit_current(ctx);
        let previous = mem::replace(&mut self.current, next);
        self.entered = already_entered;
        self.ensure_entered(ctx);
        previous.name()
    }
}

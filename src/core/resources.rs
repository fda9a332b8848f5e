//! Core domain: shared resources for run configuration, pause and camera shake.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn toggle(&mut self, source: impl Into<String>) {
        let source = source.into();
        if !self.sources.remove(&source) {
            self.sources.insert(source);
        }
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

/// Simulation time. Only advances while the gated sim sets run, so timers
/// measured against it freeze across a pause.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimClock {
    pub elapsed: f32,
    pub delta: f32,
}

impl SimClock {
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt.max(0.0);
        self.elapsed += self.delta;
    }
}

/// Seed every agent RNG is derived from.
#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

impl RunConfig {
    /// Stable per-agent seed so spawn order alone decides each agent's rolls.
    pub fn agent_seed(&self, index: u64) -> u64 {
        self.seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Accumulated camera trauma. Offset scales with trauma squared.
#[derive(Resource, Debug, Clone)]
pub struct CameraShake {
    pub trauma: f32,
    /// Trauma lost per second.
    pub decay: f32,
    pub max_offset: f32,
}

impl Default for CameraShake {
    fn default() -> Self {
        Self {
            trauma: 0.0,
            decay: 1.5,
            max_offset: 18.0,
        }
    }
}

impl CameraShake {
    pub fn add_trauma(&mut self, amount: f32) {
        self.trauma = (self.trauma + amount.max(0.0)).min(1.0);
    }

    pub fn decay(&mut self, dt: f32) {
        self.trauma = (self.trauma - self.decay * dt).max(0.0);
    }

    /// Current shake magnitude in world units.
    pub fn magnitude(&self) -> f32 {
        self.max_offset * self.trauma * self.trauma
    }
}

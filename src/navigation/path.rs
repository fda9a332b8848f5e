//! Navigation domain: path results and the per-agent follower.
//!
//! Every request carries a generation number. A completion is only
//! accepted while its generation is the one the follower is waiting on;
//! interrupting or re-requesting makes any older result stale.

use bevy::prelude::*;

/// Waypoints produced by the pathfinder, or an error when no route exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub waypoints: Vec<Vec2>,
    pub error: bool,
}

impl Path {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            error: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            waypoints: Vec::new(),
            error: true,
        }
    }
}

/// What happened to a delivered path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    Accepted,
    /// The pathfinder reported an error; the previous path is kept.
    Failed,
    /// The result belongs to a request that is no longer outstanding.
    Stale,
}

#[derive(Component, Debug, Clone)]
pub struct PathFollower {
    pub arrival_tolerance: f32,
    /// How far the goal must move before a new path is requested.
    pub repath_distance: f32,
    requested_goal: Option<Vec2>,
    generation: u64,
    waiting: bool,
    waypoints: Vec<Vec2>,
    index: usize,
}

impl PathFollower {
    pub fn new(arrival_tolerance: f32, repath_distance: f32) -> Self {
        Self {
            arrival_tolerance,
            repath_distance,
            requested_goal: None,
            generation: 0,
            waiting: false,
            waypoints: Vec::new(),
            index: 0,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn requested_goal(&self) -> Option<Vec2> {
        self.requested_goal
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.index).copied()
    }

    pub fn remaining_waypoints(&self) -> &[Vec2] {
        self.waypoints.get(self.index..).unwrap_or(&[])
    }

    /// A request is due when none is outstanding, the goal is not already
    /// reached and it has moved far enough from the last requested one.
    pub fn wants_path(&self, position: Vec2, goal: Vec2) -> bool {
        if self.waiting {
            return false;
        }
        if position.distance(goal) <= self.arrival_tolerance {
            return false;
        }
        self.requested_goal
            .is_none_or(|requested| requested.distance(goal) > self.repath_distance)
    }

    /// Marks a request for `goal` as outstanding and returns its generation.
    pub fn begin_request(&mut self, goal: Vec2) -> u64 {
        self.generation += 1;
        self.waiting = true;
        self.requested_goal = Some(goal);
        self.generation
    }

    pub fn complete(&mut self, generation: u64, path: Path) -> PathOutcome {
        if !self.waiting || generation != self.generation {
            return PathOutcome::Stale;
        }
        self.waiting = false;

        if path.error {
            return PathOutcome::Failed;
        }
        self.waypoints = path.waypoints;
        self.index = 0;
        PathOutcome::Accepted
    }

    /// Drops the current path and invalidates any request in flight.
    pub fn interrupt(&mut self) {
        self.generation += 1;
        self.waiting = false;
        self.requested_goal = None;
        self.waypoints.clear();
        self.index = 0;
    }

    /// Direction towards the current waypoint, advancing past waypoints
    /// already within tolerance. `None` once the path is used up.
    pub fn steer(&mut self, position: Vec2) -> Option<Vec2> {
        while let Some(waypoint) = self.current_waypoint() {
            if position.distance(waypoint) > self.arrival_tolerance {
                return (waypoint - position).try_normalize();
            }
            self.index += 1;
        }
        None
    }
}

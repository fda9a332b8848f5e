//! Navigation domain: grid pathfinding and path following for AI mechs.

mod events;
mod path;
mod pathfinder;
mod systems;


pub use events::{PathCompletedEvent, PathRequestEvent};
pub use path::{Path, PathFollower, PathOutcome};
pub use pathfinder::{GridPathfinder, NavGrid};

use bevy::prelude::*;

use crate::core::SimSet;
use crate::navigation::systems::{
    enqueue_path_requests, follow_paths, receive_paths, request_paths, solve_queued_paths,
};

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GridPathfinder>()
            .add_message::<PathRequestEvent>()
            .add_message::<PathCompletedEvent>()
            .add_systems(
                Update,
                (
                    solve_queued_paths,
                    receive_paths,
                    request_paths,
                    enqueue_path_requests,
                    follow_paths,
                )
                    .chain()
                    .in_set(SimSet::Pathing),
            );
    }
}

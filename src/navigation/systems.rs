//! Navigation domain: request, solve, receive and follow paths.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::behaviour::AiController;
use crate::movement::DesiredMove;
use crate::navigation::events::{PathCompletedEvent, PathRequestEvent};
use crate::navigation::path::{PathFollower, PathOutcome};
use crate::navigation::pathfinder::GridPathfinder;

/// Answers requests queued on earlier frames.
pub(crate) fn solve_queued_paths(
    mut pathfinder: ResMut<GridPathfinder>,
    mut completed: MessageWriter<PathCompletedEvent>,
) {
    for (request, path) in pathfinder.solve_batch() {
        completed.write(PathCompletedEvent {
            agent: request.agent,
            generation: request.generation,
            path,
        });
    }
}

pub(crate) fn receive_paths(
    mut completed: MessageReader<PathCompletedEvent>,
    mut followers: Query<&mut PathFollower>,
) {
    for event in completed.read() {
        let Ok(mut follower) = followers.get_mut(event.agent) else {
            continue;
        };
        match follower.complete(event.generation, event.path.clone()) {
            PathOutcome::Accepted => {
                debug!(
                    "{:?} got a path with {} waypoints",
                    event.agent,
                    event.path.waypoints.len()
                );
            }
            PathOutcome::Failed => {
                warn!(
                    "No path for {:?} towards {:?}",
                    event.agent,
                    follower.requested_goal()
                );
            }
            PathOutcome::Stale => {
                debug!(
                    "Discarded stale path for {:?} (generation {})",
                    event.agent, event.generation
                );
            }
        }
    }
}

pub(crate) fn request_paths(
    mut agents: Query<(Entity, &Transform, &AiController, &mut PathFollower)>,
    mut requests: MessageWriter<PathRequestEvent>,
) {
    for (entity, transform, controller, mut follower) in &mut agents {
        if !controller.pathing_enabled {
            continue;
        }
        let position = transform.translation.truncate();
        if !follower.wants_path(position, controller.move_goal) {
            continue;
        }
        let generation = follower.begin_request(controller.move_goal);
        requests.write(PathRequestEvent {
            agent: entity,
            from: position,
            to: controller.move_goal,
            generation,
        });
    }
}

pub(crate) fn enqueue_path_requests(
    mut requests: MessageReader<PathRequestEvent>,
    mut pathfinder: ResMut<GridPathfinder>,
) {
    for request in requests.read() {
        pathfinder.enqueue(*request);
    }
}

/// Converts the controller's movement intent into a desired velocity:
/// a direct move wins, otherwise the path is followed while pathing is on.
pub(crate) fn follow_paths(
    mut agents: Query<(&Transform, &AiController, &mut PathFollower, &mut DesiredMove)>,
) {
    for (transform, controller, mut follower, mut desired) in &mut agents {
        if let Some(velocity) = controller.direct_move {
            desired.0 = velocity;
            continue;
        }
        if !controller.pathing_enabled {
            desired.0 = Vec2::ZERO;
            continue;
        }

        let position = transform.translation.truncate();
        desired.0 = follower
            .steer(position)
            .map_or(Vec2::ZERO, |direction| direction * controller.move_speed);
    }
}

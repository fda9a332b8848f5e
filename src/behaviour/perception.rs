//! Behaviour domain: line-of-sight checks.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::movement::Raycaster;

const SIGHT_EPSILON: f32 = 1e-3;

/// Whether `to` is visible from `from`. Hits on `viewer` are skipped and a
/// hit on `target` itself counts as visible.
pub fn line_of_sight<R: Raycaster + ?Sized>(
    raycaster: &R,
    from: Vec2,
    to: Vec2,
    mask: LayerMask,
    viewer: Entity,
    target: Option<Entity>,
) -> bool {
    let offset = to - from;
    let distance = offset.length();
    if distance <= SIGHT_EPSILON {
        return true;
    }

    let blocker = raycaster
        .raycast_all(from, offset / distance, distance, mask)
        .into_iter()
        .find(|hit| hit.entity != viewer);

    match blocker {
        None => true,
        Some(hit) => Some(hit.entity) == target || hit.distance >= distance - SIGHT_EPSILON,
    }
}

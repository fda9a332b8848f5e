//! Combat domain: shot eligibility.

use bevy::prelude::*;

use crate::combat::components::WeaponMount;

/// Whether `mount` may fire at `target` right now: the weapon permits it,
/// the muzzle is clear, the target is in range and inside the firing arc.
pub fn shoot_eligibility(
    mount: &WeaponMount,
    position: Vec2,
    facing: Vec2,
    target: Vec2,
    muzzle_clear: bool,
) -> bool {
    if !mount.allows_fire || !muzzle_clear {
        return false;
    }

    let to_target = target - position;
    let distance = to_target.length();
    if distance > mount.stats.max_range {
        return false;
    }
    if distance <= f32::EPSILON {
        return true;
    }

    let Some(facing) = facing.try_normalize() else {
        return false;
    };
    facing.angle_to(to_target).abs() <= mount.stats.arc_tolerance
}

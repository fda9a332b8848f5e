//! Behaviour domain: small helpers shared by the states.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Rotates `current` towards `desired` by at most `max_radians`.
pub fn turn_towards(current: Vec2, desired: Vec2, max_radians: f32) -> Vec2 {
    let current = current.try_normalize().unwrap_or(Vec2::X);
    let Some(desired) = desired.try_normalize() else {
        return current;
    };

    let angle = current.angle_to(desired);
    let step = angle.clamp(-max_radians.max(0.0), max_radians.max(0.0));
    Vec2::from_angle(step).rotate(current)
}

/// Uniform roll in `[min, max]`; collapses to `min` for empty ranges.
pub fn roll_range(rng: &mut ChaCha8Rng, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Random unit vector.
pub fn random_direction(rng: &mut ChaCha8Rng) -> Vec2 {
    Vec2::from_angle(rng.random_range(-std::f32::consts::PI..std::f32::consts::PI))
}

/// Direction from `from` to `to`, or `fallback` when they coincide.
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(fallback)
}

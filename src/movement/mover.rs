//! Movement domain: kinematic collision resolver.
//!
//! Moves an axis-aligned body by a requested delta without letting it enter
//! blocking geometry. Every probe starts from an origin inset by the skin
//! width so rays never begin in contact with the surface they should detect.
//! Resolution runs in three passes: a coarse probe along the whole delta,
//! then the horizontal axis, then the vertical axis using the already
//! clamped horizontal offset.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::movement::raycast::{RaycastHit, Raycaster};

pub const DEFAULT_SKIN_WIDTH: f32 = 0.02;
pub const DEFAULT_RAY_COUNT: usize = 3;

/// Sides blocked during the most recent move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionState {
    pub left: bool,
    pub right: bool,
    pub above: bool,
    pub below: bool,
}

impl CollisionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_collision(&self) -> bool {
        self.left || self.right || self.above || self.below
    }

    pub fn is_grounded(&self) -> bool {
        self.below
    }

    /// Marks the side facing a surface with the given normal.
    fn mark_from_normal(&mut self, normal: Vec2) {
        if normal.x < -0.5 {
            self.right = true;
        } else if normal.x > 0.5 {
            self.left = true;
        }
        if normal.y > 0.5 {
            self.below = true;
        } else if normal.y < -0.5 {
            self.above = true;
        }
    }
}

/// Outcome of a single [`KinematicMover::move_by`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub displacement: Vec2,
    pub collisions: CollisionState,
}

#[derive(Debug, Clone)]
pub struct KinematicMover {
    pub skin_width: f32,
    pub half_extents: Vec2,
    pub horizontal_rays: usize,
    pub vertical_rays: usize,
    pub collision_mask: LayerMask,
    /// Collider owned by the mover itself, skipped by every probe.
    pub ignore: Option<Entity>,
    collisions: CollisionState,
    was_grounded: bool,
    velocity: Vec2,
    hits: Vec<RaycastHit>,
}

impl KinematicMover {
    pub fn new(half_extents: Vec2, skin_width: f32, collision_mask: LayerMask) -> Self {
        Self {
            skin_width,
            half_extents,
            horizontal_rays: DEFAULT_RAY_COUNT,
            vertical_rays: DEFAULT_RAY_COUNT,
            collision_mask,
            ignore: None,
            collisions: CollisionState::default(),
            was_grounded: false,
            velocity: Vec2::ZERO,
            hits: Vec::new(),
        }
    }

    pub fn with_rays(mut self, horizontal: usize, vertical: usize) -> Self {
        self.horizontal_rays = horizontal.max(1);
        self.vertical_rays = vertical.max(1);
        self
    }

    pub fn with_ignore(mut self, entity: Entity) -> Self {
        self.ignore = Some(entity);
        self
    }

    pub fn collisions(&self) -> CollisionState {
        self.collisions
    }

    /// Whether the previous move ended with contact below.
    pub fn was_grounded(&self) -> bool {
        self.was_grounded
    }

    /// Displacement of the last move divided by its frame time.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Every hit recorded during the last move.
    pub fn hits(&self) -> &[RaycastHit] {
        &self.hits
    }

    /// Moves `position` by `delta` (already scaled by speed and frame time),
    /// clipping against anything in `collision_mask`.
    pub fn move_by<R: Raycaster + ?Sized>(
        &mut self,
        position: &mut Vec2,
        delta: Vec2,
        dt: f32,
        raycaster: &R,
    ) -> MoveResult {
        self.was_grounded = self.collisions.below;
        self.collisions.reset();
        self.hits.clear();

        if delta == Vec2::ZERO {
            self.velocity = Vec2::ZERO;
            return MoveResult {
                displacement: Vec2::ZERO,
                collisions: self.collisions,
            };
        }

        let mut displacement = self.probe_direction(*position, delta, raycaster);
        displacement.x = self.resolve_horizontal(*position, displacement.x, raycaster);
        displacement.y = self.resolve_vertical(*position, displacement, raycaster);

        *position += displacement;
        self.velocity = if dt > 0.0 {
            displacement / dt
        } else {
            Vec2::ZERO
        };

        MoveResult {
            displacement,
            collisions: self.collisions,
        }
    }

    fn inset_extents(&self) -> Vec2 {
        (self.half_extents - Vec2::splat(self.skin_width)).max(Vec2::ZERO)
    }

    /// Casts along the full delta from the leading corner to catch fast
    /// diagonal movement slipping between the per-axis rays.
    fn probe_direction<R: Raycaster + ?Sized>(
        &mut self,
        position: Vec2,
        delta: Vec2,
        raycaster: &R,
    ) -> Vec2 {
        let distance = delta.length();
        let direction = delta / distance;
        let inset = self.inset_extents();
        let origin =
            position + Vec2::new(axis_sign(delta.x) * inset.x, axis_sign(delta.y) * inset.y);

        let Some(hit) = self.nearest_hit(origin, direction, distance + self.skin_width, raycaster)
        else {
            return delta;
        };

        self.collisions.mark_from_normal(hit.normal);
        self.hits.push(hit);
        direction * (hit.distance - self.skin_width).max(0.0)
    }

    fn resolve_horizontal<R: Raycaster + ?Sized>(
        &mut self,
        position: Vec2,
        dx: f32,
        raycaster: &R,
    ) -> f32 {
        if dx == 0.0 {
            return 0.0;
        }

        let sign = axis_sign(dx);
        let inset = self.inset_extents();
        let direction = Vec2::new(sign, 0.0);
        let mut length = dx.abs() + self.skin_width;
        let mut blocked = false;

        for i in 0..self.horizontal_rays {
            let origin = position + Vec2::new(sign * inset.x, spread(i, self.horizontal_rays, inset.y));
            if let Some(hit) = self.nearest_hit(origin, direction, length, raycaster) {
                length = hit.distance;
                blocked = true;
                self.hits.push(hit);
            }
        }

        if !blocked {
            return dx;
        }

        if sign > 0.0 {
            self.collisions.right = true;
        } else {
            self.collisions.left = true;
        }
        sign * (length - self.skin_width).max(0.0)
    }

    fn resolve_vertical<R: Raycaster + ?Sized>(
        &mut self,
        position: Vec2,
        displacement: Vec2,
        raycaster: &R,
    ) -> f32 {
        let dy = displacement.y;
        if dy == 0.0 {
            return 0.0;
        }

        let sign = axis_sign(dy);
        let inset = self.inset_extents();
        let direction = Vec2::new(0.0, sign);
        let mut length = dy.abs() + self.skin_width;
        let mut blocked = false;

        for i in 0..self.vertical_rays {
            let x = spread(i, self.vertical_rays, inset.x) + displacement.x;
            let origin = position + Vec2::new(x, sign * inset.y);
            if let Some(hit) = self.nearest_hit(origin, direction, length, raycaster) {
                length = hit.distance;
                blocked = true;
                self.hits.push(hit);
            }
        }

        if !blocked {
            return dy;
        }

        if sign > 0.0 {
            self.collisions.above = true;
        } else {
            self.collisions.below = true;
        }
        sign * (length - self.skin_width).max(0.0)
    }

    /// First hit within `length`, skipping the mover's own collider and any
    /// collider the ray origin already sits inside.
    fn nearest_hit<R: Raycaster + ?Sized>(
        &self,
        origin: Vec2,
        direction: Vec2,
        length: f32,
        raycaster: &R,
    ) -> Option<RaycastHit> {
        raycaster
            .raycast_all(origin, direction, length, self.collision_mask)
            .into_iter()
            .find(|hit| {
                Some(hit.entity) != self.ignore && hit.distance <= length && !starts_inside(hit)
            })
    }
}

/// Solid casts report an origin inside a collider as a zero-distance hit
/// with no normal.
fn starts_inside(hit: &RaycastHit) -> bool {
    hit.distance <= 0.0 && hit.normal == Vec2::ZERO
}

/// Like `signum`, but zero stays zero.
fn axis_sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Offset of ray `index` out of `count`, evenly spread over `[-half, half]`.
fn spread(index: usize, count: usize, half: f32) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    -half + 2.0 * half * index as f32 / (count - 1) as f32
}

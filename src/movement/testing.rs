//! Movement domain: an in-memory box world for exercising ray queries in tests.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::movement::raycast::{RaycastHit, Raycaster};

/// Axis-aligned boxes answering ray casts with a slab test. Masks are ignored.
#[derive(Debug, Default)]
pub(crate) struct BoxWorld {
    boxes: Vec<(Entity, Vec2, Vec2)>,
}

impl BoxWorld {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a box spanning `min..max` owned by `entity`.
    pub(crate) fn with_box(mut self, entity: Entity, min: Vec2, max: Vec2) -> Self {
        self.boxes.push((entity, min, max));
        self
    }
}

impl Raycaster for BoxWorld {
    fn raycast_all(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        _mask: LayerMask,
    ) -> Vec<RaycastHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            return Vec::new();
        }

        let mut hits: Vec<RaycastHit> = self
            .boxes
            .iter()
            .filter_map(|&(entity, min, max)| {
                slab_intersection(origin, direction, max_distance, min, max).map(
                    |(distance, normal)| RaycastHit {
                        entity,
                        point: origin + direction * distance,
                        normal,
                        distance,
                    },
                )
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

fn slab_intersection(
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
    min: Vec2,
    max: Vec2,
) -> Option<(f32, Vec2)> {
    let mut t_enter = 0.0_f32;
    let mut t_exit = max_distance;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        let (o, d, lo, hi, axis_normal) = if axis == 0 {
            (origin.x, direction.x, min.x, max.x, Vec2::NEG_X)
        } else {
            (origin.y, direction.y, min.y, max.y, Vec2::NEG_Y)
        };

        if d.abs() < 1e-8 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let mut t1 = (lo - o) / d;
        let mut t2 = (hi - o) / d;
        let mut face = axis_normal;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
            face = -face;
        }
        if t1 > t_enter {
            t_enter = t1;
            normal = face;
        }
        t_exit = t_exit.min(t2);
        if t_enter > t_exit {
            return None;
        }
    }

    Some((t_enter, normal))
}

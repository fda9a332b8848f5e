//! Movement domain: ray cast queries used by the kinematic mover and sight checks.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Upper bound on hits gathered by a single spatial ray query.
const MAX_RAY_HITS: u32 = 16;

/// A single ray intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub entity: Entity,
    pub point: Vec2,
    pub normal: Vec2,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

/// World ray queries. Hits are returned nearest first.
pub trait Raycaster {
    fn raycast_all(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<RaycastHit>;

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        self.raycast_all(origin, direction, max_distance, mask)
            .into_iter()
            .next()
    }
}

/// [`Raycaster`] backed by the avian spatial query pipeline.
pub struct SpatialRaycaster<'a, 'w, 's> {
    query: &'a SpatialQuery<'w, 's>,
}

impl<'a, 'w, 's> SpatialRaycaster<'a, 'w, 's> {
    pub fn new(query: &'a SpatialQuery<'w, 's>) -> Self {
        Self { query }
    }
}

impl Raycaster for SpatialRaycaster<'_, '_, '_> {
    fn raycast_all(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<RaycastHit> {
        let Ok(dir) = Dir2::new(direction) else {
            return Vec::new();
        };
        let filter = SpatialQueryFilter::from_mask(mask);

        let mut hits: Vec<RaycastHit> = self
            .query
            .ray_hits(origin, dir, max_distance, MAX_RAY_HITS, true, &filter)
            .into_iter()
            .map(|hit| RaycastHit {
                entity: hit.entity,
                point: origin + *dir * hit.distance,
                normal: hit.normal,
                distance: hit.distance,
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

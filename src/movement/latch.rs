//! Movement domain: whip latch anchoring and boost.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::movement::impulse::ImpulseBody;
use crate::movement::raycast::Raycaster;

/// Grapple state for a whip-type weapon.
#[derive(Component, Debug, Clone)]
pub struct LatchHook {
    pub range: f32,
    pub boost_force: f32,
    anchor: Option<Vec2>,
}

/// What a latch cast connected with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatchOutcome {
    /// Hooked into level geometry at the given point.
    Anchored(Vec2),
    /// Wrapped around another mech.
    Grabbed(Entity),
    Missed,
}

impl LatchHook {
    pub fn new(range: f32, boost_force: f32) -> Self {
        Self {
            range,
            boost_force,
            anchor: None,
        }
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Casts the whip along `aim`. Walls become the new anchor; mechs are
    /// reported back without anchoring.
    pub fn cast<R: Raycaster + ?Sized>(
        &mut self,
        origin: Vec2,
        aim: Vec2,
        owner: Entity,
        mask: LayerMask,
        raycaster: &R,
        is_mech: impl Fn(Entity) -> bool,
    ) -> LatchOutcome {
        let aim = aim.normalize_or_zero();
        if aim == Vec2::ZERO {
            return LatchOutcome::Missed;
        }

        let Some(hit) = raycaster
            .raycast_all(origin, aim, self.range, mask)
            .into_iter()
            .find(|hit| hit.entity != owner)
        else {
            return LatchOutcome::Missed;
        };

        if is_mech(hit.entity) {
            return LatchOutcome::Grabbed(hit.entity);
        }

        self.anchor = Some(hit.point);
        LatchOutcome::Anchored(hit.point)
    }

    /// Propels the owner toward the anchor and releases it.
    pub fn boost(&mut self, origin: Vec2, body: &mut ImpulseBody) -> bool {
        let Some(anchor) = self.anchor.take() else {
            return false;
        };
        let direction = (anchor - origin).normalize_or_zero();
        if direction == Vec2::ZERO {
            return false;
        }
        body.apply_force(direction * self.boost_force);
        true
    }

    /// Drops the anchor once the owner drifts out of whip range.
    pub fn update(&mut self, origin: Vec2) {
        let out_of_range = self
            .anchor
            .is_some_and(|anchor| anchor.distance(origin) > self.range);
        if out_of_range {
            self.anchor = None;
        }
    }
}

//! Movement domain: collision-resolved movement for kinematic bodies.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::components::{DesiredMove, KinematicBody};
use crate::movement::events::CollisionImpactEvent;
use crate::movement::impulse::ImpulseBody;
use crate::movement::raycast::SpatialRaycaster;

/// Moves every kinematic body once per frame by its desired velocity plus
/// any pending impulse, then reports what it touched.
pub(crate) fn move_kinematic_bodies(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut bodies: Query<(
        Entity,
        &mut Transform,
        &mut KinematicBody,
        &DesiredMove,
        Option<&mut ImpulseBody>,
    )>,
    mut impacts: MessageWriter<CollisionImpactEvent>,
) {
    let dt = time.delta_secs();
    let raycaster = SpatialRaycaster::new(&spatial_query);

    for (entity, mut transform, mut body, desired, impulse) in &mut bodies {
        if body.mover.ignore.is_none() {
            body.mover.ignore = Some(entity);
        }

        let mut delta = desired.0 * dt;
        if let Some(mut impulse) = impulse {
            delta += impulse.take_step(dt);
        }

        let mut position = transform.translation.truncate();
        let result = body.mover.move_by(&mut position, delta, dt, &raycaster);
        transform.translation.x = position.x;
        transform.translation.y = position.y;

        if result.collisions.has_collision() {
            trace!("Mover {:?} blocked: {:?}", entity, result.collisions);
        }

        let mut notified: Vec<Entity> = Vec::new();
        for hit in body.mover.hits() {
            if notified.contains(&hit.entity) {
                continue;
            }
            notified.push(hit.entity);
            impacts.write(CollisionImpactEvent {
                mover: entity,
                other: hit.entity,
                point: hit.point,
                normal: hit.normal,
            });
        }
    }
}

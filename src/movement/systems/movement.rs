//! Movement domain: player locomotion, latch boost and turret facing.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::WeaponStolenEvent;
use crate::movement::components::{
    DesiredMove, GameLayer, Heading, KinematicBody, Player, Turret,
};
use crate::movement::impulse::ImpulseBody;
use crate::movement::latch::{LatchHook, LatchOutcome};
use crate::movement::raycast::SpatialRaycaster;
use crate::movement::{MovementInput, MovementTuning};

pub(crate) fn apply_player_input(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut DesiredMove, &mut Heading), With<Player>>,
) {
    for (mut desired, mut heading) in &mut query {
        let axis = input.axis.normalize_or_zero();
        desired.0 = axis * tuning.player_speed;

        // Keep the last aim when the stick is released
        if axis != Vec2::ZERO {
            heading.0 = axis;
        }
    }
}

pub(crate) fn handle_latch(
    spatial_query: SpatialQuery,
    input: Res<MovementInput>,
    mut players: Query<
        (Entity, &Transform, &Heading, &mut LatchHook, &mut ImpulseBody),
        With<Player>,
    >,
    mechs: Query<(), With<KinematicBody>>,
    mut stolen_events: MessageWriter<WeaponStolenEvent>,
) {
    let raycaster = SpatialRaycaster::new(&spatial_query);

    for (entity, transform, heading, mut latch, mut impulse) in &mut players {
        let origin = transform.translation.truncate();
        latch.update(origin);

        if input.latch_just_pressed {
            let outcome = latch.cast(
                origin,
                heading.0,
                entity,
                GameLayer::movement_mask(),
                &raycaster,
                |hit| mechs.contains(hit),
            );
            match outcome {
                LatchOutcome::Anchored(point) => {
                    debug!("Latch anchored at {:?}", point);
                }
                LatchOutcome::Grabbed(victim) => {
                    debug!("Latch grabbed {:?}", victim);
                    stolen_events.write(WeaponStolenEvent {
                        thief: entity,
                        victim,
                    });
                }
                LatchOutcome::Missed => {}
            }
        }

        if input.boost_just_pressed && latch.boost(origin, &mut impulse) {
            debug!("Latch boost: impulse now {:?}", impulse.velocity);
        }
    }
}

pub(crate) fn sync_turrets(
    headings: Query<&Heading>,
    mut turrets: Query<(&ChildOf, &mut Transform), With<Turret>>,
) {
    for (child_of, mut transform) in &mut turrets {
        let Ok(heading) = headings.get(child_of.parent()) else {
            continue;
        };
        transform.rotation = Quat::from_rotation_z(heading.0.y.atan2(heading.0.x));
    }
}

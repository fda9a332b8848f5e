//! Arena domain: developer hotkeys and diagnostics.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::behaviour::{BehaviourStateMachine, RecycleAgentEvent};
use crate::combat::{Enemy, PoolHome, WeaponStolenEvent};
use crate::movement::{CollisionImpactEvent, Player};

/// F5 sends every pooled enemy home, F6 tears the weapon off the nearest one.
pub(crate) fn dev_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    players: Query<(Entity, &Transform), With<Player>>,
    enemies: Query<(Entity, &Transform), (With<Enemy>, With<PoolHome>)>,
    mut recycle: MessageWriter<RecycleAgentEvent>,
    mut stolen: MessageWriter<WeaponStolenEvent>,
) {
    if keyboard.just_pressed(KeyCode::F5) {
        let mut count = 0;
        for (agent, _) in &enemies {
            recycle.write(RecycleAgentEvent { agent });
            count += 1;
        }
        info!("[dev] Recycling {} enemies", count);
    }

    if keyboard.just_pressed(KeyCode::F6) {
        let Ok((thief, player_transform)) = players.single() else {
            return;
        };
        let origin = player_transform.translation.truncate();
        let nearest = enemies.iter().min_by(|(_, a), (_, b)| {
            let a = a.translation.truncate().distance_squared(origin);
            let b = b.translation.truncate().distance_squared(origin);
            a.total_cmp(&b)
        });
        if let Some((victim, _)) = nearest {
            info!("[dev] Stealing weapon from {:?}", victim);
            stolen.write(WeaponStolenEvent { thief, victim });
        }
    }
}

pub(crate) fn log_collision_impacts(mut impacts: MessageReader<CollisionImpactEvent>) {
    for impact in impacts.read() {
        trace!(
            "Impact: {:?} hit {:?} at {:?} (normal {:?})",
            impact.mover, impact.other, impact.point, impact.normal
        );
    }
}

/// F3 dumps every machine's stack.
pub(crate) fn dump_machines(
    keyboard: Res<ButtonInput<KeyCode>>,
    machines: Query<(Entity, &BehaviourStateMachine)>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }
    for (entity, machine) in &machines {
        info!(
            "[dev] {:?}: {} over {:?}",
            entity,
            machine.current_name(),
            machine.stack_names()
        );
    }
}

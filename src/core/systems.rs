//! Core domain: camera setup, pause toggle and camera shake.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use crate::core::events::CameraShakeEvent;
use crate::core::resources::{CameraShake, GameplayPaused, SimClock};
use crate::movement::Player;

const PAUSE_SOURCE: &str = "pause_menu";

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn toggle_pause(keys: Res<ButtonInput<KeyCode>>, mut paused: ResMut<GameplayPaused>) {
    if keys.just_pressed(KeyCode::Escape) {
        paused.toggle(PAUSE_SOURCE);
        info!("Gameplay paused: {}", paused.is_paused());
    }
}

pub(crate) fn advance_sim_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.advance(time.delta_secs());
}

pub(crate) fn apply_camera_shake_events(
    mut events: MessageReader<CameraShakeEvent>,
    mut shake: ResMut<CameraShake>,
) {
    for event in events.read() {
        shake.add_trauma(event.trauma);
    }
}

/// Centres the camera on the player and layers the shake offset on top.
pub(crate) fn follow_player(
    time: Res<Time>,
    paused: Res<GameplayPaused>,
    mut shake: ResMut<CameraShake>,
    players: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };

    let mut offset = Vec2::ZERO;
    if !paused.is_paused() {
        let magnitude = shake.magnitude();
        if magnitude > 0.0 {
            let mut rng = rand::rng();
            offset = Vec2::new(
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            ) * magnitude;
        }
        shake.decay(time.delta_secs());
    }

    camera.translation.x = player.translation.x + offset.x;
    camera.translation.y = player.translation.y + offset.y;
}

//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::move_kinematic_bodies;
pub(crate) use input::read_input;
pub(crate) use movement::{apply_player_input, handle_latch, sync_turrets};

//! Arena domain: markers for spawned level pieces.

use bevy::prelude::*;

/// Static level geometry spawned from a wall definition.
#[derive(Component, Debug)]
pub struct Wall;

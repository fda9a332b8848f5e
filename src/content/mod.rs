//! Content domain: RON tuning and arena files, loaded before startup.

mod data;
mod loader;
mod validation;


pub use data::{to_vec2, ArenaDef, BossDef, EnemyDef, PlayerDef, Point, WallDef};
pub use loader::{
    load_all_content, load_single_file, parse_str, ContentLoadError, GameContent, ARENA_FILE,
    BEHAVIOUR_FILE, DATA_DIR, MOVEMENT_FILE,
};
pub use validation::{validate_arena, validate_behaviour, validate_movement, ValidationError};

use bevy::prelude::*;
use std::path::Path;

use crate::core::RunConfig;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaDef>()
            .add_systems(PreStartup, load_content);
    }
}

/// Keeps `value` when it validated cleanly, otherwise logs every problem
/// and falls back to the defaults.
pub fn accept_or_default<T: Default>(file: &str, value: T, errors: Vec<ValidationError>) -> T {
    if errors.is_empty() {
        return value;
    }
    for error in &errors {
        error!("{}: {}", file, error);
    }
    warn!("{} rejected, using built-in defaults", file);
    T::default()
}

fn load_content(mut commands: Commands) {
    let (content, load_errors) = load_all_content(Path::new(DATA_DIR));
    for error in &load_errors {
        error!("{}; using built-in defaults", error);
    }

    let movement_errors = validate_movement(&content.movement);
    let movement = accept_or_default(MOVEMENT_FILE, content.movement, movement_errors);
    let behaviour_errors = validate_behaviour(&content.behaviour);
    let behaviour = accept_or_default(BEHAVIOUR_FILE, content.behaviour, behaviour_errors);
    let arena_errors = validate_arena(&content.arena);
    let arena = accept_or_default(ARENA_FILE, content.arena, arena_errors);

    if let Some(seed) = arena.seed {
        commands.insert_resource(RunConfig { seed });
    }
    info!(
        "Content loaded: {} walls, {} enemies, boss: {}",
        arena.walls.len(),
        arena.enemies.len(),
        arena.boss.is_some()
    );

    commands.insert_resource(movement);
    commands.insert_resource(behaviour);
    commands.insert_resource(arena);
}

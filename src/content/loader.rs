//! Loader for RON content files at startup.

use bevy::prelude::*;
use ron::Options;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::data::ArenaDef;
use crate::behaviour::BehaviourTuning;
use crate::movement::MovementTuning;

pub const DATA_DIR: &str = "assets/data";
pub const MOVEMENT_FILE: &str = "movement.ron";
pub const BEHAVIOUR_FILE: &str = "behaviour.ron";
pub const ARENA_FILE: &str = "arena.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse RON text. `file` only labels errors.
pub fn parse_str<T: DeserializeOwned>(file: &str, contents: &str) -> Result<T, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single RON struct.
pub fn load_single_file<T: DeserializeOwned>(path: &Path) -> Result<T, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_str(&file_name, &contents)
}

/// Tuning and arena layout for a run.
#[derive(Debug, Clone, Default)]
pub struct GameContent {
    pub movement: MovementTuning,
    pub behaviour: BehaviourTuning,
    pub arena: ArenaDef,
}

/// Load every data file under `base_path`. A file that fails to load is
/// replaced by its defaults and its error returned alongside.
pub fn load_all_content(base_path: &Path) -> (GameContent, Vec<ContentLoadError>) {
    let mut errors = Vec::new();

    // Helper macro to reduce boilerplate
    macro_rules! load_or_default {
        ($file:expr, $type:ty) => {
            match load_single_file::<$type>(&base_path.join($file)) {
                Ok(value) => value,
                Err(e) => {
                    errors.push(e);
                    <$type>::default()
                }
            }
        };
    }

    let content = GameContent {
        movement: load_or_default!(MOVEMENT_FILE, MovementTuning),
        behaviour: load_or_default!(BEHAVIOUR_FILE, BehaviourTuning),
        arena: load_or_default!(ARENA_FILE, ArenaDef),
    };

    (content, errors)
}

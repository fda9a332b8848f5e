//! Data definitions for the RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron. Every one has a
//! `Default`, used when its file is missing or fails validation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{WeaponKind, WeaponStats};

/// `(x, y)` in world units.
pub type Point = (f32, f32);

pub fn to_vec2(point: Point) -> Vec2 {
    Vec2::new(point.0, point.1)
}

// ============================================================================
// Arena (arena.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArenaDef {
    /// Fixed run seed; a random one is rolled when absent.
    pub seed: Option<u64>,
    pub bounds_min: Point,
    pub bounds_max: Point,
    pub nav_cell_size: f32,
    pub walls: Vec<WallDef>,
    pub player: PlayerDef,
    pub enemies: Vec<EnemyDef>,
    pub boss: Option<BossDef>,
}

impl Default for ArenaDef {
    fn default() -> Self {
        Self {
            seed: None,
            bounds_min: (-640.0, -384.0),
            bounds_max: (640.0, 384.0),
            nav_cell_size: 32.0,
            walls: vec![
                WallDef::new((-640.0, 368.0), (640.0, 384.0)),
                WallDef::new((-640.0, -384.0), (640.0, -368.0)),
                WallDef::new((-640.0, -368.0), (-624.0, 368.0)),
                WallDef::new((624.0, -368.0), (640.0, 368.0)),
                WallDef::new((-96.0, -32.0), (96.0, 32.0)),
            ],
            player: PlayerDef::default(),
            enemies: vec![
                EnemyDef {
                    spawn: (300.0, 200.0),
                    patrol: vec![(300.0, 200.0), (480.0, 200.0), (480.0, 280.0)],
                    ..Default::default()
                },
                EnemyDef {
                    spawn: (-300.0, 220.0),
                    ..Default::default()
                },
            ],
            boss: Some(BossDef::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WallDef {
    pub min: Point,
    pub max: Point,
}

impl WallDef {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerDef {
    pub spawn: Point,
    pub half_extents: Point,
    pub health: f32,
    pub weapon: WeaponStats,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            spawn: (-400.0, -200.0),
            half_extents: (14.0, 14.0),
            health: 100.0,
            weapon: WeaponStats {
                kind: WeaponKind::Whip,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyDef {
    pub spawn: Point,
    pub half_extents: Point,
    pub health: f32,
    pub move_speed: f32,
    pub sight_range: f32,
    pub mass_scale: f32,
    /// Waypoints walked while idle, in order, wrapping around.
    pub patrol: Vec<Point>,
    pub weapon: WeaponStats,
}

impl Default for EnemyDef {
    fn default() -> Self {
        Self {
            spawn: (0.0, 0.0),
            half_extents: (14.0, 14.0),
            health: 40.0,
            move_speed: 140.0,
            sight_range: 520.0,
            mass_scale: 1.0,
            patrol: Vec::new(),
            weapon: WeaponStats::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BossDef {
    pub spawn: Point,
    pub half_extents: Point,
    pub health: f32,
    pub move_speed: f32,
    pub mass_scale: f32,
    /// Projectile stats for the spin attack.
    pub weapon: WeaponStats,
}

impl Default for BossDef {
    fn default() -> Self {
        Self {
            spawn: (0.0, 220.0),
            half_extents: (40.0, 40.0),
            health: 300.0,
            move_speed: 120.0,
            mass_scale: 6.0,
            weapon: WeaponStats {
                projectile_speed: 420.0,
                damage: 8.0,
                ..Default::default()
            },
        }
    }
}

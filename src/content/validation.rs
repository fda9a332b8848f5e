//! Range checks for loaded tuning and arena data.

use super::data::{to_vec2, ArenaDef, Point};
use crate::behaviour::BehaviourTuning;
use crate::combat::WeaponStats;
use crate::movement::MovementTuning;

/// A validation error naming the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

/// Pushes an error when the condition does not hold.
macro_rules! check {
    ($errors:expr, $section:expr, $field:expr, $ok:expr, $message:expr) => {
        if !$ok {
            $errors.push(ValidationError {
                section: $section,
                field: $field.to_string(),
                message: $message.to_string(),
            });
        }
    };
}

/// Checks a `[min, max]` pair is ordered and not negative.
macro_rules! check_range {
    ($errors:expr, $section:expr, $field:expr, $min:expr, $max:expr) => {
        check!(
            $errors,
            $section,
            $field,
            $min >= 0.0 && $min <= $max,
            format!("range [{}, {}] is inverted or negative", $min, $max)
        );
    };
}

pub fn validate_movement(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let section = "movement";

    check!(errors, section, "skin_width", tuning.skin_width > 0.0, "must be positive");
    check!(errors, section, "horizontal_rays", tuning.horizontal_rays >= 1, "needs at least one ray");
    check!(errors, section, "vertical_rays", tuning.vertical_rays >= 1, "needs at least one ray");
    check!(errors, section, "player_speed", tuning.player_speed >= 0.0, "must not be negative");
    check!(errors, section, "mech_mass", tuning.mech_mass > 0.0, "must be positive");
    check!(
        errors,
        section,
        "impulse_friction",
        (0.0..1.0).contains(&tuning.impulse_friction),
        "must be in [0, 1)"
    );
    check!(errors, section, "latch_range", tuning.latch_range > 0.0, "must be positive");
    check!(
        errors,
        section,
        "latch_boost_force",
        tuning.latch_boost_force >= 0.0,
        "must not be negative"
    );

    errors
}

pub fn validate_behaviour(tuning: &BehaviourTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let idle = &tuning.idle;
    check_range!(errors, "idle", "look_interval", idle.look_interval_min, idle.look_interval_max);
    check!(errors, "idle", "turn_speed", idle.turn_speed >= 0.0, "must not be negative");
    check!(errors, "idle", "patrol_tolerance", idle.patrol_tolerance > 0.0, "must be positive");

    let attack = &tuning.attack;
    check!(errors, "attack", "turn_speed", attack.turn_speed >= 0.0, "must not be negative");
    check!(
        errors,
        "attack",
        "engagement_range",
        attack.engagement_range >= 0.0,
        "must not be negative"
    );
    check_range!(errors, "attack", "reposition", attack.reposition_min, attack.reposition_max);
    check_range!(
        errors,
        "attack",
        "burst_length",
        attack.burst_length_min,
        attack.burst_length_max
    );
    check_range!(
        errors,
        "attack",
        "burst_delay",
        attack.burst_delay_min,
        attack.burst_delay_max
    );
    check!(
        errors,
        "attack",
        "attention_span",
        attack.attention_span >= 0.0,
        "must not be negative"
    );

    let berserk = &tuning.berserk;
    check!(
        errors,
        "berserk",
        "suicide_radius",
        berserk.suicide_radius > 0.0,
        "must be positive"
    );
    check!(
        errors,
        "berserk",
        "explosion_radius",
        berserk.explosion_radius > 0.0,
        "must be positive"
    );

    let boss = &tuning.boss;
    for (field, value) in [
        ("telegraph_duration", boss.telegraph_duration),
        ("stun_duration", boss.stun_duration),
        ("spin_duration", boss.spin_duration),
        ("spin_fire_delay", boss.spin_fire_delay),
        ("charge_falloff_distance", boss.charge_falloff_distance),
    ] {
        check!(errors, "boss", field, value > 0.0, "must be positive");
    }
    for (field, value) in [("heavy_shake", boss.heavy_shake), ("light_shake", boss.light_shake)] {
        check!(errors, "boss", field, (0.0..=1.0).contains(&value), "must be in [0, 1]");
    }

    errors
}

pub fn validate_arena(arena: &ArenaDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let section = "arena";
    let min = to_vec2(arena.bounds_min);
    let max = to_vec2(arena.bounds_max);
    let inside = |point: Point| {
        let point = to_vec2(point);
        point.cmpge(min).all() && point.cmple(max).all()
    };

    check!(errors, section, "bounds", min.cmplt(max).all(), "min must be below max");
    check!(errors, section, "nav_cell_size", arena.nav_cell_size > 0.0, "must be positive");

    for (index, wall) in arena.walls.iter().enumerate() {
        check!(
            errors,
            section,
            format!("walls[{index}]"),
            to_vec2(wall.min).cmplt(to_vec2(wall.max)).all(),
            "min must be below max"
        );
    }

    check!(errors, section, "player.spawn", inside(arena.player.spawn), "outside bounds");
    check!(errors, section, "player.health", arena.player.health > 0.0, "must be positive");
    validate_weapon(&mut errors, "player.weapon", &arena.player.weapon);

    for (index, enemy) in arena.enemies.iter().enumerate() {
        let field = |name: &str| format!("enemies[{index}].{name}");
        check!(errors, section, field("spawn"), inside(enemy.spawn), "outside bounds");
        check!(errors, section, field("health"), enemy.health > 0.0, "must be positive");
        check!(errors, section, field("move_speed"), enemy.move_speed >= 0.0, "must not be negative");
        check!(errors, section, field("mass_scale"), enemy.mass_scale > 0.0, "must be positive");
        check!(
            errors,
            section,
            field("patrol"),
            enemy.patrol.iter().all(|&point| inside(point)),
            "waypoint outside bounds"
        );
        validate_weapon(&mut errors, "enemy.weapon", &enemy.weapon);
    }

    if let Some(boss) = &arena.boss {
        check!(errors, section, "boss.spawn", inside(boss.spawn), "outside bounds");
        check!(errors, section, "boss.health", boss.health > 0.0, "must be positive");
        check!(errors, section, "boss.mass_scale", boss.mass_scale > 0.0, "must be positive");
        validate_weapon(&mut errors, "boss.weapon", &boss.weapon);
    }

    errors
}

fn validate_weapon(errors: &mut Vec<ValidationError>, field: &str, weapon: &WeaponStats) {
    check!(errors, "arena", format!("{field}.fire_interval"), weapon.fire_interval > 0.0, "must be positive");
    check!(errors, "arena", format!("{field}.max_range"), weapon.max_range > 0.0, "must be positive");
    check!(
        errors,
        "arena",
        format!("{field}.arc_tolerance"),
        weapon.arc_tolerance >= 0.0,
        "must not be negative"
    );
}

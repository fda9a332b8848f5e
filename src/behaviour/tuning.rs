//! Behaviour domain: tuning values, loaded from `assets/data/behaviour.ron`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviourTuning {
    pub idle: IdleTuning,
    pub attack: AttackTuning,
    pub berserk: BerserkTuning,
    pub boss: BossTuning,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IdleTuning {
    pub look_interval_min: f32,
    pub look_interval_max: f32,
    /// Radians per second.
    pub turn_speed: f32,
    pub patrol_tolerance: f32,
}

impl Default for IdleTuning {
    fn default() -> Self {
        Self {
            look_interval_min: 1.5,
            look_interval_max: 4.0,
            turn_speed: 2.5,
            patrol_tolerance: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttackTuning {
    /// Radians per second.
    pub turn_speed: f32,
    /// Distance kept from the target when picking a firing position.
    pub engagement_range: f32,
    /// Maximum sideways offset of a firing position.
    pub lateral_jitter: f32,
    pub reposition_min: f32,
    pub reposition_max: f32,
    /// Seconds without sight of the target before giving up.
    pub attention_span: f32,
    pub burst_length_min: f32,
    pub burst_length_max: f32,
    pub burst_delay_min: f32,
    pub burst_delay_max: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            turn_speed: 5.0,
            engagement_range: 220.0,
            lateral_jitter: 40.0,
            reposition_min: 1.0,
            reposition_max: 2.5,
            attention_span: 3.0,
            burst_length_min: 0.4,
            burst_length_max: 1.0,
            burst_delay_min: 0.8,
            burst_delay_max: 1.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BerserkTuning {
    pub suicide_radius: f32,
    pub turn_speed: f32,
    pub explosion_radius: f32,
    pub explosion_damage: f32,
    pub explosion_force: f32,
}

impl Default for BerserkTuning {
    fn default() -> Self {
        Self {
            suicide_radius: 48.0,
            turn_speed: 6.0,
            explosion_radius: 96.0,
            explosion_damage: 30.0,
            explosion_force: 2400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BossTuning {
    pub telegraph_duration: f32,
    /// Maximum head offset per axis while telegraphing.
    pub head_jitter: f32,
    pub telegraph_turn_speed: f32,

    pub charge_turn_speed: f32,
    /// Full turn rate inside this distance, scaled down beyond it.
    pub charge_falloff_distance: f32,
    pub charge_speed_multiplier: f32,
    pub charge_damage_radius: f32,
    pub charge_damage: f32,
    pub charge_knockback: f32,
    pub heavy_shake: f32,
    pub light_shake: f32,

    pub stun_duration: f32,

    /// Radians per second.
    pub spin_rate: f32,
    pub spin_min_distance: f32,
    pub spin_speed_multiplier: f32,
    pub spin_fire_delay: f32,
    pub spin_duration: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            telegraph_duration: 1.2,
            head_jitter: 4.0,
            telegraph_turn_speed: 4.0,
            charge_turn_speed: 2.5,
            charge_falloff_distance: 150.0,
            charge_speed_multiplier: 3.0,
            charge_damage_radius: 72.0,
            charge_damage: 25.0,
            charge_knockback: 1800.0,
            heavy_shake: 0.8,
            light_shake: 0.4,
            stun_duration: 2.5,
            spin_rate: 4.0,
            spin_min_distance: 140.0,
            spin_speed_multiplier: 0.5,
            spin_fire_delay: 0.15,
            spin_duration: 4.0,
        }
    }
}

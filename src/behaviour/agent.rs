//! Behaviour domain: the world as seen by a behaviour state.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::behaviour::state::BehaviourState;
use crate::movement::CollisionState;

/// Notifications an agent raises towards the rest of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentNotice {
    TargetAcquired,
    TargetLost,
}

/// Queries and write-backs available to every AI-driven mech.
pub trait Agent {
    /// Seconds since startup.
    fn now(&self) -> f32;
    fn delta(&self) -> f32;

    fn position(&self) -> Vec2;
    /// Unit vector the mech is facing.
    fn facing(&self) -> Vec2;
    fn set_facing(&mut self, facing: Vec2);
    /// Base travel speed in world units per second.
    fn move_speed(&self) -> f32;

    /// `None` when there is no target or it no longer exists.
    fn target_position(&self) -> Option<Vec2>;
    fn has_line_of_sight(&self) -> bool;

    fn move_goal(&self) -> Vec2;
    fn set_move_goal(&mut self, goal: Vec2);
    /// Velocity that bypasses pathing for this tick only.
    fn set_direct_move(&mut self, velocity: Option<Vec2>);
    fn pathing_enabled(&self) -> bool;
    fn set_pathing_enabled(&mut self, enabled: bool);
    /// Contacts reported by the mover during the previous frame.
    fn last_collision(&self) -> CollisionState;

    fn patrol_route(&self) -> Option<&[Vec2]>;

    /// Arc, range, muzzle clearance and weapon permission all pass.
    fn can_shoot(&self) -> bool;
    fn set_firing(&mut self, firing: bool);

    fn notify(&mut self, notice: AgentNotice);
    fn self_destruct(&mut self);

    fn rng(&mut self) -> &mut ChaCha8Rng;
}

/// Capabilities only bosses have.
pub trait BossControls {
    fn open_weak_spot(&mut self);
    fn close_weak_spot(&mut self);
    fn weak_spot_open(&self) -> bool;

    /// Offset applied to the head sprite for telegraph shaking.
    fn set_head_offset(&mut self, offset: Vec2);
    fn begin_telegraph(&mut self);
    fn shake_camera(&mut self, trauma: f32);

    /// Damages the current target and knocks it back with `knockback` force.
    fn strike_target(&mut self, damage: f32, knockback: f32);
    fn spawn_projectile(&mut self, origin: Vec2, direction: Vec2);

    /// Attack to run once a telegraph finishes.
    fn next_attack(&mut self) -> Box<dyn BehaviourState>;
}

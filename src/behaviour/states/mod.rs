//! Behaviour domain: concrete behaviour states.

mod attack;
mod berserk;
mod boss;
mod idle;

pub use attack::{Attack, BurstController};
pub use berserk::Berserk;
pub use boss::{BossCharge, BossSpinShoot, BossStunned, BossTelegraphCharge};
pub use idle::Idle;

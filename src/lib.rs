//! Sky Raid - simulation core for a vertically scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (entities, combat, physics)
//! - `tuning`: Data-driven game balance
//! - `upgrades`: Player upgrade modifiers and the upgrade point ledger

pub mod sim;
pub mod tuning;
pub mod upgrades;

pub use tuning::{Tuning, TuningError};
pub use upgrades::{UpgradeLedger, UpgradeModifiers, UpgradeStat};

/// Game configuration constants
pub mod consts {
    use glam::DVec2;

    /// Default fixed simulation rate (ticks per second)
    pub const DEFAULT_TICK_RATE: f64 = 60.0;

    /// Default playfield dimensions
    pub const DEFAULT_SCREEN_WIDTH: f64 = 1280.0;
    pub const DEFAULT_SCREEN_HEIGHT: f64 = 720.0;

    /// Player base stats (before upgrade modifiers)
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_SPEED: f64 = 300.0;
    pub const PLAYER_DAMAGE: f64 = 10.0;
    pub const PLAYER_FIRE_RATE: f64 = 4.0;
    pub const PLAYER_ARMOR: f64 = 1.0;
    pub const PLAYER_STUN_DURATION: f64 = 0.5;
    pub const PLAYER_SIZE: DVec2 = DVec2::new(96.0, 96.0);
    /// Gap between the player and the bottom edge at spawn
    pub const PLAYER_SPAWN_MARGIN: f64 = 40.0;

    /// Upgrade modifier scaling (linear perturbation of base stats)
    pub const VELOCITY_MOD_FACTOR: f64 = 3.0;
    pub const DAMAGE_MOD_FACTOR: f64 = 0.2;
    pub const FIRERATE_MOD_DIVISOR: f64 = 10.0;
    pub const ARMOR_MOD_DIVISOR: f64 = 100.0;

    /// Enemy stun window after a damaging hit (seconds)
    pub const ENEMY_STUN_DURATION: f64 = 0.2;
    /// Horizontal distance to the player at which enemies open fire
    pub const ENEMY_ATTACK_RANGE: f64 = 100.0;
    /// Subtracted from an enemy's width to get its separation radius,
    /// and added back on top as the hysteresis band
    pub const SEPARATION_MARGIN: f64 = 100.0;

    /// Health restored to the player for each destroyed enemy
    pub const KILL_HEAL: f64 = 10.0;

    /// Seconds of session time per extra concurrent enemy
    pub const SPAWN_STEP_SECS: f64 = 30.0;

    /// Projectile dimensions
    pub const BULLET_SIZE: DVec2 = DVec2::new(8.0, 16.0);

    /// Explosion effect lifetime (seconds)
    pub const EXPLOSION_SECS: f64 = 0.5;
    pub const EXPLOSION_SIZE: DVec2 = DVec2::new(64.0, 64.0);

    /// Scenery clouds
    pub const CLOUD_SIZE: DVec2 = DVec2::new(220.0, 110.0);
    pub const CLOUD_MIN_SPEED: f64 = 30.0;
    pub const CLOUD_MAX_SPEED: f64 = 90.0;

    /// Tolerance for accumulated timer comparisons
    pub const TIMER_EPSILON: f64 = 1e-9;
}

/// Duration of one simulation step for a given tick rate
#[inline]
pub fn step_secs(tick: f64) -> f64 {
    1.0 / tick
}

/// Sign of a float as a discrete axis value (-1, 0, 1)
#[inline]
pub fn axis_sign(value: f64) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

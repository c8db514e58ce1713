//! Data-driven game balance
//!
//! Every knob the simulation reads at construction time. Loaded from JSON
//! with missing fields falling back to defaults, then validated so the
//! tick loop never has to guard against nonsense values.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("screen size must be positive, got {width}x{height}")]
    InvalidScreen { width: f64, height: f64 },
    #[error("tick rate must be positive, got {0}")]
    InvalidTickRate(f64),
    #[error("max difficulty must be positive, got {0}")]
    InvalidDifficulty(f64),
    #[error("player drag {drag} must be in [0, tick rate {tick_rate})")]
    InvalidDrag { drag: f64, tick_rate: f64 },
}

/// Simulation balance and limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f64,
    pub screen_height: f64,
    /// Fixed ticks per second used by the demo driver
    pub tick_rate: f64,
    /// Maximum inactive bullets kept for reuse
    pub bullet_pool_cap: usize,
    /// Hard cap on concurrent enemies
    pub enemies_limit: usize,
    /// Maximum concurrent explosion effects
    pub effects_limit: usize,
    /// Session seconds at which spawn difficulty peaks
    pub max_difficulty: f64,
    pub cloud_count: usize,
    /// Player drag coefficient (per second)
    pub player_drag: f64,
    /// Vertical bullet speed (px/s)
    pub bullet_speed: f64,
    /// Damage both sides take when the player rams an enemy
    pub melee_damage: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            tick_rate: DEFAULT_TICK_RATE,
            bullet_pool_cap: 100,
            enemies_limit: 10,
            effects_limit: 5,
            max_difficulty: 600.0,
            cloud_count: 6,
            player_drag: 5.0,
            bullet_speed: 600.0,
            melee_damage: 20.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(TuningError::InvalidScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if !(self.tick_rate > 0.0) {
            return Err(TuningError::InvalidTickRate(self.tick_rate));
        }
        if !(self.max_difficulty > 0.0) {
            return Err(TuningError::InvalidDifficulty(self.max_difficulty));
        }
        // Drag at or above the tick rate would flip velocity every step
        if !(self.player_drag >= 0.0 && self.player_drag < self.tick_rate) {
            return Err(TuningError::InvalidDrag {
                drag: self.player_drag,
                tick_rate: self.tick_rate,
            });
        }
        Ok(())
    }

    pub fn screen(&self) -> DVec2 {
        DVec2::new(self.screen_width, self.screen_height)
    }
}

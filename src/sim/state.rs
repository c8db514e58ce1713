//! Run phase, outgoing events and the read-only render view

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::hitbox::Rect;

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Not started yet (menus)
    #[default]
    Idle,
    /// Active gameplay; the only phase in which ticks do anything
    Running,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// High-level signal for the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The player craft was destroyed
    SessionEnded,
}

/// What an entity is, for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Player,
    Enemy,
    FriendlyBullet,
    HostileBullet,
    Cloud,
    Explosion,
}

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
}

/// Read-only snapshot of one active entity
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub category: Category,
    /// Top-left corner
    pub position: DVec2,
    pub size: DVec2,
    pub facing: Facing,
    /// Visual descriptor (sprite/archetype name)
    pub sprite: &'static str,
    /// Hitbox rectangles in playfield coordinates (empty for decor)
    pub hitbox: Vec<Rect>,
    /// Drawn blinking while true
    pub stunned: bool,
}

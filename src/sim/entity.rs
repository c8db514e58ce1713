//! Physical bodies shared by every entity kind
//!
//! `Body` carries the kinematic state (position, velocity, drag, size,
//! hitbox). Concrete entities (aircraft, bullets, decor) embed a body and
//! expose it through the [`Entity`] trait, so integration and rendering
//! treat them uniformly.

use glam::DVec2;

use super::hitbox::{Hitbox, Rect};
use crate::consts::*;

/// Kinematic state of one entity
#[derive(Debug, Clone)]
pub struct Body {
    /// Inactive bodies are never collision-tested or rendered
    pub active: bool,
    position: DVec2,
    pub velocity: DVec2,
    /// Linear drag coefficient (per second)
    pub drag: f64,
    pub size: DVec2,
    hitbox: Option<Hitbox>,
}

impl Body {
    pub fn new(position: DVec2, size: DVec2, drag: f64) -> Self {
        Self {
            active: true,
            position,
            velocity: DVec2::ZERO,
            drag,
            size,
            hitbox: None,
        }
    }

    /// Attach a hitbox made of rectangles relative to the top-left corner
    pub fn with_hitbox(mut self, rects: Vec<Rect>) -> Self {
        self.hitbox = Some(Hitbox::new(self.position, rects));
        self
    }

    /// Top-left corner
    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.position + self.size * 0.5
    }

    /// Move the body and its hitbox anchor together
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
        if let Some(hitbox) = &mut self.hitbox {
            hitbox.move_to(position);
        }
    }

    pub fn translate(&mut self, delta: DVec2) {
        self.set_position(self.position + delta);
    }

    pub fn hitbox(&self) -> Option<&Hitbox> {
        self.hitbox.as_ref()
    }

    /// True while the top-left corner lies inside `[0,w]x[0,h]`
    pub fn is_within(&self, screen: DVec2) -> bool {
        self.position.x >= 0.0
            && self.position.x <= screen.x
            && self.position.y >= 0.0
            && self.position.y <= screen.y
    }
}

/// Common access to the physical body of any entity
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
}

/// A projectile. Constructed once, then re-armed with [`Bullet::launch`]
/// every time it leaves the pool.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub body: Body,
    /// Fired by the player (travels up, hits enemies)
    pub friendly: bool,
    pub damage: f64,
}

impl Bullet {
    pub fn new(position: DVec2, velocity: DVec2, friendly: bool, damage: f64) -> Self {
        let body = Body::new(position, BULLET_SIZE, 0.0)
            .with_hitbox(vec![Rect::new(0.0, 0.0, BULLET_SIZE.x, BULLET_SIZE.y)]);
        let mut bullet = Self {
            body,
            friendly,
            damage,
        };
        bullet.launch(position, velocity, friendly, damage);
        bullet
    }

    /// Re-arm this instance with a new trajectory and owner
    pub fn launch(&mut self, position: DVec2, velocity: DVec2, friendly: bool, damage: f64) {
        self.body.active = true;
        self.body.set_position(position);
        self.body.velocity = velocity;
        self.friendly = friendly;
        self.damage = damage;
    }

    /// Deactivate once the bullet leaves the playfield
    pub fn update(&mut self, screen: DVec2) {
        if self.body.active && !self.body.is_within(screen) {
            self.body.active = false;
        }
    }
}

impl Entity for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Decorative entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorKind {
    /// Background scenery; wraps back to the top after leaving the bottom
    Cloud,
    /// Hit/death effect; expires after a fixed number of ticks
    Explosion { ticks_left: u32 },
}

/// Collision-irrelevant entity (scenery and visual effects)
#[derive(Debug, Clone)]
pub struct Decor {
    pub body: Body,
    pub kind: DecorKind,
}

impl Decor {
    pub fn cloud(position: DVec2, speed: f64) -> Self {
        let mut body = Body::new(position, CLOUD_SIZE, 0.0);
        body.velocity = DVec2::new(0.0, speed);
        Self {
            body,
            kind: DecorKind::Cloud,
        }
    }

    /// Explosion centred on `center`, lasting `EXPLOSION_SECS` at the given tick rate
    pub fn explosion(center: DVec2, tick: f64) -> Self {
        let ticks = (EXPLOSION_SECS * tick).round().max(1.0) as u32;
        Self {
            body: Body::new(center - EXPLOSION_SIZE * 0.5, EXPLOSION_SIZE, 0.0),
            kind: DecorKind::Explosion { ticks_left: ticks },
        }
    }

    pub fn is_cloud(&self) -> bool {
        self.kind == DecorKind::Cloud
    }

    pub fn is_explosion(&self) -> bool {
        matches!(self.kind, DecorKind::Explosion { .. })
    }

    /// Per-tick bookkeeping: wrap clouds, count explosions down
    pub fn advance(&mut self, screen: DVec2) {
        match &mut self.kind {
            DecorKind::Cloud => {
                let pos = self.body.position();
                if pos.y > screen.y {
                    self.body.set_position(DVec2::new(pos.x, -self.body.size.y));
                }
            }
            DecorKind::Explosion { ticks_left } => {
                *ticks_left = ticks_left.saturating_sub(1);
                if *ticks_left == 0 {
                    self.body.active = false;
                }
            }
        }
    }
}

impl Entity for Decor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

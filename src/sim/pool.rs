//! Bullet pooling and shot generation
//!
//! Spent bullets are parked in an inactive pool instead of being dropped.
//! A shot takes pooled instances only when the pool can cover every muzzle
//! of the pattern (all-or-nothing); otherwise the whole shot is allocated
//! fresh. The pool is trimmed oldest-first to its cap once per tick.

use std::collections::VecDeque;

use glam::DVec2;

use super::aircraft::BulletPattern;
use super::entity::Bullet;
use crate::consts::BULLET_SIZE;

/// One volley request
#[derive(Debug, Clone, Copy)]
pub struct Shot<'a> {
    /// Top-left corner of the firing craft
    pub origin: DVec2,
    /// Muzzle offsets from `origin`: centre, left, right
    pub gun_points: &'a [DVec2],
    pub pattern: BulletPattern,
    pub friendly: bool,
    pub damage: f64,
    /// Vertical bullet speed (px/s, unsigned)
    pub speed: f64,
}

/// (gun index, lateral sign) for each muzzle of a pattern
fn muzzle_layout(pattern: BulletPattern) -> &'static [(usize, f64)] {
    match pattern {
        BulletPattern::Simple => &[(0, 0.0)],
        BulletPattern::Double => &[(1, 0.0), (2, 0.0)],
        BulletPattern::Triple => &[(1, 0.0), (0, 0.0), (2, 0.0)],
        BulletPattern::TripleAngle => &[(1, -1.0), (0, 0.0), (2, 1.0)],
    }
}

/// Missing guns fall back to the first one, then to the origin itself
fn gun_offset(gun_points: &[DVec2], index: usize) -> DVec2 {
    gun_points
        .get(index)
        .or_else(|| gun_points.first())
        .copied()
        .unwrap_or(DVec2::ZERO)
}

/// Capped store of inactive bullets
#[derive(Debug, Clone)]
pub struct BulletPool {
    inactive: VecDeque<Bullet>,
    cap: usize,
    allocated: u64,
    reused: u64,
}

impl BulletPool {
    pub fn new(cap: usize) -> Self {
        Self {
            inactive: VecDeque::with_capacity(cap),
            cap,
            allocated: 0,
            reused: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.inactive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inactive.is_empty()
    }

    /// Bullets created fresh since construction
    pub fn allocated(&self) -> u64 {
        self.allocated
    }

    /// Bullets taken from the pool since construction
    pub fn reused(&self) -> u64 {
        self.reused
    }

    /// Park a spent bullet
    pub fn retire(&mut self, mut bullet: Bullet) {
        bullet.body.active = false;
        self.inactive.push_back(bullet);
    }

    /// Drop the oldest entries beyond the cap; returns how many were dropped
    pub fn trim(&mut self) -> usize {
        let excess = self.inactive.len().saturating_sub(self.cap);
        self.inactive.drain(..excess);
        excess
    }

    /// Launch one bullet per muzzle of `shot.pattern` into `active`.
    /// Returns the number of freshly allocated bullets.
    pub fn fire(&mut self, active: &mut Vec<Bullet>, shot: &Shot<'_>) -> usize {
        let layout = muzzle_layout(shot.pattern);
        let reuse = self.inactive.len() >= layout.len();
        let vy = if shot.friendly { -shot.speed } else { shot.speed };
        let mut fresh = 0;

        for &(gun, lateral) in layout {
            let muzzle = shot.origin + gun_offset(shot.gun_points, gun);
            let position = muzzle - BULLET_SIZE * 0.5;
            let velocity = DVec2::new(lateral * vy.abs(), vy);

            let pooled = if reuse { self.inactive.pop_back() } else { None };
            let bullet = match pooled {
                Some(mut bullet) => {
                    bullet.launch(position, velocity, shot.friendly, shot.damage);
                    self.reused += 1;
                    bullet
                }
                None => {
                    self.allocated += 1;
                    fresh += 1;
                    Bullet::new(position, velocity, shot.friendly, shot.damage)
                }
            };
            active.push(bullet);
        }

        fresh
    }
}

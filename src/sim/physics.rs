//! Kinematic integration and collision resolution
//!
//! One explicit Euler step with linear drag, then a fixed-order collision
//! pass over the already-moved positions:
//! 1. player vs. enemies (hitbox overlap, mutual melee damage with stun)
//! 2. bullets vs. their valid targets (bullet centre in hitbox, no stun)
//!
//! Tunneling through a thin target in a single step is accepted; the
//! entity counts involved (tens) don't warrant sub-stepping or a spatial index.

use super::aircraft::Aircraft;
use super::entity::{Bullet, Decor, Entity};
use super::state::Phase;

/// Categorized, mutable view of everything physics acts on
pub struct PhysicsSet<'a> {
    pub player: &'a mut Aircraft,
    pub enemies: &'a mut [Aircraft],
    pub bullets: &'a mut [Bullet],
    pub decor: &'a mut [Decor],
}

/// What the collision pass did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player/enemy overlaps that applied melee damage
    pub melee_contacts: usize,
    /// Friendly bullets that struck an enemy
    pub enemy_hits: usize,
    /// Hostile bullets that struck the player
    pub player_hits: usize,
}

/// Advance one entity by a single step: `p += v/tick`, `v *= 1 - drag/tick`
pub fn integrate<E: Entity + ?Sized>(entity: &mut E, tick: f64) {
    let body = entity.body_mut();
    if !body.active {
        return;
    }
    let delta = body.velocity / tick;
    body.translate(delta);
    body.velocity *= 1.0 - body.drag / tick;
}

#[derive(Debug, Clone)]
pub struct PhysicsManager {
    melee_damage: f64,
}

impl PhysicsManager {
    pub fn new(melee_damage: f64) -> Self {
        Self { melee_damage }
    }

    /// Integrate every category, then resolve collisions. No-op unless running.
    pub fn update(&self, phase: Phase, tick: f64, mut set: PhysicsSet<'_>) -> CollisionReport {
        if phase != Phase::Running {
            return CollisionReport::default();
        }

        integrate(&mut *set.player, tick);
        for enemy in set.enemies.iter_mut() {
            integrate(enemy, tick);
        }
        for bullet in set.bullets.iter_mut() {
            integrate(bullet, tick);
        }
        for decor in set.decor.iter_mut() {
            integrate(decor, tick);
        }

        self.resolve_collisions(&mut set)
    }

    /// Collision pass alone, on current positions
    pub fn resolve_collisions(&self, set: &mut PhysicsSet<'_>) -> CollisionReport {
        let mut report = CollisionReport::default();
        let player = &mut *set.player;

        // 1. Player vs. enemies
        for enemy in set.enemies.iter_mut() {
            if !player.body.active {
                break;
            }
            if !enemy.body.active {
                continue;
            }
            let touching = match (player.body.hitbox(), enemy.body.hitbox()) {
                (Some(a), Some(b)) => a.overlaps(b),
                _ => false,
            };
            if touching {
                let armor = player.armor_modifier();
                player.change_health(-self.melee_damage, true, armor);
                enemy.change_health(-self.melee_damage, true, 0.0);
                report.melee_contacts += 1;
            }
        }

        // 2. Bullets vs. targets; first matching rectangle wins
        for bullet in set.bullets.iter_mut() {
            if !bullet.body.active {
                continue;
            }
            let point = bullet.body.center();

            if bullet.friendly {
                let target = set.enemies.iter_mut().find(|e| {
                    e.body.active && e.body.hitbox().is_some_and(|h| h.contains_point(point))
                });
                if let Some(enemy) = target {
                    enemy.change_health(-bullet.damage, false, 0.0);
                    bullet.body.active = false;
                    report.enemy_hits += 1;
                }
            } else if player.body.active
                && player.body.hitbox().is_some_and(|h| h.contains_point(point))
            {
                let armor = player.armor_modifier();
                player.change_health(-bullet.damage, false, armor);
                bullet.body.active = false;
                report.player_hits += 1;
            }
        }

        report
    }
}

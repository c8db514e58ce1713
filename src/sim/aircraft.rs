//! Combat aircraft: health, armament and the stun/cooldown state machine
//!
//! Player and enemy share one struct; the differences live in the
//! [`Role`] payload (upgrade modifiers vs. score reward) and in which
//! behaviour function drives them each tick.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::factory::Archetype;
use super::hitbox::Rect;
use super::tick::PlayerIntents;
use crate::consts::*;
use crate::upgrades::UpgradeModifiers;
use crate::{axis_sign, step_secs};

/// How many muzzles fire per shot and in which directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BulletPattern {
    #[default]
    Simple,
    Double,
    Triple,
    /// Triple with the outer bullets spread diagonally
    TripleAngle,
}

impl BulletPattern {
    pub fn muzzles(self) -> usize {
        match self {
            BulletPattern::Simple => 1,
            BulletPattern::Double => 2,
            BulletPattern::Triple | BulletPattern::TripleAngle => 3,
        }
    }

    /// Pattern bands of the bullet type upgrade stat
    pub fn from_bullet_type(value: u8) -> Self {
        match value {
            0..=25 => BulletPattern::Simple,
            26..=50 => BulletPattern::Double,
            51..=75 => BulletPattern::Triple,
            _ => BulletPattern::TripleAngle,
        }
    }
}

/// Player-only state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerRole {
    pub modifiers: UpgradeModifiers,
}

/// Enemy-only state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyRole {
    /// Awarded once, when the destroyed enemy is removed
    pub score_value: u64,
    /// Archetype name, doubles as the sprite reference
    pub archetype: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    Player(PlayerRole),
    Enemy(EnemyRole),
}

/// A combat entity (player or enemy)
#[derive(Debug, Clone)]
pub struct Aircraft {
    pub body: Body,
    pub role: Role,
    /// Held movement direction, -1/0/1 per axis
    direction: IVec2,
    health: i32,
    max_health: i32,
    pub speed: f64,
    pub base_damage: f64,
    pub pattern: BulletPattern,
    /// Shots per second before modifiers
    pub fire_rate: f64,
    fire_cooldown_elapsed: f64,
    fire_ready: bool,
    /// Damage divisor
    pub armor: f64,
    pub stun_duration: f64,
    stun_elapsed: f64,
    stunned: bool,
    pub attacking: bool,
    destroyed: bool,
    damaged: bool,
    /// Muzzle offsets from the top-left corner: centre, left, right
    gun_points: [DVec2; 3],
}

/// Fuselage + wing rectangles for a craft of `size`.
/// `nose_up` puts the wings towards the front of a player craft.
fn airframe(size: DVec2, nose_up: bool) -> Vec<Rect> {
    let wing_y = if nose_up { 0.4 } else { 0.3 };
    vec![
        Rect::new(size.x * 0.375, 0.0, size.x * 0.25, size.y),
        Rect::new(0.0, size.y * wing_y, size.x, size.y * 0.3),
    ]
}

fn guns(size: DVec2, nose_up: bool) -> [DVec2; 3] {
    if nose_up {
        [
            DVec2::new(size.x * 0.5, 0.0),
            DVec2::new(size.x * 0.25, size.y * 0.4),
            DVec2::new(size.x * 0.75, size.y * 0.4),
        ]
    } else {
        [
            DVec2::new(size.x * 0.5, size.y),
            DVec2::new(size.x * 0.25, size.y * 0.6),
            DVec2::new(size.x * 0.75, size.y * 0.6),
        ]
    }
}

impl Aircraft {
    /// Create the player craft with base stats and the given modifiers
    pub fn player(position: DVec2, drag: f64, modifiers: UpgradeModifiers) -> Self {
        let modifiers = modifiers.clamped();
        Self {
            body: Body::new(position, PLAYER_SIZE, drag).with_hitbox(airframe(PLAYER_SIZE, true)),
            role: Role::Player(PlayerRole { modifiers }),
            direction: IVec2::ZERO,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            base_damage: PLAYER_DAMAGE,
            pattern: modifiers.pattern(),
            fire_rate: PLAYER_FIRE_RATE,
            fire_cooldown_elapsed: 0.0,
            fire_ready: true,
            armor: PLAYER_ARMOR,
            stun_duration: PLAYER_STUN_DURATION,
            stun_elapsed: 0.0,
            stunned: false,
            attacking: false,
            destroyed: false,
            damaged: false,
            gun_points: guns(PLAYER_SIZE, true),
        }
    }

    /// Create an enemy from an archetype
    pub fn enemy(position: DVec2, archetype: &Archetype) -> Self {
        let size = archetype.size;
        Self {
            body: Body::new(position, size, 0.0).with_hitbox(airframe(size, false)),
            role: Role::Enemy(EnemyRole {
                score_value: archetype.score_value,
                archetype: archetype.name,
            }),
            direction: IVec2::new(0, 1),
            health: archetype.health,
            max_health: archetype.health,
            speed: archetype.speed,
            base_damage: archetype.damage,
            pattern: archetype.pattern,
            fire_rate: archetype.fire_rate,
            fire_cooldown_elapsed: 0.0,
            fire_ready: true,
            armor: archetype.armor,
            stun_duration: ENEMY_STUN_DURATION,
            stun_elapsed: 0.0,
            stunned: false,
            attacking: false,
            destroyed: false,
            damaged: false,
            gun_points: guns(size, false),
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn direction(&self) -> IVec2 {
        self.direction
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player(_))
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned
    }

    pub fn fire_ready(&self) -> bool {
        self.fire_ready
    }

    pub fn gun_points(&self) -> &[DVec2] {
        &self.gun_points
    }

    /// Score reward (enemies only)
    pub fn score_value(&self) -> Option<u64> {
        match self.role {
            Role::Enemy(enemy) => Some(enemy.score_value),
            Role::Player(_) => None,
        }
    }

    /// Sprite/archetype reference for the render view
    pub fn sprite(&self) -> &'static str {
        match self.role {
            Role::Player(_) => "player",
            Role::Enemy(enemy) => enemy.archetype,
        }
    }

    fn modifiers(&self) -> Option<UpgradeModifiers> {
        match self.role {
            Role::Player(player) => Some(player.modifiers),
            Role::Enemy(_) => None,
        }
    }

    /// Armor modifier to pass into [`Aircraft::change_health`] for hits on this craft
    pub fn armor_modifier(&self) -> f64 {
        self.modifiers().map_or(0.0, |m| m.armor as f64)
    }

    pub fn effective_speed(&self) -> f64 {
        self.speed + self.modifiers().map_or(0.0, |m| m.velocity as f64 * VELOCITY_MOD_FACTOR)
    }

    /// Damage carried by each bullet this craft fires
    pub fn shot_damage(&self) -> f64 {
        self.base_damage + self.modifiers().map_or(0.0, |m| m.damage as f64 * DAMAGE_MOD_FACTOR)
    }

    /// Seconds between shots
    pub fn fire_interval(&self) -> f64 {
        let firerate = self.modifiers().map_or(0.0, |m| m.firerate as f64);
        1.0 / (self.fire_rate + firerate / FIRERATE_MOD_DIVISOR)
    }

    /// Replace the player's upgrade modifiers (clamped) and re-derive its pattern
    pub fn apply_modifiers(&mut self, modifiers: UpgradeModifiers) {
        if let Role::Player(player) = &mut self.role {
            let modifiers = modifiers.clamped();
            player.modifiers = modifiers;
            self.pattern = modifiers.pattern();
        }
    }

    /// Read and clear the damaged edge. Single consumer: whoever reads it
    /// first in a tick is the only one to see `true`.
    pub fn take_damaged(&mut self) -> bool {
        std::mem::take(&mut self.damaged)
    }

    /// The only path that mutates health.
    ///
    /// Negative values are damage: ignored while stunned, otherwise divided
    /// by `armor + armor_modifier/100` and floored. Non-negative values heal
    /// up to `max_health`. Reaching zero destroys the craft.
    pub fn change_health(&mut self, value: f64, applies_stun: bool, armor_modifier: f64) {
        if self.destroyed {
            return;
        }

        if value < 0.0 {
            if !self.stunned {
                let divisor = self.armor + armor_modifier / ARMOR_MOD_DIVISOR;
                let delta = (value * (1.0 / divisor)).floor() as i32;
                self.health = self.health.saturating_add(delta);
                if applies_stun {
                    self.stunned = true;
                    self.stun_elapsed = 0.0;
                }
                self.damaged = true;
            }
        } else {
            let delta = value.floor() as i32;
            self.health = self.health.saturating_add(delta).min(self.max_health);
        }

        if self.health <= 0 {
            self.health = 0;
            self.body.active = false;
            self.destroyed = true;
        }
    }

    /// Advance the stun window and fire cooldown by one step
    pub fn advance_timers(&mut self, tick: f64) {
        let dt = step_secs(tick);

        if self.stunned {
            self.stun_elapsed += dt;
            if self.stun_elapsed + TIMER_EPSILON >= self.stun_duration {
                self.stunned = false;
                self.stun_elapsed = 0.0;
            }
        }

        if !self.fire_ready {
            self.fire_cooldown_elapsed += dt;
            if self.fire_cooldown_elapsed + TIMER_EPSILON >= self.fire_interval() {
                self.fire_ready = true;
                self.fire_cooldown_elapsed = 0.0;
            }
        }
    }

    /// Start the fire cooldown after a shot
    pub fn mark_fired(&mut self) {
        self.fire_ready = false;
        self.fire_cooldown_elapsed = 0.0;
    }

    /// Restore the player for a new run without reallocating it
    pub fn respawn(&mut self, position: DVec2) {
        self.body.active = true;
        self.body.set_position(position);
        self.body.velocity = DVec2::ZERO;
        self.direction = IVec2::ZERO;
        self.health = self.max_health;
        self.fire_cooldown_elapsed = 0.0;
        self.fire_ready = true;
        self.stun_elapsed = 0.0;
        self.stunned = false;
        self.attacking = false;
        self.destroyed = false;
        self.damaged = false;
    }

    /// Player tick: timers, held intents to velocity, edge push-back.
    ///
    /// The craft is kept on screen by velocity injection: when it crosses an
    /// edge the outward direction is dropped and velocity points back inside.
    pub fn player_behaviour(&mut self, intents: &PlayerIntents, screen: DVec2, tick: f64) {
        self.advance_timers(tick);

        let speed = self.effective_speed();
        let mut direction = intents.direction();
        let pos = self.body.position();
        let size = self.body.size;

        if direction.x != 0 {
            self.body.velocity.x = direction.x as f64 * speed;
        }
        if direction.y != 0 {
            self.body.velocity.y = direction.y as f64 * speed;
        }

        if pos.x < 0.0 {
            direction.x = direction.x.max(0);
            self.body.velocity.x = speed;
        } else if pos.x + size.x > screen.x {
            direction.x = direction.x.min(0);
            self.body.velocity.x = -speed;
        }

        if pos.y < 0.0 {
            direction.y = direction.y.max(0);
            self.body.velocity.y = speed;
        } else if pos.y + size.y > screen.y {
            direction.y = direction.y.min(0);
            self.body.velocity.y = -speed;
        }

        self.direction = direction;
        self.attacking = intents.attack;
    }

    /// Enemy tick: timers, descent, separation, chase, attack intent.
    ///
    /// `others` holds the centre of every enemy (including this one at
    /// `index`), `None` for inactive ones. Separation overrides chasing for
    /// the tick; the hysteresis band only suppresses chasing so a craft that
    /// just separated keeps drifting instead of turning straight back.
    pub fn enemy_behaviour(
        &mut self,
        index: usize,
        tick: f64,
        screen: DVec2,
        player_center: DVec2,
        others: &[Option<DVec2>],
    ) {
        self.advance_timers(tick);

        let speed = self.speed;
        let center = self.body.center();
        let separation = self.body.size.x - SEPARATION_MARGIN;
        let hysteresis = separation + SEPARATION_MARGIN;
        let mut chase = true;

        self.body.velocity.y = speed;

        for (other_index, other) in others.iter().enumerate() {
            let Some(other) = other else { continue };
            if other_index == index {
                continue;
            }
            let distance = center.distance(*other);
            if distance < separation {
                // Level pairs split by index so they never steer the same way
                let left = center.x < other.x || (center.x == other.x && index < other_index);
                self.body.velocity.x = if left { -speed } else { speed };
                chase = false;
            } else if distance < hysteresis {
                chase = false;
            }
        }

        let dx = player_center.x - center.x;
        if chase {
            let mut heading = if dx.abs() < 1.0 { 0.0 } else { dx.signum() };
            // Level with the player: veer off instead of stacking on it
            if (player_center.y - center.y).abs() < self.body.size.y {
                heading = -heading;
            }
            self.body.velocity.x = heading * speed;
        }

        self.attacking = dx.abs() <= ENEMY_ATTACK_RANGE;
        self.direction = IVec2::new(axis_sign(self.body.velocity.x), 1);

        // Leaving the playfield deactivates without destroying (no score)
        let pos = self.body.position();
        if pos.x + self.body.size.x < 0.0 || pos.x > screen.x || pos.y > screen.y {
            self.body.active = false;
        }
    }
}

impl Entity for Aircraft {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::factory::BANDS;
    use proptest::prelude::*;

    const TICK: f64 = 60.0;
    const SCREEN: DVec2 = DVec2::new(1280.0, 720.0);

    fn player() -> Aircraft {
        Aircraft::player(DVec2::new(500.0, 500.0), 0.0, UpgradeModifiers::from_raw(0, 0, 0, 0, 0))
    }

    fn scout(position: DVec2) -> Aircraft {
        Aircraft::enemy(position, &BANDS[0][0])
    }

    #[test]
    fn test_pattern_bands() {
        assert_eq!(BulletPattern::from_bullet_type(0), BulletPattern::Simple);
        assert_eq!(BulletPattern::from_bullet_type(25), BulletPattern::Simple);
        assert_eq!(BulletPattern::from_bullet_type(26), BulletPattern::Double);
        assert_eq!(BulletPattern::from_bullet_type(75), BulletPattern::Triple);
        assert_eq!(BulletPattern::from_bullet_type(76), BulletPattern::TripleAngle);
        assert_eq!(BulletPattern::TripleAngle.muzzles(), 3);
    }

    #[test]
    fn test_damage_uses_armor_divisor() {
        let mut craft = player();
        craft.armor = 1.0;
        craft.change_health(-10.0, false, 25.0); // -10 / 1.25 = -8
        assert_eq!(craft.health(), 92);
        assert!(craft.take_damaged());
        assert!(!craft.take_damaged(), "edge is consumed by the first read");
    }

    #[test]
    fn test_damage_floors_toward_more_damage() {
        let mut craft = player();
        craft.armor = 3.0;
        craft.change_health(-10.0, false, 0.0); // -3.33 floors to -4
        assert_eq!(craft.health(), 96);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut craft = player();
        craft.change_health(-30.0, false, 0.0);
        assert!(craft.take_damaged());
        craft.change_health(12.7, false, 0.0);
        assert_eq!(craft.health(), 82);
        craft.change_health(500.0, false, 0.0);
        assert_eq!(craft.health(), craft.max_health());
        assert!(!craft.take_damaged(), "heals never raise the damaged edge");
    }

    #[test]
    fn test_lethal_damage_destroys() {
        let mut craft = scout(DVec2::ZERO);
        craft.change_health(-10_000.0, false, 0.0);
        assert_eq!(craft.health(), 0);
        assert!(!craft.body.active);
        assert!(craft.is_destroyed());

        // Terminal: heals do not resurrect
        craft.change_health(50.0, false, 0.0);
        assert_eq!(craft.health(), 0);
    }

    #[test]
    fn test_stun_blocks_damage_until_window_elapses() {
        let mut craft = player();
        craft.change_health(-10.0, true, 0.0);
        assert_eq!(craft.health(), 90);
        assert!(craft.is_stunned());

        // 0.5s at 60 Hz = 30 ticks
        for _ in 0..29 {
            craft.advance_timers(TICK);
            craft.change_health(-10.0, true, 0.0);
            assert_eq!(craft.health(), 90, "immune while stunned");
        }
        craft.advance_timers(TICK);
        assert!(!craft.is_stunned());

        craft.change_health(-10.0, false, 0.0);
        assert_eq!(craft.health(), 80);
    }

    #[test]
    fn test_fire_cooldown_uses_firerate_modifier() {
        let mut craft = Aircraft::player(DVec2::ZERO, 0.0, UpgradeModifiers::from_raw(0, 0, 20, 0, 0));
        // 4 + 20/10 = 6 shots/s -> 10 ticks at 60 Hz
        assert!((craft.fire_interval() - 1.0 / 6.0).abs() < 1e-12);
        craft.mark_fired();
        for _ in 0..9 {
            craft.advance_timers(TICK);
        }
        assert!(!craft.fire_ready());
        craft.advance_timers(TICK);
        assert!(craft.fire_ready());
    }

    #[test]
    fn test_modifiers_perturb_stats() {
        let craft = Aircraft::player(DVec2::ZERO, 0.0, UpgradeModifiers::from_raw(10, 50, 0, 100, 90));
        assert_eq!(craft.effective_speed(), PLAYER_SPEED + 30.0);
        assert_eq!(craft.shot_damage(), PLAYER_DAMAGE + 10.0);
        assert_eq!(craft.armor_modifier(), 100.0);
        assert_eq!(craft.pattern, BulletPattern::TripleAngle);

        let enemy = scout(DVec2::ZERO);
        assert_eq!(enemy.armor_modifier(), 0.0);
        assert_eq!(enemy.effective_speed(), enemy.speed);
    }

    #[test]
    fn test_player_intents_set_velocity() {
        let mut craft = player();
        let intents = PlayerIntents {
            left: true,
            up: true,
            attack: true,
            ..Default::default()
        };
        craft.player_behaviour(&intents, SCREEN, TICK);
        assert_eq!(craft.body.velocity, DVec2::new(-PLAYER_SPEED, -PLAYER_SPEED));
        assert_eq!(craft.direction(), IVec2::new(-1, -1));
        assert!(craft.attacking);
    }

    #[test]
    fn test_player_pushed_back_from_edge() {
        let mut craft = player();
        craft.body.set_position(DVec2::new(-2.0, 500.0));
        let intents = PlayerIntents {
            left: true,
            ..Default::default()
        };
        craft.player_behaviour(&intents, SCREEN, TICK);
        assert_eq!(craft.direction().x, 0, "outward direction dropped");
        assert_eq!(craft.body.velocity.x, PLAYER_SPEED, "pushed back inside");
        // Position itself is not clamped
        assert_eq!(craft.body.position().x, -2.0);
    }

    #[test]
    fn test_enemy_chases_player_and_attacks_in_range() {
        let mut enemy = scout(DVec2::new(100.0, 50.0));
        let player_center = DVec2::new(600.0, 600.0);
        let others = [Some(enemy.body.center())];
        enemy.enemy_behaviour(0, TICK, SCREEN, player_center, &others);
        assert_eq!(enemy.body.velocity, DVec2::new(enemy.speed, enemy.speed));
        assert!(!enemy.attacking);

        let mut close = scout(DVec2::new(500.0, 50.0));
        let others = [Some(close.body.center())];
        close.enemy_behaviour(0, TICK, SCREEN, player_center, &others);
        assert!(close.attacking, "within 100px horizontally");
    }

    #[test]
    fn test_enemy_veers_off_when_level_with_player() {
        let mut enemy = scout(DVec2::new(100.0, 500.0));
        let player_center = enemy.body.center() + DVec2::new(300.0, 10.0);
        let others = [Some(enemy.body.center())];
        enemy.enemy_behaviour(0, TICK, SCREEN, player_center, &others);
        assert_eq!(enemy.body.velocity.x, -enemy.speed);
    }

    #[test]
    fn test_separation_wins_over_chase() {
        // Scouts are 150 wide: separation radius 50, hysteresis 150
        let mut a = scout(DVec2::new(200.0, 0.0));
        let b_center = a.body.center() + DVec2::new(30.0, 0.0);
        let player_center = DVec2::new(1000.0, 600.0);
        let others = [Some(a.body.center()), Some(b_center)];
        a.enemy_behaviour(0, TICK, SCREEN, player_center, &others);
        assert_eq!(a.body.velocity.x, -a.speed, "moves away although the player is to the right");
    }

    #[test]
    fn test_hysteresis_band_keeps_previous_heading() {
        let mut a = scout(DVec2::new(200.0, 0.0));
        a.body.velocity.x = -a.speed;
        let b_center = a.body.center() + DVec2::new(100.0, 0.0);
        let others = [Some(a.body.center()), Some(b_center)];
        a.enemy_behaviour(0, TICK, SCREEN, DVec2::new(1000.0, 600.0), &others);
        assert_eq!(a.body.velocity.x, -a.speed, "no chase inside the band");

        // Inactive neighbours are ignored entirely
        let others = [Some(a.body.center()), None];
        a.enemy_behaviour(0, TICK, SCREEN, DVec2::new(1000.0, 600.0), &others);
        assert_eq!(a.body.velocity.x, a.speed);
    }

    #[test]
    fn test_enemy_leaving_screen_is_not_destroyed() {
        let mut enemy = scout(DVec2::new(100.0, SCREEN.y + 1.0));
        let others = [Some(enemy.body.center())];
        enemy.enemy_behaviour(0, TICK, SCREEN, DVec2::ZERO, &others);
        assert!(!enemy.body.active);
        assert!(!enemy.is_destroyed());
        assert!(enemy.health() > 0);
    }

    #[test]
    fn test_enemy_leaving_sideways_is_not_destroyed() {
        let size = BANDS[0][0].size;

        let mut gone_left = scout(DVec2::new(-size.x - 1.0, 100.0));
        let others = [Some(gone_left.body.center())];
        gone_left.enemy_behaviour(0, TICK, SCREEN, DVec2::new(640.0, 600.0), &others);
        assert!(!gone_left.body.active);
        assert!(!gone_left.is_destroyed());

        let mut gone_right = scout(DVec2::new(SCREEN.x + 1.0, 100.0));
        let others = [Some(gone_right.body.center())];
        gone_right.enemy_behaviour(0, TICK, SCREEN, DVec2::new(640.0, 600.0), &others);
        assert!(!gone_right.body.active);
        assert!(!gone_right.is_destroyed());
        assert_eq!(gone_right.health(), gone_right.max_health());

        // Partly off the left edge still counts as on screen
        let mut edge = scout(DVec2::new(-size.x + 1.0, 100.0));
        let others = [Some(edge.body.center())];
        edge.enemy_behaviour(0, TICK, SCREEN, DVec2::new(640.0, 600.0), &others);
        assert!(edge.body.active);
    }

    #[test]
    fn test_stacked_enemies_separate_in_opposite_directions() {
        let mut a = scout(DVec2::new(400.0, 0.0));
        let mut b = scout(DVec2::new(400.0, 0.0));
        let others = [Some(a.body.center()), Some(b.body.center())];
        let player_center = DVec2::new(1000.0, 600.0);

        a.enemy_behaviour(0, TICK, SCREEN, player_center, &others);
        b.enemy_behaviour(1, TICK, SCREEN, player_center, &others);
        assert_eq!(a.body.velocity.x, -a.speed);
        assert_eq!(b.body.velocity.x, b.speed);
    }

    #[test]
    fn test_respawn_restores_player() {
        let mut craft = player();
        craft.change_health(-1000.0, true, 0.0);
        assert!(craft.is_destroyed());
        craft.respawn(DVec2::new(10.0, 20.0));
        assert_eq!(craft.health(), PLAYER_MAX_HEALTH);
        assert!(craft.body.active);
        assert!(!craft.is_destroyed());
        assert!(!craft.is_stunned());
        assert!(!craft.take_damaged());
        assert_eq!(craft.body.position(), DVec2::new(10.0, 20.0));
    }

    proptest! {
        #[test]
        fn prop_health_invariant_holds(
            changes in proptest::collection::vec((-150.0f64..150.0, any::<bool>(), 0u8..=100, 0u32..40), 0..64)
        ) {
            let mut craft = player();
            for (value, stun, armor, ticks) in changes {
                craft.change_health(value, stun, armor as f64);
                for _ in 0..ticks {
                    craft.advance_timers(TICK);
                }
                prop_assert!(craft.health() >= 0);
                prop_assert!(craft.health() <= craft.max_health());
                prop_assert_eq!(craft.health() == 0, !craft.body.active && craft.is_destroyed());
            }
        }
    }
}

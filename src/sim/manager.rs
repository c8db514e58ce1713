//! Entity ownership and the per-tick update sequence
//!
//! `EntityManager` owns every collection (player, enemies, active bullets,
//! the bullet pool, decor) and is the only place they are mutated outside
//! the physics pass. Removals always happen after iteration (retain or
//! reverse swap-remove), never while walking a list forward.

use glam::DVec2;
use rand::Rng;

use super::aircraft::Aircraft;
use super::entity::{Body, Bullet, Decor};
use super::factory::{EnemyFactory, spawn_target};
use super::hitbox::Rect;
use super::physics::PhysicsSet;
use super::pool::{BulletPool, Shot};
use super::state::{Category, EntityView, Event, Facing, Phase};
use super::tick::PlayerIntents;
use crate::consts::*;
use crate::step_secs;
use crate::tuning::Tuning;
use crate::upgrades::UpgradeModifiers;

/// Fire a volley if the craft wants to and its cooldown allows it
fn fire_if_ready(
    pool: &mut BulletPool,
    bullets: &mut Vec<Bullet>,
    craft: &mut Aircraft,
    friendly: bool,
    speed: f64,
) {
    if !(craft.attacking && craft.fire_ready()) {
        return;
    }
    pool.fire(
        bullets,
        &Shot {
            origin: craft.body.position(),
            gun_points: craft.gun_points(),
            pattern: craft.pattern,
            friendly,
            damage: craft.shot_damage(),
            speed,
        },
    );
    craft.mark_fired();
}

fn player_spawn(screen: DVec2) -> DVec2 {
    DVec2::new(
        (screen.x - PLAYER_SIZE.x) * 0.5,
        screen.y - PLAYER_SIZE.y - PLAYER_SPAWN_MARGIN,
    )
}

#[derive(Debug, Clone)]
pub struct EntityManager {
    screen: DVec2,
    player: Aircraft,
    enemies: Vec<Aircraft>,
    bullets: Vec<Bullet>,
    pool: BulletPool,
    decor: Vec<Decor>,
    factory: EnemyFactory,
    enemies_limit: usize,
    effects_limit: usize,
    bullet_speed: f64,
    score: u64,
    /// Session seconds; drives spawn cap and difficulty
    elapsed_time: f64,
    /// Cleared at the start of every update
    event: Option<Event>,
}

impl EntityManager {
    pub fn new(tuning: &Tuning, modifiers: UpgradeModifiers, rng: &mut impl Rng) -> Self {
        let screen = tuning.screen();

        let decor = (0..tuning.cloud_count)
            .map(|_| {
                let position = DVec2::new(
                    rng.random_range(-CLOUD_SIZE.x * 0.5..screen.x),
                    rng.random_range(-CLOUD_SIZE.y..screen.y),
                );
                Decor::cloud(position, rng.random_range(CLOUD_MIN_SPEED..CLOUD_MAX_SPEED))
            })
            .collect();

        Self {
            screen,
            player: Aircraft::player(player_spawn(screen), tuning.player_drag, modifiers),
            enemies: Vec::with_capacity(tuning.enemies_limit),
            bullets: Vec::new(),
            pool: BulletPool::new(tuning.bullet_pool_cap),
            decor,
            factory: EnemyFactory::new(screen, tuning.max_difficulty),
            enemies_limit: tuning.enemies_limit,
            effects_limit: tuning.effects_limit,
            bullet_speed: tuning.bullet_speed,
            score: 0,
            elapsed_time: 0.0,
            event: None,
        }
    }

    /// Advance behaviour, shots, cleanup and spawning by one tick.
    /// Does nothing unless `phase` is `Running`.
    pub fn update(&mut self, phase: Phase, intents: &PlayerIntents, tick: f64, rng: &mut impl Rng) {
        if phase != Phase::Running {
            return;
        }
        self.event = None;
        let screen = self.screen;

        // 1-2. Player behaviour and shot
        self.player.player_behaviour(intents, screen, tick);
        fire_if_ready(&mut self.pool, &mut self.bullets, &mut self.player, true, self.bullet_speed);

        // 3. Hit effect
        if self.player.take_damaged() {
            self.spawn_effect(self.player.body.center(), tick);
        }

        // 4. Run over
        if !self.player.body.active {
            log::debug!("Player destroyed at {:.1}s", self.elapsed_time);
            self.event = Some(Event::SessionEnded);
        }

        // 5. Decor
        for decor in &mut self.decor {
            decor.advance(screen);
        }
        self.decor.retain(|d| d.body.active);

        // 6. Bullets: reverse swap-remove keeps unvisited indices stable
        for bullet in &mut self.bullets {
            bullet.update(screen);
        }
        let mut i = self.bullets.len();
        while i > 0 {
            i -= 1;
            if !self.bullets[i].body.active {
                let spent = self.bullets.swap_remove(i);
                self.pool.retire(spent);
            }
        }

        // 7. Enemies
        self.update_enemies(tick);

        // 8. Spawn policy
        self.spawn_enemies(rng);

        // 9. Clock
        self.elapsed_time += step_secs(tick);

        // 10. Pool cap
        self.pool.trim();
    }

    fn update_enemies(&mut self, tick: f64) {
        let screen = self.screen;
        let player_center = self.player.body.center();
        let centers: Vec<Option<DVec2>> = self
            .enemies
            .iter()
            .map(|e| e.body.active.then(|| e.body.center()))
            .collect();

        let mut effects = Vec::new();
        let mut bounties = Vec::new();

        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            if enemy.body.active {
                enemy.enemy_behaviour(index, tick, screen, player_center, &centers);
                fire_if_ready(&mut self.pool, &mut self.bullets, enemy, false, self.bullet_speed);
            }
            if enemy.take_damaged() {
                effects.push(enemy.body.center());
            }
            if !enemy.body.active && enemy.is_destroyed() {
                bounties.push(enemy.score_value().unwrap_or(0));
                effects.push(enemy.body.center());
                log::debug!("{} destroyed", enemy.sprite());
            }
        }

        // Destroyed and off-screen enemies both leave the list; only the former pay out
        self.enemies.retain(|e| e.body.active);

        for bounty in bounties {
            self.score += bounty;
            self.player.change_health(KILL_HEAL, false, 0.0);
        }
        for center in effects {
            self.spawn_effect(center, tick);
        }
    }

    fn spawn_enemies(&mut self, rng: &mut impl Rng) {
        let target = spawn_target(self.elapsed_time, self.enemies_limit);
        while self.enemies.len() < target {
            // All slots covered: try again next tick
            let Some(enemy) = self.factory.generate(self.elapsed_time, &self.enemies, rng) else {
                break;
            };
            self.enemies.push(enemy);
        }
    }

    fn effects_in_flight(&self) -> usize {
        self.decor.iter().filter(|d| d.is_explosion()).count()
    }

    /// Spawn an explosion unless the effect budget is used up
    fn spawn_effect(&mut self, center: DVec2, tick: f64) {
        if self.effects_in_flight() < self.effects_limit {
            self.decor.push(Decor::explosion(center, tick));
        }
    }

    /// Start over: score and clock zeroed, player restored, enemies cleared,
    /// active bullets parked in the pool. Idempotent.
    pub fn reset(&mut self) {
        self.score = 0;
        self.elapsed_time = 0.0;
        self.event = None;
        self.player.respawn(player_spawn(self.screen));
        self.enemies.clear();
        for bullet in self.bullets.drain(..) {
            self.pool.retire(bullet);
        }
        self.pool.trim();
        self.decor.retain(|d| d.is_cloud());
        log::info!("Session reset");
    }

    /// Pending event of the last update (not cleared by reading)
    pub fn event(&self) -> Option<Event> {
        self.event
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn player_health(&self) -> i32 {
        self.player.health()
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn screen(&self) -> DVec2 {
        self.screen
    }

    pub fn player(&self) -> &Aircraft {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Aircraft {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Aircraft] {
        &self.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn decor(&self) -> &[Decor] {
        &self.decor
    }

    pub fn pool(&self) -> &BulletPool {
        &self.pool
    }

    /// Replace the player's upgrade modifiers (clamped to 0..=100)
    pub fn apply_upgrade_modifiers(&mut self, modifiers: UpgradeModifiers) {
        self.player.apply_modifiers(modifiers);
    }

    /// Categorized mutable collections for the physics pass
    pub fn physics_set(&mut self) -> PhysicsSet<'_> {
        PhysicsSet {
            player: &mut self.player,
            enemies: &mut self.enemies,
            bullets: &mut self.bullets,
            decor: &mut self.decor,
        }
    }

    /// Read-only view of every active entity, back to front
    pub fn snapshot(&self) -> Vec<EntityView> {
        let mut views = Vec::with_capacity(
            self.decor.len() + self.enemies.len() + self.bullets.len() + 1,
        );

        for decor in self.decor.iter().filter(|d| d.body.active && d.is_cloud()) {
            views.push(decor_view(decor));
        }
        for enemy in self.enemies.iter().filter(|e| e.body.active) {
            views.push(aircraft_view(enemy, Category::Enemy, Facing::Down));
        }
        for bullet in self.bullets.iter().filter(|b| b.body.active) {
            let (category, facing, sprite) = if bullet.friendly {
                (Category::FriendlyBullet, Facing::Up, "bullet_friendly")
            } else {
                (Category::HostileBullet, Facing::Down, "bullet_hostile")
            };
            views.push(EntityView {
                category,
                position: bullet.body.position(),
                size: bullet.body.size,
                facing,
                sprite,
                hitbox: world_rects(&bullet.body),
                stunned: false,
            });
        }
        if self.player.body.active {
            views.push(aircraft_view(&self.player, Category::Player, Facing::Up));
        }
        for decor in self.decor.iter().filter(|d| d.body.active && d.is_explosion()) {
            views.push(decor_view(decor));
        }

        views
    }
}

fn world_rects(body: &Body) -> Vec<Rect> {
    body.hitbox()
        .map(|h| h.world_rects().collect())
        .unwrap_or_default()
}

fn aircraft_view(craft: &Aircraft, category: Category, facing: Facing) -> EntityView {
    EntityView {
        category,
        position: craft.body.position(),
        size: craft.body.size,
        facing,
        sprite: craft.sprite(),
        hitbox: world_rects(&craft.body),
        stunned: craft.is_stunned(),
    }
}

fn decor_view(decor: &Decor) -> EntityView {
    let (category, sprite) = if decor.is_cloud() {
        (Category::Cloud, "cloud")
    } else {
        (Category::Explosion, "explosion")
    };
    EntityView {
        category,
        position: decor.body.position(),
        size: decor.body.size,
        facing: Facing::Down,
        sprite,
        hitbox: Vec::new(),
        stunned: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::factory::BANDS;
    use crate::sim::physics::PhysicsManager;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const TICK: f64 = 60.0;

    fn manager() -> (EntityManager, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(42);
        let tuning = Tuning {
            cloud_count: 0,
            ..Default::default()
        };
        let em = EntityManager::new(&tuning, UpgradeModifiers::default(), &mut rng);
        (em, rng)
    }

    fn fire() -> PlayerIntents {
        PlayerIntents {
            attack: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_update_noop_unless_running() {
        let (mut em, mut rng) = manager();
        em.update(Phase::Paused, &fire(), TICK, &mut rng);
        assert_eq!(em.elapsed_time(), 0.0);
        assert!(em.bullets().is_empty());
        assert!(em.enemies().is_empty());
    }

    #[test]
    fn test_first_tick_fires_and_spawns() {
        let (mut em, mut rng) = manager();
        em.update(Phase::Running, &fire(), TICK, &mut rng);
        assert_eq!(em.bullets().len(), 1, "default modifiers fire a single shot");
        assert!(em.bullets()[0].friendly);
        assert!(!em.player().fire_ready());
        assert_eq!(em.enemies().len(), 1);
        assert!((em.elapsed_time() - 1.0 / TICK).abs() < 1e-12);
    }

    #[test]
    fn test_spawn_cap_scales_with_time() {
        let (mut em, mut rng) = manager();
        em.elapsed_time = 95.0;
        em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);
        assert_eq!(em.enemies().len(), 4);
    }

    #[test]
    fn test_spent_bullets_return_to_pool() {
        let (mut em, mut rng) = manager();
        em.update(Phase::Running, &fire(), TICK, &mut rng);
        assert_eq!(em.bullets().len(), 1);

        // Push the bullet off the top of the screen
        em.bullets[0].body.translate(DVec2::new(0.0, -2000.0));
        em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);
        assert!(em.bullets().is_empty());
        assert_eq!(em.pool().len(), 1);
    }

    #[test]
    fn test_destroyed_enemy_pays_out_and_heals() {
        let (mut em, mut rng) = manager();
        em.player.change_health(-50.0, false, 0.0);
        let health = em.player_health();

        let mut enemy = Aircraft::enemy(DVec2::new(100.0, 100.0), &BANDS[0][0]);
        enemy.change_health(-10_000.0, false, 0.0);
        em.enemies.push(enemy);

        em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);
        assert_eq!(em.score(), BANDS[0][0].score_value);
        assert_eq!(em.player_health(), health + KILL_HEAL as i32);
        assert!(em.decor().iter().any(|d| d.is_explosion()), "death effect");
    }

    #[test]
    fn test_enemy_leaving_screen_pays_nothing() {
        let (mut em, mut rng) = manager();
        let enemy = Aircraft::enemy(DVec2::new(100.0, 10_000.0), &BANDS[0][0]);
        em.enemies.push(enemy);

        em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);
        assert_eq!(em.score(), 0);
        assert!(em.enemies().iter().all(|e| e.body.position().y < 10_000.0));
        assert!(em.decor().is_empty());
    }

    #[test]
    fn test_player_death_raises_event_until_next_update() {
        let (mut em, mut rng) = manager();
        em.player.change_health(-10_000.0, false, 0.0);
        em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);
        assert_eq!(em.event(), Some(Event::SessionEnded));
        assert_eq!(em.event(), Some(Event::SessionEnded), "reading does not clear");

        em.reset();
        assert_eq!(em.event(), None);
        em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);
        assert_eq!(em.event(), None);
    }

    #[test]
    fn test_effect_budget_is_respected() {
        let (mut em, _) = manager();
        for _ in 0..20 {
            em.spawn_effect(DVec2::new(10.0, 10.0), TICK);
        }
        assert_eq!(em.effects_in_flight(), em.effects_limit);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut em, mut rng) = manager();
        for _ in 0..120 {
            em.update(Phase::Running, &fire(), TICK, &mut rng);
        }
        em.player.change_health(-40.0, true, 0.0);
        em.score = 1234;

        em.reset();
        let first = (
            em.score(),
            em.player_health(),
            em.player().body.position(),
            em.enemies().len(),
            em.bullets().len(),
            em.pool().len(),
            em.elapsed_time(),
        );
        em.reset();
        let second = (
            em.score(),
            em.player_health(),
            em.player().body.position(),
            em.enemies().len(),
            em.bullets().len(),
            em.pool().len(),
            em.elapsed_time(),
        );

        assert_eq!(first, second);
        assert_eq!(first.0, 0);
        assert_eq!(first.1, PLAYER_MAX_HEALTH);
        assert_eq!(first.3, 0);
        assert_eq!(first.4, 0);
        assert!(!em.player().is_stunned());
    }

    #[test]
    fn test_same_tick_spawns_never_share_a_slot() {
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let tuning = Tuning {
                cloud_count: 0,
                ..Default::default()
            };
            let mut em = EntityManager::new(&tuning, UpgradeModifiers::default(), &mut rng);
            em.elapsed_time = 95.0;
            em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);

            let positions: Vec<DVec2> = em.enemies().iter().map(|e| e.body.position()).collect();
            assert_eq!(positions.len(), 4);
            for (i, a) in positions.iter().enumerate() {
                assert!(
                    positions[i + 1..].iter().all(|b| a != b),
                    "seed {seed}: two enemies spawned at {a:?}"
                );
            }
        }
    }

    #[test]
    fn test_enemies_leaving_sideways_pay_nothing() {
        let (mut em, mut rng) = manager();
        let size = BANDS[0][0].size;
        em.enemies.push(Aircraft::enemy(DVec2::new(-size.x - 5.0, 100.0), &BANDS[0][0]));
        em.enemies.push(Aircraft::enemy(DVec2::new(em.screen().x + 5.0, 100.0), &BANDS[0][0]));

        em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);
        assert_eq!(em.score(), 0);
        assert_eq!(em.player_health(), PLAYER_MAX_HEALTH);
        assert!(em.enemies().iter().all(|e| e.body.position().y < 0.0), "only the fresh spawn is left");
        assert!(em.decor().is_empty(), "no explosion for an exit");
    }

    #[test]
    fn test_physics_hit_yields_one_effect_next_update() {
        let (mut em, mut rng) = manager();
        let target = em
            .player()
            .body
            .hitbox()
            .and_then(|h| h.world_rects().next())
            .map(|r| r.center())
            .expect("player has a hitbox");
        em.bullets
            .push(Bullet::new(target - BULLET_SIZE * 0.5, DVec2::ZERO, false, 10.0));

        let report = PhysicsManager::new(20.0).resolve_collisions(&mut em.physics_set());
        assert_eq!(report.player_hits, 1);
        assert!(em.player_health() < PLAYER_MAX_HEALTH);

        em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);
        assert_eq!(em.effects_in_flight(), 1);
        assert!(!em.player_mut().take_damaged(), "edge consumed by the update");

        em.update(Phase::Running, &PlayerIntents::default(), TICK, &mut rng);
        assert_eq!(em.effects_in_flight(), 1, "no second effect without a new hit");
    }

    #[test]
    fn test_snapshot_lists_active_entities() {
        let (mut em, mut rng) = manager();
        em.update(Phase::Running, &fire(), TICK, &mut rng);
        let views = em.snapshot();
        assert_eq!(views.iter().filter(|v| v.category == Category::Player).count(), 1);
        assert_eq!(views.iter().filter(|v| v.category == Category::Enemy).count(), 1);
        assert_eq!(views.iter().filter(|v| v.category == Category::FriendlyBullet).count(), 1);

        let player = views
            .iter()
            .find(|v| v.category == Category::Player)
            .expect("player view");
        assert_eq!(player.facing, Facing::Up);
        assert_eq!(player.hitbox.len(), 2);
    }

    #[test]
    fn test_upgrade_modifiers_change_pattern() {
        let (mut em, mut rng) = manager();
        em.apply_upgrade_modifiers(UpgradeModifiers::from_raw(25, 25, 25, 25, 100));
        em.update(Phase::Running, &fire(), TICK, &mut rng);
        assert_eq!(em.bullets().len(), 3);
    }
}

//! Fixed timestep simulation tick
//!
//! `Simulation` is the host-facing facade: it owns the entities, the
//! physics pass, the seeded RNG and the run phase, and advances all of
//! them in a fixed order once per call to [`Simulation::update`].

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::manager::EntityManager;
use super::physics::{CollisionReport, PhysicsManager};
use super::state::{EntityView, Event, Phase};
use crate::tuning::{Tuning, TuningError};
use crate::upgrades::UpgradeModifiers;

/// Held player input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
}

impl PlayerIntents {
    /// Held direction per axis; screen y grows downward so `up` is -1
    pub fn direction(&self) -> IVec2 {
        IVec2::new(
            self.right as i32 - self.left as i32,
            self.down as i32 - self.up as i32,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    phase: Phase,
    entities: EntityManager,
    physics: PhysicsManager,
    last_report: CollisionReport,
}

impl Simulation {
    /// Build a session in the `Idle` phase. Fails on invalid tuning.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let entities = EntityManager::new(&tuning, UpgradeModifiers::default(), &mut rng);
        let physics = PhysicsManager::new(tuning.melee_damage);
        log::info!(
            "Simulation created: seed {}, {}x{} @ {} ticks/s",
            seed,
            tuning.screen_width,
            tuning.screen_height,
            tuning.tick_rate
        );
        Ok(Self {
            tuning,
            seed,
            rng,
            phase: Phase::Idle,
            entities,
            physics,
            last_report: CollisionReport::default(),
        })
    }

    /// Advance one step at `tick` steps per second.
    ///
    /// Entity behaviour, shots and spawning run first, then integration and
    /// collisions. Returns the event raised this tick, if any. Does nothing
    /// outside the `Running` phase.
    pub fn update(&mut self, tick: f64, intents: &PlayerIntents) -> Option<Event> {
        if !(tick > 0.0) {
            log::warn!("Ignoring update with non-positive tick rate {tick}");
            return None;
        }
        // At or below the drag coefficient, `1 - drag/tick` would flip velocity
        if tick <= self.tuning.player_drag {
            log::warn!(
                "Ignoring update: tick rate {tick} must exceed player drag {}",
                self.tuning.player_drag
            );
            return None;
        }
        if self.phase != Phase::Running {
            return None;
        }

        self.entities.update(self.phase, intents, tick, &mut self.rng);
        self.last_report = self
            .physics
            .update(self.phase, tick, self.entities.physics_set());

        let event = self.entities.event();
        if event == Some(Event::SessionEnded) {
            self.phase = Phase::GameOver;
            log::info!("Session ended with score {}", self.entities.score());
        }
        event
    }

    /// [`Simulation::update`] at the configured tick rate
    pub fn step(&mut self, intents: &PlayerIntents) -> Option<Event> {
        self.update(self.tuning.tick_rate, intents)
    }

    /// Begin play. Starting from `GameOver` resets the session first.
    pub fn start(&mut self) {
        match self.phase {
            Phase::Idle => {}
            Phase::GameOver => self.entities.reset(),
            Phase::Running | Phase::Paused => return,
        }
        self.phase = Phase::Running;
        log::info!("Session started");
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// Reset and immediately start a new run
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Reset the session and return to `Idle`. Idempotent.
    pub fn reset(&mut self) {
        self.entities.reset();
        self.phase = Phase::Idle;
        self.last_report = CollisionReport::default();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.entities.score()
    }

    pub fn player_health(&self) -> i32 {
        self.entities.player_health()
    }

    /// Replace the player's upgrade modifiers; out-of-range values are clamped
    pub fn apply_upgrade_modifiers(&mut self, modifiers: UpgradeModifiers) {
        self.entities.apply_upgrade_modifiers(modifiers);
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    pub fn snapshot(&self) -> Vec<EntityView> {
        self.entities.snapshot()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Collision statistics of the most recent physics pass
    pub fn last_report(&self) -> CollisionReport {
        self.last_report
    }
}

//! Difficulty-scaled enemy generation
//!
//! Elapsed session time raises the ceiling of a uniform roll; the roll picks
//! one of four difficulty bands and an archetype inside it. All randomness
//! comes from the RNG passed in, so a seeded run spawns the same waves.
//! Spawn slots are a grid of cells above the playfield; a cell still
//! covered by an earlier enemy is skipped until that enemy moves on.

use glam::DVec2;
use rand::Rng;

use super::aircraft::{Aircraft, BulletPattern};
use super::hitbox::Rect;
use crate::consts::SPAWN_STEP_SECS;

/// Static stat block for one enemy type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    /// Also used as the sprite reference
    pub name: &'static str,
    pub health: i32,
    pub speed: f64,
    pub damage: f64,
    pub pattern: BulletPattern,
    pub fire_rate: f64,
    /// Damage divisor; every archetype keeps this well above zero
    pub armor: f64,
    pub score_value: u64,
    pub size: DVec2,
}

#[allow(clippy::too_many_arguments)]
const fn archetype(
    name: &'static str,
    health: i32,
    speed: f64,
    damage: f64,
    pattern: BulletPattern,
    fire_rate: f64,
    armor: f64,
    score_value: u64,
    side: f64,
) -> Archetype {
    Archetype {
        name,
        health,
        speed,
        damage,
        pattern,
        fire_rate,
        armor,
        score_value,
        size: DVec2::new(side, side),
    }
}

const BAND_EASY: [Archetype; 2] = [
    archetype("scout", 20, 120.0, 5.0, BulletPattern::Simple, 0.8, 1.0, 100, 150.0),
    archetype("drone", 30, 100.0, 6.0, BulletPattern::Simple, 1.0, 1.0, 120, 160.0),
];

const BAND_MEDIUM: [Archetype; 2] = [
    archetype("raider", 50, 140.0, 8.0, BulletPattern::Double, 1.0, 1.2, 200, 170.0),
    archetype("gunship", 70, 90.0, 8.0, BulletPattern::Simple, 1.5, 1.5, 250, 190.0),
];

const BAND_HARD: [Archetype; 2] = [
    archetype("striker", 90, 160.0, 10.0, BulletPattern::Triple, 1.0, 1.5, 400, 180.0),
    archetype("warden", 120, 80.0, 12.0, BulletPattern::Double, 1.2, 2.0, 450, 210.0),
];

const BAND_BRUTAL: [Archetype; 2] = [
    archetype("marauder", 150, 170.0, 12.0, BulletPattern::TripleAngle, 1.2, 2.0, 700, 200.0),
    archetype("dreadnought", 250, 60.0, 15.0, BulletPattern::Triple, 1.5, 3.0, 1000, 240.0),
];

/// Archetype tables, easiest band first
pub const BANDS: [&[Archetype]; 4] = [&BAND_EASY, &BAND_MEDIUM, &BAND_HARD, &BAND_BRUTAL];

/// Rows of spawn slots stacked above the playfield
const SLOT_ROWS: usize = 2;

/// Band index for a difficulty roll in `0..=100`
pub fn band_for(roll: u32) -> usize {
    match roll {
        0..=25 => 0,
        26..=50 => 1,
        51..=75 => 2,
        _ => 3,
    }
}

/// Concurrent enemy target for the given session time
pub fn spawn_target(elapsed: f64, enemies_limit: usize) -> usize {
    let steps = (elapsed.max(0.0) / SPAWN_STEP_SECS).floor() as usize;
    (1 + steps).min(enemies_limit)
}

/// Generates enemies from the archetype tables
#[derive(Debug, Clone)]
pub struct EnemyFactory {
    max_difficulty: f64,
    /// Footprint of one slot (largest archetype)
    cell: DVec2,
    /// Candidate top-left corners above the visible playfield
    slots: Vec<DVec2>,
}

impl EnemyFactory {
    pub fn new(screen: DVec2, max_difficulty: f64) -> Self {
        let cell = BANDS
            .iter()
            .flat_map(|band| band.iter())
            .fold(DVec2::ZERO, |acc, a| acc.max(a.size));

        // Columns spaced by the widest archetype so fresh spawns never overlap
        let columns = ((screen.x / cell.x).floor() as usize).max(1);
        let margin = ((screen.x - columns as f64 * cell.x) * 0.5).max(0.0);

        let mut slots = Vec::with_capacity(columns * SLOT_ROWS);
        for row in 0..SLOT_ROWS {
            for column in 0..columns {
                slots.push(DVec2::new(
                    margin + column as f64 * cell.x,
                    -((row + 1) as f64) * cell.y,
                ));
            }
        }

        Self {
            max_difficulty,
            cell,
            slots,
        }
    }

    pub fn slots(&self) -> &[DVec2] {
        &self.slots
    }

    /// Upper bound of the difficulty roll at `elapsed` seconds (0..=100)
    pub fn roll_ceiling(&self, elapsed: f64) -> u32 {
        let difficulty = elapsed.clamp(0.0, self.max_difficulty);
        (100.0 * difficulty / self.max_difficulty).floor() as u32
    }

    /// Pick an archetype for `elapsed` seconds of play
    pub fn pick_archetype(&self, elapsed: f64, rng: &mut impl Rng) -> &'static Archetype {
        let roll = rng.random_range(0..=self.roll_ceiling(elapsed));
        let band = BANDS[band_for(roll)];
        &band[rng.random_range(0..band.len())]
    }

    /// Slots whose cell no active enemy in `occupied` overlaps
    pub fn free_slots(&self, occupied: &[Aircraft]) -> Vec<DVec2> {
        self.slots
            .iter()
            .copied()
            .filter(|slot| {
                let cell = Rect::new(slot.x, slot.y, self.cell.x, self.cell.y);
                !occupied.iter().filter(|e| e.body.active).any(|e| {
                    let pos = e.body.position();
                    cell.overlaps(&Rect::new(pos.x, pos.y, e.body.size.x, e.body.size.y))
                })
            })
            .collect()
    }

    /// Build one enemy in a random free spawn slot.
    /// Returns `None` when every slot is still covered.
    pub fn generate(
        &self,
        elapsed: f64,
        occupied: &[Aircraft],
        rng: &mut impl Rng,
    ) -> Option<Aircraft> {
        let free = self.free_slots(occupied);
        if free.is_empty() {
            return None;
        }
        let archetype = self.pick_archetype(elapsed, rng);
        let slot = free[rng.random_range(0..free.len())];
        log::debug!(
            "Spawning {} at ({:.0}, {:.0}) t={:.1}s",
            archetype.name,
            slot.x,
            slot.y,
            elapsed
        );
        Some(Aircraft::enemy(slot, archetype))
    }
}

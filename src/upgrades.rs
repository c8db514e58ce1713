//! Player upgrade modifiers and the upgrade point ledger
//!
//! Modifiers are integers in `0..=100` that linearly perturb the player's
//! base stats. Values coming from outside (UI, save data) are clamped here,
//! at the application boundary; the simulation never sees anything else.
//!
//! Points are earned at the end of a run (one per `SCORE_PER_POINT`) and
//! spent one at a time. Persisting the ledger is left to the host, which
//! gets a JSON form through serde.

use serde::{Deserialize, Serialize};

use crate::sim::BulletPattern;

/// Upper bound of every modifier
pub const MAX_MODIFIER: u8 = 100;

/// Score needed per upgrade point awarded at game over
pub const SCORE_PER_POINT: u64 = 500;

/// One upgradeable stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeStat {
    Velocity,
    Damage,
    Firerate,
    Armor,
    BulletType,
}

impl UpgradeStat {
    pub const ALL: [UpgradeStat; 5] = [
        UpgradeStat::Velocity,
        UpgradeStat::Damage,
        UpgradeStat::Firerate,
        UpgradeStat::Armor,
        UpgradeStat::BulletType,
    ];
}

/// Modifier values applied to the player craft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeModifiers {
    pub velocity: u8,
    pub damage: u8,
    pub firerate: u8,
    pub armor: u8,
    pub bullet_type: u8,
}

impl Default for UpgradeModifiers {
    fn default() -> Self {
        Self {
            velocity: 25,
            damage: 25,
            firerate: 25,
            armor: 25,
            bullet_type: 0,
        }
    }
}

impl UpgradeModifiers {
    /// Build from unchecked integers, clamping each into `0..=100`
    pub fn from_raw(velocity: i32, damage: i32, firerate: i32, armor: i32, bullet_type: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, MAX_MODIFIER as i32) as u8;
        Self {
            velocity: clamp(velocity),
            damage: clamp(damage),
            firerate: clamp(firerate),
            armor: clamp(armor),
            bullet_type: clamp(bullet_type),
        }
    }

    /// Same values with every field capped at `MAX_MODIFIER`
    pub fn clamped(self) -> Self {
        Self {
            velocity: self.velocity.min(MAX_MODIFIER),
            damage: self.damage.min(MAX_MODIFIER),
            firerate: self.firerate.min(MAX_MODIFIER),
            armor: self.armor.min(MAX_MODIFIER),
            bullet_type: self.bullet_type.min(MAX_MODIFIER),
        }
    }

    pub fn get(&self, stat: UpgradeStat) -> u8 {
        match stat {
            UpgradeStat::Velocity => self.velocity,
            UpgradeStat::Damage => self.damage,
            UpgradeStat::Firerate => self.firerate,
            UpgradeStat::Armor => self.armor,
            UpgradeStat::BulletType => self.bullet_type,
        }
    }

    fn slot(&mut self, stat: UpgradeStat) -> &mut u8 {
        match stat {
            UpgradeStat::Velocity => &mut self.velocity,
            UpgradeStat::Damage => &mut self.damage,
            UpgradeStat::Firerate => &mut self.firerate,
            UpgradeStat::Armor => &mut self.armor,
            UpgradeStat::BulletType => &mut self.bullet_type,
        }
    }

    /// Bullet pattern unlocked by the bullet type stat
    pub fn pattern(&self) -> BulletPattern {
        BulletPattern::from_bullet_type(self.bullet_type)
    }
}

/// Spendable upgrade points plus the modifiers bought with them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeLedger {
    pub points: u32,
    pub modifiers: UpgradeModifiers,
}

impl UpgradeLedger {
    /// Spend one point on `stat`. Returns false if capped or out of points.
    pub fn increase(&mut self, stat: UpgradeStat) -> bool {
        if self.points == 0 {
            return false;
        }
        let value = self.modifiers.slot(stat);
        if *value >= MAX_MODIFIER {
            return false;
        }
        *value += 1;
        self.points -= 1;
        true
    }

    /// Refund one point from `stat`. Returns false if already at zero.
    pub fn decrease(&mut self, stat: UpgradeStat) -> bool {
        let value = self.modifiers.slot(stat);
        if *value == 0 {
            return false;
        }
        *value -= 1;
        self.points += 1;
        true
    }

    /// Grant points for a finished run; returns how many were added
    pub fn award_for_score(&mut self, score: u64) -> u32 {
        let earned = u32::try_from(score / SCORE_PER_POINT).unwrap_or(u32::MAX);
        self.points = self.points.saturating_add(earned);
        if earned > 0 {
            log::info!("Awarded {} upgrade points (score {})", earned, score);
        }
        earned
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a stored ledger; out-of-range modifiers are clamped
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut ledger: UpgradeLedger = serde_json::from_str(json)?;
        ledger.modifiers = ledger.modifiers.clamped();
        Ok(ledger)
    }
}

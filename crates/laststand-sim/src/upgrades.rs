//! Between-wave upgrade tracks.
//!
//! Each track has three levels with a fixed effect table. Multiplicative
//! effects multiply into the player's running multiplier, additive effects
//! add to the stat.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use laststand_core::constants::MAX_UPGRADE_LEVEL;
use laststand_core::enums::UpgradeTrackId;

/// A player stat an upgrade can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stat {
    MaxHealth,
    Speed,
    Damage,
    FireRate,
    ReloadSpeed,
    Magazine,
    CritChance,
    Dodge,
    DamageReduction,
    Penetration,
    SkillRange,
    SkillDamage,
    SkillCharges,
    Regen,
    Invulnerability,
    DashDistance,
    Revives,
}

/// One line of an upgrade level's effect table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Modifier {
    Multiply(Stat, f64),
    Add(Stat, f64),
    Heal(f64),
}

use Modifier::{Add, Heal, Multiply};

/// Effects granted by reaching `level` (1-based) on `track`.
pub fn level_effects(track: UpgradeTrackId, level: u8) -> &'static [Modifier] {
    match (track, level) {
        (UpgradeTrackId::Vitality, 1) => &[Add(Stat::MaxHealth, 25.0), Heal(25.0)],
        (UpgradeTrackId::Vitality, 2) => &[Add(Stat::MaxHealth, 40.0), Heal(40.0)],
        (UpgradeTrackId::Vitality, 3) => &[
            Add(Stat::MaxHealth, 60.0),
            Heal(60.0),
            Add(Stat::DamageReduction, 0.05),
        ],
        (UpgradeTrackId::Agility, 1) => &[Multiply(Stat::Speed, 1.2)],
        (UpgradeTrackId::Agility, 2) => &[Multiply(Stat::Speed, 1.35), Add(Stat::Dodge, 0.05)],
        (UpgradeTrackId::Agility, 3) => &[
            Multiply(Stat::Speed, 1.5),
            Multiply(Stat::DashDistance, 1.5),
        ],
        (UpgradeTrackId::Firepower, 1) => &[Multiply(Stat::Damage, 1.3)],
        (UpgradeTrackId::Firepower, 2) => &[
            Multiply(Stat::Damage, 1.5),
            Add(Stat::CritChance, 0.1),
        ],
        (UpgradeTrackId::Firepower, 3) => &[
            Multiply(Stat::Damage, 1.75),
            Add(Stat::Penetration, 1.0),
        ],
        (UpgradeTrackId::RateOfFire, 1) => &[Multiply(Stat::FireRate, 1.25)],
        (UpgradeTrackId::RateOfFire, 2) => &[
            Multiply(Stat::FireRate, 1.45),
            Multiply(Stat::ReloadSpeed, 1.2),
        ],
        (UpgradeTrackId::RateOfFire, 3) => &[
            Multiply(Stat::FireRate, 1.7),
            Multiply(Stat::Magazine, 1.5),
        ],
        (UpgradeTrackId::SkillPower, 1) => &[Multiply(Stat::SkillRange, 1.3)],
        (UpgradeTrackId::SkillPower, 2) => &[
            Multiply(Stat::SkillRange, 1.5),
            Multiply(Stat::SkillDamage, 1.5),
        ],
        (UpgradeTrackId::SkillPower, 3) => &[
            Multiply(Stat::SkillRange, 1.7),
            Multiply(Stat::SkillDamage, 2.0),
            Add(Stat::SkillCharges, 1.0),
        ],
        (UpgradeTrackId::Survivability, 1) => &[Add(Stat::Regen, 3.0)],
        (UpgradeTrackId::Survivability, 2) => &[
            Add(Stat::Regen, 5.0),
            Multiply(Stat::Invulnerability, 1.5),
        ],
        (UpgradeTrackId::Survivability, 3) => &[Add(Stat::Regen, 8.0), Add(Stat::Revives, 1.0)],
        _ => &[],
    }
}

/// Per-run track levels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpgradeState {
    levels: [u8; UpgradeTrackId::ALL.len()],
}

fn index(track: UpgradeTrackId) -> usize {
    track as usize
}

impl UpgradeState {
    pub fn level(&self, track: UpgradeTrackId) -> u8 {
        self.levels[index(track)]
    }

    pub fn is_maxed(&self, track: UpgradeTrackId) -> bool {
        self.level(track) >= MAX_UPGRADE_LEVEL
    }

    /// Tracks that can still level, in catalog order.
    pub fn available(&self) -> Vec<UpgradeTrackId> {
        UpgradeTrackId::ALL
            .into_iter()
            .filter(|t| !self.is_maxed(*t))
            .collect()
    }

    /// Draw up to `size` distinct non-maxed tracks uniformly at random.
    pub fn roll_offer<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<UpgradeTrackId> {
        let available = self.available();
        let mut offer: Vec<UpgradeTrackId> = available
            .choose_multiple(rng, size.min(available.len()))
            .copied()
            .collect();
        offer.sort();
        offer
    }

    /// Raise `track` one level. Returns the new level's effects, or `None`
    /// if the track is already maxed.
    pub fn level_up(&mut self, track: UpgradeTrackId) -> Option<(u8, &'static [Modifier])> {
        if self.is_maxed(track) {
            return None;
        }
        let slot = &mut self.levels[index(track)];
        *slot += 1;
        Some((*slot, level_effects(track, *slot)))
    }
}

/// An open upgrade choice with its decision window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeOffer {
    pub tracks: Vec<UpgradeTrackId>,
    pub remaining_secs: f64,
}

impl UpgradeOffer {
    /// Timeout or explicit "no choice": uniform pick among the offered.
    pub fn auto_pick<R: Rng>(&self, rng: &mut R) -> Option<UpgradeTrackId> {
        self.tracks.choose(rng).copied()
    }

    pub fn contains(&self, track: UpgradeTrackId) -> bool {
        self.tracks.contains(&track)
    }
}

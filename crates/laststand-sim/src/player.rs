//! The player controller: movement, aim, dash, skill, combo, buffs and the
//! upgrade-driven stat block.

use rand::Rng;
use serde::{Deserialize, Serialize};

use laststand_core::constants::*;
use laststand_core::entity::{Body, DamageOutcome, Health};
use laststand_core::enums::{CollisionGroup, WeaponKind};
use laststand_core::types::{Vector2, VectorExt};

use crate::upgrades::{Modifier, Stat};
use crate::weapon::{Weapon, WeaponModifiers};

/// Upgrade-derived stats. Buffs are kept separately in [`Buffs`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStats {
    pub speed_mult: f64,
    pub damage_mult: f64,
    pub fire_rate_mult: f64,
    pub reload_speed_mult: f64,
    pub magazine_mult: f64,
    pub crit_chance: f64,
    pub dodge_chance: f64,
    pub damage_reduction: f64,
    pub penetration_bonus: u32,
    pub skill_range_mult: f64,
    pub skill_damage_mult: f64,
    pub skill_charges: u32,
    pub regen_per_sec: f64,
    pub invulnerability_mult: f64,
    pub dash_distance_mult: f64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            speed_mult: 1.0,
            damage_mult: 1.0,
            fire_rate_mult: 1.0,
            reload_speed_mult: 1.0,
            magazine_mult: 1.0,
            crit_chance: 0.0,
            dodge_chance: 0.0,
            damage_reduction: 0.0,
            penetration_bonus: 0,
            skill_range_mult: 1.0,
            skill_damage_mult: 1.0,
            skill_charges: 1,
            regen_per_sec: 0.0,
            invulnerability_mult: 1.0,
            dash_distance_mult: 1.0,
        }
    }
}

/// Timed pickup buffs (seconds remaining).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Buffs {
    pub speed_secs: f64,
    pub damage_secs: f64,
    pub shield_secs: f64,
}

impl Buffs {
    pub fn speed_mult(&self) -> f64 {
        if self.speed_secs > 0.0 {
            SPEED_BOOST_MULT
        } else {
            1.0
        }
    }

    pub fn damage_mult(&self) -> f64 {
        if self.damage_secs > 0.0 {
            DAMAGE_BOOST_MULT
        } else {
            1.0
        }
    }

    pub fn has_shield(&self) -> bool {
        self.shield_secs > 0.0
    }

    fn tick(&mut self, dt: f64) {
        self.speed_secs = (self.speed_secs - dt).max(0.0);
        self.damage_secs = (self.damage_secs - dt).max(0.0);
        self.shield_secs = (self.shield_secs - dt).max(0.0);
    }
}

/// Area pulse produced by the skill (or a bomb pickup).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blast {
    pub center: Vector2,
    pub radius: f64,
    pub damage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: Health,
    /// Unit aim direction.
    pub aim: Vector2,
    pub move_input: Vector2,
    last_move_dir: Vector2,
    pub shooting: bool,
    pub weapons: Vec<Weapon>,
    pub current_weapon: usize,
    pub score: u64,
    pub kills: u32,
    pub combo: u32,
    combo_timer_secs: f64,
    pub buffs: Buffs,
    pub stats: PlayerStats,
    pub revives: u32,
    skill_charges_left: u32,
    skill_cooldown_secs: f64,
    dash_cooldown_secs: f64,
    dash_remaining_secs: f64,
    dash_direction: Vector2,
    invulnerable_secs: f64,
    /// Decaying impulse from enemy hits.
    pub knockback: Vector2,
}

impl Player {
    pub fn new(position: Vector2) -> Self {
        Self {
            body: Body::new(position, PLAYER_RADIUS, CollisionGroup::Player),
            health: Health::new(PLAYER_MAX_HEALTH),
            aim: Vector2::X,
            move_input: Vector2::ZERO,
            last_move_dir: Vector2::X,
            shooting: false,
            weapons: vec![Weapon::new(WeaponKind::Pistol)],
            current_weapon: 0,
            score: 0,
            kills: 0,
            combo: 0,
            combo_timer_secs: 0.0,
            buffs: Buffs::default(),
            stats: PlayerStats::default(),
            revives: 0,
            skill_charges_left: 1,
            skill_cooldown_secs: 0.0,
            dash_cooldown_secs: 0.0,
            dash_remaining_secs: 0.0,
            dash_direction: Vector2::X,
            invulnerable_secs: 0.0,
            knockback: Vector2::ZERO,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_remaining_secs > 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.is_dashing() || self.invulnerable_secs > 0.0
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapons.get(self.current_weapon)
    }

    pub fn weapon_mut(&mut self) -> Option<&mut Weapon> {
        self.weapons.get_mut(self.current_weapon)
    }

    pub fn weapon_modifiers(&self) -> WeaponModifiers {
        WeaponModifiers {
            fire_rate: self.stats.fire_rate_mult,
            reload_speed: self.stats.reload_speed_mult,
            magazine: self.stats.magazine_mult,
        }
    }

    /// Upgrade damage times the damage buff.
    pub fn damage_multiplier(&self) -> f64 {
        self.stats.damage_mult * self.buffs.damage_mult()
    }

    pub fn speed(&self) -> f64 {
        PLAYER_SPEED * self.stats.speed_mult * self.buffs.speed_mult()
    }

    pub fn set_movement(&mut self, direction: Vector2) {
        self.move_input = direction.limited(1.0);
        if self.move_input != Vector2::ZERO {
            self.last_move_dir = self.move_input.normalize();
        }
    }

    pub fn aim_at(&mut self, point: Vector2) {
        let dir = self.body.position.direction_to(point);
        if dir != Vector2::ZERO {
            self.aim = dir;
        }
    }

    /// Select an owned weapon. Out-of-range slots are ignored.
    pub fn switch_weapon(&mut self, slot: usize) -> bool {
        if slot >= self.weapons.len() || slot == self.current_weapon {
            return false;
        }
        self.current_weapon = slot;
        true
    }

    pub fn reload(&mut self) -> bool {
        let mods = self.weapon_modifiers();
        self.weapon_mut().is_some_and(|w| w.start_reload(&mods))
    }

    // --- Combo & score ---

    pub fn combo_multiplier(&self) -> f64 {
        let idx = (self.combo as usize).min(COMBO_MULTIPLIERS.len() - 1);
        COMBO_MULTIPLIERS[idx]
    }

    /// Award `base` points scaled by the current combo (before this kill
    /// extends it), rounded down. Returns the points added.
    pub fn add_score(&mut self, base: u64) -> u64 {
        let points = (base as f64 * self.combo_multiplier()).floor() as u64;
        self.score += points;
        points
    }

    pub fn add_kill(&mut self) {
        self.kills += 1;
        self.combo += 1;
        self.combo_timer_secs = COMBO_TIMEOUT_SECS;
    }

    // --- Dash & skill ---

    pub fn dash_ready(&self) -> f64 {
        1.0 - (self.dash_cooldown_secs / DASH_COOLDOWN_SECS).clamp(0.0, 1.0)
    }

    /// Start a dash along the last movement direction. False on cooldown.
    pub fn try_dash(&mut self) -> bool {
        if self.dash_cooldown_secs > 0.0 || self.is_dashing() {
            return false;
        }
        self.dash_direction = if self.move_input != Vector2::ZERO {
            self.last_move_dir
        } else {
            self.aim
        };
        self.dash_remaining_secs = DASH_DURATION_SECS * self.stats.dash_distance_mult;
        self.dash_cooldown_secs = DASH_COOLDOWN_SECS;
        true
    }

    pub fn skill_charges_left(&self) -> u32 {
        self.skill_charges_left
    }

    pub fn skill_ready(&self) -> f64 {
        if self.skill_charges_left > 0 {
            return 1.0;
        }
        1.0 - (self.skill_cooldown_secs / SKILL_COOLDOWN_SECS).clamp(0.0, 1.0)
    }

    pub fn skill_blast(&self) -> Blast {
        Blast {
            center: self.body.position,
            radius: SKILL_RADIUS * self.stats.skill_range_mult,
            damage: SKILL_DAMAGE * self.stats.skill_damage_mult,
        }
    }

    /// Spend a skill charge. `None` while on cooldown.
    pub fn try_use_skill(&mut self) -> Option<Blast> {
        if self.skill_charges_left == 0 {
            return None;
        }
        self.skill_charges_left -= 1;
        if self.skill_cooldown_secs <= 0.0 {
            self.skill_cooldown_secs = SKILL_COOLDOWN_SECS;
        }
        Some(self.skill_blast())
    }

    // --- Damage ---

    /// Damage after invulnerability, shield, dodge and reduction. A
    /// surviving hit opens the post-hit invulnerability window.
    pub fn take_damage<R: Rng>(&mut self, amount: f64, rng: &mut R) -> DamageOutcome {
        if !self.is_alive() || self.is_invulnerable() || self.buffs.has_shield() {
            return DamageOutcome::Ignored;
        }
        if self.stats.dodge_chance > 0.0 && rng.gen_bool(self.stats.dodge_chance.clamp(0.0, 1.0)) {
            return DamageOutcome::Ignored;
        }
        let reduced = amount * (1.0 - self.stats.damage_reduction.clamp(0.0, 0.9));
        let outcome = self.health.take_damage(reduced);
        if outcome == DamageOutcome::Survived {
            self.invulnerable_secs = PLAYER_INVULNERABILITY_SECS * self.stats.invulnerability_mult;
        }
        outcome
    }

    /// Consume a revive if one is banked.
    pub fn try_revive(&mut self) -> bool {
        if self.is_alive() || self.revives == 0 {
            return false;
        }
        self.revives -= 1;
        self.health.revive(REVIVE_HEALTH_FRACTION);
        self.invulnerable_secs = PLAYER_INVULNERABILITY_SECS * self.stats.invulnerability_mult;
        true
    }

    // --- Upgrades ---

    pub fn apply_modifier(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Heal(amount) => self.health.heal(amount),
            Modifier::Multiply(stat, factor) => {
                let s = &mut self.stats;
                match stat {
                    Stat::Speed => s.speed_mult *= factor,
                    Stat::Damage => s.damage_mult *= factor,
                    Stat::FireRate => s.fire_rate_mult *= factor,
                    Stat::ReloadSpeed => s.reload_speed_mult *= factor,
                    Stat::Magazine => s.magazine_mult *= factor,
                    Stat::SkillRange => s.skill_range_mult *= factor,
                    Stat::SkillDamage => s.skill_damage_mult *= factor,
                    Stat::Invulnerability => s.invulnerability_mult *= factor,
                    Stat::DashDistance => s.dash_distance_mult *= factor,
                    other => log::warn!("multiplicative modifier on additive stat {other:?}"),
                }
            }
            Modifier::Add(stat, amount) => match stat {
                Stat::MaxHealth => self.health.raise_max(amount),
                Stat::CritChance => self.stats.crit_chance += amount,
                Stat::Dodge => self.stats.dodge_chance += amount,
                Stat::DamageReduction => self.stats.damage_reduction += amount,
                Stat::Penetration => self.stats.penetration_bonus += amount.round() as u32,
                Stat::SkillCharges => {
                    let extra = amount.round() as u32;
                    self.stats.skill_charges += extra;
                    self.skill_charges_left += extra;
                }
                Stat::Regen => self.stats.regen_per_sec += amount,
                Stat::Revives => self.revives += amount.round() as u32,
                other => log::warn!("additive modifier on multiplicative stat {other:?}"),
            },
        }
    }

    // --- Per-tick update ---

    /// Count down every player timer, regenerate, then move.
    pub fn update(&mut self, dt: f64) {
        self.health.tick(dt);
        self.buffs.tick(dt);
        self.invulnerable_secs = (self.invulnerable_secs - dt).max(0.0);
        self.dash_cooldown_secs = (self.dash_cooldown_secs - dt).max(0.0);

        if self.combo > 0 {
            self.combo_timer_secs -= dt;
            if self.combo_timer_secs <= 0.0 {
                self.combo = 0;
                self.combo_timer_secs = 0.0;
            }
        }

        if self.skill_charges_left < self.stats.skill_charges {
            self.skill_cooldown_secs -= dt;
            if self.skill_cooldown_secs <= 0.0 {
                self.skill_charges_left += 1;
                self.skill_cooldown_secs = if self.skill_charges_left < self.stats.skill_charges {
                    SKILL_COOLDOWN_SECS
                } else {
                    0.0
                };
            }
        }

        let mods = self.weapon_modifiers();
        for weapon in &mut self.weapons {
            weapon.tick(dt, &mods);
        }

        if self.stats.regen_per_sec > 0.0 {
            self.health.heal(self.stats.regen_per_sec * dt);
        }

        if self.is_dashing() {
            self.dash_remaining_secs = (self.dash_remaining_secs - dt).max(0.0);
            self.body.velocity = self.dash_direction * DASH_SPEED;
        } else {
            self.body.velocity = self.move_input * self.speed() + self.knockback;
        }
        self.knockback *= KNOCKBACK_FRICTION;
        self.body.integrate(dt);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    #[test]
    fn test_combo_decays_after_timeout() {
        let mut player = Player::new(Vector2::ZERO);
        player.add_kill();
        player.update(1.5);
        assert_eq!(player.combo, 1);
        player.add_kill();
        assert_eq!(player.combo, 2);
        player.update(1.5);
        assert_eq!(player.combo, 2, "second kill reset the timer");
        player.update(0.5);
        assert_eq!(player.combo, 0);
    }

    #[test]
    fn test_score_uses_combo_before_kill() {
        let mut player = Player::new(Vector2::ZERO);
        assert_eq!(player.add_score(10), 10);
        player.add_kill();
        assert_eq!(player.add_score(10), 15);
        player.combo = 50;
        assert_eq!(player.combo_multiplier(), 5.0);
    }

    #[test]
    fn test_combo_score_rounds_down() {
        let mut player = Player::new(Vector2::ZERO);
        player.combo = 1;
        // 175 * 1.5 = 262.5
        assert_eq!(player.add_score(175), 262);
        player.combo = 3;
        // 25 * 2.5 = 62.5
        assert_eq!(player.add_score(25), 62);
        assert_eq!(player.score, 324);
    }

    #[test]
    fn test_shield_negates_damage() {
        let mut player = Player::new(Vector2::ZERO);
        player.buffs.shield_secs = SHIELD_SECS;
        let outcome = player.take_damage(500.0, &mut rng());
        assert_eq!(outcome, DamageOutcome::Ignored);
        assert!(!outcome.killed());
        assert_eq!(player.health.current(), PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_post_hit_invulnerability() {
        let mut player = Player::new(Vector2::ZERO);
        let mut rng = rng();
        assert_eq!(player.take_damage(10.0, &mut rng), DamageOutcome::Survived);
        assert_eq!(player.take_damage(10.0, &mut rng), DamageOutcome::Ignored);
        player.update(PLAYER_INVULNERABILITY_SECS);
        assert_eq!(player.take_damage(10.0, &mut rng), DamageOutcome::Survived);
        assert_eq!(player.health.current(), 80.0);
    }

    #[test]
    fn test_damage_reduction_scales_hits() {
        let mut player = Player::new(Vector2::ZERO);
        player.stats.damage_reduction = 0.05;
        player.take_damage(20.0, &mut rng());
        assert!((player.health.current() - 81.0).abs() < 1e-9);
    }

    #[test]
    fn test_dash_moves_and_protects() {
        let mut player = Player::new(Vector2::ZERO);
        player.set_movement(Vector2::new(0.0, 1.0));
        assert!(player.try_dash());
        assert!(!player.try_dash());
        assert!(player.is_invulnerable());
        player.update(0.1);
        assert!((player.body.position.y - DASH_SPEED * 0.1).abs() < 1e-9);
        player.update(0.1);
        assert!(!player.is_dashing());
        player.update(DASH_COOLDOWN_SECS);
        assert!(player.try_dash());
    }

    #[test]
    fn test_skill_cooldown_and_charges() {
        let mut player = Player::new(Vector2::ZERO);
        assert!(player.try_use_skill().is_some());
        assert!(player.try_use_skill().is_none());
        player.update(SKILL_COOLDOWN_SECS);
        assert_eq!(player.skill_ready(), 1.0);

        player.apply_modifier(Modifier::Add(Stat::SkillCharges, 1.0));
        assert!(player.try_use_skill().is_some());
        assert!(player.try_use_skill().is_some());
        assert!(player.try_use_skill().is_none());
    }

    #[test]
    fn test_buff_does_not_erase_upgrade() {
        let mut player = Player::new(Vector2::ZERO);
        player.apply_modifier(Modifier::Multiply(Stat::Speed, 1.2));
        player.buffs.speed_secs = SPEED_BOOST_SECS;
        assert!((player.speed() - PLAYER_SPEED * 1.2 * 1.5).abs() < 1e-9);
        player.update(SPEED_BOOST_SECS);
        assert!((player.speed() - PLAYER_SPEED * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_max_health_upgrade_and_heal() {
        let mut player = Player::new(Vector2::ZERO);
        player.take_damage(50.0, &mut rng());
        player.apply_modifier(Modifier::Add(Stat::MaxHealth, 25.0));
        player.apply_modifier(Modifier::Heal(25.0));
        assert_eq!(player.health.max(), 125.0);
        assert_eq!(player.health.current(), 75.0);
    }

    #[test]
    fn test_revive_consumes_charge() {
        let mut player = Player::new(Vector2::ZERO);
        player.revives = 1;
        player.take_damage(1000.0, &mut rng());
        assert!(!player.is_alive());
        assert!(player.try_revive());
        assert_eq!(player.health.current(), PLAYER_MAX_HEALTH * REVIVE_HEALTH_FRACTION);
        assert!(!player.try_revive());
    }

    #[test]
    fn test_switch_weapon_bounds() {
        let mut player = Player::new(Vector2::ZERO);
        assert!(!player.switch_weapon(3));
        player.weapons.push(Weapon::new(WeaponKind::Shotgun));
        assert!(player.switch_weapon(1));
        assert_eq!(player.weapon().unwrap().kind(), WeaponKind::Shotgun);
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use laststand_core::components::BossState;
    use laststand_core::constants::*;
    use laststand_core::enums::{AiState, BossType, EnemyKind};

    use crate::abilities::*;
    use crate::fsm::{evaluate, knockback, EnemyContext};
    use crate::profiles::{boss_profile, profile_for, zombie_profile};

    fn make_context(state: AiState, distance: Option<f64>, attack_timer: f64) -> EnemyContext {
        EnemyContext {
            state,
            position: DVec2::ZERO,
            target: distance.map(|d| DVec2::new(d, 0.0)),
            stats: zombie_profile().stats,
            attack_timer_secs: attack_timer,
            movement_locked: false,
        }
    }

    fn make_boss(boss_type: BossType) -> BossState {
        let profile = boss_profile(boss_type);
        BossState::new(boss_type, profile.special_cooldown_secs, BOSS_MISSILE_COOLDOWN_SECS)
    }

    // ---- FSM ----

    #[test]
    fn test_idle_to_chasing_when_far() {
        let update = evaluate(&make_context(AiState::Idle, Some(500.0), 0.0));
        assert_eq!(update.new_state, AiState::Chasing);
        assert!(update.state_changed);
        assert!(!update.attack);
        let v = update.desired_velocity.unwrap();
        assert!((v.x - ZOMBIE_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_in_range_attacks_when_cooldown_ready() {
        let update = evaluate(&make_context(AiState::Chasing, Some(ZOMBIE_ATTACK_RANGE), 0.0));
        assert_eq!(update.new_state, AiState::Attacking);
        assert!(update.attack, "attack range is inclusive");
    }

    #[test]
    fn test_in_range_cooling_moves_slowly() {
        let update = evaluate(&make_context(AiState::Attacking, Some(10.0), 0.5));
        assert_eq!(update.new_state, AiState::Attacking);
        assert!(!update.attack);
        assert!(!update.state_changed);
        let speed = update.desired_velocity.unwrap().length();
        assert!((speed - ZOMBIE_SPEED * ZOMBIE_ATTACK_SPEED_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_no_target_goes_idle_without_moving() {
        let update = evaluate(&make_context(AiState::Chasing, None, 0.0));
        assert_eq!(update.new_state, AiState::Idle);
        assert!(update.desired_velocity.is_none());
        assert!(!update.attack);
    }

    #[test]
    fn test_movement_locked_keeps_velocity() {
        let mut ctx = make_context(AiState::Chasing, Some(300.0), 0.0);
        ctx.movement_locked = true;
        assert!(evaluate(&ctx).desired_velocity.is_none());
    }

    #[test]
    fn test_knockback_points_away() {
        let push = knockback(DVec2::ZERO, DVec2::new(0.0, 10.0), KNOCKBACK_FORCE);
        assert!((push.y - KNOCKBACK_FORCE).abs() < 1e-9);
        let coincident = knockback(DVec2::ONE, DVec2::ONE, KNOCKBACK_FORCE);
        assert!((coincident.length() - KNOCKBACK_FORCE).abs() < 1e-9);
    }

    // ---- Profiles ----

    #[test]
    fn test_boss_profiles() {
        let tank = boss_profile(BossType::Tank);
        assert_eq!(tank.health, 400.0);
        assert_eq!(tank.stats.score, 200);
        assert_eq!(tank.stats.attack_range, BOSS_ATTACK_RANGE);
        assert_eq!(profile_for(EnemyKind::Zombie).health, ZOMBIE_HEALTH);
        for boss in BossType::ALL {
            assert!(boss_profile(boss).special_cooldown_secs > 0.0);
        }
    }

    // ---- Abilities ----

    #[test]
    fn test_special_timer_starts_full_and_rearms() {
        let mut boss = make_boss(BossType::Brute);
        assert!(!tick_special_timer(&mut boss, 2.0));
        assert!(tick_special_timer(&mut boss, 2.0));
        assert_eq!(boss.special_timer_secs, 4.0);
    }

    #[test]
    fn test_charge_is_transient() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut boss = make_boss(BossType::Brute);
        let plan = plan_ability(&boss, DVec2::ZERO, DVec2::new(0.0, 100.0), &mut rng).unwrap();
        match &plan {
            AbilityPlan::Charge { velocity } => assert!((velocity.y - CHARGE_SPEED).abs() < 1e-9),
            other => panic!("unexpected plan {other:?}"),
        }
        apply_to_boss(&mut boss, &plan);
        assert!(boss.charging);
        assert_eq!(boss.damage_bonus, CHARGE_DAMAGE_BONUS);

        assert!(!tick_timed_states(&mut boss, 1.0));
        assert!(tick_timed_states(&mut boss, 1.0));
        assert!(!boss.charging);
        assert_eq!(boss.damage_bonus, 0.0);
    }

    #[test]
    fn test_teleport_lands_near_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let boss = make_boss(BossType::Speed);
        let target = DVec2::new(500.0, -200.0);
        for _ in 0..50 {
            match plan_ability(&boss, DVec2::ZERO, target, &mut rng) {
                Some(AbilityPlan::Teleport { destination }) => {
                    let d = destination.distance(target);
                    assert!((TELEPORT_MIN_DISTANCE..=TELEPORT_MAX_DISTANCE).contains(&d));
                }
                other => panic!("unexpected plan {other:?}"),
            }
        }
    }

    #[test]
    fn test_tank_shield_halves_exactly() {
        let mut boss = make_boss(BossType::Tank);
        assert_eq!(shielded_damage(&boss, 25.0), 25.0);
        apply_to_boss(&mut boss, &AbilityPlan::Shield);
        assert_eq!(shielded_damage(&boss, 25.0), 12.5);
        tick_timed_states(&mut boss, TANK_SHIELD_SECS);
        assert_eq!(shielded_damage(&boss, 25.0), 25.0);
    }

    #[test]
    fn test_only_tank_shield_reduces_damage() {
        let mut boss = make_boss(BossType::Brute);
        boss.shield_remaining_secs = 1.0;
        assert_eq!(shielded_damage(&boss, 40.0), 40.0);
    }

    #[test]
    fn test_summoner_respects_minion_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut boss = make_boss(BossType::Summoner);

        let first = plan_ability(&boss, DVec2::ZERO, DVec2::X * 300.0, &mut rng).unwrap();
        let AbilityPlan::Summon { positions } = &first else {
            panic!("expected summon");
        };
        assert_eq!(positions.len(), 2);
        for p in positions {
            assert!((p.length() - SUMMON_DISTANCE).abs() < 1e-9);
        }
        apply_to_boss(&mut boss, &first);

        let second = plan_ability(&boss, DVec2::ZERO, DVec2::X * 300.0, &mut rng).unwrap();
        assert!(matches!(&second, AbilityPlan::Summon { positions } if positions.len() == 1));
        apply_to_boss(&mut boss, &second);

        assert_eq!(boss.minions_summoned, SUMMON_MAX_MINIONS);
        assert!(plan_ability(&boss, DVec2::ZERO, DVec2::X * 300.0, &mut rng).is_none());
    }

    #[test]
    fn test_poison_cloud_at_boss_position() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let boss = make_boss(BossType::Poison);
        let at = DVec2::new(12.0, 34.0);
        assert_eq!(
            plan_ability(&boss, at, DVec2::ZERO, &mut rng),
            Some(AbilityPlan::PoisonCloud { position: at })
        );
    }

    #[test]
    fn test_missile_timer_scales_with_fire_rate() {
        let mut boss = make_boss(BossType::Brute);
        assert!(tick_missile_timer(&mut boss, BOSS_MISSILE_COOLDOWN_SECS, 1.5));
        assert!((boss.missile_timer_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_missile_aim_leads_target() {
        let dir = missile_aim(DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(0.0, 200.0));
        let expected = DVec2::new(100.0, 100.0).normalize();
        assert!((dir - expected).length() < 1e-9);
    }
}

//! Tests for core types: vector helpers, config parsing, serialization.

use crate::commands::PlayerCommand;
use crate::config::{ConfigError, SimConfig, Tuning};
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Bounds, Vector2, VectorExt};

// ---- Vector math ----

#[test]
fn test_rotated_deg_quarter_turn() {
    let v = Vector2::new(1.0, 0.0).rotated_deg(90.0);
    assert!(v.x.abs() < 1e-12);
    assert!((v.y - 1.0).abs() < 1e-12);
}

#[test]
fn test_direction_to_same_point_is_zero() {
    let p = Vector2::new(3.0, 4.0);
    assert_eq!(p.direction_to(p), Vector2::ZERO);
    let d = Vector2::ZERO.direction_to(p);
    assert!((d.length() - 1.0).abs() < 1e-12);
}

#[test]
fn test_limited_clamps_length() {
    let v = Vector2::new(3.0, 4.0).limited(1.0);
    assert!((v.length() - 1.0).abs() < 1e-12);
    let short = Vector2::new(0.3, 0.4).limited(1.0);
    assert_eq!(short, Vector2::new(0.3, 0.4));
}

#[test]
fn test_bounds_centered() {
    let b = Bounds::centered(4000.0);
    assert!(b.contains(Vector2::new(2000.0, -2000.0)));
    assert!(!b.contains(Vector2::new(2000.1, 0.0)));
}

// ---- Enums ----

#[test]
fn test_boss_type_by_wave() {
    let expected = [
        (1, BossType::Brute),
        (2, BossType::Brute),
        (3, BossType::Speed),
        (4, BossType::Speed),
        (5, BossType::Tank),
        (6, BossType::Tank),
        (7, BossType::Poison),
        (8, BossType::Poison),
        (9, BossType::Summoner),
        (40, BossType::Summoner),
    ];
    for (wave, boss) in expected {
        assert_eq!(BossType::for_wave(wave), boss, "wave {wave}");
    }
}

#[test]
fn test_enemy_kind_serializes_tagged() {
    let json = serde_json::to_string(&EnemyKind::MiniBoss(BossType::Tank)).unwrap();
    assert_eq!(json, r#"{"kind":"MiniBoss","boss":"Tank"}"#);
    let back: EnemyKind = serde_json::from_str(r#"{"kind":"Zombie"}"#).unwrap();
    assert_eq!(back, EnemyKind::Zombie);
}

// ---- Commands & events ----

#[test]
fn test_command_json_shape() {
    let cmd: PlayerCommand =
        serde_json::from_str(r#"{"type":"SelectUpgrade","track":"rate_of_fire"}"#).unwrap();
    assert!(matches!(
        cmd,
        PlayerCommand::SelectUpgrade {
            track: Some(UpgradeTrackId::RateOfFire)
        }
    ));
    let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"SelectUpgrade","track":null}"#).unwrap();
    assert!(matches!(cmd, PlayerCommand::SelectUpgrade { track: None }));
}

#[test]
fn test_event_json_shape() {
    let json = serde_json::to_value(GameEvent::ScreenShake {
        duration_secs: 0.4,
        intensity: 12.0,
    })
    .unwrap();
    assert_eq!(json["type"], "ScreenShake");
    assert_eq!(json["intensity"], 12.0);
}

// ---- Config ----

#[test]
fn test_config_partial_json_keeps_defaults() {
    let config = SimConfig::from_json_str(r#"{"tuning":{"item_drop_chance":0.5}}"#).unwrap();
    assert_eq!(config.seed, 42);
    assert_eq!(config.tuning.item_drop_chance, 0.5);
    assert_eq!(config.tuning.spawn_distance, 350.0);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = SimConfig::from_json_str(r#"{"tick_rate":0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "tick_rate", .. }));

    let err = SimConfig::from_json_str(r#"{"tuning":{"item_drop_chance":1.5}}"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "item_drop_chance",
            ..
        }
    ));

    let err = SimConfig::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_spawn_delay_decreases_to_floor() {
    let tuning = Tuning::default();
    assert!((tuning.spawn_delay_for_wave(1) - 0.2).abs() < 1e-12);
    assert!((tuning.spawn_delay_for_wave(2) - 0.18).abs() < 1e-12);
    assert!((tuning.spawn_delay_for_wave(6) - 0.1).abs() < 1e-12);
    assert!((tuning.spawn_delay_for_wave(30) - 0.1).abs() < 1e-12);
}

// ---- Health invariant ----

mod health_props {
    use proptest::prelude::*;

    use crate::entity::{DamageOutcome, Health};

    #[derive(Debug, Clone)]
    enum HealthOp {
        Damage(f64),
        Heal(f64),
        Tick(f64),
    }

    fn health_op() -> impl Strategy<Value = HealthOp> {
        prop_oneof![
            (0.0..250.0f64).prop_map(HealthOp::Damage),
            (0.0..250.0f64).prop_map(HealthOp::Heal),
            (0.0..0.2f64).prop_map(HealthOp::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(
            max in 1.0..500.0f64,
            ops in prop::collection::vec(health_op(), 0..64),
        ) {
            let mut hp = Health::new(max);
            let mut died = false;
            for op in ops {
                match op {
                    HealthOp::Damage(amount) => {
                        if hp.take_damage(amount) == DamageOutcome::Killed {
                            prop_assert!(!died, "killed twice");
                            died = true;
                        }
                    }
                    HealthOp::Heal(amount) => hp.heal(amount),
                    HealthOp::Tick(dt) => hp.tick(dt),
                }
                prop_assert!(hp.current() >= 0.0);
                prop_assert!(hp.current() <= hp.max());
                prop_assert_eq!(hp.is_alive(), hp.current() > 0.0);
                prop_assert_eq!(hp.is_alive(), !died);
            }
        }
    }
}

//! Scripted input source that plays the game from snapshots.
//!
//! Aims at and shoots the nearest enemy, backs off from anything close,
//! dashes out of crowds and fires the skill into packs.

use laststand_core::commands::PlayerCommand;
use laststand_core::constants::SKILL_RADIUS;
use laststand_core::enums::GamePhase;
use laststand_core::state::{EnemyView, GameSnapshot, PlayerView};
use laststand_core::types::Vector2;

/// Enemies closer than this push the autopilot backwards.
const KEEP_AWAY_DISTANCE: f64 = 180.0;
/// Enemies within this radius count toward a dash.
const CROWD_RADIUS: f64 = 90.0;
const CROWD_SIZE: usize = 3;
/// Enemies inside the skill radius needed before using it.
const SKILL_PACK_SIZE: usize = 3;

#[derive(Debug, Default)]
pub struct Autopilot {
    moving: Vector2,
    shooting: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands to queue before the next tick.
    pub fn decide(&mut self, snapshot: &GameSnapshot) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::MainMenu => vec![PlayerCommand::StartGame],
            GamePhase::Paused => vec![PlayerCommand::Resume],
            GamePhase::UpgradeSelection => {
                let track = snapshot
                    .upgrade_offer
                    .as_ref()
                    .and_then(|offer| offer.tracks.first())
                    .map(|choice| choice.track);
                vec![PlayerCommand::SelectUpgrade { track }]
            }
            GamePhase::GameOver => Vec::new(),
            GamePhase::Playing => match snapshot.player.as_ref() {
                Some(player) => self.fight(player, &snapshot.enemies),
                None => Vec::new(),
            },
        }
    }

    fn fight(&mut self, player: &PlayerView, enemies: &[EnemyView]) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        let origin = player.position;

        let nearest = enemies
            .iter()
            .filter(|e| e.health_fraction > 0.0)
            .min_by(|a, b| {
                a.position
                    .distance_squared(origin)
                    .total_cmp(&b.position.distance_squared(origin))
            });

        let Some(target) = nearest else {
            self.set_shooting(false, &mut commands);
            self.set_moving(Vector2::ZERO, &mut commands);
            return commands;
        };

        commands.push(PlayerCommand::AimAt {
            x: target.position.x,
            y: target.position.y,
        });
        self.set_shooting(true, &mut commands);

        let within = |radius: f64| {
            enemies
                .iter()
                .filter(|e| e.health_fraction > 0.0 && e.position.distance(origin) <= radius)
                .count()
        };

        let away = (origin - target.position).normalize_or_zero();
        let heading = if target.position.distance(origin) < KEEP_AWAY_DISTANCE {
            away
        } else {
            Vector2::ZERO
        };
        self.set_moving(heading, &mut commands);

        if within(CROWD_RADIUS) >= CROWD_SIZE && player.dash_ready >= 1.0 {
            commands.push(PlayerCommand::Dash);
        }
        if within(SKILL_RADIUS) >= SKILL_PACK_SIZE && player.skill_ready >= 1.0 {
            commands.push(PlayerCommand::UseSkill);
        }
        if player.weapon.current_ammo == 0 && !player.weapon.reloading {
            commands.push(PlayerCommand::Reload);
        }
        commands
    }

    fn set_shooting(&mut self, held: bool, commands: &mut Vec<PlayerCommand>) {
        if self.shooting != held {
            self.shooting = held;
            commands.push(PlayerCommand::SetShooting { held });
        }
    }

    fn set_moving(&mut self, direction: Vector2, commands: &mut Vec<PlayerCommand>) {
        if self.moving != direction {
            self.moving = direction;
            commands.push(PlayerCommand::SetMovement {
                x: direction.x,
                y: direction.y,
            });
        }
    }
}

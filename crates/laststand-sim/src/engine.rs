//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs world, the player slot, wave and
//! upgrade state. It processes commands, runs all systems, and produces
//! `GameSnapshot`s.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use laststand_core::commands::PlayerCommand;
use laststand_core::enums::{GamePhase, UpgradeTrackId};
use laststand_core::events::GameEvent;
use laststand_core::state::{GameSnapshot, RunSummary};
use laststand_core::types::{Bounds, SimTime, Vector2};

pub use laststand_core::config::SimConfig;

use crate::combat::{self, KillRecord};
use crate::player::Player;
use crate::systems;
use crate::systems::player_control::PlayerRequests;
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::wave_spawner::WaveState;
use crate::upgrades::{UpgradeOffer, UpgradeState};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    bounds: Bounds,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    kills: Vec<KillRecord>,
    next_enemy_id: u32,

    player: Option<Player>,
    requests: PlayerRequests,
    wave: WaveState,
    upgrades: UpgradeState,
    offer: Option<UpgradeOffer>,
    summary: Option<RunSummary>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            bounds: Bounds::centered(config.tuning.world_size),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            kills: Vec::new(),
            next_enemy_id: 0,
            player: None,
            requests: PlayerRequests::default(),
            wave: WaveState::default(),
            upgrades: UpgradeState::default(),
            offer: None,
            summary: None,
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one fixed step and return the resulting snapshot.
    pub fn tick(&mut self) -> GameSnapshot {
        let dt = self.config.dt();
        self.tick_elapsed(dt)
    }

    /// Advance by host-measured `elapsed_secs`, clamped to the maximum step.
    pub fn tick_elapsed(&mut self, elapsed_secs: f64) -> GameSnapshot {
        self.process_commands();

        let dt = elapsed_secs.clamp(0.0, self.config.tuning.max_step_secs) * self.time_scale;
        match self.phase {
            GamePhase::Playing => {
                self.run_systems(dt);
                self.time.advance(dt);
            }
            GamePhase::UpgradeSelection => self.tick_upgrade_window(dt),
            GamePhase::MainMenu | GamePhase::Paused | GamePhase::GameOver => {}
        }
        self.requests = PlayerRequests::default();

        self.build_snapshot()
    }

    fn build_snapshot(&mut self) -> GameSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: &self.time,
                phase: self.phase,
                player: self.player.as_ref(),
                wave: &self.wave,
                offer: self.offer.as_ref(),
                upgrades: &self.upgrades,
                events,
                summary: self.summary.clone(),
            },
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Tick rate of the fixed step.
    pub fn tick_rate(&self) -> u32 {
        self.config.tick_rate
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    pub fn upgrades(&self) -> &UpgradeState {
        &self.upgrades
    }

    pub fn upgrade_offer(&self) -> Option<&UpgradeOffer> {
        self.offer.as_ref()
    }

    /// Mutable player access (for tests).
    #[cfg(test)]
    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    /// Kill every live enemy and credit the kills now (for tests).
    #[cfg(test)]
    pub fn kill_all_enemies(&mut self) {
        use laststand_core::components::Enemy;
        use laststand_core::entity::Health;

        let live: Vec<hecs::Entity> = self
            .world
            .query::<(&Enemy, &Health)>()
            .iter()
            .filter(|(_, (_, h))| h.is_alive())
            .map(|(e, _)| e)
            .collect();
        for entity in live {
            if let Ok(mut health) = self.world.get::<&mut Health>(entity) {
                health.flash_secs = 0.0;
            }
            combat::strike_enemy(
                &mut self.world,
                entity,
                f64::MAX,
                false,
                &mut self.kills,
                &mut self.events,
            );
        }
        if let Some(player) = self.player.as_mut() {
            combat::credit_kills(
                &mut self.world,
                &mut self.kills,
                player,
                &mut self.wave,
                &self.config.tuning,
                &mut self.rng,
                &mut self.events,
            );
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::MainMenu {
                    self.start_run();
                }
            }
            PlayerCommand::Restart => self.start_run(),
            PlayerCommand::ReturnToMenu => {
                self.world.clear();
                self.player = None;
                self.offer = None;
                self.summary = None;
                self.wave = WaveState::default();
                self.phase = GamePhase::MainMenu;
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::SelectUpgrade { track } => self.select_upgrade(track),
            PlayerCommand::SetMovement { x, y } => {
                if let Some(player) = self.player.as_mut() {
                    player.set_movement(Vector2::new(x, y));
                }
            }
            PlayerCommand::AimAt { x, y } => {
                if let Some(player) = self.player.as_mut() {
                    player.aim_at(Vector2::new(x, y));
                }
            }
            PlayerCommand::SetShooting { held } => {
                if let Some(player) = self.player.as_mut() {
                    player.shooting = held;
                }
            }
            PlayerCommand::UseSkill => self.requests.skill = true,
            PlayerCommand::Dash => self.requests.dash = true,
            PlayerCommand::Reload => {
                if let Some(player) = self.player.as_mut() {
                    if player.reload() {
                        if let Some(weapon) = player.weapon() {
                            self.events.push(GameEvent::ReloadStarted {
                                weapon: weapon.kind(),
                            });
                        }
                    }
                }
            }
            PlayerCommand::SwitchWeapon { slot } => {
                if let Some(player) = self.player.as_mut() {
                    player.switch_weapon(slot);
                }
            }
        }
    }

    /// Reset the world and begin wave 1.
    fn start_run(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.player = Some(Player::new(Vector2::ZERO));
        self.upgrades = UpgradeState::default();
        self.offer = None;
        self.summary = None;
        self.kills.clear();
        self.next_enemy_id = 0;
        self.phase = GamePhase::Playing;
        self.begin_wave(1);
        log::info!("run started (seed {})", self.config.seed);
    }

    fn begin_wave(&mut self, number: u32) {
        self.wave = WaveState::start(number, &self.config.tuning);
        self.events.push(GameEvent::WaveStarted {
            wave: number,
            quota: self.wave.quota(),
        });
        log::info!("wave {number} started, quota {}", self.wave.quota());
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let Some(player) = self.player.as_mut() else {
            return;
        };

        // 1. Player (timers, movement, dash, skill, fire)
        systems::player_control::run(
            &mut self.world,
            player,
            self.requests,
            dt,
            &self.bounds,
            &mut self.rng,
            &mut self.kills,
            &mut self.events,
        );
        // 2. Enemies (FSM, melee, boss abilities)
        systems::enemy_ai::run(
            &mut self.world,
            player,
            dt,
            &self.bounds,
            &mut self.rng,
            &mut self.next_enemy_id,
            &mut self.events,
        );
        // 3. Bullets
        systems::projectiles::run(&mut self.world, dt, &self.bounds);
        // 4. Missiles
        systems::missiles::run(&mut self.world, player, dt, &mut self.rng, &mut self.events);
        // 5. Items, hazards, effects
        systems::pickups::run(
            &mut self.world,
            player,
            dt,
            &mut self.rng,
            &mut self.kills,
            &mut self.events,
        );
        systems::hazards::run(&mut self.world, player, dt, &mut self.rng, &mut self.events);
        systems::effects::run(&mut self.world, dt);
        // 6. Collisions
        systems::collision::run(&mut self.world, &mut self.rng, &mut self.kills, &mut self.events);
        combat::credit_kills(
            &mut self.world,
            &mut self.kills,
            player,
            &mut self.wave,
            &self.config.tuning,
            &mut self.rng,
            &mut self.events,
        );
        // 7. Wave evaluation
        let player_position = player.body.position;
        let completed = systems::wave_spawner::run(
            &mut self.world,
            &mut self.wave,
            player_position,
            &self.config.tuning,
            &self.bounds,
            dt,
            &mut self.rng,
            &mut self.next_enemy_id,
            &mut self.events,
        );
        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        self.check_player_death();
        if completed && self.phase == GamePhase::Playing {
            self.complete_wave();
        }
    }

    /// Revive or end the run if the player died this tick.
    fn check_player_death(&mut self) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if player.is_alive() {
            return;
        }
        if player.try_revive() {
            self.events.push(GameEvent::PlayerRevived {
                health: player.health.current(),
            });
            log::info!("player revived");
            return;
        }
        let summary = RunSummary {
            score: player.score,
            wave: self.wave.number,
            kills: player.kills,
            elapsed_secs: self.time.elapsed_secs,
        };
        self.events.push(GameEvent::GameOver {
            score: summary.score,
            wave: summary.wave,
        });
        log::info!("game over: score {} at wave {}", summary.score, summary.wave);
        self.summary = Some(summary);
        self.offer = None;
        self.phase = GamePhase::GameOver;
    }

    /// Heal, then offer upgrades (or go straight on when nothing is left).
    fn complete_wave(&mut self) {
        if let Some(player) = self.player.as_mut() {
            let heal = player.health.max() * self.config.tuning.wave_heal_fraction;
            player.health.heal(heal);
        }
        let tracks = self
            .upgrades
            .roll_offer(self.config.tuning.upgrade_offer_size, &mut self.rng);
        if tracks.is_empty() {
            self.begin_wave(self.wave.number + 1);
            return;
        }
        self.events.push(GameEvent::UpgradeOffered {
            tracks: tracks.clone(),
        });
        self.offer = Some(UpgradeOffer {
            tracks,
            remaining_secs: self.config.tuning.upgrade_window_secs,
        });
        self.phase = GamePhase::UpgradeSelection;
    }

    fn tick_upgrade_window(&mut self, dt: f64) {
        let Some(offer) = self.offer.as_mut() else {
            self.phase = GamePhase::Playing;
            return;
        };
        offer.remaining_secs -= dt;
        if offer.remaining_secs <= 0.0 {
            self.select_upgrade(None);
        }
    }

    /// Resolve the open offer. `None` picks uniformly among the offered
    /// tracks; a track that is not on offer is ignored.
    fn select_upgrade(&mut self, track: Option<UpgradeTrackId>) {
        if self.phase != GamePhase::UpgradeSelection {
            return;
        }
        let Some(offer) = self.offer.as_ref() else {
            return;
        };
        let chosen = match track {
            Some(track) if offer.contains(track) => Some(track),
            Some(track) => {
                log::warn!("upgrade {track:?} is not on offer");
                return;
            }
            None => offer.auto_pick(&mut self.rng),
        };

        if let Some(track) = chosen {
            if let Some((level, effects)) = self.upgrades.level_up(track) {
                if let Some(player) = self.player.as_mut() {
                    for modifier in effects {
                        player.apply_modifier(*modifier);
                    }
                }
                self.events.push(GameEvent::UpgradeApplied { track, level });
                log::info!("upgrade {track:?} -> level {level}");
            }
        }

        self.offer = None;
        self.phase = GamePhase::Playing;
        self.begin_wave(self.wave.number + 1);
    }
}

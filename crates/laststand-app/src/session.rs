//! One autopilot run, either stepped in-process or driven through the
//! game-loop thread at wall-clock speed.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use laststand_core::config::SimConfig;
use laststand_core::enums::GamePhase;
use laststand_core::state::{GameSnapshot, RunSummary};
use laststand_sim::engine::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::error::AppError;
use crate::game_loop::{self, EventLogSink, FrameSink};
use crate::state::AppState;

/// Load a config file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig, AppError> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let json = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SimConfig::from_json_str(&json)?)
}

/// Summary of the run so far. A finished run reports its own summary.
pub fn summarize(snapshot: &GameSnapshot) -> RunSummary {
    if let Some(summary) = &snapshot.game_over {
        return summary.clone();
    }
    RunSummary {
        score: snapshot.player.as_ref().map_or(0, |p| p.score),
        wave: snapshot.wave.number,
        kills: 0,
        elapsed_secs: snapshot.time.elapsed_secs,
    }
}

/// Step the engine at its fixed rate until game over or `seconds` of
/// simulated play.
pub fn play_headless(config: SimConfig, seconds: f64) -> RunSummary {
    let max_ticks = (seconds * f64::from(config.tick_rate)).ceil() as u64;
    let mut engine = SimulationEngine::new(config);
    let mut sink = EventLogSink::default();
    let mut pilot = Autopilot::new();

    let mut snapshot = engine.tick();
    let mut kills = 0;
    for _ in 0..max_ticks {
        engine.queue_commands(pilot.decide(&snapshot));
        snapshot = engine.tick();
        sink.frame(&snapshot);
        if snapshot.phase == GamePhase::GameOver {
            break;
        }
        if let Some(player) = engine.player() {
            kills = player.kills;
        }
    }

    let mut summary = summarize(&snapshot);
    if snapshot.game_over.is_none() {
        summary.kills = kills;
    }
    summary
}

/// Run the game loop thread and steer it from the latest snapshot until
/// game over or `seconds` of wall-clock time.
pub fn play_realtime(config: SimConfig, seconds: f64) -> Result<RunSummary, AppError> {
    let poll = game_loop::tick_duration(config.tick_rate);
    let state = AppState::new();
    state.start(config, Box::new(EventLogSink::default()))?;

    let mut pilot = Autopilot::new();
    let deadline = Instant::now() + Duration::from_secs_f64(seconds);
    let mut last = GameSnapshot::default();

    while Instant::now() < deadline {
        std::thread::sleep(poll);
        let Some(snapshot) = state.snapshot()? else {
            continue;
        };
        for command in pilot.decide(&snapshot) {
            state.send_command(command)?;
        }
        let finished = snapshot.phase == GamePhase::GameOver;
        last = snapshot;
        if finished {
            break;
        }
    }

    state.shutdown()?;
    Ok(summarize(&last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.seed, SimConfig::default().seed);
    }

    #[test]
    fn test_unreadable_config_is_reported() {
        let path = std::env::temp_dir().join("laststand-no-such-config.json");
        assert!(matches!(
            load_config(Some(&path)),
            Err(AppError::ConfigRead { .. })
        ));
    }

    #[test]
    fn test_headless_run_is_deterministic() {
        let config = SimConfig {
            seed: 99,
            ..Default::default()
        };
        let a = play_headless(config.clone(), 15.0);
        let b = play_headless(config, 15.0);
        assert_eq!(a, b);
        assert!(a.elapsed_secs > 0.0);
        assert!(a.score > 0, "autopilot should score in 15 seconds");
    }
}

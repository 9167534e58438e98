//! Game loop thread: runs the simulation engine at the configured tick
//! rate and hands every snapshot to a `FrameSink`.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Commands arrive via an `mpsc` channel; the latest snapshot is
//! also stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use laststand_core::config::SimConfig;
use laststand_core::events::GameEvent;
use laststand_core::state::GameSnapshot;
use laststand_sim::engine::SimulationEngine;

use crate::state::GameLoopCommand;

/// Receives every snapshot the loop produces.
pub trait FrameSink: Send {
    fn frame(&mut self, snapshot: &GameSnapshot);
}

/// Discards frames.
pub struct NullSink;

impl FrameSink for NullSink {
    fn frame(&mut self, _snapshot: &GameSnapshot) {}
}

/// Logs the notable events of each frame.
#[derive(Default)]
pub struct EventLogSink {
    pub frames: u64,
}

impl FrameSink for EventLogSink {
    fn frame(&mut self, snapshot: &GameSnapshot) {
        self.frames += 1;
        for event in &snapshot.events {
            match event {
                GameEvent::WaveStarted { wave, quota } => {
                    log::info!("[frame {}] wave {wave} ({quota} zombies)", self.frames)
                }
                GameEvent::BossSpawned { boss_type, .. } => {
                    log::info!("[frame {}] {boss_type:?} incoming", self.frames)
                }
                GameEvent::UpgradeApplied { track, level } => {
                    log::info!("[frame {}] {track:?} level {level}", self.frames)
                }
                GameEvent::GameOver { score, wave } => {
                    log::info!("[frame {}] game over: {score} points, wave {wave}", self.frames)
                }
                _ => {}
            }
        }
    }
}

/// Nominal duration of one tick.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    mut sink: Box<dyn FrameSink>,
    latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("laststand-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, sink.as_mut(), &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    sink: &mut dyn FrameSink,
    latest_snapshot: &Mutex<Option<GameSnapshot>>,
) {
    let tick = tick_duration(config.tick_rate);
    let mut engine = SimulationEngine::new(config);
    let mut last_tick = Instant::now();
    let mut next_tick_time = last_tick;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance by the measured frame time (clamped by the engine)
        let now = Instant::now();
        let snapshot = engine.tick_elapsed((now - last_tick).as_secs_f64());
        last_tick = now;

        // 3. Hand the frame to the sink
        sink.frame(&snapshot);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick
        next_tick_time += tick;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laststand_core::commands::PlayerCommand;
    use laststand_core::enums::GamePhase;

    struct CountingSink(Arc<Mutex<u64>>);

    impl FrameSink for CountingSink {
        fn frame(&mut self, _snapshot: &GameSnapshot) {
            if let Ok(mut n) = self.0.lock() {
                *n += 1;
            }
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::Pause)).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Player(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Player(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        assert_eq!(tick_duration(60).as_nanos(), 1_000_000_000u128 / 60);
        assert_eq!(tick_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_loop_runs_and_shuts_down() {
        let frames = Arc::new(Mutex::new(0));
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(
            SimConfig::default(),
            Box::new(CountingSink(frames.clone())),
            latest.clone(),
        )
        .unwrap();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartGame))
            .unwrap();
        std::thread::sleep(Duration::from_millis(100));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        assert!(*frames.lock().unwrap() > 0);
        let snapshot = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.phase, GamePhase::Playing);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartGame);
        engine.queue_command(PlayerCommand::SetShooting { held: true });
        for _ in 0..120 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }
}

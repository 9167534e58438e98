//! State shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use laststand_core::commands::PlayerCommand;
use laststand_core::config::SimConfig;
use laststand_core::state::GameSnapshot;

use crate::error::AppError;
use crate::game_loop::{self, FrameSink};

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Host-side handle on a running game loop.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex` to let the
/// state be shared across threads. The latest snapshot is shared with the
/// loop thread through an `Arc`.
pub struct AppState {
    command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    loop_thread: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_thread: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    /// Spawn the game loop. Fails if one is already running.
    pub fn start(&self, config: SimConfig, sink: Box<dyn FrameSink>) -> Result<(), AppError> {
        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        if tx_lock.is_some() {
            return Err(AppError::AlreadyRunning);
        }
        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(config, sink, self.latest_snapshot.clone())
                .map_err(AppError::Spawn)?;
        *tx_lock = Some(cmd_tx);
        *self.loop_thread.lock().map_err(|_| AppError::Poisoned)? = Some(handle);
        Ok(())
    }

    /// Forward a player command to the running loop.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::Player(command))
                .map_err(|_| AppError::ChannelClosed),
            None => Err(AppError::NotStarted),
        }
    }

    /// Latest snapshot published by the loop, if any.
    pub fn snapshot(&self) -> Result<Option<GameSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Ask the loop to stop and wait for the thread to exit.
    pub fn shutdown(&self) -> Result<(), AppError> {
        let tx = self
            .command_tx
            .lock()
            .map_err(|_| AppError::Poisoned)?
            .take();
        if let Some(tx) = tx {
            // The loop may already have exited on its own.
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        let handle = self
            .loop_thread
            .lock()
            .map_err(|_| AppError::Poisoned)?
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                log::error!("game loop thread panicked");
            }
        }
        Ok(())
    }
}

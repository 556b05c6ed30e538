//! Thread-safe engine handle
//!
//! One coarse mutex covers the whole engine: each command or query holds it
//! for its full duration, so a gravity tick and a player command never
//! interleave. Nothing blocks or sleeps while the lock is held.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::warn;

use crate::engine::Engine;
use crate::snapshot::GameSnapshot;
use crate::types::{Command, GameStatus, Rgb};

#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("engine lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<T>(&self, f: impl FnOnce(&mut Engine) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn tick(&self) -> bool {
        self.lock().tick()
    }

    pub fn apply(&self, command: Command) -> bool {
        self.lock().apply(command)
    }

    pub fn color(&self, x: i8, y: i8) -> Rgb {
        self.lock().color(x, y)
    }

    pub fn score(&self) -> u32 {
        self.lock().score()
    }

    pub fn status(&self) -> GameStatus {
        self.lock().status()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.lock().snapshot_into(out);
    }
}

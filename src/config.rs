//! Driver configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_TICK_MS` | 1000 | Gravity period in milliseconds |
//! | `BLOCKFALL_FRAME_MS` | 16 | Render and input poll period in milliseconds |
//! | `BLOCKFALL_SEED` | random | Seed for the piece generator |
//! | `BLOCKFALL_LOG_FILE` | unset | File that receives log output (`RUST_LOG` filters it) |
//!
//! Unparsable or zero periods are errors.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::types::{DEFAULT_FRAME_MS, DEFAULT_TICK_MS};

pub const TICK_MS_VAR: &str = "BLOCKFALL_TICK_MS";
pub const FRAME_MS_VAR: &str = "BLOCKFALL_FRAME_MS";
pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const LOG_FILE_VAR: &str = "BLOCKFALL_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub tick_ms: u64,
    pub frame_ms: u64,
    pub seed: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            frame_ms: DEFAULT_FRAME_MS,
            seed: rand::random(),
            log_file: None,
        }
    }
}

impl DriverConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable lookup (the process environment in
    /// `from_env`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let tick_ms = parse_var(&lookup, TICK_MS_VAR)?.unwrap_or(defaults.tick_ms);
        let frame_ms = parse_var(&lookup, FRAME_MS_VAR)?.unwrap_or(defaults.frame_ms);
        let seed = parse_var(&lookup, SEED_VAR)?.unwrap_or(defaults.seed);
        let log_file = lookup(LOG_FILE_VAR)
            .map(|raw| raw.trim().to_owned())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        if tick_ms == 0 {
            bail!("{} must be greater than zero", TICK_MS_VAR);
        }
        if frame_ms == 0 {
            bail!("{} must be greater than zero", FRAME_MS_VAR);
        }

        Ok(Self {
            tick_ms,
            frame_ms,
            seed,
            log_file,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid {}={:?}", name, raw)),
    }
}

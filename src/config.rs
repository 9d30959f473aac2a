//! Centralized configuration and builder for the record store.
//!
//! - StoreConfig::from_env() reads UL_* environment variables over the defaults.
//! - StoreBuilder (UserList::builder()) starts from env and allows overrides.
//!
//! Defaults reproduce the reference behavior:
//! - match_mode = prefix (name key compared on the key's length)
//! - atomic_upsert = false (update's insert fallback re-acquires the lock)
//! - max_records = None (only a failed arena growth ends insertion)

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::consts::{
    DEFAULT_INITIAL_CAPACITY, ENV_ATOMIC_UPSERT, ENV_INITIAL_CAPACITY, ENV_MATCH_MODE,
    ENV_MAX_RECORDS,
};

/// How `find`/`update` compare a name key against stored names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// First `key.len()` bytes of the stored buffer equal the key.
    #[default]
    Prefix,
    /// Stored name text equals the key.
    Exact,
}

impl FromStr for MatchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(MatchMode::Prefix),
            "exact" => Ok(MatchMode::Exact),
            other => Err(anyhow!("unknown match mode '{}' (expected prefix|exact)", other)),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Prefix => f.write_str("prefix"),
            MatchMode::Exact => f.write_str("exact"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Upper bound on stored records; an insert beyond it fails with AllocationError.
    /// Env: UL_MAX_RECORDS (default None)
    pub max_records: Option<usize>,

    /// Env: UL_MATCH_MODE = prefix|exact (default prefix)
    pub match_mode: MatchMode,

    /// Run update's insert fallback inside the scan's critical section.
    /// Env: UL_ATOMIC_UPSERT = 0|1|true|false (default false)
    pub atomic_upsert: bool,

    /// Node slots reserved up front.
    /// Env: UL_INITIAL_CAPACITY (default 16)
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_records: None,
            match_mode: MatchMode::Prefix,
            atomic_upsert: false,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

fn env_flag(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "on" || s == "yes"
}

impl StoreConfig {
    /// Load configuration from environment variables. Unparsable values keep the default.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var(ENV_MAX_RECORDS) {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.max_records = Some(n);
            }
        }

        if let Ok(v) = std::env::var(ENV_MATCH_MODE) {
            match v.parse::<MatchMode>() {
                Ok(m) => cfg.match_mode = m,
                Err(e) => log::warn!("{}: {}, keeping {}", ENV_MATCH_MODE, e, cfg.match_mode),
            }
        }

        if let Ok(v) = std::env::var(ENV_ATOMIC_UPSERT) {
            cfg.atomic_upsert = env_flag(&v);
        }

        if let Ok(v) = std::env::var(ENV_INITIAL_CAPACITY) {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.initial_capacity = n;
            }
        }

        cfg
    }

    pub fn with_max_records(mut self, max: Option<usize>) -> Self {
        self.max_records = max;
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_atomic_upsert(mut self, on: bool) -> Self {
        self.atomic_upsert = on;
        self
    }

    pub fn with_initial_capacity(mut self, slots: usize) -> Self {
        self.initial_capacity = slots;
        self
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreConfig {{ \
             max_records: {}, \
             match_mode: {}, \
             atomic_upsert: {}, \
             initial_capacity: {} \
             }}",
            self.max_records
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unbounded".to_string()),
            self.match_mode,
            self.atomic_upsert,
            self.initial_capacity,
        )
    }
}

/// Builder returned by `UserList::builder()`.
#[derive(Clone, Debug)]
pub struct StoreBuilder {
    cfg: StoreConfig,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self {
            cfg: StoreConfig::from_env(),
        }
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: StoreConfig::default(),
        }
    }

    pub fn max_records(mut self, max: Option<usize>) -> Self {
        self.cfg.max_records = max;
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.cfg.match_mode = mode;
        self
    }

    pub fn atomic_upsert(mut self, on: bool) -> Self {
        self.cfg.atomic_upsert = on;
        self
    }

    pub fn initial_capacity(mut self, slots: usize) -> Self {
        self.cfg.initial_capacity = slots;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.cfg
    }

    /// Finish the builder and construct the store.
    pub fn build(self) -> crate::store::UserList {
        crate::store::UserList::with_config(self.cfg)
    }
}

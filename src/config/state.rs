// Application state module
// Immutable per-process state shared by every connection

use std::sync::atomic::AtomicBool;

use super::types::Config;
use crate::corpus::Corpus;

/// Application state
pub struct AppState {
    pub config: Config,
    pub corpus: Corpus,

    // Cached config values for fast access
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            corpus: Corpus::new(&config.corpus),
            cached_access_log: AtomicBool::new(config.logging.access_log),
        }
    }
}

//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::engine::EngineInvoker;
use crate::gate::{AdmissionGate, GateError};
use crate::lang::LanguageTable;

/// Shared application state
///
/// The admission gate is the only state mutated across requests; the
/// config, language table, and engine handle are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    gate: AdmissionGate,
    languages: LanguageTable,
    engine: Arc<dyn EngineInvoker>,
}

impl AppState {
    /// Build state from config and an engine invoker.
    ///
    /// Fails if the configured job limit is below 1.
    pub fn new(config: Config, engine: Arc<dyn EngineInvoker>) -> Result<Self, GateError> {
        let gate = AdmissionGate::new(config.jobs.max_parallel)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                gate,
                languages: LanguageTable::new(),
                engine,
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.inner.gate
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.inner.languages
    }

    pub fn engine(&self) -> &Arc<dyn EngineInvoker> {
        &self.inner.engine
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::runtime::ds::DEFAULT_EPSILON;

const DEFAULT_GC_THRESHOLD: usize = 10_000;
const DEFAULT_MAX_STACK: usize = 2048;

/// Tunables applied when a [`VM`](crate::runtime::vm::VM) is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Numeric comparison tolerance, installed process-wide.
    pub epsilon: f64,
    pub gc_enabled: bool,
    /// Array allocations between automatic collections.
    pub gc_threshold: usize,
    /// Audit owner counts after every collection.
    pub integrity_checks: bool,
    /// Evaluation stack capacity.
    pub max_stack: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            gc_enabled: true,
            gc_threshold: DEFAULT_GC_THRESHOLD,
            integrity_checks: false,
            max_stack: DEFAULT_MAX_STACK,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed runtime config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("epsilon must be finite and non-negative, got {0}")]
    Epsilon(f64),

    #[error("max_stack must be at least 1")]
    EmptyStack,
}

impl RuntimeConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::Epsilon(self.epsilon));
        }
        if self.max_stack == 0 {
            return Err(ConfigError::EmptyStack);
        }
        Ok(())
    }
}

//! Configuration for mass-flow simulation runs
//!
//! Controls the simulated horizon and how entity series are computed.
use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// Entities are stepped one after another on the calling thread
    #[default]
    Sequential,
    /// Entities are stepped in parallel using Rayon
    Rayon,
}

/// Configuration for simulation execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of discrete steps to simulate (`n_final`)
    pub horizon: u64,
    /// The concurrency mode to use for execution
    #[serde(default)]
    pub concurrency_mode: ConcurrencyMode,
    /// The size of a dedicated thread pool for parallel execution.
    /// Only relevant when concurrency_mode is Rayon; `None` uses the
    /// global Rayon pool.
    #[serde(default)]
    pub thread_pool_size: Option<usize>,
}

impl SimulationConfig {
    /// Create a sequential configuration for the given horizon
    pub fn new(horizon: u64) -> Self {
        Self {
            horizon,
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
        }
    }

    /// Set the concurrency mode for the simulation
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel execution
    ///
    /// # Note
    /// This setting only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = SimulationConfig::new(400);
        assert_eq!(config.horizon, 400);
        assert_eq!(config.concurrency_mode, ConcurrencyMode::Sequential);
        assert_eq!(config.thread_pool_size, None);
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::new(10)
            .with_concurrency(ConcurrencyMode::Rayon)
            .with_thread_pool_size(4);

        assert_eq!(config.concurrency_mode, ConcurrencyMode::Rayon);
        assert_eq!(config.thread_pool_size, Some(4));
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{ "horizon": 25 }"#).unwrap();
        assert_eq!(config, SimulationConfig::new(25));

        let config: SimulationConfig =
            serde_json::from_str(r#"{ "horizon": 25, "concurrency_mode": "rayon" }"#).unwrap();
        assert_eq!(config.concurrency_mode, ConcurrencyMode::Rayon);
    }
}

use super::composition::ProductComposition;
use crate::core::builder::NetworkBuilder;
use crate::core::errors::ConfigurationError;
use crate::core::execution::SimulationConfig;
use crate::core::network::Network;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const STORAGE: &str = "storage";
pub const CELL: &str = "cell";

/// Errors loading a scenario from disk or text
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Time markers of the cell, in simulation steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Step at which one product leaves storage
    pub release: u64,
    /// Step at which that product reaches the disassembly cell
    pub arrival_at_cell: u64,
    /// Steps a sorted batch spends on its way from the cell to its bin
    pub flow_time: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            release: 5,
            arrival_at_cell: 30,
            flow_time: 5,
        }
    }
}

/// Parts sorted together into one bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortingStream {
    pub bin: String,
    pub parts: Vec<String>,
    /// Step at which the batch leaves the cell
    pub sort_at: u64,
}

impl SortingStream {
    pub fn new(bin: &str, parts: &[&str], sort_at: u64) -> Self {
        Self {
            bin: bin.to_string(),
            parts: parts.iter().map(|part| part.to_string()).collect(),
            sort_at,
        }
    }
}

/// Disassembly and sorting cell: storage -> cell -> one bin per stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisassemblyConfig {
    pub horizon: u64,
    /// Seconds per step
    pub sample_period: f64,
    /// Product units held in storage at step 0
    pub batches_in_storage: u32,
    pub product: ProductComposition,
    pub timing: Timing,
    pub streams: Vec<SortingStream>,
}

impl Default for DisassemblyConfig {
    fn default() -> Self {
        Self {
            horizon: 400,
            sample_period: 1.0,
            batches_in_storage: 2,
            product: ProductComposition::glucose_meter(),
            timing: Timing::default(),
            streams: vec![
                SortingStream::new("casing", &["front_case", "back_case"], 240),
                SortingStream::new("pcb", &["pcb"], 300),
                SortingStream::new("screws", &["screw"], 320),
                SortingStream::new(
                    "others",
                    &["spring", "button_and_clip", "test_strip_port", "screen", "usb_port_cap"],
                    360,
                ),
            ],
        }
    }
}

impl DisassemblyConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig::new(self.horizon)
    }

    /// Mass sorted into the stream's bin per product unit
    pub fn stream_mass(&self, stream: &SortingStream) -> Result<f64, ConfigurationError> {
        stream
            .parts
            .iter()
            .map(|name| {
                self.product
                    .part_mass(name)
                    .ok_or_else(|| ConfigurationError::UnknownPart {
                        stream: stream.bin.clone(),
                        part: name.clone(),
                    })
            })
            .sum()
    }

    /// Build the network: one product moves from storage to the cell, then
    /// each stream moves from the cell to its bin.
    pub fn build_network(&self) -> Result<Network, ConfigurationError> {
        let product_mass = self.product.total_mass();
        let mut builder = NetworkBuilder::new();

        let storage = builder.add_vertex(STORAGE, f64::from(self.batches_in_storage) * product_mass);
        let cell = builder.add_vertex(CELL, 0.0);
        let supply = builder.add_arc(&storage, &cell);
        builder.transfer(&supply, product_mass, self.timing.release, self.timing.arrival_at_cell)?;

        for stream in &self.streams {
            let quantity = self.stream_mass(stream)?;
            let bin = builder.add_vertex(stream.bin.as_str(), 0.0);
            let chute = builder.add_arc(&cell, &bin);
            let arrive = stream
                .sort_at
                .checked_add(self.timing.flow_time)
                .ok_or_else(|| ConfigurationError::ArrivalOverflow {
                    stream: stream.bin.clone(),
                    sort_at: stream.sort_at,
                    flow_time: self.timing.flow_time,
                })?;
            builder.transfer(&chute, quantity, stream.sort_at, arrive)?;
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_streams_cover_product() {
        let config = DisassemblyConfig::default();
        let sorted: f64 = config
            .streams
            .iter()
            .map(|stream| config.stream_mass(stream).unwrap())
            .sum();
        assert!((sorted - config.product.total_mass()).abs() < 1e-9);
    }

    #[test]
    fn test_default_network_shape() {
        let network = DisassemblyConfig::default().build_network().unwrap();
        // storage, cell, 4 bins, 5 arcs
        assert_eq!(network.len(), 11);
        assert_eq!(network.arcs().len(), 5);
        assert_eq!(network.events().len(), 20);
        assert!((network.total_initial_mass() - 123.6).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_part_rejected() {
        let mut config = DisassemblyConfig::default();
        config.streams.push(SortingStream::new("batteries", &["battery"], 380));
        assert_eq!(
            config.build_network().unwrap_err(),
            ConfigurationError::UnknownPart {
                stream: "batteries".to_string(),
                part: "battery".to_string(),
            }
        );
    }

    #[test]
    fn test_arrival_overflow_rejected() {
        let config = DisassemblyConfig::from_json_str(
            r#"{ "streams": [ { "bin": "pcb", "parts": ["pcb"], "sort_at": 18446744073709551615 } ] }"#,
        )
        .unwrap();
        assert_eq!(config.streams[0].sort_at, u64::MAX);
        assert_eq!(
            config.build_network().unwrap_err(),
            ConfigurationError::ArrivalOverflow {
                stream: "pcb".to_string(),
                sort_at: u64::MAX,
                flow_time: 5,
            }
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DisassemblyConfig::from_json_str(r#"{ "horizon": 500 }"#).unwrap();
        assert_eq!(config.horizon, 500);
        assert_eq!(config.batches_in_storage, 2);
        assert_eq!(config.streams.len(), 4);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = DisassemblyConfig::from_json_str("{ horizon: }").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Json(_)));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = DisassemblyConfig::from_path("/nonexistent/scenario.json").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io(_)));
    }
}

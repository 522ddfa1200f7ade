use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::network::network::check_learning_rate;

/// Configuration for a training run.
///
/// # Fields
/// - `iterations`    — total number of full passes over the sample set
/// - `learning_rate` — step size applied to every weight update
/// - `shuffle_seed`  — seeds the once-per-run shuffle; `None` draws a fresh
///                     seed from the OS so every run sees a different order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub iterations: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with an unseeded shuffle.
    pub fn new(iterations: usize, learning_rate: f64) -> Self {
        TrainConfig {
            iterations,
            learning_rate,
            shuffle_seed: None,
        }
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_learning_rate(self.learning_rate)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `TrainConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 133;
/// Half-width of the default uniform initialization range.
pub const DEFAULT_INIT_BOUND: f64 = 0.05;

/// Topology and initialization settings for a [`Network`](crate::Network).
///
/// Fields:
/// - `input_size`  — length of every feature vector (`n_in`)
/// - `output_size` — number of classes (`n_out`)
/// - `hidden_size` — neurons in the single hidden layer (`n_hidden`)
/// - `seed`        — seeds the generator every weight is drawn from
/// - `init_low`, `init_high` — bounds of the uniform weight distribution
///
/// Only the configuration is serializable; trained weights are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub output_size: usize,
    pub hidden_size: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_init_low")]
    pub init_low: f64,
    #[serde(default = "default_init_high")]
    pub init_high: f64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_init_low() -> f64 {
    -DEFAULT_INIT_BOUND
}

fn default_init_high() -> f64 {
    DEFAULT_INIT_BOUND
}

impl NetworkConfig {
    /// Argument order follows the classic `(inputs, outputs, hidden)` signature.
    pub fn new(input_size: usize, output_size: usize, hidden_size: usize) -> Self {
        NetworkConfig {
            input_size,
            output_size,
            hidden_size,
            seed: DEFAULT_SEED,
            init_low: -DEFAULT_INIT_BOUND,
            init_high: DEFAULT_INIT_BOUND,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_init_range(mut self, low: f64, high: f64) -> Self {
        self.init_low = low;
        self.init_high = high;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.output_size == 0 || self.hidden_size == 0 {
            return Err(Error::InvalidConfig(format!(
                "all layer sizes must be > 0 (input={}, hidden={}, output={})",
                self.input_size, self.hidden_size, self.output_size
            )));
        }
        if !self.init_low.is_finite() || !self.init_high.is_finite() || self.init_low >= self.init_high {
            return Err(Error::InvalidConfig(format!(
                "init range [{}, {}] must be finite with low < high",
                self.init_low, self.init_high
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

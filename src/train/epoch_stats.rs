use serde::{Serialize, Deserialize};

/// Statistics for one completed pass over the sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean over samples of `Σ(target - output)²`, measured on the output each
    /// sample produced just before its own update.
    pub mean_squared_error: f64,
    /// Samples visited in this epoch.
    pub samples: usize,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

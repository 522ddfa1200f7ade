pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod network;
pub mod data;
pub mod train;
pub mod eval;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use network::{Activations, ErrorSignals, Network, NetworkConfig};
pub use data::sample::Sample;
pub use train::{train_epochs, train_streaming, EpochStats, StreamingRun, TrainConfig, Trainer};
pub use eval::{accuracy, argmax};

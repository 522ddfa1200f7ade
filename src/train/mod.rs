pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;
pub mod streaming;

pub use trainer::Trainer;
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use loop_fn::{train_epochs, visit_epochs};
pub use streaming::{train_streaming, StreamingRun};

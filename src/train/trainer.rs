use std::io::BufRead;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::sample::Sample;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::loop_fn::train_epochs;
use crate::train::streaming::{train_streaming, StreamingRun};
use crate::train::train_config::TrainConfig;

/// Runs training according to a [`TrainConfig`], owning the shuffle rng.
pub struct Trainer {
    config: TrainConfig,
    rng: StdRng,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Result<Trainer> {
        config.validate()?;
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Trainer { config, rng })
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Shuffle-once, replay-every-epoch training over an in-memory set.
    pub fn fit(&mut self, network: &mut Network, samples: &mut [Sample]) -> Result<Vec<EpochStats>> {
        train_epochs(
            network,
            samples,
            self.config.iterations,
            self.config.learning_rate,
            &mut self.rng,
        )
    }

    /// Streamed first epoch followed by buffered replay.
    pub fn fit_streaming<F: BufRead, L: BufRead>(
        &mut self,
        network: &mut Network,
        features: F,
        labels: L,
    ) -> Result<StreamingRun> {
        train_streaming(
            network,
            features,
            labels,
            self.config.iterations,
            self.config.learning_rate,
            &mut self.rng,
        )
    }
}

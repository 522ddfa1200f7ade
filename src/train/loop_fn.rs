use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::data::sample::Sample;
use crate::error::{Error, Result};
use crate::network::network::{check_learning_rate, Network};
use crate::train::epoch_stats::EpochStats;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `iterations` epochs of online backprop.
///
/// `samples` is shuffled once, in place, before the first epoch; every epoch
/// then replays that same order. Returns one `EpochStats` per epoch.
///
/// An empty sample set is a no-op. Every sample is checked against the
/// network's shape before the shuffle, so a bad sample cannot leave the
/// weights half-trained.
pub fn train_epochs<R: Rng + ?Sized>(
    network: &mut Network,
    samples: &mut [Sample],
    iterations: usize,
    lr: f64,
    rng: &mut R,
) -> Result<Vec<EpochStats>> {
    check_learning_rate(lr)?;
    validate_samples(network, samples)?;

    info!(
        samples = samples.len(),
        iterations,
        lr,
        "training started"
    );
    let stats = visit_epochs(samples, iterations, rng, |sample| network.train_sample(sample, lr))?;
    if let Some(last) = stats.last() {
        info!(
            epochs = stats.len(),
            mean_squared_error = last.mean_squared_error,
            "training finished"
        );
    }
    Ok(stats)
}

/// Shuffle-once epoch driver.
///
/// Shuffles `items` with a uniform permutation drawn from `rng`, then calls
/// `step` on every item, in that fixed order, `iterations` times. `step`
/// returns the per-item loss that is averaged into the epoch's stats.
pub fn visit_epochs<T, R, F>(
    items: &mut [T],
    iterations: usize,
    rng: &mut R,
    mut step: F,
) -> Result<Vec<EpochStats>>
where
    R: Rng + ?Sized,
    F: FnMut(&T) -> Result<f64>,
{
    if items.is_empty() {
        warn!(iterations, "sample set is empty; skipping training");
        return Ok(Vec::new());
    }

    items.shuffle(rng);

    let n = items.len();
    let mut stats = Vec::with_capacity(iterations);

    for epoch in 1..=iterations {
        let t_start = Instant::now();

        let mut total_loss = 0.0;
        for item in items.iter() {
            total_loss += step(item)?;
        }

        let epoch_stats = EpochStats {
            epoch,
            total_epochs: iterations,
            mean_squared_error: total_loss / n as f64,
            samples: n,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        debug!(
            epoch,
            total = iterations,
            mse = epoch_stats.mean_squared_error,
            elapsed_ms = epoch_stats.elapsed_ms,
            "epoch complete"
        );
        stats.push(epoch_stats);
    }

    Ok(stats)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn validate_samples(network: &Network, samples: &[Sample]) -> Result<()> {
    for sample in samples {
        if sample.features.len() != network.input_size() {
            return Err(Error::DimensionMismatch {
                context: "feature vector",
                expected: network.input_size(),
                actual: sample.features.len(),
            });
        }
        if sample.label >= network.output_size() {
            return Err(Error::LabelOutOfRange {
                label: sample.label,
                classes: network.output_size(),
            });
        }
    }
    Ok(())
}

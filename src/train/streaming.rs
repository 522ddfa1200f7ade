use std::io::BufRead;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::data::lines::{parse_feature_line, parse_label_line};
use crate::data::sample::Sample;
use crate::error::Result;
use crate::network::network::{check_learning_rate, Network};
use crate::train::epoch_stats::EpochStats;
use crate::train::loop_fn::train_epochs;

/// Outcome of [`train_streaming`].
#[derive(Debug, Clone)]
pub struct StreamingRun {
    /// Every sample read from the streams, in the order of the final replay.
    pub samples: Vec<Sample>,
    /// Stats for the streamed first epoch followed by the replayed ones.
    pub epochs: Vec<EpochStats>,
}

/// Trains from two parallel line streams.
///
/// Epoch 1 trains on each (feature line, label line) pair as soon as it is
/// read, in stream order, and buffers the pair. Reading stops when either
/// stream runs out. The buffer is then handed to
/// [`train_epochs`] for `iterations - 1` more passes, which shuffles it once.
///
/// The streamed pass always runs, so `iterations == 0` behaves like `1`.
pub fn train_streaming<F, L, R>(
    network: &mut Network,
    features: F,
    labels: L,
    iterations: usize,
    lr: f64,
    rng: &mut R,
) -> Result<StreamingRun>
where
    F: BufRead,
    L: BufRead,
    R: Rng + ?Sized,
{
    check_learning_rate(lr)?;

    let t_start = Instant::now();
    let mut samples = Vec::new();
    let mut total_loss = 0.0;

    for ((idx, feature_line), label_line) in features.lines().enumerate().zip(labels.lines()) {
        let line_no = idx + 1;
        let sample = Sample::new(
            parse_feature_line(&feature_line?, line_no)?,
            parse_label_line(&label_line?, line_no)?,
        );
        total_loss += network.train_sample(&sample, lr)?;
        samples.push(sample);
    }

    let mut epochs = Vec::with_capacity(iterations.max(1));
    if samples.is_empty() {
        info!("streams were empty; nothing to train on");
        return Ok(StreamingRun { samples, epochs });
    }

    let total_epochs = iterations.max(1);
    let first = EpochStats {
        epoch: 1,
        total_epochs,
        mean_squared_error: total_loss / samples.len() as f64,
        samples: samples.len(),
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    };
    debug!(
        samples = first.samples,
        mse = first.mean_squared_error,
        elapsed_ms = first.elapsed_ms,
        "streamed epoch complete"
    );
    epochs.push(first);

    let replayed = train_epochs(network, &mut samples, total_epochs - 1, lr, rng)?;
    epochs.extend(replayed.into_iter().map(|mut stats| {
        stats.epoch += 1;
        stats.total_epochs = total_epochs;
        stats
    }));

    Ok(StreamingRun { samples, epochs })
}

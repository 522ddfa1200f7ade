use crate::data::sample::Sample;
use crate::error::{Error, Result};
use crate::network::network::Network;

/// Index of the largest element, scanning left to right with a strict `>`,
/// so the first of several equal maxima wins. `None` for an empty slice.
pub fn argmax(v: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in v.iter().enumerate() {
        if best.map_or(true, |(_, max)| x > max) {
            best = Some((i, x));
        }
    }
    best.map(|(i, _)| i)
}

/// Predicted class for every input in `batch`, in order.
pub fn predict(network: &mut Network, batch: &[Vec<f64>]) -> Result<Vec<Option<usize>>> {
    Ok(network.classify(batch)?.iter().map(|output| argmax(output)).collect())
}

/// Fraction of `samples` whose argmax prediction equals the label.
///
/// An empty set has no defined accuracy and yields `EmptySampleSet`.
pub fn accuracy(network: &mut Network, samples: &[Sample]) -> Result<f64> {
    if samples.is_empty() {
        return Err(Error::EmptySampleSet);
    }
    let batch: Vec<Vec<f64>> = samples.iter().map(|s| s.features.clone()).collect();
    let correct = predict(network, &batch)?
        .into_iter()
        .zip(samples)
        .filter(|(predicted, sample)| *predicted == Some(sample.label))
        .count();
    Ok(correct as f64 / samples.len() as f64)
}

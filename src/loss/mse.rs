pub struct MseLoss;

impl MseLoss {
    /// Summed squared error: Σ(expected - predicted)²
    pub fn squared_error(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (b - a).powi(2))
            .sum()
    }

    /// Per-output residual in the direction the weights move: expected - predicted
    pub fn residual(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| b - a)
            .collect()
    }
}

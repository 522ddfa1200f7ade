use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::sigmoid;
use crate::data::sample::Sample;
use crate::error::{Error, Result};
use crate::loss::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::activations::Activations;
use crate::network::backprop::{one_hot, ErrorSignals};
use crate::network::config::NetworkConfig;

/// Fully-connected `input → hidden → output` network with logistic units on
/// both layers and no biases.
///
/// `w0` has shape `(hidden, input)` and `w1` has shape `(output, hidden)`.
/// Only the most recent forward pass is remembered.
#[derive(Debug, Clone)]
pub struct Network {
    w0: Matrix,
    w1: Matrix,
    last: Option<Activations>,
}

impl Network {
    /// Builds a network whose weights are drawn from a generator seeded with
    /// `config.seed`: identical configs give bit-identical weights.
    pub fn new(config: &NetworkConfig) -> Result<Network> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Network::with_rng(config, &mut rng)
    }

    /// Builds a network drawing `w0` then `w1` from `rng`. `config.seed` is
    /// ignored.
    pub fn with_rng<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;
        let (low, high) = (config.init_low, config.init_high);
        let w0 = Matrix::uniform(config.hidden_size, config.input_size, low, high, rng);
        let w1 = Matrix::uniform(config.output_size, config.hidden_size, low, high, rng);
        Network::from_weights(w0, w1)
    }

    /// Wraps existing weight matrices after checking their shapes agree.
    pub fn from_weights(w0: Matrix, w1: Matrix) -> Result<Network> {
        if w0.rows == 0 || w0.cols == 0 || w1.rows == 0 {
            return Err(Error::InvalidConfig(format!(
                "weight matrices must be non-empty (w0 {}x{}, w1 {}x{})",
                w0.rows, w0.cols, w1.rows, w1.cols
            )));
        }
        check_shape(&w0, "input weights")?;
        check_shape(&w1, "output weights")?;
        if w1.cols != w0.rows {
            return Err(Error::DimensionMismatch {
                context: "output weight columns",
                expected: w0.rows,
                actual: w1.cols,
            });
        }
        Ok(Network { w0, w1, last: None })
    }

    pub fn input_size(&self) -> usize {
        self.w0.cols
    }

    pub fn hidden_size(&self) -> usize {
        self.w0.rows
    }

    pub fn output_size(&self) -> usize {
        self.w1.rows
    }

    /// Input-to-hidden weights, shape `(hidden, input)`.
    pub fn w0(&self) -> &Matrix {
        &self.w0
    }

    /// Hidden-to-output weights, shape `(output, hidden)`.
    pub fn w1(&self) -> &Matrix {
        &self.w1
    }

    /// Forward pass without touching any state.
    pub fn forward(&self, input: &[f64]) -> Result<Activations> {
        self.check_input(input)?;
        let hidden: Vec<f64> = self.w0.mul_vec(input).into_iter().map(sigmoid).collect();
        let output = self.w1.mul_vec(&hidden).into_iter().map(sigmoid).collect();
        Ok(Activations { input: input.to_vec(), hidden, output })
    }

    /// Forward pass that also becomes the network's latest snapshot.
    pub fn activate(&mut self, input: &[f64]) -> Result<&[f64]> {
        let activations = self.forward(input)?;
        Ok(self.last.insert(activations).output.as_slice())
    }

    /// Output layer of the most recent forward pass, if any has run.
    pub fn last_output(&self) -> Option<&[f64]> {
        self.last.as_ref().map(|a| a.output.as_slice())
    }

    /// Full snapshot behind [`Network::last_output`].
    pub fn last_activations(&self) -> Option<&Activations> {
        self.last.as_ref()
    }

    /// Error signals for `activations` against `label`, read from the current
    /// weights.
    pub fn error_signals(&self, activations: &Activations, label: usize) -> Result<ErrorSignals> {
        let target = one_hot(label, self.output_size())?;
        Ok(ErrorSignals::compute(&self.w1, activations, &target))
    }

    /// Gradient step `W1 += lr·e_out·a1ᵀ`, `W0 += lr·e_hid·a0ᵀ`.
    pub fn apply_signals(&mut self, activations: &Activations, signals: &ErrorSignals, lr: f64) {
        let w1_step = Matrix::outer(&signals.output, &activations.hidden).map(|x| x * lr);
        let w0_step = Matrix::outer(&signals.hidden, &activations.input).map(|x| x * lr);
        self.w1 = std::mem::take(&mut self.w1) + w1_step;
        self.w0 = std::mem::take(&mut self.w0) + w0_step;
    }

    /// One online backprop step on a single sample.
    ///
    /// Returns the squared error `Σ(target - a2)²` of the output seen *before*
    /// the update. Inputs are validated before anything is mutated.
    pub fn train_one(&mut self, features: &[f64], label: usize, lr: f64) -> Result<f64> {
        check_learning_rate(lr)?;
        let target = one_hot(label, self.output_size())?;
        let activations = self.forward(features)?;

        // Both signals are read out of W1 before either matrix moves.
        let signals = ErrorSignals::compute(&self.w1, &activations, &target);
        let squared_error = MseLoss::squared_error(&activations.output, &target);
        self.apply_signals(&activations, &signals, lr);

        self.last = Some(activations);
        Ok(squared_error)
    }

    pub fn train_sample(&mut self, sample: &Sample, lr: f64) -> Result<f64> {
        self.train_one(&sample.features, sample.label, lr)
    }

    /// Training step for a row that carries its label as the last element.
    pub fn train_one_combined(&mut self, row: &[f64], lr: f64) -> Result<f64> {
        let sample = Sample::from_combined(row)?;
        self.train_sample(&sample, lr)
    }

    /// Runs forward activation over `batch` and returns each output vector in
    /// input order. Weights are not modified; the last input becomes the
    /// latest snapshot.
    pub fn classify(&mut self, batch: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        for input in batch {
            self.check_input(input)?;
        }
        let mut outputs = Vec::with_capacity(batch.len());
        for input in batch {
            outputs.push(self.activate(input)?.to_vec());
        }
        Ok(outputs)
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_size() {
            return Err(Error::DimensionMismatch {
                context: "feature vector",
                expected: self.input_size(),
                actual: input.len(),
            });
        }
        Ok(())
    }
}

// Declared rows/cols must match the stored data, or `mul_vec` would truncate.
fn check_shape(m: &Matrix, context: &'static str) -> Result<()> {
    if m.data.len() != m.rows {
        return Err(Error::DimensionMismatch { context, expected: m.rows, actual: m.data.len() });
    }
    if let Some(row) = m.data.iter().find(|row| row.len() != m.cols) {
        return Err(Error::DimensionMismatch { context, expected: m.cols, actual: row.len() });
    }
    Ok(())
}

/// Learning rates must be positive and finite.
pub fn check_learning_rate(lr: f64) -> Result<()> {
    if !(lr.is_finite() && lr > 0.0) {
        return Err(Error::InvalidConfig(format!("learning rate must be positive and finite, got {lr}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_forward(net: &Network, input: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let hidden: Vec<f64> = net.w0().data.iter()
            .map(|row| 1.0 / (1.0 + (-row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>()).exp()))
            .collect();
        let output = net.w1().data.iter()
            .map(|row| 1.0 / (1.0 + (-row.iter().zip(&hidden).map(|(w, x)| w * x).sum::<f64>()).exp()))
            .collect();
        (hidden, output)
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn identical_configs_give_identical_weights() {
        let config = NetworkConfig::new(7, 3, 5).with_seed(42);
        let a = Network::new(&config).unwrap();
        let b = Network::new(&config).unwrap();
        assert_eq!(a.w0(), b.w0());
        assert_eq!(a.w1(), b.w1());

        let c = Network::new(&config.clone().with_seed(43)).unwrap();
        assert_ne!(a.w0(), c.w0());
    }

    #[test]
    fn weights_have_expected_shapes_and_bounds() {
        let net = Network::new(&NetworkConfig::new(4, 3, 20)).unwrap();
        assert_eq!((net.w0().rows, net.w0().cols), (20, 4));
        assert_eq!((net.w1().rows, net.w1().cols), (3, 20));
        let all = net.w0().data.iter().chain(net.w1().data.iter()).flatten();
        for &w in all {
            assert!((-0.05..=0.05).contains(&w));
        }
    }

    #[test]
    fn zero_input_pins_hidden_layer_at_one_half() {
        let config = NetworkConfig::new(3, 4, 6).with_init_range(-3.0, 3.0).with_seed(5);
        let net = Network::new(&config).unwrap();
        let activations = net.forward(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(activations.hidden, vec![0.5; 6]);

        // No biases: the output layer still sees W1 applied to the halves.
        let expected: Vec<f64> = net.w1().data.iter()
            .map(|row| 1.0 / (1.0 + (-row.iter().map(|w| w * 0.5).sum::<f64>()).exp()))
            .collect();
        assert!(close(&activations.output, &expected));
        assert_eq!(reference_forward(&net, &[0.0, 0.0, 0.0]).0, vec![0.5; 6]);
    }

    #[test]
    fn forward_matches_reference_computation() {
        let mut net = Network::new(&NetworkConfig::new(2, 2, 2).with_seed(133)).unwrap();
        let (hidden, output) = reference_forward(&net, &[1.0, 0.0]);
        let activations = net.forward(&[1.0, 0.0]).unwrap();
        assert!(close(&activations.hidden, &hidden));
        assert!(close(&activations.output, &output));
        assert!(activations.output.iter().all(|&y| y > 0.0 && y < 1.0));

        assert!(net.last_output().is_none());
        net.activate(&[1.0, 0.0]).unwrap();
        assert!(close(net.last_output().unwrap(), &output));
    }

    #[test]
    fn last_activations_hold_the_pre_update_pass() {
        let mut net = Network::new(&NetworkConfig::new(2, 2, 3).with_seed(9)).unwrap();
        assert!(net.last_activations().is_none());

        let before = net.forward(&[0.4, 0.9]).unwrap();
        net.train_one(&[0.4, 0.9], 1, 0.5).unwrap();

        let last = net.last_activations().unwrap();
        assert_eq!(last, &before);
        assert_eq!(net.last_output().unwrap(), before.output.as_slice());
        assert_ne!(net.forward(&[0.4, 0.9]).unwrap().output, before.output);
    }

    #[test]
    fn one_step_moves_outputs_toward_target() {
        let mut net = Network::new(&NetworkConfig::new(2, 2, 2).with_seed(133)).unwrap();
        let before = net.forward(&[1.0, 0.0]).unwrap().output;

        net.train_one(&[1.0, 0.0], 1, 0.5).unwrap();

        let after = net.forward(&[1.0, 0.0]).unwrap().output;
        assert!(after[1] > before[1]);
        assert!(after[0] < before[0]);
    }

    #[test]
    fn small_step_reduces_squared_error() {
        let config = NetworkConfig::new(5, 3, 4).with_seed(11).with_init_range(-0.5, 0.5);
        let mut net = Network::new(&config).unwrap();
        let input = [0.2, -0.7, 1.0, 0.4, 0.0];
        let target = one_hot(2, 3).unwrap();

        let before = net.train_one(&input, 2, 0.01).unwrap();
        let after = MseLoss::squared_error(&net.forward(&input).unwrap().output, &target);
        assert!(after < before);
    }

    #[test]
    fn update_uses_pre_update_output_weights() {
        let w0 = Matrix::from_data(vec![vec![0.3, -0.2], vec![0.1, 0.4]]);
        let w1 = Matrix::from_data(vec![vec![0.5, -0.6], vec![-0.7, 0.8]]);
        let mut net = Network::from_weights(w0.clone(), w1.clone()).unwrap();
        let snapshot = Network::from_weights(w0.clone(), w1).unwrap();

        let activations = snapshot.forward(&[1.0, 0.5]).unwrap();
        let signals = snapshot.error_signals(&activations, 0).unwrap();

        net.train_one(&[1.0, 0.5], 0, 0.3).unwrap();

        for j in 0..2 {
            for k in 0..2 {
                let expected = w0.data[j][k] + 0.3 * signals.hidden[j] * activations.input[k];
                assert!((net.w0().data[j][k] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn classify_is_pure_over_weights() {
        let mut net = Network::new(&NetworkConfig::new(3, 2, 4).with_seed(1)).unwrap();
        let batch = vec![vec![0.1, 0.2, 0.3], vec![1.0, 0.0, -1.0]];
        let w0 = net.w0().clone();

        let first = net.classify(&batch).unwrap();
        let second = net.classify(&batch).unwrap();
        assert_eq!(first, second);
        assert_eq!(net.w0(), &w0);
        assert_eq!(net.last_output().unwrap(), first[1].as_slice());
    }

    #[test]
    fn bad_inputs_fail_without_mutation() {
        let mut net = Network::new(&NetworkConfig::new(2, 2, 2)).unwrap();
        let w1 = net.w1().clone();

        assert!(matches!(
            net.train_one(&[1.0], 0, 0.1),
            Err(Error::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
        assert!(matches!(net.train_one(&[1.0, 0.0], 2, 0.1), Err(Error::LabelOutOfRange { .. })));
        assert!(matches!(net.train_one(&[1.0, 0.0], 0, 0.0), Err(Error::InvalidConfig(_))));
        assert!(net.classify(&[vec![1.0, 2.0], vec![1.0]]).is_err());
        assert_eq!(net.w1(), &w1);
        assert!(net.last_output().is_none());
    }

    #[test]
    fn combined_row_trains_like_explicit_label() {
        let config = NetworkConfig::new(2, 3, 2);
        let mut a = Network::new(&config).unwrap();
        let mut b = Network::new(&config).unwrap();
        a.train_one_combined(&[0.3, 0.9, 2.0], 0.2).unwrap();
        b.train_one(&[0.3, 0.9], 2, 0.2).unwrap();
        assert_eq!(a.w0(), b.w0());
        assert_eq!(a.w1(), b.w1());
    }

    #[test]
    fn mismatched_weight_shapes_are_rejected() {
        let w0 = Matrix::zeros(3, 2);
        let w1 = Matrix::zeros(2, 4);
        assert!(matches!(
            Network::from_weights(w0, w1),
            Err(Error::DimensionMismatch { expected: 3, actual: 4, .. })
        ));
    }

    #[test]
    fn inconsistent_matrix_data_is_rejected() {
        let short_rows = Matrix { rows: 2, cols: 2, data: vec![vec![1.0], vec![1.0]] };
        assert!(matches!(
            Network::from_weights(short_rows, Matrix::zeros(2, 2)),
            Err(Error::DimensionMismatch { context: "input weights", expected: 2, actual: 1 })
        ));

        let missing_row = Matrix { rows: 3, cols: 2, data: vec![vec![0.0; 2]; 2] };
        assert!(matches!(
            Network::from_weights(missing_row, Matrix::zeros(2, 3)),
            Err(Error::DimensionMismatch { context: "input weights", expected: 3, actual: 2 })
        ));

        let ragged_output = Matrix { rows: 2, cols: 2, data: vec![vec![0.0; 2], vec![0.0; 3]] };
        assert!(matches!(
            Network::from_weights(Matrix::zeros(2, 2), ragged_output),
            Err(Error::DimensionMismatch { context: "output weights", expected: 2, actual: 3 })
        ));
    }
}

use crate::activation::sigmoid_derivative;
use crate::error::{Error, Result};
use crate::loss::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::activations::Activations;

/// One-hot target of length `classes` with `1.0` at `label`.
pub fn one_hot(label: usize, classes: usize) -> Result<Vec<f64>> {
    if label >= classes {
        return Err(Error::LabelOutOfRange { label, classes });
    }
    let mut target = vec![0.0; classes];
    target[label] = 1.0;
    Ok(target)
}

/// Per-unit error signals for both layers.
///
/// Both vectors are computed from the same pre-update weights; a value of
/// this type exists only once the hidden error has already been read out of
/// `W1`, so applying it cannot disturb its own computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSignals {
    /// `e_out[i] = a2[i](1 - a2[i])(target[i] - a2[i])`
    pub output: Vec<f64>,
    /// `e_hid[j] = a1[j](1 - a1[j]) Σ_i W1[i][j] e_out[i]`
    pub hidden: Vec<f64>,
}

impl ErrorSignals {
    /// `w1` must be the output weight matrix the snapshot was produced with.
    pub fn compute(w1: &Matrix, activations: &Activations, target: &[f64]) -> ErrorSignals {
        let output: Vec<f64> = MseLoss::residual(&activations.output, target)
            .into_iter()
            .zip(&activations.output)
            .map(|(r, &y)| sigmoid_derivative(y) * r)
            .collect();

        // Propagate through W1ᵀ, then scale by each hidden unit's own slope.
        let hidden = w1
            .transpose()
            .mul_vec(&output)
            .into_iter()
            .zip(&activations.hidden)
            .map(|(back, &y)| sigmoid_derivative(y) * back)
            .collect();

        ErrorSignals { output, hidden }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hot_has_single_one() {
        for classes in 1..6 {
            for label in 0..classes {
                let target = one_hot(label, classes).unwrap();
                assert_eq!(target.len(), classes);
                assert_eq!(target.iter().filter(|&&x| x == 1.0).count(), 1);
                assert_eq!(target.iter().filter(|&&x| x == 0.0).count(), classes - 1);
                assert_eq!(target[label], 1.0);
            }
        }
    }

    #[test]
    fn one_hot_rejects_out_of_range() {
        assert!(matches!(
            one_hot(3, 3),
            Err(Error::LabelOutOfRange { label: 3, classes: 3 })
        ));
    }

    #[test]
    fn signals_match_closed_form() {
        let w1 = Matrix::from_data(vec![vec![0.2, -0.4], vec![0.1, 0.3]]);
        let activations = Activations {
            input: vec![1.0],
            hidden: vec![0.6, 0.3],
            output: vec![0.7, 0.2],
        };
        let signals = ErrorSignals::compute(&w1, &activations, &[0.0, 1.0]);

        let e0 = 0.7 * 0.3 * (0.0 - 0.7);
        let e1 = 0.2 * 0.8 * (1.0 - 0.2);
        assert!((signals.output[0] - e0).abs() < 1e-12);
        assert!((signals.output[1] - e1).abs() < 1e-12);

        let h0 = 0.6 * 0.4 * (0.2 * e0 + 0.1 * e1);
        let h1 = 0.3 * 0.7 * (-0.4 * e0 + 0.3 * e1);
        assert!((signals.hidden[0] - h0).abs() < 1e-12);
        assert!((signals.hidden[1] - h1).abs() < 1e-12);
    }
}

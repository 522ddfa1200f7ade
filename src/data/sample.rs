use crate::error::{Error, Result};

/// A feature vector paired with its class index.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f64>,
    pub label: usize,
}

impl Sample {
    pub fn new(features: Vec<f64>, label: usize) -> Sample {
        Sample { features, label }
    }

    /// Splits a combined row whose last element is the class index, the
    /// layout used by comma-delimited datasets such as iris.
    ///
    /// The trailing value must be a finite, non-negative integer.
    pub fn from_combined(row: &[f64]) -> Result<Sample> {
        let (&last, features) = row.split_last().ok_or(Error::DimensionMismatch {
            context: "combined row",
            expected: 1,
            actual: 0,
        })?;
        if !last.is_finite() || last < 0.0 || last.fract() != 0.0 {
            return Err(Error::InvalidLabel(last));
        }
        Ok(Sample::new(features.to_vec(), last as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_row_splits_trailing_label() {
        let sample = Sample::from_combined(&[5.1, 3.5, 1.4, 0.2, 2.0]).unwrap();
        assert_eq!(sample.features, vec![5.1, 3.5, 1.4, 0.2]);
        assert_eq!(sample.label, 2);
    }

    #[test]
    fn combined_row_rejects_bad_labels() {
        assert!(matches!(Sample::from_combined(&[1.0, 1.5]), Err(Error::InvalidLabel(_))));
        assert!(matches!(Sample::from_combined(&[1.0, -1.0]), Err(Error::InvalidLabel(_))));
        assert!(matches!(Sample::from_combined(&[1.0, f64::NAN]), Err(Error::InvalidLabel(_))));
        assert!(matches!(Sample::from_combined(&[]), Err(Error::DimensionMismatch { .. })));
    }
}

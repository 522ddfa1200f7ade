//! Line-oriented sample streams.
//!
//! Two parallel text streams carry one sample per line: the feature stream
//! holds whitespace-separated numbers, the label stream a single class index.
//! This is the format consumed by
//! [`train_streaming`](crate::train::streaming::train_streaming).

use std::io::Write;

use crate::data::sample::Sample;
use crate::error::{Error, Result};

/// Parses one feature line. `line_no` is 1-based and only used in errors.
pub fn parse_feature_line(line: &str, line_no: usize) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|cell| {
            cell.parse::<f64>().map_err(|_| Error::Parse {
                line: line_no,
                message: format!("'{cell}' is not a number"),
            })
        })
        .collect()
}

/// Parses one label line holding a non-negative integer class index.
pub fn parse_label_line(line: &str, line_no: usize) -> Result<usize> {
    let trimmed = line.trim();
    trimmed.parse::<usize>().map_err(|_| Error::Parse {
        line: line_no,
        message: format!("label '{trimmed}' is not a non-negative integer"),
    })
}

/// Renders samples into the two-stream line format.
pub fn write_line_streams<F: Write, L: Write>(
    samples: &[Sample],
    mut features_out: F,
    mut labels_out: L,
) -> Result<()> {
    for sample in samples {
        let line: Vec<String> = sample.features.iter().map(|x| x.to_string()).collect();
        writeln!(features_out, "{}", line.join(" "))?;
        writeln!(labels_out, "{}", sample.label)?;
    }
    features_out.flush()?;
    labels_out.flush()?;
    Ok(())
}

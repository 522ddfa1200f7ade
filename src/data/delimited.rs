//! Delimited numeric text, one row per line.
//!
//! Used for datasets like iris where every line is `f1,f2,...,fn,class`.
//! - A first line containing any non-numeric cell is treated as a header
//!   and skipped.
//! - Blank lines are ignored.
//! - Every data row must have the same number of cells.

use std::io::BufRead;
use std::path::Path;

use tracing::info;

use crate::data::sample::Sample;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads every data row of `reader` as a vector of floats.
pub fn parse_delimited<R: BufRead>(reader: R, delimiter: char) -> Result<Vec<Vec<f64>>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if idx == 0 && is_header(line, delimiter) {
            continue;
        }

        let row = parse_row(line, delimiter, idx + 1)?;
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(Error::Parse {
                    line: idx + 1,
                    message: format!("{} cells, expected {}", row.len(), first.len()),
                });
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Opens `path` and parses it with [`parse_delimited`].
pub fn read_delimited_file<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Vec<Vec<f64>>> {
    let file = std::fs::File::open(path.as_ref())?;
    let rows = parse_delimited(std::io::BufReader::new(file), delimiter)?;
    info!(path = %path.as_ref().display(), rows = rows.len(), "loaded delimited file");
    Ok(rows)
}

/// Converts rows whose last cell is the class index into samples.
pub fn samples_from_rows(rows: &[Vec<f64>]) -> Result<Vec<Sample>> {
    rows.iter().map(|row| Sample::from_combined(row)).collect()
}

/// Reads the first cell of each row as a class index numbered from `base`
/// (results files often count classes from 1).
pub fn first_column_labels(rows: &[Vec<f64>], base: usize) -> Result<Vec<usize>> {
    rows.iter()
        .map(|row| {
            let &value = row.first().ok_or(Error::DimensionMismatch {
                context: "results row",
                expected: 1,
                actual: 0,
            })?;
            if !value.is_finite() || value.fract() != 0.0 || value < base as f64 {
                return Err(Error::InvalidLabel(value));
            }
            Ok(value as usize - base)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Returns `true` if the row looks like a header (any cell non-numeric).
fn is_header(line: &str, delimiter: char) -> bool {
    line.split(delimiter).any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

fn parse_row(line: &str, delimiter: char, line_no: usize) -> Result<Vec<f64>> {
    line.split(delimiter)
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| Error::Parse {
                line: line_no,
                message: format!("'{}' is not a valid number", c.trim()),
            })
        })
        .collect()
}

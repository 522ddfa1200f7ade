//! Parser for pairs of IDX binary files (image + label) as used by MNIST and
//! its derivatives (Fashion-MNIST, EMNIST, …).
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-1:   0x00 0x00   (reserved, must be zero)
//! byte   2:     0x08        (dtype = uint8)
//! byte   3:     0x03        (number of dimensions = 3)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (image height in pixels, big-endian u32)
//! bytes 12-15:  cols        (image width in pixels, big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-1:   0x00 0x00   (reserved, must be zero)
//! byte   2:     0x08        (dtype = uint8)
//! byte   3:     0x01        (number of dimensions = 1)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index
//! ```
//!
//! Each sample's features are the image pixels divided by 255.0, so values
//! lie in `[0.0, 1.0]`; its label is the raw class byte.

use std::path::Path;

use tracing::info;

use crate::data::sample::Sample;
use crate::error::{Error, Result};

const IMAGE_DIMS: u8 = 0x03;
const LABEL_DIMS: u8 = 0x01;

/// Validates both headers and returns one sample per image, in file order.
pub fn parse_idx_pair(image_bytes: &[u8], label_bytes: &[u8]) -> Result<Vec<Sample>> {
    // ── Image file validation ───────────────────────────────────────────────

    check_header(image_bytes, IMAGE_DIMS, "image")?;
    if image_bytes.len() < 16 {
        return Err(Error::InvalidFormat(format!(
            "IDX image file too short: expected at least 16 header bytes, got {}.",
            image_bytes.len()
        )));
    }

    let n_items = read_u32(image_bytes, 4);
    let rows = read_u32(image_bytes, 8);
    let cols = read_u32(image_bytes, 12);

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        Error::InvalidFormat(format!(
            "IDX image file: rows * cols overflows usize (rows={rows}, cols={cols})."
        ))
    })?;
    let required_image_len = n_items
        .checked_mul(n_pixels)
        .and_then(|data| data.checked_add(16))
        .ok_or_else(|| Error::InvalidFormat("IDX image file: data length overflows usize.".to_owned()))?;

    if image_bytes.len() < required_image_len {
        return Err(Error::InvalidFormat(format!(
            "IDX image file too short: header declares {n_items} items of {rows}×{cols} pixels, \
             but file is only {} bytes total.",
            image_bytes.len()
        )));
    }

    // ── Label file validation ───────────────────────────────────────────────

    check_header(label_bytes, LABEL_DIMS, "label")?;
    if label_bytes.len() < 8 {
        return Err(Error::InvalidFormat(format!(
            "IDX label file too short: expected at least 8 header bytes, got {}.",
            label_bytes.len()
        )));
    }

    let label_count = read_u32(label_bytes, 4);
    if label_count != n_items {
        return Err(Error::InvalidFormat(format!(
            "IDX file mismatch: image file declares {n_items} items but label file declares {label_count}."
        )));
    }
    if label_bytes.len() < 8 + n_items {
        return Err(Error::InvalidFormat(format!(
            "IDX label file too short: header declares {n_items} labels but file is only {} bytes.",
            label_bytes.len()
        )));
    }

    // ── Build samples ───────────────────────────────────────────────────────

    if n_pixels == 0 {
        return Ok(Vec::new());
    }
    let image_data = &image_bytes[16..required_image_len];
    let label_data = &label_bytes[8..8 + n_items];

    Ok(image_data
        .chunks_exact(n_pixels)
        .zip(label_data)
        .map(|(chunk, &label)| {
            Sample::new(chunk.iter().map(|&px| px as f64 / 255.0).collect(), label as usize)
        })
        .collect())
}

/// Reads both files from disk and parses them with [`parse_idx_pair`].
pub fn read_idx_pair<P: AsRef<Path>, Q: AsRef<Path>>(images: P, labels: Q) -> Result<Vec<Sample>> {
    let image_bytes = std::fs::read(images.as_ref())?;
    let label_bytes = std::fs::read(labels.as_ref())?;
    let samples = parse_idx_pair(&image_bytes, &label_bytes)?;
    info!(
        images = %images.as_ref().display(),
        samples = samples.len(),
        features = samples.first().map_or(0, |s| s.features.len()),
        "loaded IDX data"
    );
    Ok(samples)
}

fn check_header(bytes: &[u8], dims: u8, kind: &str) -> Result<()> {
    if bytes.len() < 4 {
        return Err(Error::InvalidFormat(format!(
            "IDX {kind} file too short: {} bytes.",
            bytes.len()
        )));
    }
    if bytes[0] != 0x00 || bytes[1] != 0x00 {
        return Err(Error::InvalidFormat(format!(
            "IDX {kind} file: bytes 0-1 must be 0x00 0x00 (reserved), got 0x{:02X} 0x{:02X}.",
            bytes[0], bytes[1]
        )));
    }
    if bytes[2] != 0x08 {
        return Err(Error::InvalidFormat(format!(
            "IDX {kind} file: byte 2 (dtype) must be 0x08 (uint8), got 0x{:02X}.",
            bytes[2]
        )));
    }
    if bytes[3] != dims {
        return Err(Error::InvalidFormat(format!(
            "IDX {kind} file: byte 3 (dimensions) must be {dims}, got {}.",
            bytes[3]
        )));
    }
    Ok(())
}

fn read_u32(bytes: &[u8], offset: usize) -> usize {
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]]) as usize
}

//! Fallible pixel buffer allocation.

use image::{Rgba, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImagingError {
    #[error("Image has degenerate dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Cannot allocate a {width}x{height} pixel buffer")]
    ResourceExhausted { width: u64, height: u64 },
}

/// Allocate a `width x height` RGBA buffer filled with `fill`.
///
/// Reports [`ImagingError::ResourceExhausted`] instead of aborting when the
/// buffer cannot be reserved.
pub fn allocate_rgba(width: u32, height: u32, fill: Rgba<u8>) -> Result<RgbaImage, ImagingError> {
    let exhausted = || ImagingError::ResourceExhausted {
        width: width.into(),
        height: height.into(),
    };

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(exhausted)?;

    let mut raw = Vec::new();
    raw.try_reserve_exact(len).map_err(|_| exhausted())?;
    raw.extend(fill.0.iter().copied().cycle().take(len));

    RgbaImage::from_raw(width, height, raw).ok_or_else(exhausted)
}

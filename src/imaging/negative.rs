//! Color inversion.

use super::buffer::{ImagingError, allocate_rgba};
use crate::types::Negative;
use image::{Rgba, RgbaImage};

/// Build the photographic negative of `source`: each of R, G and B becomes
/// `255 - c`, alpha is copied through. `source` is left untouched.
pub fn invert(source: &RgbaImage) -> Result<Negative, ImagingError> {
    let (width, height) = source.dimensions();
    let mut negative = allocate_rgba(width, height, Rgba([0, 0, 0, 0]))?;

    for (dst, src) in negative.pixels_mut().zip(source.pixels()) {
        let Rgba([r, g, b, a]) = *src;
        *dst = Rgba([255 - r, 255 - g, 255 - b, a]);
    }

    Ok(Negative::new(negative))
}

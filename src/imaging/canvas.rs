//! Kaleidoscope compositing.
//!
//! A frame is built from one negative by painting four copies onto a fresh
//! black canvas. The copies come from a single chain of transforms, each step
//! applied to the previous step's output:
//!
//! | Step | Panel | Transform of previous step | Offset |
//! |---|---|---|---|
//! | 1 | top | none (the negative) | [`top_offset`] |
//! | 2 | bottom | flip vertical | [`bottom_offset`] |
//! | 3 | left | rotate 90° clockwise | [`left_offset`] |
//! | 4 | right | flip horizontal | [`right_offset`] |
//!
//! Painting replaces pixels outright; nothing is blended.

use super::buffer::{ImagingError, allocate_rgba};
use super::calculations::{
    Offset, bottom_offset, canvas_size, left_offset, right_offset, top_offset,
};
use crate::types::{Frame, Negative};
use image::{GenericImageView, Rgba, RgbaImage, imageops};
use tracing::debug;

/// Opaque black.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Build the kaleidoscope frame for one negative.
///
/// The canvas is `W + 2H` square for a `W x H` negative; see
/// [`calculations`](super::calculations) for the layout.
pub fn composite(negative: &Negative) -> Result<Frame, ImagingError> {
    let (width, height) = (negative.width(), negative.height());
    if width == 0 || height == 0 {
        return Err(ImagingError::InvalidDimensions { width, height });
    }

    let size = canvas_size(width, height);
    let side = u32::try_from(size).map_err(|_| ImagingError::ResourceExhausted {
        width: size,
        height: size,
    })?;
    let mut canvas = allocate_rgba(side, side, BACKGROUND)?;

    let top = negative.as_image();
    paint(&mut canvas, top, top_offset(width, height));

    let bottom = transformed(top, width, height, |src, dst| {
        imageops::flip_vertical_in(src, dst)
    })?;
    paint(&mut canvas, &bottom, bottom_offset(bottom.width(), bottom.height()));

    let left = transformed(&bottom, height, width, |src, dst| {
        imageops::rotate90_in(src, dst)
    })?;
    paint(&mut canvas, &left, left_offset(left.width(), left.height()));

    let right = transformed(&left, height, width, |src, dst| {
        imageops::flip_horizontal_in(src, dst)
    })?;
    paint(&mut canvas, &right, right_offset(right.width(), right.height()));

    debug!(width, height, side, "composited frame");
    Ok(Frame::new(canvas))
}

/// Run one `imageops::*_in` transform of `source` into a freshly allocated
/// `width x height` panel, so a panel that cannot be allocated is an error.
fn transformed<F>(
    source: &RgbaImage,
    width: u32,
    height: u32,
    transform: F,
) -> Result<RgbaImage, ImagingError>
where
    F: FnOnce(&RgbaImage, &mut RgbaImage) -> image::ImageResult<()>,
{
    let mut panel = allocate_rgba(width, height, BACKGROUND)?;
    transform(source, &mut panel)
        .map_err(|_| ImagingError::InvalidDimensions { width, height })?;
    Ok(panel)
}

/// Copy `panel` onto `canvas` at `offset`, clipping anything outside.
fn paint<I>(canvas: &mut RgbaImage, panel: &I, offset: Offset)
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    imageops::replace(canvas, panel, offset.x, offset.y);
}

//! Pixel buffers at each stage of the pipeline.
//!
//! All three stages hold an [`RgbaImage`]; the wrappers only record where a
//! buffer came from so a raw decode cannot be handed to the compositor, or a
//! negative to the encoder, by mistake.

use image::RgbaImage;

/// Color-inverted copy of a decoded photograph. Built by
/// [`imaging::invert`](crate::imaging::invert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negative(RgbaImage);

impl Negative {
    pub(crate) fn new(image: RgbaImage) -> Self {
        Self(image)
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.0
    }
}

/// A finished square canvas, ready for the animation. Built by
/// [`imaging::composite`](crate::imaging::composite).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(RgbaImage);

impl Frame {
    pub(crate) fn new(image: RgbaImage) -> Self {
        debug_assert_eq!(image.width(), image.height(), "frames are square");
        Self(image)
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.0.width()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.0
    }

    pub fn into_image(self) -> RgbaImage {
        self.0
    }
}

/// A frame whose side length differs from the sequence's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMismatch {
    pub expected: u32,
    pub found: u32,
}

/// Frames in playback order. Every frame has the same side length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame, rejecting it if its size differs from the first frame's.
    pub fn push(&mut self, frame: Frame) -> Result<(), SizeMismatch> {
        if let Some(expected) = self.canvas_size()
            && frame.size() != expected
        {
            return Err(SizeMismatch {
                expected,
                found: frame.size(),
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Shared side length, or `None` for an empty sequence.
    pub fn canvas_size(&self) -> Option<u32> {
        self.frames.first().map(Frame::size)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> impl Iterator<Item = Frame> {
        self.frames.into_iter()
    }
}

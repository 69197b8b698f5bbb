//! Image decoding backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two reads the sequencer needs from a
//! photograph on disk: its dimensions (cheap, header only) and its pixels.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure Rust decoders.

use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Image(#[from] image::ImageError),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image decoding backends.
///
/// `Sync` so a single backend can serve every rayon worker.
pub trait ImageBackend: Sync {
    /// Get image dimensions without decoding pixels.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode a photograph into 8-bit RGBA.
    fn decode(&self, path: &Path) -> Result<RgbaImage, BackendError>;
}

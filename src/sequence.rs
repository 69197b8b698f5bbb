//! Frame sequencing.
//!
//! Stage 2 of the kaleidogif pipeline. Turns the ordered list of source
//! photographs from the scan stage into an ordered [`FrameSequence`].
//!
//! ## Per-frame pipeline
//!
//! ```text
//! 0001.jpg ──decode──▶ RGBA ──invert──▶ Negative ──composite──▶ Frame
//! ```
//!
//! ## Size check
//!
//! A GIF has one logical screen size, so every frame must share one canvas
//! size. Before any pixels are decoded, each input's header is read and its
//! canvas size compared with the first input's; a mismatch aborts the run
//! with [`SequenceError::MixedDimensions`].
//!
//! ## Parallel Processing
//!
//! Frames are built in parallel using [rayon](https://docs.rs/rayon). The
//! indexed `collect` puts results back in input order, and the first error
//! stops the batch.

use crate::imaging::calculations::canvas_size;
use crate::imaging::{BackendError, ImageBackend, ImagingError, composite, invert};
use crate::scan::SourceFrame;
use crate::types::{Frame, FrameSequence};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: BackendError,
    },
    #[error("Failed to build frame from {}: {source}", path.display())]
    Imaging {
        path: PathBuf,
        source: ImagingError,
    },
    #[error(
        "{} would make a {found}x{found} frame but the animation is {expected}x{expected}; \
         all inputs must have the same dimensions",
        path.display()
    )]
    MixedDimensions {
        path: PathBuf,
        expected: u64,
        found: u64,
    },
}

/// Progress events emitted while building and encoding frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    /// Inputs found; processing is about to start.
    SequenceStarted { frame_count: usize },
    /// Work on an input has begun. `index` is 1-based in playback order.
    FrameStarted { index: usize, filename: String },
    /// An input has been turned into a frame.
    FrameComposited {
        index: usize,
        filename: String,
        source: (u32, u32),
        canvas: u32,
    },
    /// All frames are built; encoding has begun.
    EncodingStarted { frame_count: usize },
}

pub(crate) fn emit(events: Option<&Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // A closed receiver only means nobody is listening.
        tx.send(event).ok();
    }
}

/// Build one frame per source, in source order.
pub fn build_sequence(
    backend: &impl ImageBackend,
    sources: &[SourceFrame],
    events: Option<Sender<ProcessEvent>>,
) -> Result<FrameSequence, SequenceError> {
    check_uniform_size(backend, sources)?;

    let frames: Vec<Frame> = sources
        .par_iter()
        .enumerate()
        .map_with(events, |events, (i, source)| {
            build_frame(backend, source, i + 1, events.as_ref())
        })
        .collect::<Result<_, _>>()?;

    let mut sequence = FrameSequence::new();
    for (source, frame) in sources.iter().zip(frames) {
        sequence
            .push(frame)
            .map_err(|mismatch| SequenceError::MixedDimensions {
                path: source.path.clone(),
                expected: mismatch.expected.into(),
                found: mismatch.found.into(),
            })?;
    }
    Ok(sequence)
}

/// Read every header and reject the batch if canvas sizes differ.
fn check_uniform_size(
    backend: &impl ImageBackend,
    sources: &[SourceFrame],
) -> Result<(), SequenceError> {
    let mut expected = None;
    for source in sources {
        let dims = backend
            .identify(&source.path)
            .map_err(|e| SequenceError::Decode {
                path: source.path.clone(),
                source: e,
            })?;
        let size = canvas_size(dims.width, dims.height);
        match expected {
            None => expected = Some(size),
            Some(expected) if expected != size => {
                return Err(SequenceError::MixedDimensions {
                    path: source.path.clone(),
                    expected,
                    found: size,
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn build_frame(
    backend: &impl ImageBackend,
    input: &SourceFrame,
    index: usize,
    events: Option<&Sender<ProcessEvent>>,
) -> Result<Frame, SequenceError> {
    emit(
        events,
        ProcessEvent::FrameStarted {
            index,
            filename: input.filename.clone(),
        },
    );

    let decoded = backend
        .decode(&input.path)
        .map_err(|e| SequenceError::Decode {
            path: input.path.clone(),
            source: e,
        })?;
    let imaging_error = |e: ImagingError| SequenceError::Imaging {
        path: input.path.clone(),
        source: e,
    };

    let negative = invert(&decoded).map_err(imaging_error)?;
    let source = decoded.dimensions();
    drop(decoded);
    let frame = composite(&negative).map_err(imaging_error)?;

    debug!(index, file = %input.filename, size = frame.size(), "frame ready");
    emit(
        events,
        ProcessEvent::FrameComposited {
            index,
            filename: input.filename.clone(),
            source,
            canvas: frame.size(),
        },
    );
    Ok(frame)
}

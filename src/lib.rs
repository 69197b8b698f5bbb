//! # Kaleidogif
//!
//! Turns a directory of photographs into a looping animated GIF. Each photo
//! becomes one frame: its colors are inverted and the negative is laid out
//! four times around a black square, like the arms of a kaleidoscope.
//!
//! ```text
//!              ┌──────────────────────────┐
//!              │        ┌────────┐        │
//!              │        │  top   │        │
//!              │ ┌────┐ └────────┘ ┌────┐ │
//!              │ │left│            │rght│ │
//!              │ └────┘ ┌────────┐ └────┘ │
//!              │        │ bottom │        │
//!              │        └────────┘        │
//!              └──────────────────────────┘
//!                       W + 2H square
//! ```
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      frames/   →  ordered list of photos   (filesystem → paths)
//! 2. Sequence  photos    →  FrameSequence            (decode, invert, composite)
//! 3. Encode    frames    →  out.gif                  (GIF89a, loops forever)
//! ```
//!
//! [`pipeline::render_animation`] runs all three. Each stage is a plain
//! function from the previous stage's output, so the pixel work can be unit
//! tested against an in-memory backend without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: finds the input photos and fixes their order |
//! | [`sequence`] | Stage 2: builds one frame per photo, in parallel, preserving order |
//! | [`encode`] | Stage 3: encodes the frames into one animated GIF |
//! | [`pipeline`] | Runs the three stages and writes the output file |
//! | [`imaging`] | Decoding backend, negative inversion and the kaleidoscope canvas |
//! | [`types`] | `Negative`, `Frame` and `FrameSequence` |
//! | [`config`] | Layered `config.toml` loading and validation |
//! | [`output`] | CLI progress and summary formatting |
//!
//! # Design Decisions
//!
//! ## Immutable Transform Chain
//!
//! The four panels are derived from the negative by fresh copies
//! (`flip_vertical`, then `rotate90`, then `flip_horizontal`), each taken from
//! the previous result. Nothing is mutated in place, so the paint order is the
//! only thing that decides which arm wins in the shared corners.
//!
//! ## All-or-Nothing Output
//!
//! The GIF is encoded into memory and written in one go after every frame has
//! been built. A broken photo halfway through the batch fails the run and
//! leaves the output path exactly as it was.
//!
//! ## One Canvas Size Per Animation
//!
//! A GIF has a single logical screen. Inputs whose canvases would differ are
//! rejected up front, from their headers alone, before any pixels are decoded.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and GIF encoding both use the `image` crate. There are no system
//! libraries to install; the binary is self-contained.

pub mod config;
pub mod encode;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod sequence;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

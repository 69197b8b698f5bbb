//! Per-frame image work, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify / decode** | `image::ImageReader` ([`RustBackend`]) |
//! | **Invert** | per-pixel `255 - c` on RGB, alpha kept ([`invert`]) |
//! | **Composite** | `imageops::{flip_vertical, rotate90, flip_horizontal, replace}` ([`composite`]) |
//!
//! The module is split into:
//! - **Calculations**: canvas size and panel offsets (unit testable, no pixels)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Negative** / **Canvas**: the two pixel stages of a frame
//! - **Buffer**: fallible allocation shared by both stages

pub mod backend;
mod buffer;
pub mod calculations;
pub mod canvas;
pub mod negative;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use buffer::ImagingError;
pub use canvas::composite;
pub use negative::invert;
pub use rust_backend::{RustBackend, supported_input_extensions};

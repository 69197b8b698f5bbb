//! CLI output formatting.
//!
//! Progress goes to stdout as the render runs; diagnostics go through
//! `tracing` to stderr and are off unless `RUST_LOG` asks for them.
//!
//! # Output Format
//!
//! ```text
//! Frames (3 photos)
//!     001 0001.jpg
//!     002 0002.jpg
//!     001 0001.jpg → 220x220 (source 100x60)
//!     003 0003.jpg
//!     002 0002.jpg → 220x220 (source 100x60)
//!     003 0003.jpg → 220x220 (source 100x60)
//! Encoding 3 frames
//! ==> Wrote 3 frames (220x220) → out.gif
//!     48213 bytes
//! ```
//!
//! Frames are built in parallel, so started/finished lines interleave; the
//! index is always the frame's position in the animation.
//!
//! # Architecture
//!
//! Each kind of output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::pipeline::RenderSummary;
use crate::sequence::ProcessEvent;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn frame_line(index: usize, filename: &str) -> String {
    format!("{}{} {}", indent(1), format_index(index), filename)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::SequenceStarted { frame_count } => {
            vec![format!("Frames ({})", plural(*frame_count, "photo", "photos"))]
        }
        ProcessEvent::FrameStarted { index, filename } => vec![frame_line(*index, filename)],
        ProcessEvent::FrameComposited {
            index,
            filename,
            source: (width, height),
            canvas,
        } => vec![format!(
            "{} \u{2192} {canvas}x{canvas} (source {width}x{height})",
            frame_line(*index, filename)
        )],
        ProcessEvent::EncodingStarted { frame_count } => {
            vec![format!("Encoding {}", plural(*frame_count, "frame", "frames"))]
        }
    }
}

/// Print a progress event to stdout.
pub fn print_process_event(event: &ProcessEvent) {
    for line in format_process_event(event) {
        println!("{}", line);
    }
}

/// Format the closing summary of a successful render.
pub fn format_render_summary(summary: &RenderSummary) -> Vec<String> {
    let size = summary.canvas_size;
    vec![
        format!(
            "==> Wrote {} ({size}x{size}) \u{2192} {}",
            plural(summary.frame_count, "frame", "frames"),
            summary.output.display()
        ),
        format!("{}{} bytes", indent(1), summary.bytes_written),
    ]
}

/// Print the render summary to stdout.
pub fn print_render_summary(summary: &RenderSummary) {
    for line in format_render_summary(summary) {
        println!("{}", line);
    }
}

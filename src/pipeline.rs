//! End-to-end render: directory of photos in, animated GIF out.
//!
//! ```text
//! scan::find_frames ──▶ sequence::build_sequence ──▶ encode::encode ──▶ write_animation
//! ```
//!
//! The output file is only touched after encoding succeeds, so an error at any
//! stage leaves whatever was at `output` before the run untouched.

use crate::config::RenderConfig;
use crate::encode::{self, EncodeError, EncodeSettings};
use crate::imaging::{ImageBackend, RustBackend};
use crate::scan::{self, ScanError};
use crate::sequence::{self, ProcessEvent, SequenceError};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// What a successful render produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub frame_count: usize,
    /// Side length of every (square) frame.
    pub canvas_size: u32,
    pub bytes_written: usize,
    pub output: PathBuf,
}

/// Render every matching photo in `input_dir` into the GIF at `output`.
pub fn render_animation(
    input_dir: &Path,
    output: &Path,
    config: &RenderConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RenderSummary, PipelineError> {
    render_with_backend(&RustBackend::new(), input_dir, output, config, events)
}

pub(crate) fn render_with_backend(
    backend: &impl ImageBackend,
    input_dir: &Path,
    output: &Path,
    config: &RenderConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RenderSummary, PipelineError> {
    let sources = scan::find_frames(input_dir, &config.input.extension)?;
    info!(
        dir = %input_dir.display(),
        frames = sources.len(),
        "found input photos"
    );
    if sources.is_empty() {
        return Err(EncodeError::NoFrames.into());
    }

    sequence::emit(
        events.as_ref(),
        ProcessEvent::SequenceStarted {
            frame_count: sources.len(),
        },
    );
    let frames = sequence::build_sequence(backend, &sources, events.clone())?;

    let frame_count = frames.len();
    let canvas_size = frames.canvas_size().unwrap_or_default();
    sequence::emit(events.as_ref(), ProcessEvent::EncodingStarted { frame_count });
    let bytes = encode::encode(frames, &EncodeSettings::from_config(&config.animation))?;

    encode::write_animation(output, &bytes)?;
    info!(output = %output.display(), bytes = bytes.len(), "wrote animation");

    Ok(RenderSummary {
        frame_count,
        canvas_size,
        bytes_written: bytes.len(),
        output: output.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::solid_frames_dir;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    /// Frames directory with empty placeholder files; pixels come from the mock.
    fn frames_dir(names: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for name in names {
            fs::write(tmp.path().join(name), b"").unwrap();
        }
        tmp
    }

    #[test]
    fn renders_all_frames_to_output() {
        let input = frames_dir(&["a.jpg", "b.jpg"]);
        let out = TempDir::new().unwrap();
        let output = out.path().join("anim.gif");
        let backend = MockBackend::new()
            .with_solid("a.jpg", 40, 30, [255, 255, 255])
            .with_solid("b.jpg", 40, 30, [0, 0, 0]);

        let summary = render_with_backend(
            &backend,
            input.path(),
            &output,
            &RenderConfig::default(),
            None,
        )
        .unwrap();

        assert_eq!(summary.frame_count, 2);
        assert_eq!(summary.canvas_size, 100);
        assert_eq!(summary.output, output);
        let written = fs::read(&output).unwrap();
        assert_eq!(written.len(), summary.bytes_written);
        assert!(written.starts_with(b"GIF89a"));
    }

    #[test]
    fn empty_directory_is_no_frames_and_writes_nothing() {
        let input = frames_dir(&[]);
        let out = TempDir::new().unwrap();
        let output = out.path().join("anim.gif");

        let err = render_with_backend(
            &MockBackend::new(),
            input.path(),
            &output,
            &RenderConfig::default(),
            None,
        )
        .unwrap_err();

        assert!(matches!(err, PipelineError::Encode(EncodeError::NoFrames)));
        assert!(!output.exists());
    }

    #[test]
    fn failed_decode_leaves_existing_output_alone() {
        let input = frames_dir(&["a.jpg", "broken.jpg"]);
        let out = TempDir::new().unwrap();
        let output = out.path().join("anim.gif");
        fs::write(&output, b"previous").unwrap();
        let backend = MockBackend::new().with_solid("a.jpg", 40, 30, [0, 0, 0]);

        let err = render_with_backend(
            &backend,
            input.path(),
            &output,
            &RenderConfig::default(),
            None,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Sequence(SequenceError::Decode { .. })
        ));
        assert!(err.to_string().contains("broken.jpg"));
        assert_eq!(fs::read(&output).unwrap(), b"previous");
    }

    #[test]
    fn configured_extension_selects_inputs() {
        let input = frames_dir(&["a.png", "b.jpg"]);
        let out = TempDir::new().unwrap();
        let output = out.path().join("anim.gif");
        let backend = MockBackend::new().with_solid("a.png", 40, 30, [9, 9, 9]);
        let mut config = RenderConfig::default();
        config.input.extension = "png".into();

        let summary =
            render_with_backend(&backend, input.path(), &output, &config, None).unwrap();
        assert_eq!(summary.frame_count, 1);
    }

    #[test]
    fn missing_input_is_scan_error() {
        let out = TempDir::new().unwrap();
        let err = render_with_backend(
            &MockBackend::new(),
            &out.path().join("nope"),
            &out.path().join("anim.gif"),
            &RenderConfig::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Scan(ScanError::NotADirectory(_))));
    }

    #[test]
    fn events_bracket_the_frames() {
        let input = frames_dir(&["a.jpg"]);
        let out = TempDir::new().unwrap();
        let backend = MockBackend::new().with_solid("a.jpg", 40, 30, [0, 0, 0]);
        let (tx, rx) = mpsc::channel();

        render_with_backend(
            &backend,
            input.path(),
            &out.path().join("anim.gif"),
            &RenderConfig::default(),
            Some(tx),
        )
        .unwrap();

        let events: Vec<ProcessEvent> = rx.iter().collect();
        assert_eq!(
            events.first(),
            Some(&ProcessEvent::SequenceStarted { frame_count: 1 })
        );
        assert_eq!(
            events.last(),
            Some(&ProcessEvent::EncodingStarted { frame_count: 1 })
        );
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn render_animation_decodes_real_photos() {
        let input = solid_frames_dir(40, 30, &[("b.jpg", [0, 0, 255]), ("a.jpg", [255, 0, 0])]);
        let out = TempDir::new().unwrap();
        let output = out.path().join("anim.gif");

        let summary =
            render_animation(input.path(), &output, &RenderConfig::default(), None).unwrap();
        assert_eq!(summary.frame_count, 2);
        assert_eq!(summary.canvas_size, 100);
        assert!(output.is_file());
    }
}

//! Animated GIF encoding.
//!
//! Stage 3 of the kaleidogif pipeline. The whole [`FrameSequence`] is encoded
//! into memory in one call and only then written to disk, so a failed run
//! never leaves a truncated GIF behind.
//!
//! ## Defaults
//!
//! ```text
//! Loop:   forever (NETSCAPE2.0 extension, count 0)
//! Delay:  0 ms per frame (what image::Frame::new writes)
//! Speed:  10 (NeuQuant palette quantizer, 1 = best, 30 = fastest)
//! ```

use crate::config::AnimationConfig;
use crate::types::FrameSequence;
use image::Delay;
use image::codecs::gif::{GifEncoder, Repeat};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("No frames to encode: the input directory has no matching photos")]
    NoFrames,
    #[error("GIF encoding failed: {0}")]
    Codec(#[from] image::ImageError),
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// GIF quantizer speed (1-30). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed(i32);

impl Speed {
    pub fn new(value: i32) -> Self {
        Self(value.clamp(1, 30))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(10)
    }
}

/// How the finished animation is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSettings {
    /// Per-frame delay in milliseconds.
    pub delay_ms: u32,
    /// Play count; `0` loops forever.
    pub loops: u16,
    pub speed: Speed,
}

impl EncodeSettings {
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            delay_ms: config.delay_ms,
            loops: config.loops,
            speed: Speed::new(config.speed),
        }
    }

    fn repeat(&self) -> Repeat {
        match self.loops {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        }
    }
}

/// Encode every frame, in order, into one animated GIF.
pub fn encode(sequence: FrameSequence, settings: &EncodeSettings) -> Result<Vec<u8>, EncodeError> {
    if sequence.is_empty() {
        return Err(EncodeError::NoFrames);
    }

    let frame_count = sequence.len();
    let delay = Delay::from_numer_denom_ms(settings.delay_ms, 1);
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, settings.speed.value());
        encoder.set_repeat(settings.repeat())?;
        encoder.encode_frames(
            sequence
                .into_frames()
                .map(|frame| image::Frame::from_parts(frame.into_image(), 0, 0, delay)),
        )?;
        // Dropping the encoder writes the GIF trailer.
    }

    info!(frames = frame_count, bytes = bytes.len(), "encoded animation");
    Ok(bytes)
}

/// Write encoded bytes to `path`, replacing any existing file.
///
/// The bytes are staged in a temporary file next to `path` and renamed over
/// it, so a failed write never leaves a truncated GIF at `path`.
pub fn write_animation(path: &Path, bytes: &[u8]) -> Result<(), EncodeError> {
    let io_error = |source: std::io::Error| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".kaleidogif-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_error)?;
    staged.write_all(bytes).map_err(io_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(io_error)?;
    }
    // A failed persist drops the staged file, which deletes it.
    staged.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frame;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn solid_sequence(colors: &[[u8; 3]], size: u32) -> FrameSequence {
        let mut sequence = FrameSequence::new();
        for &[r, g, b] in colors {
            let img = RgbaImage::from_pixel(size, size, Rgba([r, g, b, 255]));
            sequence.push(Frame::new(img)).unwrap();
        }
        sequence
    }

    fn decode_frames(bytes: &[u8]) -> Vec<image::Frame> {
        GifDecoder::new(Cursor::new(bytes))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap()
    }

    fn close(a: Rgba<u8>, b: [u8; 3]) -> bool {
        a.0.iter()
            .zip(b)
            .all(|(&x, y)| (i16::from(x) - i16::from(y)).abs() <= 16)
    }

    #[test]
    fn speed_clamps_to_valid_range() {
        assert_eq!(Speed::new(0).value(), 1);
        assert_eq!(Speed::new(12).value(), 12);
        assert_eq!(Speed::new(99).value(), 30);
        assert_eq!(Speed::default().value(), 10);
    }

    #[test]
    fn loops_zero_repeats_forever() {
        let settings = EncodeSettings::default();
        assert!(matches!(settings.repeat(), Repeat::Infinite));
        let settings = EncodeSettings {
            loops: 3,
            ..Default::default()
        };
        assert!(matches!(settings.repeat(), Repeat::Finite(3)));
    }

    /// Loop count sub-block of the NETSCAPE2.0 application extension.
    fn netscape_loop_count(bytes: &[u8]) -> Option<u16> {
        let at = bytes.windows(11).position(|w| w == b"NETSCAPE2.0")?;
        let block = bytes.get(at + 11..at + 15)?;
        (block[0] == 3 && block[1] == 1).then(|| u16::from_le_bytes([block[2], block[3]]))
    }

    #[test]
    fn loop_count_is_written_to_the_gif() {
        let colors = [[0, 0, 0], [255, 255, 255]];
        let forever = encode(solid_sequence(&colors, 8), &EncodeSettings::default()).unwrap();
        assert_eq!(netscape_loop_count(&forever), Some(0));

        let settings = EncodeSettings {
            loops: 3,
            ..Default::default()
        };
        let three = encode(solid_sequence(&colors, 8), &settings).unwrap();
        assert_eq!(netscape_loop_count(&three), Some(3));
    }

    #[test]
    fn settings_from_config() {
        let config = AnimationConfig {
            delay_ms: 120,
            loops: 2,
            speed: 25,
        };
        let settings = EncodeSettings::from_config(&config);
        assert_eq!(settings.delay_ms, 120);
        assert_eq!(settings.loops, 2);
        assert_eq!(settings.speed.value(), 25);
    }

    #[test]
    fn empty_sequence_is_no_frames() {
        let result = encode(FrameSequence::new(), &EncodeSettings::default());
        assert!(matches!(result, Err(EncodeError::NoFrames)));
    }

    #[test]
    fn output_is_a_gif_with_every_frame_in_order() {
        let colors = [[200, 30, 30], [30, 200, 30], [30, 30, 200]];
        let bytes = encode(solid_sequence(&colors, 16), &EncodeSettings::default()).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
        assert_eq!(bytes.last(), Some(&0x3B));

        let frames = decode_frames(&bytes);
        assert_eq!(frames.len(), 3);
        for (frame, color) in frames.iter().zip(colors) {
            assert_eq!(frame.buffer().dimensions(), (16, 16));
            let pixel = *frame.buffer().get_pixel(8, 8);
            assert!(close(pixel, color), "{pixel:?} vs {color:?}");
        }
    }

    #[test]
    fn delay_is_written_per_frame() {
        let settings = EncodeSettings {
            delay_ms: 100,
            ..Default::default()
        };
        let bytes = encode(solid_sequence(&[[0, 0, 0], [255, 255, 255]], 8), &settings).unwrap();
        for frame in decode_frames(&bytes) {
            assert_eq!(frame.delay().numer_denom_ms(), (100, 1));
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let colors = [[10, 120, 240], [240, 120, 10]];
        let a = encode(solid_sequence(&colors, 12), &EncodeSettings::default()).unwrap();
        let b = encode(solid_sequence(&colors, 12), &EncodeSettings::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn write_animation_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.gif");
        std::fs::write(&path, b"old contents that are longer than the new ones").unwrap();

        write_animation(&path, b"GIF89a;").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"GIF89a;");
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn write_animation_leaves_no_staging_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.gif");

        write_animation(&path, b"GIF89a;").unwrap();
        assert_eq!(dir_entries(tmp.path()), vec!["out.gif"]);
    }

    #[test]
    fn failed_replace_keeps_existing_target_and_cleans_up() {
        let tmp = TempDir::new().unwrap();
        // A directory in the way makes the final rename fail after the
        // bytes have been staged.
        let path = tmp.path().join("out.gif");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep.txt"), b"keep").unwrap();

        let err = write_animation(&path, b"GIF89a;").unwrap_err();

        assert!(matches!(err, EncodeError::Io { .. }));
        assert_eq!(std::fs::read(path.join("keep.txt")).unwrap(), b"keep");
        assert_eq!(dir_entries(tmp.path()), vec!["out.gif"]);
    }

    #[cfg(unix)]
    #[test]
    fn written_animation_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.gif");

        write_animation(&path, b"GIF89a;").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn write_animation_reports_path_on_failure() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing-dir").join("out.gif");
        let err = write_animation(&path, b"GIF89a;").unwrap_err();
        assert!(err.to_string().contains("missing-dir"));
    }
}

//! Input discovery.
//!
//! Stage 1 of the kaleidogif pipeline. Lists the photographs that become
//! frames and fixes their order.
//!
//! ## Directory Structure
//!
//! ```text
//! frames/
//! ├── config.toml        # Optional, see config module
//! ├── 0001.jpg           # Frame 1
//! ├── 0002.JPG           # Frame 2 (extension match ignores case)
//! ├── 0003.jpg           # Frame 3
//! ├── .0004.jpg          # Hidden: skipped
//! ├── notes.txt          # Other extension: skipped
//! └── outtakes/          # Subdirectories are not descended into
//! ```
//!
//! ## Ordering
//!
//! Frames are sorted by file name, byte-wise ascending. This is the playback
//! order of the animation, so zero-pad numbered frames (`0010.jpg` sorts
//! after `0009.jpg`, `10.jpg` sorts before `9.jpg`).

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// One photograph that will become a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFrame {
    pub path: PathBuf,
    /// File name shown in progress output.
    pub filename: String,
}

/// List the files in `dir` (non-recursive) whose extension equals
/// `extension`, ignoring ASCII case, sorted by file name.
pub fn find_frames(dir: &Path, extension: &str) -> Result<Vec<SourceFrame>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_frame(&path, extension) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(paths
        .into_iter()
        .map(|path| SourceFrame {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path,
        })
        .collect())
}

fn is_frame(path: &Path, extension: &str) -> bool {
    let hidden = path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'));
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension));
    !hidden && matches && path.is_file()
}

//! Pure geometry for the kaleidoscope canvas.
//!
//! All functions here are pure and testable without any pixels.
//!
//! For a negative of `W x H` the canvas is `W + 2H` square and holds four
//! panels arranged as a cross, each inset by [`MARGIN`] from the outer edge:
//!
//! ```text
//!          H        W        H
//!     +--------+--------+--------+
//!     |        |  top   |        |   top:    as-is              at (H, M)
//!   H |        |  W x H |        |
//!     +--------+--------+--------+
//!     | left   |        | right  |   left:   flipped + rotated  at (M, H)
//!   W | H x W  |        | H x W  |   right:  left, mirrored     at (W+H-M, H)
//!     +--------+--------+--------+
//!     |        | bottom |        |   bottom: flipped vertically at (H, H+W-M)
//!   H |        |  W x H |        |
//!     +--------+--------+--------+
//! ```
//!
//! Every arm sits `M` pixels in from its outer edge, so adjacent arms share
//! an `M x M` square at each inner corner. Later panels win there.

/// Inset of every panel from the canvas edge, in pixels.
pub const MARGIN: i64 = 20;

/// Side length of the square canvas for a negative of `width x height`.
///
/// Computed in `u64` so it cannot overflow; callers decide whether the
/// result is allocatable.
pub fn canvas_size(width: u32, height: u32) -> u64 {
    u64::from(width) + 2 * u64::from(height)
}

/// Top-left corner at which a panel is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub x: i64,
    pub y: i64,
}

/// Offset of the unrotated negative. `width`/`height` are the negative's.
pub fn top_offset(_width: u32, height: u32) -> Offset {
    Offset {
        x: i64::from(height),
        y: MARGIN,
    }
}

/// Offset of the vertically flipped negative. `width`/`height` are the
/// flipped panel's, which match the negative's.
pub fn bottom_offset(width: u32, height: u32) -> Offset {
    Offset {
        x: i64::from(height),
        y: i64::from(height) + i64::from(width) - MARGIN,
    }
}

/// Offset of the rotated panel. `width`/`height` are the rotated panel's
/// own dimensions (the negative's height and width respectively).
pub fn left_offset(width: u32, _height: u32) -> Offset {
    Offset {
        x: MARGIN,
        y: i64::from(width),
    }
}

/// Offset of the mirrored rotated panel, using its own dimensions.
pub fn right_offset(width: u32, height: u32) -> Offset {
    Offset {
        x: i64::from(height) + i64::from(width) - MARGIN,
        y: i64::from(width),
    }
}

/// A painted region on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PanelRect {
    fn at(offset: Offset, width: u32, height: u32) -> Self {
        Self {
            x: offset.x,
            y: offset.y,
            width,
            height,
        }
    }

    /// Whether the canvas pixel `(x, y)` lies inside this panel.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x + i64::from(self.width)
            && y < self.y + i64::from(self.height)
    }
}

/// The four panel regions for a `width x height` negative, in paint order:
/// top, bottom, left, right.
pub fn panel_layout(width: u32, height: u32) -> [PanelRect; 4] {
    [
        PanelRect::at(top_offset(width, height), width, height),
        PanelRect::at(bottom_offset(width, height), width, height),
        PanelRect::at(left_offset(height, width), height, width),
        PanelRect::at(right_offset(height, width), height, width),
    ]
}

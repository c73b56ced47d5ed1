use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }
    /// True if the two half-open rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x >= other.right()
            || other.x >= self.right()
            || self.y >= other.bottom()
            || other.y >= self.bottom())
    }
    /// True if `self` lies inside a `width x height` canvas anchored at the origin.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width && self.bottom() <= height
    }
}

/// One icon found in a group's source directory.
///
/// Dimensions are read from the file header when the descriptor is built.
/// Files that are missing or cannot be decoded keep `exists == false` and
/// `size == None`; the layout engine skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    name: String,
    extension: String,
    location: PathBuf,
    size: Option<(u32, u32)>,
    exists: bool,
}

impl ImageDescriptor {
    /// Builds a descriptor from already-known parts. `name` and `extension` are lowercased.
    pub fn new(
        name: impl Into<String>,
        extension: impl Into<String>,
        location: impl Into<PathBuf>,
        size: Option<(u32, u32)>,
    ) -> Self {
        Self {
            name: name.into().to_lowercase(),
            extension: extension.into().to_lowercase(),
            location: location.into(),
            exists: size.is_some(),
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn extension(&self) -> &str {
        &self.extension
    }
    pub fn location(&self) -> &Path {
        &self.location
    }
    pub fn exists(&self) -> bool {
        self.exists
    }
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }
    /// Width in pixels, 0 when unknown.
    pub fn width(&self) -> u32 {
        self.size.map_or(0, |(w, _)| w)
    }
    /// Height in pixels, 0 when unknown.
    pub fn height(&self) -> u32 {
        self.size.map_or(0, |(_, h)| h)
    }
}

/// Placement of one icon on the sprite canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile<'a> {
    pub image: &'a ImageDescriptor,
    pub x: u32,
    pub y: u32,
}

impl Tile<'_> {
    pub fn width(&self) -> u32 {
        self.image.width()
    }
    pub fn height(&self) -> u32 {
        self.image.height()
    }
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width(), self.height())
    }
}

/// Result of one layout pass: tiles in placement order plus the canvas size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<'a> {
    pub tiles: Vec<Tile<'a>>,
    pub width: u32,
    pub height: u32,
    /// Heights of the closed rows, top to bottom.
    pub rows: Vec<u32>,
    /// Number of input descriptors that were not placed (missing or out of size bounds).
    pub skipped: usize,
}

impl Layout<'_> {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Computes occupancy statistics for this layout.
    pub fn stats(&self) -> LayoutStats {
        let canvas_area = (self.width as u64) * (self.height as u64);
        let used_area: u64 = self
            .tiles
            .iter()
            .map(|t| (t.width() as u64) * (t.height() as u64))
            .sum();
        let occupancy = if canvas_area > 0 {
            used_area as f64 / canvas_area as f64
        } else {
            0.0
        };
        LayoutStats {
            num_tiles: self.tiles.len(),
            num_skipped: self.skipped,
            num_rows: self.rows.len(),
            width: self.width,
            height: self.height,
            canvas_area,
            used_area,
            occupancy,
        }
    }
}

/// Statistics about a layout's packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LayoutStats {
    pub num_tiles: usize,
    /// Icons left out of the layout (unreadable or outside the size bounds).
    pub num_skipped: usize,
    pub num_rows: usize,
    pub width: u32,
    pub height: u32,
    pub canvas_area: u64,
    /// Sum of tile areas. Can exceed `canvas_area` when tiles hang over the row bound.
    pub used_area: u64,
    pub occupancy: f64,
}

impl LayoutStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Tiles: {}, Skipped: {}, Rows: {}, Canvas: {}x{}, Occupancy: {:.2}%",
            self.num_tiles,
            self.num_skipped,
            self.num_rows,
            self.width,
            self.height,
            self.occupancy * 100.0,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.canvas_area.saturating_sub(self.used_area)
    }
}

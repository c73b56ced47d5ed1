use tracing::{debug, trace, warn};

use super::Packer;
use crate::config::LayoutConstraints;
use crate::model::{ImageDescriptor, Layout, Tile};

/// Single-pass shelf packer.
///
/// Icons are laid out left to right in the order they are offered. After
/// each placement the packer checks whether another icon of the same width
/// would still fit inside `max_width`; if not, the row is closed and the
/// cursor moves down by the tallest icon of that row.
///
/// An icon that does not fit the remaining row space is still placed at the
/// current cursor (it hangs over the row bound) and the cursor does not
/// advance past it. Rows are never revisited.
#[derive(Debug, Clone)]
pub struct ShelfPacker<'a> {
    constraints: LayoutConstraints,
    cursor_x: u32,
    cursor_y: u32,
    row_max_height: u32,
    canvas_width: u32,
    rows: Vec<u32>,
    /// True once the current row's height has been recorded; cleared by the next placement.
    row_closed: bool,
    tiles: Vec<Tile<'a>>,
    skipped: usize,
}

impl<'a> ShelfPacker<'a> {
    pub fn new(constraints: LayoutConstraints) -> Self {
        Self {
            constraints,
            cursor_x: 0,
            cursor_y: 0,
            row_max_height: 0,
            canvas_width: 0,
            rows: Vec::new(),
            row_closed: true,
            tiles: Vec::new(),
            skipped: 0,
        }
    }

    /// Current cursor position (top-left of the next placement).
    pub fn cursor(&self) -> (u32, u32) {
        (self.cursor_x, self.cursor_y)
    }

    fn close_row(&mut self) {
        if self.row_closed {
            return;
        }
        debug!(
            row = self.rows.len(),
            y = self.cursor_y,
            height = self.row_max_height,
            "close row"
        );
        self.rows.push(self.row_max_height);
        self.row_closed = true;
    }
}

impl<'a> Packer<'a> for ShelfPacker<'a> {
    fn can_pack(&self, image: &ImageDescriptor) -> bool {
        image.exists() && self.constraints.accepts(image.width(), image.height())
    }

    fn pack(&mut self, image: &'a ImageDescriptor) -> Option<Tile<'a>> {
        if !self.can_pack(image) {
            trace!(name = image.name(), size = ?image.size(), "skip icon");
            self.skipped += 1;
            return None;
        }
        let (w, h) = (image.width(), image.height());
        let max_width = self.constraints.max_width;

        self.row_closed = false;
        self.row_max_height = self.row_max_height.max(h);

        let tile = Tile {
            image,
            x: self.cursor_x,
            y: self.cursor_y,
        };
        trace!(name = image.name(), x = tile.x, y = tile.y, w, h, "place icon");
        self.tiles.push(tile);

        let end = self.cursor_x.saturating_add(w);
        if w > 0 && end <= max_width {
            self.cursor_x = end;
        } else {
            warn!(
                name = image.name(),
                x = tile.x,
                w,
                max_width,
                "icon overhangs the row width and does not widen the canvas"
            );
        }
        self.canvas_width = self.canvas_width.max(self.cursor_x);

        if self.cursor_x.saturating_add(w) > max_width {
            self.close_row();
            self.cursor_x = 0;
            self.cursor_y = self.cursor_y.saturating_add(self.row_max_height);
            self.row_max_height = 0;
        }
        Some(tile)
    }

    fn finish(mut self) -> Layout<'a> {
        self.close_row();
        let height = self.rows.iter().fold(0u32, |acc, h| acc.saturating_add(*h));
        Layout {
            tiles: self.tiles,
            width: self.canvas_width,
            height,
            rows: self.rows,
            skipped: self.skipped,
        }
    }
}

use tracing::{debug, instrument};

use crate::config::LayoutConstraints;
use crate::model::{ImageDescriptor, Layout, Tile};

pub mod shelf;

pub use shelf::ShelfPacker;

/// A packer places icons onto one sprite canvas, in the order they are offered.
///
/// `pack` returns `None` for icons the packer refuses (see `can_pack`);
/// refused icons take no space. `finish` closes any open row and reports the
/// final canvas size.
pub trait Packer<'a> {
    fn can_pack(&self, image: &ImageDescriptor) -> bool;
    fn pack(&mut self, image: &'a ImageDescriptor) -> Option<Tile<'a>>;
    fn finish(self) -> Layout<'a>
    where
        Self: Sized;
}

/// Lays out `images` with a [`ShelfPacker`].
///
/// Icons that are unreadable or outside the size bounds are skipped. When
/// nothing is placed the layout is empty and 0x0.
#[instrument(skip_all, fields(count = images.len(), max_width = constraints.max_width))]
pub fn pack_layout(images: &[ImageDescriptor], constraints: LayoutConstraints) -> Layout<'_> {
    let mut packer = ShelfPacker::new(constraints);
    for image in images {
        packer.pack(image);
    }
    let layout = packer.finish();
    debug!(
        tiles = layout.tiles.len(),
        skipped = layout.skipped,
        width = layout.width,
        height = layout.height,
        "layout computed"
    );
    layout
}

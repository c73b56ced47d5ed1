use image::RgbaImage;
use tracing::{debug, instrument};

use crate::codec::CodecTable;
use crate::error::Result;
use crate::model::{ImageDescriptor, Layout};

/// Copy all of `src` into `canvas` with its top-left corner at (dx, dy).
///
/// Pixels are replaced, not alpha-blended, so transparency in the icon is
/// preserved. Anything falling outside the canvas is clipped.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    let rw = sw.min(cw.saturating_sub(dx));
    let rh = sh.min(ch.saturating_sub(dy));
    for yy in 0..rh {
        for xx in 0..rw {
            canvas.put_pixel(dx + xx, dy + yy, *src.get_pixel(xx, yy));
        }
    }
}

/// Composite every tile of `layout` onto a transparent canvas, decoding icons through `codecs`.
pub fn compose(layout: &Layout<'_>, codecs: &CodecTable) -> Result<RgbaImage> {
    compose_with(layout, |image| codecs.decode_rgba(image))
}

/// Like [`compose`], with a caller-supplied decode step.
///
/// Each decoded icon lives only for its own blit, so peak memory is the
/// canvas plus one icon.
#[instrument(skip_all, fields(width = layout.width, height = layout.height))]
pub fn compose_with<F>(layout: &Layout<'_>, mut decode: F) -> Result<RgbaImage>
where
    F: FnMut(&ImageDescriptor) -> Result<RgbaImage>,
{
    let mut canvas = RgbaImage::new(layout.width, layout.height);
    for tile in &layout.tiles {
        let icon = decode(tile.image)?;
        if icon.dimensions() != (tile.width(), tile.height()) {
            debug!(
                name = tile.image.name(),
                decoded = ?icon.dimensions(),
                probed = ?(tile.width(), tile.height()),
                "decoded size differs from probed size"
            );
        }
        blit_rgba(&icon, &mut canvas, tile.x, tile.y);
    }
    Ok(canvas)
}

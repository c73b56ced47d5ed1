//! Decode/encode capabilities used by the scanner and the compositor.
//!
//! Decoding is dispatched through a [`CodecTable`] keyed by lowercase file
//! extension. The default table covers `png`, `jpg`, `gif`, `bmp` and `webp`;
//! callers can register more extensions without touching the dispatcher.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, ImageResult,
    RgbaImage,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, SpriteError};
use crate::model::ImageDescriptor;

/// Extensions understood by [`CodecTable::default`].
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "gif", "bmp", "webp"];

/// Reads one on-disk image format.
pub trait Decoder: Send + Sync {
    /// Reads only as much of the file as needed to learn its dimensions.
    fn dimensions(&self, path: &Path) -> ImageResult<(u32, u32)>;
    /// Fully decodes the file.
    fn decode(&self, path: &Path) -> ImageResult<DynamicImage>;
}

/// Decoder bound to a fixed `image` crate format, regardless of file contents.
#[derive(Debug, Clone, Copy)]
pub struct FormatDecoder(pub ImageFormat);

impl FormatDecoder {
    fn open(&self, path: &Path) -> ImageResult<ImageReader<BufReader<File>>> {
        let mut reader = ImageReader::open(path)?;
        reader.set_format(self.0);
        Ok(reader)
    }
}

impl Decoder for FormatDecoder {
    fn dimensions(&self, path: &Path) -> ImageResult<(u32, u32)> {
        self.open(path)?.into_dimensions()
    }

    fn decode(&self, path: &Path) -> ImageResult<DynamicImage> {
        self.open(path)?.decode()
    }
}

/// Extension-keyed decoder table.
pub struct CodecTable {
    decoders: BTreeMap<String, Box<dyn Decoder>>,
}

impl CodecTable {
    /// A table with no decoders registered.
    pub fn empty() -> Self {
        Self {
            decoders: BTreeMap::new(),
        }
    }

    /// Registers (or replaces) the decoder for `extension` (case-insensitive).
    pub fn register(&mut self, extension: &str, decoder: impl Decoder + 'static) -> &mut Self {
        self.decoders
            .insert(extension.to_ascii_lowercase(), Box::new(decoder));
        self
    }

    pub fn supports(&self, extension: &str) -> bool {
        self.decoders.contains_key(&extension.to_ascii_lowercase())
    }

    /// Registered extensions in lexical order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(String::as_str)
    }

    fn decoder(&self, extension: &str) -> Result<&dyn Decoder> {
        self.decoders
            .get(&extension.to_ascii_lowercase())
            .map(|d| &**d)
            .ok_or_else(|| SpriteError::UnsupportedExtension(extension.to_string()))
    }

    /// Reads the dimensions of `path` using the decoder registered for `extension`.
    pub fn dimensions(&self, path: &Path, extension: &str) -> Result<(u32, u32)> {
        self.decoder(extension)?
            .dimensions(path)
            .map_err(|source| SpriteError::Decode {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Decodes `image` into an RGBA8 buffer.
    pub fn decode_rgba(&self, image: &ImageDescriptor) -> Result<RgbaImage> {
        let decoded = self
            .decoder(image.extension())?
            .decode(image.location())
            .map_err(|source| SpriteError::Decode {
                path: image.location().to_path_buf(),
                source,
            })?;
        Ok(decoded.into_rgba8())
    }
}

impl Default for CodecTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table
            .register("png", FormatDecoder(ImageFormat::Png))
            .register("jpg", FormatDecoder(ImageFormat::Jpeg))
            .register("gif", FormatDecoder(ImageFormat::Gif))
            .register("bmp", FormatDecoder(ImageFormat::Bmp))
            .register("webp", FormatDecoder(ImageFormat::WebP));
        table
    }
}

impl std::fmt::Debug for CodecTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.decoders.keys()).finish()
    }
}

/// Maps the 0..=9 quality setting onto the PNG encoder's compression presets.
pub fn png_compression(quality: u8) -> CompressionType {
    match quality {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encodes `canvas` as an RGBA PNG.
pub fn encode_png(canvas: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return Err(SpriteError::Encode(format!(
            "cannot encode an empty {w}x{h} canvas"
        )));
    }
    let mut buf = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buf, png_compression(quality), FilterType::Adaptive);
    encoder.write_image(canvas.as_raw(), w, h, ExtendedColorType::Rgba8)?;
    Ok(buf)
}

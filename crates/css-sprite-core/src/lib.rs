//! Core library for compiling folders of icons into CSS sprite sheets.
//!
//! - Scan: `scan_dir` lists a group's icons and reads their dimensions
//! - Layout: `pack_layout` runs a single-pass shelf packer bounded by `max_width`
//! - Compositing: `compose` blits every tile onto one transparent RGBA canvas
//! - Stylesheet: `group_rules` derives one positional CSS rule per tile
//! - Orchestration: `SpriteBuilder` runs all of the above per group and writes
//!   `sprite-<group>.png` plus a combined `sprite.css`
//!
//! Quick example:
//! ```ignore
//! use css_sprite_core::{GroupConfig, SpriteBuilder, SpriteConfig};
//! # fn main() -> anyhow::Result<()> {
//! let config = SpriteConfig {
//!     path: "public/css".into(),
//!     sprites: vec![GroupConfig::new("ui", "sprites/ui")],
//!     ..Default::default()
//! };
//! config.validate()?;
//! let report = SpriteBuilder::new(config, ".").build();
//! println!("ok: {}", report.is_success());
//! # Ok(()) }
//! ```

pub mod codec;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod scan;
pub mod stylesheet;

pub use codec::*;
pub use compositing::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;
pub use scan::*;
pub use stylesheet::*;

/// Convenience prelude for common types and functions.
/// Importing `css_sprite_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::codec::{CodecTable, Decoder, FormatDecoder, encode_png};
    pub use crate::compositing::{compose, compose_with};
    pub use crate::config::{
        GroupConfig, LayoutConstraints, Settings, SettingsBuilder, SpriteConfig,
    };
    pub use crate::error::{Result, SpriteError};
    pub use crate::model::{ImageDescriptor, Layout, LayoutStats, Rect, Tile};
    pub use crate::packer::{Packer, ShelfPacker, pack_layout};
    pub use crate::pipeline::{BuildReport, CompiledGroup, GroupReport, SpriteBuilder};
    pub use crate::scan::scan_dir;
    pub use crate::stylesheet::{CssRule, StyleOptions, group_rules, render};
}

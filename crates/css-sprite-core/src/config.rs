use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpriteError};

/// Build-wide settings shared by every group.
///
/// Keys use kebab-case in config files (`max-width`, `min-size`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Row width limit of the shelf layout, in pixels.
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    /// Icons narrower or shorter than this are skipped.
    #[serde(default = "default_min_size")]
    pub min_size: u32,
    /// Icons wider or taller than this are skipped.
    #[serde(default = "default_max_size")]
    pub max_size: u32,
    /// PNG compression level, 0 (fastest) to 9 (smallest).
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Stable-sort each group's icons by ascending width before layout.
    #[serde(default)]
    pub sort: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            quality: default_quality(),
            sort: false,
        }
    }
}

impl Settings {
    /// Validates the numeric constraints.
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(SpriteError::InvalidConfig(
                "max-width must be greater than zero".into(),
            ));
        }
        if self.min_size > self.max_size {
            return Err(SpriteError::InvalidConfig(format!(
                "min-size ({}) exceeds max-size ({})",
                self.min_size, self.max_size
            )));
        }
        if self.quality > 9 {
            return Err(SpriteError::InvalidConfig(format!(
                "quality must be within 0..=9, got {}",
                self.quality
            )));
        }
        Ok(())
    }

    /// Size bounds and row width consumed by the layout engine.
    pub fn constraints(&self) -> LayoutConstraints {
        LayoutConstraints {
            min_size: self.min_size,
            max_size: self.max_size,
            max_width: self.max_width,
        }
    }
}

fn default_max_width() -> u32 {
    1024
}
fn default_min_size() -> u32 {
    1
}
fn default_max_size() -> u32 {
    512
}
fn default_quality() -> u8 {
    9
}

/// Constraints for one layout pass. Size bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConstraints {
    pub min_size: u32,
    pub max_size: u32,
    pub max_width: u32,
}

impl LayoutConstraints {
    /// True if both dimensions fall within `min_size..=max_size`.
    pub fn accepts(&self, width: u32, height: u32) -> bool {
        let bounds = self.min_size..=self.max_size;
        bounds.contains(&width) && bounds.contains(&height)
    }
}

/// One named group of icons compiled into `sprite-<name>.png`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupConfig {
    /// Group name; becomes part of every CSS selector and the sprite file name.
    pub name: String,
    /// Source directory holding the group's icons.
    pub path: PathBuf,
    /// Directory receiving the sprite image. Defaults to the config-wide `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl GroupConfig {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// File name of the generated sprite image.
    pub fn image_file_name(&self) -> String {
        format!("sprite-{}.png", self.name)
    }

    /// File name of the optional JSON manifest.
    pub fn manifest_file_name(&self) -> String {
        format!("sprite-{}.json", self.name)
    }
}

/// Top-level configuration, usually loaded from `sprite.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpriteConfig {
    /// Output directory for the combined stylesheet and, by default, the sprite images.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub sprites: Vec<GroupConfig>,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            settings: Settings::default(),
            sprites: Vec::new(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("public/css")
}

/// Name of the combined stylesheet written next to the sprites.
pub const STYLESHEET_FILE_NAME: &str = "sprite.css";

impl SpriteConfig {
    /// Validates settings and group declarations.
    ///
    /// Returns an error if:
    /// - a numeric setting is out of range
    /// - no group is declared
    /// - a group name is empty, not usable inside a CSS class, or declared twice
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        if self.sprites.is_empty() {
            return Err(SpriteError::InvalidConfig(
                "no sprite groups have been declared".into(),
            ));
        }
        let mut seen = HashSet::new();
        for group in &self.sprites {
            if !is_class_fragment(&group.name) {
                return Err(SpriteError::InvalidConfig(format!(
                    "group name '{}' must be non-empty and contain only ASCII letters, digits, '-' or '_'",
                    group.name
                )));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(SpriteError::InvalidConfig(format!(
                    "group '{}' is declared more than once",
                    group.name
                )));
            }
        }
        Ok(())
    }

    /// Directory receiving the combined stylesheet.
    pub fn stylesheet_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }

    /// Source directory of `group`, resolved against `root`.
    pub fn source_dir(&self, root: &Path, group: &GroupConfig) -> PathBuf {
        root.join(&group.path)
    }

    /// Output directory of `group`, resolved against `root`.
    pub fn output_dir(&self, root: &Path, group: &GroupConfig) -> PathBuf {
        root.join(group.output.as_ref().unwrap_or(&self.path))
    }
}

pub(crate) fn is_class_fragment(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Builder for `Settings` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }
    pub fn max_width(mut self, v: u32) -> Self {
        self.settings.max_width = v;
        self
    }
    pub fn size_bounds(mut self, min: u32, max: u32) -> Self {
        self.settings.min_size = min;
        self.settings.max_size = max;
        self
    }
    pub fn quality(mut self, v: u8) -> Self {
        self.settings.quality = v;
        self
    }
    pub fn sort(mut self, v: bool) -> Self {
        self.settings.sort = v;
        self
    }
    pub fn build(self) -> Settings {
        self.settings
    }
}

impl Settings {
    /// Create a fluent builder for `Settings`.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }
}

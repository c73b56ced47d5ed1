use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

use crate::codec::{CodecTable, encode_png};
use crate::compositing::compose;
use crate::config::{GroupConfig, STYLESHEET_FILE_NAME, SpriteConfig};
use crate::error::{Result, SpriteError};
use crate::export::to_json;
use crate::model::LayoutStats;
use crate::packer::pack_layout;
use crate::scan::scan_dir;
use crate::stylesheet::{StyleOptions, group_rules, render};

/// One group compiled in memory: encoded sprite, stylesheet text and stats.
#[derive(Debug, Clone)]
pub struct CompiledGroup {
    pub name: String,
    /// File name of the sprite image (`sprite-<name>.png`).
    pub image_file: String,
    pub png: Vec<u8>,
    pub css: String,
    pub manifest: Option<Value>,
    pub stats: LayoutStats,
}

/// Files produced for a group that built successfully.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub image_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
    pub stats: LayoutStats,
}

/// Outcome of one group.
#[derive(Debug)]
pub struct GroupReport {
    pub name: String,
    pub result: Result<GroupSummary>,
}

impl GroupReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of a full build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub groups: Vec<GroupReport>,
    /// Path of the combined stylesheet, when it was written.
    pub stylesheet: Option<PathBuf>,
    pub stylesheet_error: Option<SpriteError>,
}

impl BuildReport {
    /// True when every group and the combined stylesheet succeeded.
    pub fn is_success(&self) -> bool {
        self.stylesheet_error.is_none() && self.groups.iter().all(GroupReport::is_ok)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &GroupReport> {
        self.groups.iter().filter(|g| g.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &GroupReport> {
        self.groups.iter().filter(|g| !g.is_ok())
    }
}

/// Compiles every configured group into a sprite image and one combined stylesheet.
///
/// Groups are built one after another. A failing group is recorded in the
/// [`BuildReport`] and the remaining groups still run.
#[derive(Debug)]
pub struct SpriteBuilder {
    config: SpriteConfig,
    root: PathBuf,
    codecs: CodecTable,
    style: StyleOptions,
    manifest: bool,
    dry_run: bool,
}

impl SpriteBuilder {
    /// Relative paths in `config` are resolved against `root`.
    pub fn new(config: SpriteConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            codecs: CodecTable::default(),
            style: StyleOptions::default(),
            manifest: false,
            dry_run: false,
        }
    }

    pub fn with_codecs(mut self, codecs: CodecTable) -> Self {
        self.codecs = codecs;
        self
    }

    pub fn with_style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }

    /// Also write `sprite-<name>.json` next to each sprite image.
    pub fn with_manifest(mut self, v: bool) -> Self {
        self.manifest = v;
        self
    }

    /// Compile everything but write nothing.
    pub fn dry_run(mut self, v: bool) -> Self {
        self.dry_run = v;
        self
    }

    pub fn config(&self) -> &SpriteConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs scan, layout, compositing and CSS generation for one group without writing anything.
    #[instrument(skip_all, fields(group = %group.name))]
    pub fn compile_group(&self, group: &GroupConfig) -> Result<CompiledGroup> {
        let settings = &self.config.settings;
        let source = self.config.source_dir(&self.root, group);
        if !source.is_dir() {
            return Err(SpriteError::SourceMissing {
                group: group.name.clone(),
                path: source,
            });
        }

        let images = scan_dir(&source, &self.codecs, settings.sort)?;
        if images.is_empty() {
            warn!(dir = %source.display(), "no supported icons found");
        }
        let layout = pack_layout(&images, settings.constraints());
        if layout.is_empty() {
            return Err(SpriteError::NothingToCompile {
                group: group.name.clone(),
            });
        }
        let stats = layout.stats();

        let image_file = group.image_file_name();
        let css = render(&group_rules(&group.name, &image_file, &layout, self.style));
        let manifest = self
            .manifest
            .then(|| to_json(&group.name, &image_file, &layout));

        let canvas = compose(&layout, &self.codecs)?;
        let png = encode_png(&canvas, settings.quality)?;

        Ok(CompiledGroup {
            name: group.name.clone(),
            image_file,
            png,
            css,
            manifest,
            stats,
        })
    }

    /// Compiles `group` and writes its sprite image (and manifest). Returns the stylesheet text.
    fn build_group(&self, group: &GroupConfig) -> Result<(GroupSummary, String)> {
        let output = self.config.output_dir(&self.root, group);
        if !output.is_dir() {
            return Err(SpriteError::OutputMissing {
                group: group.name.clone(),
                path: output,
            });
        }
        let compiled = self.compile_group(group)?;

        let image_path = output.join(&compiled.image_file);
        let manifest_path = compiled
            .manifest
            .as_ref()
            .map(|_| output.join(group.manifest_file_name()));
        if !self.dry_run {
            write_file(&image_path, &compiled.png)?;
            if let (Some(path), Some(manifest)) = (&manifest_path, &compiled.manifest) {
                let json = serde_json::to_string_pretty(manifest)
                    .map_err(|e| SpriteError::Encode(e.to_string()))?;
                write_file(path, json.as_bytes())?;
            }
        }
        info!(
            group = %group.name,
            image = %image_path.display(),
            bytes = compiled.png.len(),
            "{}",
            compiled.stats.summary()
        );
        let summary = GroupSummary {
            image_path,
            manifest_path,
            stats: compiled.stats,
        };
        Ok((summary, compiled.css))
    }

    /// Builds every group and writes the combined stylesheet.
    pub fn build(&self) -> BuildReport {
        self.build_with(|_| {})
    }

    /// Like [`build`](Self::build), calling `on_group` after each group finishes.
    #[instrument(skip_all, fields(groups = self.config.sprites.len()))]
    pub fn build_with<F: FnMut(&GroupReport)>(&self, mut on_group: F) -> BuildReport {
        let mut report = BuildReport::default();
        let mut css = String::new();

        for group in &self.config.sprites {
            let result = match self.build_group(group) {
                Ok((summary, group_css)) => {
                    css.push_str(&group_css);
                    Ok(summary)
                }
                Err(e) => {
                    error!(group = %group.name, error = %e, "group failed");
                    Err(e)
                }
            };
            let group_report = GroupReport {
                name: group.name.clone(),
                result,
            };
            on_group(&group_report);
            report.groups.push(group_report);
        }

        if report.succeeded().next().is_none() {
            warn!("no group compiled; stylesheet not written");
            return report;
        }
        let path = self
            .config
            .stylesheet_dir(&self.root)
            .join(STYLESHEET_FILE_NAME);
        if self.dry_run {
            report.stylesheet = Some(path);
            return report;
        }
        match write_file(&path, css.as_bytes()) {
            Ok(()) => {
                info!(path = %path.display(), "stylesheet written");
                report.stylesheet = Some(path);
            }
            Err(e) => {
                error!(error = %e, "stylesheet not written");
                report.stylesheet_error = Some(e);
            }
        }
        report
    }

    /// Removes artifacts a previous build may have written: the combined
    /// stylesheet plus each group's sprite image and manifest. Returns the removed paths.
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        let mut candidates = vec![
            self.config
                .stylesheet_dir(&self.root)
                .join(STYLESHEET_FILE_NAME),
        ];
        for group in &self.config.sprites {
            let output = self.config.output_dir(&self.root, group);
            candidates.push(output.join(group.image_file_name()));
            candidates.push(output.join(group.manifest_file_name()));
        }
        let mut removed = Vec::new();
        for path in candidates {
            if path.is_file() && !removed.contains(&path) {
                fs::remove_file(&path)?;
                info!(path = %path.display(), "removed");
                removed.push(path);
            }
        }
        Ok(removed)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| SpriteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

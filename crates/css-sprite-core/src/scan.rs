use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

use crate::codec::CodecTable;
use crate::error::Result;
use crate::model::ImageDescriptor;

/// Builds a descriptor for `path`, reading only the image header.
///
/// Returns `None` when the extension has no registered decoder. A file that
/// cannot be probed still yields a descriptor, with `exists() == false`.
pub fn describe(path: &Path, codecs: &CodecTable) -> Option<ImageDescriptor> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if !codecs.supports(&extension) {
        return None;
    }
    let name = path.file_stem()?.to_string_lossy().to_lowercase();
    let size = match codecs.dimensions(path, &extension) {
        Ok(size) => Some(size),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable icon");
            None
        }
    };
    Some(ImageDescriptor::new(name, extension, path, size))
}

/// Lists the icons of one flat source directory.
///
/// Entries are visited in file-name order. Sub-directories and files with
/// unsupported extensions are ignored. With `sort` set, the result is
/// stably ordered by ascending width; icons without dimensions count as 0.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn scan_dir(dir: &Path, codecs: &CodecTable, sort: bool) -> Result<Vec<ImageDescriptor>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut images: Vec<ImageDescriptor> = paths
        .iter()
        .filter_map(|p| describe(p, codecs))
        .collect();

    warn_duplicate_names(&images);
    if sort {
        images.sort_by_key(ImageDescriptor::width);
    }
    debug!(count = images.len(), "scanned icons");
    Ok(images)
}

fn warn_duplicate_names(images: &[ImageDescriptor]) {
    let mut seen = HashSet::new();
    for image in images {
        if !seen.insert(image.name()) {
            warn!(name = image.name(), "duplicate icon name; CSS selectors will collide");
        }
    }
}

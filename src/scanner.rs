use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::session::Clip;

/// Recursively collect files whose extension matches `extension`
/// (case-insensitive), sorted by path. Unreadable entries are logged
/// and skipped.
pub fn find_files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry under '{}': {}", dir.display(), err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }

    files.sort();
    files
}

/// Pair raw recordings with their converted counterparts by base filename.
/// A raw file without a converted counterpart still yields a clip; a
/// converted file without a raw counterpart is reported and ignored.
pub fn pair_clips(raw_files: &[PathBuf], converted_files: &[PathBuf]) -> Vec<Clip> {
    let mut converted_by_base: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in converted_files {
        if let Some(base) = file_base(path) {
            converted_by_base.insert(base, path.clone());
        }
    }

    let mut clips = Vec::new();
    for raw_path in raw_files {
        let base = match file_base(raw_path) {
            Some(base) => base,
            None => continue,
        };
        let converted = converted_by_base.remove(&base);
        clips.push(Clip::new(base, raw_path.clone(), converted));
    }

    for (base, path) in &converted_by_base {
        warn!(
            "No raw recording found for converted file '{}' ({})",
            path.display(),
            base
        );
    }

    clips
}

/// Given the directory the user pointed at, work out the raw directory and
/// the converted directory. A `_s` or `_c` directory is treated as converter
/// output with the raw directory derived by stripping the suffix; otherwise
/// the converted directory is the first existing `_s`/`_c` sibling.
pub fn derive_directories(dir: &Path) -> (PathBuf, Option<PathBuf>) {
    let name = dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    for suffix in ["_s", "_c"] {
        if let Some(base) = name.strip_suffix(suffix) {
            if !base.is_empty() {
                return (dir.with_file_name(base), Some(dir.to_path_buf()));
            }
        }
    }

    for suffix in ["_s", "_c"] {
        let candidate = sibling_with_suffix(dir, suffix);
        if candidate.is_dir() {
            return (dir.to_path_buf(), Some(candidate));
        }
    }

    (dir.to_path_buf(), None)
}

/// `/footage` + `_s` -> `/footage_s`.
pub fn sibling_with_suffix(dir: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = dir.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn file_base(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_string())
}

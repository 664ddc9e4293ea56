use crate::utils::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    ".mkv", ".mp4", ".avi", ".m4v", ".mov", ".wmv", ".flv", ".webm",
];

/// Marker inserted between stem and extension of in-progress remux outputs.
pub const TEMP_MARKER: &str = "audio-prune-tmp";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Discovery {
    /// Candidate files, sorted lexicographically.
    pub video_files: Vec<PathBuf>,
    /// Temporary outputs left behind by an interrupted run.
    pub leftovers: Vec<PathBuf>,
}

pub fn find_video_files<P: AsRef<Path>>(root: P, extensions: &[String]) -> Result<Discovery> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(Error::not_found(root));
    }

    if !root.is_dir() {
        return Err(Error::not_a_directory(root));
    }

    let mut discovery = Discovery::default();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_video_file(path, extensions) {
            continue;
        }

        if is_temp_artifact(path) {
            discovery.leftovers.push(path.to_path_buf());
        } else {
            discovery.video_files.push(path.to_path_buf());
        }
    }

    discovery.video_files.sort();
    discovery.leftovers.sort();

    Ok(discovery)
}

pub fn is_video_file<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
    let path = path.as_ref();

    if let Some(extension) = path.extension() {
        if let Some(ext_str) = extension.to_str() {
            let ext_lower = format!(".{}", ext_str.to_lowercase());
            return extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext_lower));
        }
    }

    false
}

/// Temporary output path next to `path`: `movie.mkv` -> `movie.audio-prune-tmp.mkv`.
///
/// Same directory keeps the final rename on one filesystem.
pub fn temp_path_for<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();

    let file_stem = path
        .file_stem()
        .ok_or_else(|| Error::validation(format!("Invalid file name: {}", path.display())))?;

    // Built from OsStr so names that are not valid UTF-8 survive unchanged.
    let mut filename = OsString::from(file_stem);
    filename.push(".");
    filename.push(TEMP_MARKER);
    if let Some(extension) = path.extension() {
        filename.push(".");
        filename.push(extension);
    }

    Ok(path.with_file_name(filename))
}

pub fn is_temp_artifact<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().ends_with(&format!(".{}", TEMP_MARKER)))
        .unwrap_or(false)
}

pub fn default_extensions() -> Vec<String> {
    DEFAULT_VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};

/// Image formats accepted into the output corpus as-is.
pub const CANONICAL_IMAGE_EXTS: &[&str] = &["jpg", "jpeg"];

/// The encoding all normalized images are written in.
pub const CANONICAL_IMAGE_EXT: &str = "jpg";

/// Image formats the normalizer re-encodes into the canonical one.
pub const CONVERTIBLE_IMAGE_EXTS: &[&str] = &["png", "bmp", "tiff"];

pub const ANNOTATION_EXT: &str = "xml";

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let template = format!(
        "{{spinner:.green}} [{label}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})"
    );
    let style = ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Case-insensitive search for files carrying any of the given extensions.
/// Results are sorted so downstream shuffles are reproducible across
/// filesystems.
pub fn find_files(root: &Path, exts: &[&str], recursive: bool) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut found = Vec::new();
    for ext in exts {
        let pattern = if recursive {
            format!("{}/**/*.{}", root.display(), ext)
        } else {
            format!("{}/*.{}", root.display(), ext)
        };
        let entries = glob_with(&pattern, options)
            .map_err(|e| Error::io("invalid walk pattern", root, io::Error::other(e)))?;
        for entry in entries {
            let path = entry
                .map_err(|e| Error::io("failed to read directory entry", root, e.into_error()))?;
            if path.is_file() {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Every file under `root`, regardless of extension.
pub fn find_all_files(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/**/*", root.display());
    let entries = glob_with(&pattern, MatchOptions::new())
        .map_err(|e| Error::io("invalid walk pattern", root, io::Error::other(e)))?;
    let mut found = Vec::new();
    for entry in entries {
        let path =
            entry.map_err(|e| Error::io("failed to read directory entry", root, e.into_error()))?;
        if path.is_file() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// UTF-8 file-name stem of a path.
pub fn stem_of(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(String::from)
        .ok_or_else(|| {
            Error::io(
                "file has no usable stem",
                path,
                io::Error::other("missing or non-UTF-8 file name"),
            )
        })
}

/// Lowercased UTF-8 extension of a path.
pub fn ext_of(path: &Path) -> Result<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            Error::io(
                "file has no usable extension",
                path,
                io::Error::other("missing or non-UTF-8 extension"),
            )
        })
}

/// UTF-8 file name of a path.
pub fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| {
            Error::io(
                "file has no usable name",
                path,
                io::Error::other("missing or non-UTF-8 file name"),
            )
        })
}

pub fn copy_file(from: &Path, to: &Path, context: &'static str) -> Result<()> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| Error::io(context, from, e))
}

/// Idempotent directory bootstrap.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io("failed to create directory", path, e))
}

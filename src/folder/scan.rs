//! Local preview of the files a folder source ingests
//!
//! Walks the folder recursively the way the platform's folder connector does:
//! hidden entries are skipped and only files with an extension the platform
//! can extract text from are listed.

use eyre::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extensions the platform extracts text from (lowercase, no dot)
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "txt", "md", "mdx", "conf", "log", "json", "csv", "tsv", "xml", "yml", "yaml", "sql", "pdf",
    "docx", "pptx", "xlsx", "eml", "epub", "html", "htm", "png", "jpg", "jpeg", "webp",
];

/// A file the folder connector would pick up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub full_path: PathBuf,
    /// Path relative to the scanned folder
    pub relative_path: PathBuf,
}

impl ScannedFile {
    /// File name shown as the document's display name
    pub fn display_name(&self) -> String {
        self.relative_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

pub fn is_accepted_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the files under `folder` the folder connector would ingest.
///
/// A missing path or a path that is not a directory yields an empty listing.
/// Results are ordered by path.
///
/// # Errors
/// Returns an error if a directory inside the folder cannot be read.
pub fn scan_folder(folder: impl AsRef<Path>) -> Result<Vec<ScannedFile>> {
    let folder = folder.as_ref();

    if !folder.exists() {
        log::error!("Folder path does not exist: {}", folder.display());
        return Ok(Vec::new());
    }
    if !folder.is_dir() {
        log::error!("Path is not a directory: {}", folder.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(folder)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry =
            entry.with_context(|| format!("Error scanning folder '{}'", folder.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let full_path = entry.path().to_path_buf();
        if !is_accepted_extension(&full_path) {
            log::debug!(
                "Skipping file '{}' with unrecognized extension",
                full_path.display()
            );
            continue;
        }

        let relative_path = full_path
            .strip_prefix(folder)
            .unwrap_or(&full_path)
            .to_path_buf();
        files.push(ScannedFile {
            full_path,
            relative_path,
        });
    }

    log::info!(
        "Scanned folder '{}' and found {} files",
        folder.display(),
        files.len()
    );
    Ok(files)
}

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a file atomically: the content lands in a temporary file in the
    /// destination directory which is then renamed over the target path.
    ///
    /// A failure mid-write leaves no partial or zero-length destination file.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = path.parent().unwrap_or(Path::new("."));
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file next to: {:?}", path))?;

        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write content for: {:?}", path))?;
        temp.flush()?;

        temp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to persist file: {:?}", path))?;

        Ok(())
    }

    /// List the JSON catalog file names directly inside a language directory,
    /// sorted for a stable processing order.
    pub fn discover_catalog_files<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if let Some(ext) = path.extension() {
                if ext.to_string_lossy().eq_ignore_ascii_case("json") {
                    if let Some(name) = path.file_name() {
                        names.push(name.to_string_lossy().to_string());
                    }
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

// src/fs/mod.rs

//! File store collaborator: listing input exports, reading them, and
//! appending migrated output documents.
//!
//! The pipeline only talks to the [`FileStore`] trait so tests can swap in
//! [`mock::MockFileStore`].

use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};

pub mod mock;

/// Abstract file store interface.
pub trait FileStore: Send + Sync + Debug {
    /// Regular files directly under `dir` whose extension matches `ext`
    /// (case-insensitive, without the leading dot), sorted by path.
    fn list_files(&self, dir: &Path, ext: &str) -> Result<Vec<PathBuf>>;

    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Append `contents` to `path`, creating the file and any missing parent
    /// directories.
    fn append(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}

/// Compile a matcher for file names ending in `.<ext>`.
pub fn extension_matcher(ext: &str) -> Result<GlobMatcher> {
    let ext = ext.trim_start_matches('.');
    let glob = GlobBuilder::new(&format!("*.{ext}"))
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .with_context(|| format!("building file matcher for extension {:?}", ext))?;
    Ok(glob.compile_matcher())
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileStore;

impl FileStore for RealFileStore {
    fn list_files(&self, dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
        let matcher = extension_matcher(ext)?;
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("reading dir {:?}", dir))? {
            let path = entry?.path();
            let name_matches = path
                .file_name()
                .map(|name| matcher.is_match(name))
                .unwrap_or(false);
            if path.is_file() && name_matches {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("reading file {:?}", path))
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
            }
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening file {:?}", path))?;
        file.write_all(contents)
            .with_context(|| format!("writing to file {:?}", path))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

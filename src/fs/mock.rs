// src/fs/mock.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};

use super::{FileStore, extension_matcher};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // child names
}

/// In-memory [`FileStore`] for tests.
///
/// Clones share the same underlying tree, so a test can keep one handle to
/// inspect what the pipeline wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MockFileStore {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    /// Paths for which `append` fails, to exercise output error handling.
    read_only: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileStore {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            files: Arc::new(Mutex::new(files)),
            read_only: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.entries();
        files.insert(path.clone(), MockEntry::File(content.into()));
        Self::link_to_parent(&mut files, &path);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.entries();
        Self::ensure_dir_entry(&mut files, path.as_ref());
    }

    /// Make every `append` under `dir` fail.
    pub fn deny_writes_under(&self, dir: impl AsRef<Path>) {
        self.read_only
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(dir.as_ref().to_path_buf());
    }

    /// Contents of a file, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.entries().get(path.as_ref()) {
            Some(MockEntry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// All file paths below `dir` (recursively), sorted.
    pub fn files_under(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        let mut out: Vec<PathBuf> = self
            .entries()
            .iter()
            .filter(|(path, entry)| matches!(entry, MockEntry::File(_)) && path.starts_with(dir))
            .map(|(path, _)| path.clone())
            .collect();
        out.sort();
        out
    }

    fn parent_of(path: &Path) -> Option<&Path> {
        path.parent().map(|parent| {
            if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            }
        })
    }

    fn link_to_parent(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let Some(parent) = Self::parent_of(path) else {
            return;
        };
        if parent == path {
            return;
        }
        Self::ensure_dir_entry(files, parent);
        if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_string());
                }
            }
        }
    }

    fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if files.contains_key(path) {
            return;
        }
        files.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
        Self::link_to_parent(files, path);
    }
}

impl FileStore for MockFileStore {
    fn list_files(&self, dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
        let matcher = extension_matcher(ext)?;
        let files = self.entries();
        match files.get(dir) {
            Some(MockEntry::Dir(children)) => {
                let mut out: Vec<PathBuf> = children
                    .iter()
                    .filter(|name| matcher.is_match(name.as_str()))
                    .map(|name| dir.join(name))
                    .filter(|path| matches!(files.get(path), Some(MockEntry::File(_))))
                    .collect();
                out.sort();
                Ok(out)
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", dir)),
        }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        match self.entries().get(path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let denied = self
            .read_only
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .any(|dir| path.starts_with(dir));
        if denied {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        let mut files = self.entries();
        match files.get_mut(path) {
            Some(MockEntry::File(existing)) => {
                existing.extend_from_slice(contents);
                return Ok(());
            }
            Some(MockEntry::Dir(_)) => return Err(anyhow!("Is a directory: {:?}", path)),
            None => {}
        }
        files.insert(path.to_path_buf(), MockEntry::File(contents.to_vec()));
        Self::link_to_parent(&mut files, path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.entries().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entries().get(path), Some(MockEntry::Dir(_)))
    }
}

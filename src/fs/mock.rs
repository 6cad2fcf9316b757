// src/fs/mock.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use super::FileSystem;

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // list of child names
}

/// In-memory filesystem for tests.
///
/// Parent directories are created implicitly when a file is added, matching
/// the `write` contract of [`RealFileSystem`](super::RealFileSystem).
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        // Ensure a root exists so walks from "/" work.
        entries.insert(PathBuf::from("/"), MockEntry::Dir(Vec::new()));
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path.clone(), MockEntry::File(content.into()));
        if let Some(parent) = path.parent() {
            Self::ensure_dir_entry(&mut entries, parent);
            Self::link_child(&mut entries, parent, &path);
        }
    }

    /// Snapshot of all regular files and their contents.
    ///
    /// Handy for asserting build output byte-for-byte in tests.
    pub fn file_snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .filter_map(|(path, entry)| match entry {
                MockEntry::File(contents) => Some((path.clone(), contents.clone())),
                MockEntry::Dir(_) => None,
            })
            .collect()
    }

    fn ensure_dir_entry(entries: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        if entries.contains_key(path) {
            return;
        }
        entries.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
        if let Some(parent) = path.parent() {
            if parent != path {
                Self::ensure_dir_entry(entries, parent);
                Self::link_child(entries, parent, path);
            }
        }
    }

    fn link_child(entries: &mut BTreeMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
        if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
            if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
                if !children.contains(&name.to_string()) {
                    children.push(name.to_string());
                }
            }
        }
    }

    fn unlink_child(entries: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    children.retain(|c| c != name);
                }
            }
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| anyhow!("Invalid UTF-8 in {:?}: {}", path, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.add_file(path, contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        entries.contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(entries.get(path), Some(MockEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(entries.get(path), Some(MockEntry::Dir(_)))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::File(_)) => {
                entries.remove(path);
                Self::unlink_child(&mut entries, path);
                Ok(())
            }
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            // Absent path is a success by contract.
            None => Ok(()),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if !entries.contains_key(path) {
            return Ok(());
        }
        entries.retain(|p, _| !p.starts_with(path));
        Self::unlink_child(&mut entries, path);
        Ok(())
    }
}

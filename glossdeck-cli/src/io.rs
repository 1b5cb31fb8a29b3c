//! File-backed persistence and artifact output for the terminal editor.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glossdeck_core::SnapshotStorage;

/// Key-value storage backed by one JSON file per key inside the data
/// directory (`~/.glossdeck` unless overridden).
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) the storage directory.
    pub fn open(dir: PathBuf) -> Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Ok(Self { dir })
    }

    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".glossdeck"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// Write the exported presentation document.
pub fn write_export(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}

/// Read a seed text file; blank-line-separated blocks become paragraphs.
pub fn read_seed_paragraphs(path: &Path) -> Result<Vec<String>> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;
    let content = fs::read_to_string(&canonical)
        .with_context(|| format!("Failed to read file: {}", canonical.display()))?;

    let mut paragraphs = Vec::new();
    let mut block = String::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            if !block.trim().is_empty() {
                paragraphs.push(block.trim().to_string());
            }
            block.clear();
        } else {
            if !block.is_empty() {
                block.push('\n');
            }
            block.push_str(line);
        }
    }
    if !block.trim().is_empty() {
        paragraphs.push(block.trim().to_string());
    }
    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossdeck_core::STORAGE_KEY;

    #[test]
    fn file_storage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path().to_path_buf()).unwrap();

        assert!(storage.get(STORAGE_KEY).unwrap().is_none());

        storage.set(STORAGE_KEY, "{\"meta\":{}}").unwrap();
        assert_eq!(
            storage.get(STORAGE_KEY).unwrap().as_deref(),
            Some("{\"meta\":{}}")
        );

        storage.remove(STORAGE_KEY).unwrap();
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
        // Removing again is fine.
        storage.remove(STORAGE_KEY).unwrap();
    }

    #[test]
    fn seed_files_split_on_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.txt");
        fs::write(
            &path,
            "First paragraph\nstill the first.\n\n\nSecond paragraph.\n\n   \nThird.\n",
        )
        .unwrap();

        let paragraphs = read_seed_paragraphs(&path).unwrap();
        assert_eq!(
            paragraphs,
            vec![
                "First paragraph\nstill the first.".to_string(),
                "Second paragraph.".to_string(),
                "Third.".to_string(),
            ]
        );
    }
}

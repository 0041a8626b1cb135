//! Save directory holding generated label images.
//!
//! Files are named `qr_<YYYYMMDD>_<HHMMSS>.jpg` from the UTC capture time.
//! A second label in the same second gets `_1`, `_2`, ... appended to the
//! stem; existing files are never overwritten.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

pub const FILE_PREFIX: &str = "qr_";
pub const FILE_EXT: &str = ".jpg";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const MAX_SAME_SECOND: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum LabelStoreError {
    #[error("Invalid label name: {0}")]
    InvalidName(String),
    #[error("Label not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// A label written by [`LabelStore::save`].
#[derive(Debug, Clone)]
pub struct SavedLabel {
    pub name: String,
    pub path: PathBuf,
}

/// A `.jpg` entry found in the save directory.
#[derive(Debug, Clone)]
pub struct StoredLabel {
    pub name: String,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug)]
pub struct LabelStore {
    save_dir: PathBuf,
}

impl LabelStore {
    pub fn new(save_dir: PathBuf) -> Self {
        Self { save_dir }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn ensure_dir(&self) -> Result<(), LabelStoreError> {
        std::fs::create_dir_all(&self.save_dir)?;
        Ok(())
    }

    /// File name for a label captured at `captured_at`, without collision suffix.
    pub fn file_name_for(captured_at: DateTime<Utc>) -> String {
        format!("{FILE_PREFIX}{}{FILE_EXT}", captured_at.format(TIMESTAMP_FORMAT))
    }

    /// Write a new label file. Never replaces an existing file.
    pub fn save(&self, data: &[u8], captured_at: DateTime<Utc>) -> Result<SavedLabel, LabelStoreError> {
        self.ensure_dir()?;
        let base = Self::file_name_for(captured_at);
        let stem = base.strip_suffix(FILE_EXT).unwrap_or(&base);

        for seq in 0..MAX_SAME_SECOND {
            let name = if seq == 0 {
                base.clone()
            } else {
                format!("{stem}_{seq}{FILE_EXT}")
            };
            let path = self.save_dir.join(&name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(data)?;
                    tracing::info!(name = %name, bytes = data.len(), "Label saved");
                    return Ok(SavedLabel { name, path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(name = %name, "Label name taken, trying next suffix");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(LabelStoreError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("too many labels saved in the same second as {stem}"),
        )))
    }

    /// List every `.jpg` file in the save directory (unordered).
    pub fn list(&self) -> Result<Vec<StoredLabel>, LabelStoreError> {
        let entries = match std::fs::read_dir(&self.save_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut labels = Vec::new();
        for entry in entries.flatten() {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.ends_with(FILE_EXT) {
                continue;
            }
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            labels.push(StoredLabel {
                name,
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
            });
        }
        tracing::debug!(count = labels.len(), dir = %self.save_dir.display(), "Scanned save directory");
        Ok(labels)
    }

    /// Resolve a label name to its path inside the save directory.
    pub fn path_of(&self, name: &str) -> Result<PathBuf, LabelStoreError> {
        validate_name(name)?;
        Ok(self.save_dir.join(name))
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>, LabelStoreError> {
        let path = self.path_of(name)?;
        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LabelStoreError::NotFound(name.to_string()),
            _ => LabelStoreError::Io(e),
        })
    }

    /// Remove a label file. A missing file is reported as an IO error.
    pub fn delete(&self, name: &str) -> Result<(), LabelStoreError> {
        let path = self.path_of(name)?;
        std::fs::remove_file(path)?;
        tracing::info!(name = %name, "Label deleted");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), LabelStoreError> {
    let valid = name.ends_with(FILE_EXT)
        && name.len() > FILE_EXT.len()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..");
    if valid {
        Ok(())
    } else {
        Err(LabelStoreError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn file_name_uses_second_precision_timestamp() {
        assert_eq!(
            LabelStore::file_name_for(at(2024, 8, 1, 9, 30, 15)),
            "qr_20240801_093015.jpg"
        );
    }

    #[test]
    fn save_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::new(dir.path().join("nested"));
        let saved = store.save(b"jpeg", at(2024, 8, 1, 9, 30, 15)).unwrap();

        assert_eq!(saved.name, "qr_20240801_093015.jpg");
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"jpeg");
    }

    #[test]
    fn save_names_follow_file_name_for() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::new(dir.path().to_path_buf());
        for ts in [at(2024, 1, 9, 0, 0, 0), at(2024, 12, 31, 23, 59, 59)] {
            let saved = store.save(b"x", ts).unwrap();
            assert_eq!(saved.name, LabelStore::file_name_for(ts));
        }
    }

    #[test]
    fn save_in_same_second_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::new(dir.path().to_path_buf());
        let ts = at(2024, 8, 1, 9, 30, 15);

        let first = store.save(b"first", ts).unwrap();
        let second = store.save(b"second", ts).unwrap();
        let third = store.save(b"third", ts).unwrap();

        assert_eq!(first.name, "qr_20240801_093015.jpg");
        assert_eq!(second.name, "qr_20240801_093015_1.jpg");
        assert_eq!(third.name, "qr_20240801_093015_2.jpg");
        assert_eq!(std::fs::read(&first.path).unwrap(), b"first");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"second");
    }

    #[test]
    fn list_returns_only_jpg_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("qr_20240801_093015.jpg"), b"a").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"b").unwrap();
        std::fs::create_dir(dir.path().join("sub.jpg")).unwrap();

        let store = LabelStore::new(dir.path().to_path_buf());
        let labels = store.list().unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "qr_20240801_093015.jpg");
        assert!(labels[0].modified.is_some());
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::new(dir.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::new(dir.path().to_path_buf());
        let saved = store.save(b"x", at(2024, 8, 2, 1, 0, 0)).unwrap();

        store.delete(&saved.name).unwrap();
        assert!(!saved.path.exists());
    }

    #[test]
    fn delete_missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::new(dir.path().to_path_buf());
        let err = store.delete("qr_20240801_093015.jpg").unwrap_err();
        assert!(matches!(err, LabelStoreError::Io(ref e) if e.kind() == ErrorKind::NotFound));
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LabelStore::new(dir.path().to_path_buf());
        assert!(matches!(
            store.read("qr_20240801_093015.jpg"),
            Err(LabelStoreError::NotFound(_))
        ));
    }

    #[test]
    fn path_traversal_names_are_rejected() {
        let store = LabelStore::new(PathBuf::from("labels"));
        for name in ["../secret.jpg", "a/b.jpg", "..\\x.jpg", ".jpg", "qr_1.png", ""] {
            assert!(
                matches!(store.path_of(name), Err(LabelStoreError::InvalidName(_))),
                "{name} should be rejected"
            );
        }
        assert!(store.path_of("qr_20240801_093015.jpg").is_ok());
    }
}

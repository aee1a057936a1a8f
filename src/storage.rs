//! Local persistence for credentials and reported walks.
//!
//! Each record lives in its own file under the storage root and is loaded
//! and saved independently:
//!
//! ```text
//! <root>/
//!   credentials.json   # Username, password, and cached token
//!   reported.json      # Walks already reported, and when
//! ```
//!
//! Writes go to a temporary sibling first and are renamed into place, so a
//! record on disk is always either the old or the new version.

mod credentials;
mod reported;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub use credentials::Credentials;
pub use reported::ReportedRecord;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Local file-based storage for dogreport's records.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.dogreport/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".dogreport"))
    }

    /// Reads and decodes a record, or returns `None` if the file is absent.
    fn read_record<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.root.join(name);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StorageError::Json { path, source })
    }

    /// Encodes a record and atomically replaces its file.
    ///
    /// A private record is readable by its owner only, from the moment the
    /// temporary file is created.
    fn write_record<T: serde::Serialize>(
        &self,
        name: &str,
        record: &T,
        private: bool,
    ) -> Result<()> {
        let path = self.root.join(name);
        let json = serde_json::to_string_pretty(record).map_err(|source| StorageError::Json {
            path: path.clone(),
            source,
        })?;

        let tmp = self.root.join(format!("{name}.tmp"));
        let written = write_new(&tmp, json.as_bytes(), private)
            .and_then(|()| fs::rename(&tmp, &path));
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::Io { path, source });
        }
        Ok(())
    }
}

/// Creates `path` afresh and writes `contents` to it.
fn write_new(path: &Path, contents: &[u8], private: bool) -> io::Result<()> {
    // A leftover from an interrupted write would keep its old mode.
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    if private {
        restrict_mode(&mut options);
    }
    options.open(path)?.write_all(contents)
}

#[cfg(unix)]
fn restrict_mode(options: &mut OpenOptions) {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o600);
}

#[cfg(not(unix))]
fn restrict_mode(_options: &mut OpenOptions) {}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn new_creates_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("dogreport");
        Storage::new(&root).unwrap();

        assert!(root.is_dir());
    }

    #[test]
    fn corrupt_record_is_json_error() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();
        fs::write(dir.path().join("reported.json"), "{not json").unwrap();

        let err = storage.load_reported().unwrap_err();
        assert!(matches!(err, StorageError::Json { .. }));
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();
        storage.save_credentials(&Credentials::default()).unwrap();

        assert!(dir.path().join("credentials.json").is_file());
        assert!(!dir.path().join("credentials.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn private_temp_file_is_created_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let tmp = dir.path().join("secret.tmp");
        fs::write(&tmp, "stale").unwrap();
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o644)).unwrap();

        write_new(&tmp, b"{}", true).unwrap();

        assert_eq!(fs::read_to_string(&tmp).unwrap(), "{}");

        let mode = fs::metadata(&tmp).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();
        // A non-empty directory where the record belongs cannot be replaced.
        fs::create_dir_all(dir.path().join("reported.json").join("blocker")).unwrap();

        let err = storage
            .save_reported(&crate::dedup::ReportedSet::default())
            .unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!dir.path().join("reported.json.tmp").exists());
    }

    #[test]
    fn unwritable_root_fails_to_save() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("gone")).unwrap();
        fs::remove_dir(dir.path().join("gone")).unwrap();

        let err = storage
            .save_reported(&crate::dedup::ReportedSet::default())
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}

use crate::model::PatientMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors from the on-disk patient store. All of them surface to the
/// caller as HTTP 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read patient data from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write patient data to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("patient data in {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode patient data: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-document JSON store: the single file is the source of truth and
/// every call reads or rewrites it in full.
///
/// There is no locking around load/save. Concurrent writers race and the
/// last write wins at the file level; acceptable for a single-operator
/// service.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create the parent directory so the first save does not fail.
    pub fn initialize(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        info!(path = %self.path.display(), "Patient store initialized");
        Ok(())
    }

    /// Read the full record mapping. A missing file is an empty store.
    pub fn load(&self) -> Result<PatientMap, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PatientMap::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Serialize the full mapping back, replacing whatever was there.
    pub fn save(&self, patients: &PatientMap) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(patients)
            .map_err(|source| StoreError::Encode { source })?;

        fs::write(&self.path, raw).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, PatientRecord};
    use tempfile::TempDir;

    fn sample_record() -> PatientRecord {
        PatientRecord::new(
            "Asha".to_string(),
            "Pune".to_string(),
            30,
            Gender::Female,
            1.6,
            51.2,
        )
        .unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("patients.json"));

        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn save_then_load_preserves_records() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("patients.json"));

        let mut patients = PatientMap::new();
        patients.insert("P001".to_string(), sample_record());
        store.save(&patients).unwrap();

        assert_eq!(store.load().unwrap(), patients);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("patients.json"));

        let mut patients = PatientMap::new();
        patients.insert("P001".to_string(), sample_record());
        patients.insert("P002".to_string(), sample_record());
        store.save(&patients).unwrap();

        patients.remove("P001");
        store.save(&patients).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("P002"));
    }

    #[test]
    fn malformed_file_is_reported_as_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn initialize_creates_the_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("nested/data/patients.json"));

        store.initialize().unwrap();
        store.save(&PatientMap::new()).unwrap();

        assert!(store.load().unwrap().is_empty());
    }
}

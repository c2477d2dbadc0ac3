//! One JSON document per key, stored as `<dir>/<key>.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KvBackend;
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::File { path, source }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::File {
            path: self.dir.clone(),
            source,
        })?;

        // Write beside the target and rename so a crash never leaves half a document.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(|source| StoreError::File {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::File { path, source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path());
        assert!(backend.read("focusflow_backlog").unwrap().is_none());
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::new(dir.path());
        backend.write("focusflow_profile", "{\"a\":1}").unwrap();
        assert_eq!(
            backend.read("focusflow_profile").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(backend.path_for("focusflow_profile").exists());
    }

    #[test]
    fn write_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        let mut backend = JsonFileBackend::new(&nested);
        backend.write("k", "[]").unwrap();
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("[]"));
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// One `<key>.json` file per key inside `dir`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir`, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// `$SHAPE_DODGE_DATA_DIR`, else `.shape-dodge` in the working directory
    pub fn default_dir() -> PathBuf {
        std::env::var_os("SHAPE_DODGE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".shape-dodge"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Atomic replace
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }
}

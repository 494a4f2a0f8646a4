use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use shared::{KeyValueStorage, StorageError, VoteService};

pub type SharedVotes = Mutex<VoteService<FileStorage>>;

/// Key-value storage where each key is one file under `dir`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), quota: None }
    }

    pub fn with_quota(dir: impl Into<PathBuf>, quota: usize) -> Self {
        Self { dir: dir.into(), quota: Some(quota) }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::Unavailable(format!("invalid storage key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded { needed: value.len(), quota });
            }
        }

        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let unavailable = |e: std::io::Error| StorageError::Unavailable(e.to_string());

        fs::create_dir_all(&self.dir).map_err(unavailable)?;
        fs::write(&tmp, value).map_err(unavailable)?;
        fs::rename(&tmp, &path).map_err(unavailable)
    }
}

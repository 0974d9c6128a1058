use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::StoreResult;

use super::KeyValueStore;

/// Storage backed by a single JSON object file.
///
/// Every key lives in the same file, which is rewritten on each write. The
/// file is read once when opened; later external edits are not picked up.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    /// The file on disk no longer matches `entries`.
    stale: bool,
}

impl FileStorage {
    /// Open the file at `path`.
    ///
    /// A missing or empty file starts out empty. So does a file that cannot
    /// be read or decoded: the problem is logged and the next write or
    /// removal replaces the file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut stale = false;
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                stale = true;
                warn!(
                    path = %path.display(),
                    error = %e,
                    "save file is unreadable; starting fresh"
                );
                BTreeMap::new()
            }
        };
        Self {
            path,
            entries,
            stale,
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&mut self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        self.stale = false;
        Ok(())
    }
}

fn read_entries(path: &Path) -> StoreResult<BTreeMap<String, String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(serde_json::from_str(&content)?)
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.entries.remove(key).is_some() || self.stale {
            self.flush()?;
        }
        Ok(())
    }
}

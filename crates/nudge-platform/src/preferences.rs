use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::debug;
use nudge_backend::{PreferenceError, PreferenceStore};

use crate::paths::AppPaths;

type PreferenceMap = BTreeMap<String, i64>;

/// Integer preferences kept as one JSON object on disk.
///
/// Writers serialize through an exclusive lock on a sibling `.lock` file and
/// replace the data file atomically, so readers never see a torn write.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store backed by the default preferences file.
    ///
    /// # Errors
    /// Returns [`PreferenceError::Unavailable`] when the data directory cannot
    /// be resolved.
    pub fn open_default() -> Result<Self, PreferenceError> {
        let paths = AppPaths::new().map_err(|e| PreferenceError::Unavailable(e.to_string()))?;
        Ok(Self::new(paths.preferences_file()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<PreferenceMap, PreferenceError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PreferenceMap::new());
            }
            Err(error) => return Err(error.into()),
        };

        if data.trim().is_empty() {
            return Ok(PreferenceMap::new());
        }

        serde_json::from_str(&data).map_err(|e| PreferenceError::Corrupt(e.to_string()))
    }

    fn lock(&self) -> Result<File, PreferenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut lock_path = self.path.clone().into_os_string();
        lock_path.push(".lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(PathBuf::from(lock_path))?;
        file.lock_exclusive()?;
        Ok(file)
    }

    fn update<F>(&self, edit: F) -> Result<(), PreferenceError>
    where
        F: FnOnce(&mut PreferenceMap) -> bool,
    {
        let _guard = self.lock()?;
        let mut map = self.read_map()?;
        if !edit(&mut map) {
            return Ok(());
        }

        let data =
            serde_json::to_vec_pretty(&map).map_err(|e| PreferenceError::Corrupt(e.to_string()))?;
        write_atomic(&self.path, &data)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<i64>, PreferenceError> {
        Ok(self.read_map()?.get(key).copied())
    }

    fn set(&self, key: &str, value: i64) -> Result<(), PreferenceError> {
        debug!("Storing preference {key} in {}", self.path.display());
        self.update(|map| {
            map.insert(key.to_string(), value);
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.update(|map| map.remove(key).is_some())
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "preferences path has no parent",
        )
    })?;

    let file_name = path
        .file_name()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("preferences");
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    let pid = std::process::id();

    let mut tmp_path = None;
    for attempt in 0..16_u8 {
        let candidate = parent.join(format!(".{file_name}.{pid}.{timestamp}.{attempt}.tmp"));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(mut file) => {
                file.write_all(data)?;
                file.sync_all()?;
                tmp_path = Some(candidate);
                break;
            }
            Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(error) => return Err(error),
        }
    }

    let Some(tmp_path) = tmp_path else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "failed to create unique preferences temp file",
        ));
    };

    if let Err(error) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use nudge_backend::{PreferenceError, PreferenceStore};

    use super::JsonFilePreferenceStore;

    fn store_in(dir: &tempfile::TempDir) -> JsonFilePreferenceStore {
        JsonFilePreferenceStore::new(dir.path().join("nested").join("preferences.json"))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let store = store_in(&temp_dir);

        assert_eq!(store.get("anything").expect("read should succeed"), None);
    }

    #[test]
    fn set_get_remove_round_trip_through_disk() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let store = store_in(&temp_dir);

        store.set("nudge_remind_a", 1_700_000_000).expect("set should succeed");
        store.set("nudge_remind_b", 5).expect("set should succeed");

        let reopened = JsonFilePreferenceStore::new(store.path().to_path_buf());
        assert_eq!(reopened.get("nudge_remind_a").unwrap(), Some(1_700_000_000));
        assert_eq!(reopened.get("nudge_remind_b").unwrap(), Some(5));

        reopened.remove("nudge_remind_a").expect("remove should succeed");
        assert_eq!(store.get("nudge_remind_a").unwrap(), None);
        assert_eq!(store.get("nudge_remind_b").unwrap(), Some(5));
    }

    #[test]
    fn remove_missing_key_is_a_no_op() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let store = store_in(&temp_dir);

        store.remove("absent").expect("remove should succeed");
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("preferences.json");
        std::fs::write(&path, "{not-valid-json").expect("invalid file should be written");
        let store = JsonFilePreferenceStore::new(path);

        assert!(matches!(store.get("key"), Err(PreferenceError::Corrupt(_))));
        assert!(matches!(store.set("key", 1), Err(PreferenceError::Corrupt(_))));
    }

    #[test]
    fn writes_leave_no_temp_files_behind() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let store = JsonFilePreferenceStore::new(temp_dir.path().join("preferences.json"));

        store.set("key", 1).expect("first write should succeed");
        store.set("key", 2).expect("overwrite should succeed");

        let temp_files = std::fs::read_dir(temp_dir.path())
            .expect("read temp dir entries")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(temp_files, 0);
        assert_eq!(store.get("key").unwrap(), Some(2));
    }
}

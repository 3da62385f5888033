use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Local string key-value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> io::Result<()>;
}

/// One file per key under a directory: `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Atomic replace via a sibling temp file.
        let tmp = tmp_path(&path);
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Process-local store, used in tests.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get_item("church-admin-settings").expect("read"), None);

        store.set_item("church-admin-settings", "{\"a\":1}").expect("write");
        assert_eq!(
            store.get_item("church-admin-settings").expect("read").as_deref(),
            Some("{\"a\":1}")
        );
        assert!(dir.path().join("nested/church-admin-settings.json").exists());
    }

    #[test]
    fn file_store_sanitizes_keys() {
        let store = FileStore::new("/tmp/unused");
        assert_eq!(store.path_for("../etc/passwd"), PathBuf::from("/tmp/unused/___etc_passwd.json"));
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::new();
        store.set_item("k", "1").expect("write");
        store.set_item("k", "2").expect("write");
        assert_eq!(store.get_item("k").expect("read").as_deref(), Some("2"));
    }
}

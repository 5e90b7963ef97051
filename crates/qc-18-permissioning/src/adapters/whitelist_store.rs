//! Whitelist Store Adapters
//!
//! Implements the `WhitelistStore` port.

use crate::domain::{StoreError, WhitelistKind};
use crate::ports::WhitelistStore;
use parking_lot::{Mutex, RwLock};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use toml::{Table, Value};
use tracing::debug;

/// Persists whitelists into the node's TOML configuration file.
///
/// An update parses the file, replaces the list's top-level key with the
/// full entry list and writes the document back:
///
/// ```toml
/// nodes-whitelist = ["enode://...@10.0.0.1:30303", "enode://...@10.0.0.2:30303"]
/// ```
///
/// Every other key and table survives with its value. Comments and layout
/// are not kept. A missing file is created; a file that is not valid TOML
/// is left untouched and the update fails.
pub struct TomlWhitelistPersistor {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl TomlWhitelistPersistor {
    /// Create a persistor for `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            error: error.to_string(),
        }
    }

    fn malformed(&self, error: impl std::fmt::Display) -> StoreError {
        StoreError::Malformed {
            path: self.path.display().to_string(),
            error: error.to_string(),
        }
    }

    fn read_document(&self) -> Result<Table, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => content.parse::<Table>().map_err(|e| self.malformed(e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Table::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

fn entry_array(entries: &[String]) -> Value {
    Value::Array(entries.iter().cloned().map(Value::String).collect())
}

impl WhitelistStore for TomlWhitelistPersistor {
    fn update(&self, kind: WhitelistKind, entries: &[String]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();

        let key = kind.toml_key();
        let mut document = self.read_document()?;
        document.insert(key.to_string(), entry_array(entries));

        let content = toml::to_string(&document).map_err(|e| self.malformed(e))?;
        fs::write(&self.path, content).map_err(|e| self.io_error(e))?;

        debug!(
            "[qc-18] Persisted {} {} entries to {}",
            entries.len(),
            key,
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory store that records every update and can be told to fail.
#[derive(Default)]
pub struct InMemoryWhitelistStore {
    updates: RwLock<Vec<(WhitelistKind, Vec<String>)>>,
    failing: AtomicBool,
}

impl InMemoryWhitelistStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent updates fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every accepted update, in order.
    pub fn updates(&self) -> Vec<(WhitelistKind, Vec<String>)> {
        self.updates.read().clone()
    }

    /// Latest accepted list for `kind`.
    pub fn latest(&self, kind: WhitelistKind) -> Option<Vec<String>> {
        self.updates
            .read()
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .map(|(_, entries)| entries.clone())
    }
}

impl WhitelistStore for InMemoryWhitelistStore {
    fn update(&self, kind: WhitelistKind, entries: &[String]) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "{} update refused",
                kind.toml_key()
            )));
        }
        self.updates.write().push((kind, entries.to_vec()));
        Ok(())
    }
}

/// Store that accepts and discards every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpWhitelistStore;

impl WhitelistStore for NoOpWhitelistStore {
    fn update(&self, _kind: WhitelistKind, _entries: &[String]) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn read_table(path: &Path) -> Table {
        fs::read_to_string(path).unwrap().parse().unwrap()
    }

    fn strings(table: &Table, key: &str) -> Vec<String> {
        table
            .get(key)
            .and_then(|v| v.as_array())
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_persistor_replaces_only_its_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions_config.toml");
        fs::write(
            &path,
            "bootstrap-admin = \"0x01\"\naccounts-whitelist=[\"0xaa\"]\nnodes-whitelist=[\"old\"]\n",
        )
        .unwrap();

        let persistor = TomlWhitelistPersistor::new(&path);
        persistor
            .update(WhitelistKind::Nodes, &entries(&["new1", "new2"]))
            .unwrap();

        let table = read_table(&path);
        assert_eq!(table.get("bootstrap-admin").and_then(|v| v.as_str()), Some("0x01"));
        assert_eq!(strings(&table, "accounts-whitelist"), entries(&["0xaa"]));
        assert_eq!(strings(&table, "nodes-whitelist"), entries(&["new1", "new2"]));
        assert!(!fs::read_to_string(&path).unwrap().contains("old"));
    }

    #[test]
    fn test_persistor_replaces_multi_line_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions_config.toml");
        fs::write(
            &path,
            concat!(
                "bootstrap-admin = \"0x01\"\n",
                "accounts-whitelist = [\n",
                "  \"0xaa\",\n",
                "  \"0xbb\",\n",
                "]\n",
                "\n",
                "[policy]\n",
                "allow-last-admin-removal = false\n",
            ),
        )
        .unwrap();

        TomlWhitelistPersistor::new(&path)
            .update(WhitelistKind::Accounts, &entries(&["0xcc"]))
            .unwrap();

        let table = read_table(&path);
        assert_eq!(strings(&table, "accounts-whitelist"), entries(&["0xcc"]));
        let policy = table.get("policy").and_then(|v| v.as_table()).unwrap();
        assert_eq!(
            policy.get("allow-last-admin-removal").and_then(|v| v.as_bool()),
            Some(false)
        );
    }

    #[test]
    fn test_persistor_leaves_malformed_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions_config.toml");
        fs::write(&path, "bootstrap-admin = \n").unwrap();

        let result =
            TomlWhitelistPersistor::new(&path).update(WhitelistKind::Nodes, &entries(&["a"]));

        assert!(matches!(result, Err(StoreError::Malformed { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "bootstrap-admin = \n");
    }

    #[test]
    fn test_persistor_output_is_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions_config.toml");

        let persistor = TomlWhitelistPersistor::new(&path);
        persistor
            .update(WhitelistKind::Accounts, &entries(&["0xaa"]))
            .unwrap();
        persistor
            .update(WhitelistKind::Nodes, &entries(&["enode://x@1.2.3.4:1"]))
            .unwrap();

        let table = read_table(&path);
        assert_eq!(strings(&table, "accounts-whitelist"), entries(&["0xaa"]));
        assert_eq!(
            strings(&table, "nodes-whitelist"),
            entries(&["enode://x@1.2.3.4:1"])
        );
    }

    #[test]
    fn test_persistor_keeps_key_out_of_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permissions_config.toml");
        fs::write(&path, "[policy]\ngate-admin-mutations = true\n").unwrap();

        TomlWhitelistPersistor::new(&path)
            .update(WhitelistKind::Nodes, &entries(&["a"]))
            .unwrap();

        let table = read_table(&path);
        assert!(table.get("nodes-whitelist").is_some());
        let policy = table.get("policy").and_then(|v| v.as_table()).unwrap();
        assert!(policy.get("nodes-whitelist").is_none());
    }

    #[test]
    fn test_persistor_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file.
        let persistor = TomlWhitelistPersistor::new(dir.path());
        let result = persistor.update(WhitelistKind::Nodes, &[]);
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_in_memory_store_failure_toggle() {
        let store = InMemoryWhitelistStore::new();
        store
            .update(WhitelistKind::Accounts, &entries(&["0xaa"]))
            .unwrap();

        store.set_failing(true);
        assert!(store.update(WhitelistKind::Accounts, &[]).is_err());

        store.set_failing(false);
        assert_eq!(store.updates().len(), 1);
        assert_eq!(
            store.latest(WhitelistKind::Accounts),
            Some(entries(&["0xaa"]))
        );
        assert_eq!(store.latest(WhitelistKind::Nodes), None);
    }
}

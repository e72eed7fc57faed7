//! Expectation suite stores
//!
//! File layout of [`FileSuiteStore`]:
//! - Root directory
//!   - `expectations/`
//!     - `{suite_name}.json` - one Great Expectations suite document per file

use super::SuiteError;
use super::expectation::ExpectationSuite;
use crate::validation::validate_suite_name;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// Storage backend for expectation suites
pub trait SuiteStore: Send + Sync {
    /// Fetch a suite by name
    fn get_suite(&self, name: &str) -> Result<Option<ExpectationSuite>, SuiteError>;

    /// Register a new suite, failing if one with the same name exists
    fn add_suite(&self, suite: &ExpectationSuite) -> Result<(), SuiteError>;

    /// Create or overwrite a suite
    fn save_suite(&self, suite: &ExpectationSuite) -> Result<(), SuiteError>;

    /// Names of all stored suites, sorted
    fn list_suites(&self) -> Result<Vec<String>, SuiteError>;
}

/// Suite store held in memory
#[derive(Debug, Default)]
pub struct InMemorySuiteStore {
    suites: RwLock<BTreeMap<String, ExpectationSuite>>,
}

impl InMemorySuiteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> SuiteError {
    SuiteError::Storage("suite store lock poisoned".to_string())
}

impl SuiteStore for InMemorySuiteStore {
    fn get_suite(&self, name: &str) -> Result<Option<ExpectationSuite>, SuiteError> {
        Ok(self.suites.read().map_err(poisoned)?.get(name).cloned())
    }

    fn add_suite(&self, suite: &ExpectationSuite) -> Result<(), SuiteError> {
        validate_suite_name(&suite.name)?;
        let mut suites = self.suites.write().map_err(poisoned)?;
        if suites.contains_key(&suite.name) {
            return Err(SuiteError::AlreadyExists(suite.name.clone()));
        }
        suites.insert(suite.name.clone(), suite.clone());
        Ok(())
    }

    fn save_suite(&self, suite: &ExpectationSuite) -> Result<(), SuiteError> {
        validate_suite_name(&suite.name)?;
        self.suites
            .write()
            .map_err(poisoned)?
            .insert(suite.name.clone(), suite.clone());
        Ok(())
    }

    fn list_suites(&self) -> Result<Vec<String>, SuiteError> {
        Ok(self.suites.read().map_err(poisoned)?.keys().cloned().collect())
    }
}

/// Suite store backed by a Great Expectations style directory
#[derive(Debug, Clone)]
pub struct FileSuiteStore {
    root: PathBuf,
}

impl FileSuiteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn expectations_dir(&self) -> PathBuf {
        self.root.join("expectations")
    }

    /// Path of a suite document. The name is validated first.
    pub fn suite_path(&self, name: &str) -> Result<PathBuf, SuiteError> {
        validate_suite_name(name)?;
        Ok(self.expectations_dir().join(format!("{}.json", name)))
    }

    fn read_suite(path: &Path) -> Result<ExpectationSuite> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse suite document {}", path.display()))
    }

    fn write_suite(&self, path: &Path, suite: &ExpectationSuite) -> Result<()> {
        let dir = self.expectations_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let content = serde_json::to_string_pretty(suite)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &content)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move suite into {}", path.display()))?;
        Ok(())
    }
}

fn storage(err: anyhow::Error) -> SuiteError {
    SuiteError::Storage(format!("{:#}", err))
}

impl SuiteStore for FileSuiteStore {
    fn get_suite(&self, name: &str) -> Result<Option<ExpectationSuite>, SuiteError> {
        let path = self.suite_path(name)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::read_suite(&path).map(Some).map_err(storage)
    }

    fn add_suite(&self, suite: &ExpectationSuite) -> Result<(), SuiteError> {
        let path = self.suite_path(&suite.name)?;
        if path.exists() {
            return Err(SuiteError::AlreadyExists(suite.name.clone()));
        }
        self.write_suite(&path, suite).map_err(storage)?;
        info!("Added suite '{}' at {}", suite.name, path.display());
        Ok(())
    }

    fn save_suite(&self, suite: &ExpectationSuite) -> Result<(), SuiteError> {
        let path = self.suite_path(&suite.name)?;
        self.write_suite(&path, suite).map_err(storage)?;
        info!(
            "Saved suite '{}' ({} expectations) to {}",
            suite.name,
            suite.len(),
            path.display()
        );
        Ok(())
    }

    fn list_suites(&self) -> Result<Vec<String>, SuiteError> {
        let dir = self.expectations_dir();
        if !dir.is_dir() {
            debug!("No expectations directory at {}", dir.display());
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to list {}", dir.display()))
            .map_err(storage)?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| SuiteError::Storage(e.to_string()))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::Expectation;
    use tempfile::tempdir;

    fn suite(name: &str, columns: &[&str]) -> ExpectationSuite {
        let mut s = ExpectationSuite::new(name);
        for c in columns {
            s.add_expectation(Expectation::not_null(*c));
        }
        s
    }

    #[test]
    fn test_in_memory_add_then_save() {
        let store = InMemorySuiteStore::new();
        store.add_suite(&suite("a", &["id"])).unwrap();
        assert!(matches!(
            store.add_suite(&suite("a", &["id"])),
            Err(SuiteError::AlreadyExists(name)) if name == "a"
        ));

        store.save_suite(&suite("a", &["id", "name"])).unwrap();
        assert_eq!(store.get_suite("a").unwrap().unwrap().len(), 2);
        assert_eq!(store.get_suite("b").unwrap(), None);
        assert_eq!(store.list_suites().unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_file_store_layout() {
        let dir = tempdir().unwrap();
        let store = FileSuiteStore::new(dir.path());
        store.save_suite(&suite("orders_validation_suite", &["order_id"])).unwrap();

        let path = dir.path().join("expectations/orders_validation_suite.json");
        assert!(path.is_file());
        assert!(!dir.path().join("expectations/orders_validation_suite.json.tmp").exists());

        let loaded = store.get_suite("orders_validation_suite").unwrap().unwrap();
        assert_eq!(loaded.expectations, vec![Expectation::not_null("order_id")]);
    }

    #[test]
    fn test_file_store_overwrite_and_list() {
        let dir = tempdir().unwrap();
        let store = FileSuiteStore::new(dir.path());
        assert!(store.list_suites().unwrap().is_empty());

        store.add_suite(&suite("b", &["x"])).unwrap();
        store.add_suite(&suite("a", &["x"])).unwrap();
        assert!(store.add_suite(&suite("a", &["y"])).is_err());
        store.save_suite(&suite("a", &["y", "z"])).unwrap();

        assert_eq!(store.list_suites().unwrap(), vec!["a", "b"]);
        assert_eq!(store.get_suite("a").unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_file_store_rejects_traversal() {
        let dir = tempdir().unwrap();
        let store = FileSuiteStore::new(dir.path());
        assert!(matches!(
            store.save_suite(&suite("../escape", &[])),
            Err(SuiteError::InvalidName(_))
        ));
        assert!(store.get_suite("a/b").is_err());
    }

    #[test]
    fn test_file_store_reports_corrupt_documents() {
        let dir = tempdir().unwrap();
        let store = FileSuiteStore::new(dir.path());
        std::fs::create_dir_all(store.expectations_dir()).unwrap();
        std::fs::write(store.expectations_dir().join("bad.json"), "{not json").unwrap();
        assert!(matches!(store.get_suite("bad"), Err(SuiteError::Storage(_))));
    }
}

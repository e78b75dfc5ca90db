//! File locations for the expense tracker
//!
//! Paths are resolved once at startup and passed explicitly to the store and
//! the server. Anything not given on the command line lives in the platform
//! data directory (`~/.local/share/expense-tracker` on Linux).

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DB_FILE_NAME: &str = "expenses.db";
pub const CATEGORIES_FILE_NAME: &str = "categories.json";

/// Default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("expense-tracker")
}

/// Resolved database and categories paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseConfig {
    pub db_path: PathBuf,
    pub categories_path: PathBuf,
}

impl ExpenseConfig {
    /// Both files inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DB_FILE_NAME),
            categories_path: dir.join(CATEGORIES_FILE_NAME),
        }
    }

    /// Use explicit paths where given, the default data directory otherwise
    pub fn resolve(db_path: Option<PathBuf>, categories_path: Option<PathBuf>) -> Self {
        let defaults = Self::in_dir(&default_data_dir());
        Self {
            db_path: db_path.unwrap_or(defaults.db_path),
            categories_path: categories_path.unwrap_or(defaults.categories_path),
        }
    }

    /// Database path as UTF-8, as rusqlite's pool manager expects
    pub fn db_path_str(&self) -> Result<&str> {
        self.db_path.to_str().ok_or_else(|| {
            Error::Config(format!(
                "Database path is not valid UTF-8: {}",
                self.db_path.display()
            ))
        })
    }

    /// Create the directory that will hold the database file
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir_name() {
        assert!(default_data_dir().ends_with("expense-tracker"));
    }

    #[test]
    fn test_resolve_prefers_explicit_paths() {
        let config = ExpenseConfig::resolve(Some(PathBuf::from("my.db")), None);
        assert_eq!(config.db_path, PathBuf::from("my.db"));
        assert_eq!(
            config.categories_path,
            default_data_dir().join(CATEGORIES_FILE_NAME)
        );
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExpenseConfig::in_dir(&dir.path().join("a").join("b"));
        config.ensure_db_dir().unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }
}

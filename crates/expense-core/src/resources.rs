//! Static resources served next to the tools
//!
//! - `expense://categories` - the categories document, read from disk on every
//!   access so it can be edited without a restart
//! - `expense://instructions` - usage notes stamped with today's date

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const CATEGORIES_URI: &str = "expense://categories";
pub const INSTRUCTIONS_URI: &str = "expense://instructions";

/// Categories document written by `init` when none exists
pub const DEFAULT_CATEGORIES: &str = include_str!("../assets/default_categories.json");

/// Description of a resource for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceInfo {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

pub const RESOURCES: [ResourceInfo; 2] = [
    ResourceInfo {
        uri: CATEGORIES_URI,
        name: "categories",
        description: "Expense categories and their subcategories",
        mime_type: "application/json",
    },
    ResourceInfo {
        uri: INSTRUCTIONS_URI,
        name: "instructions",
        description: "How to use the expense tools, including the current date",
        mime_type: "text/plain",
    },
];

/// Look up a resource by URI
pub fn resource_info(uri: &str) -> Option<&'static ResourceInfo> {
    RESOURCES.iter().find(|r| r.uri == uri)
}

/// Read the categories document as-is
pub fn read_categories(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            debug!(path = %path.display(), bytes = contents.len(), "Read categories");
            Ok(contents)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read categories");
            Err(Error::Io(e))
        }
    }
}

/// Write the default categories document unless the file already exists
///
/// Returns true when the file was created.
pub fn write_default_categories(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CATEGORIES)?;
    Ok(true)
}

/// Instruction text for `expense://instructions`, using the local date
pub fn instructions() -> String {
    instructions_for(chrono::Local::now().date_naive())
}

/// Instruction text for a given "today"
pub fn instructions_for(today: NaiveDate) -> String {
    format!(
        r#"
Expense Tracker Instructions:
- current_date: {}
- If the user provides a relative date (e.g., "today", "last Tuesday", "yesterday"),
    you MUST use current_date to determine today's date,
    then calculate the correct date according to the user's requirement.
- Always pass dates to the tools in YYYY-MM-DD format.
"#,
        today.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(DEFAULT_CATEGORIES).unwrap();
        assert!(value["categories"].as_array().is_some_and(|c| !c.is_empty()));
    }

    #[test]
    fn test_read_categories_is_fresh_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");

        std::fs::write(&path, r#"{"categories": []}"#).unwrap();
        assert_eq!(read_categories(&path).unwrap(), r#"{"categories": []}"#);

        std::fs::write(&path, r#"{"categories": ["Food"]}"#).unwrap();
        assert_eq!(read_categories(&path).unwrap(), r#"{"categories": ["Food"]}"#);
    }

    #[test]
    fn test_read_categories_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_categories(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_write_default_categories_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("categories.json");

        assert!(write_default_categories(&path).unwrap());
        assert_eq!(read_categories(&path).unwrap(), DEFAULT_CATEGORIES);

        std::fs::write(&path, "{}").unwrap();
        assert!(!write_default_categories(&path).unwrap());
        assert_eq!(read_categories(&path).unwrap(), "{}");
    }

    #[test]
    fn test_instructions_contain_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let text = instructions_for(today);
        assert!(text.contains("current_date: 2024-03-09"));
    }

    #[test]
    fn test_resource_lookup() {
        assert_eq!(
            resource_info(CATEGORIES_URI).map(|r| r.mime_type),
            Some("application/json")
        );
        assert!(resource_info("expense://nope").is_none());
    }
}

//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and status commands, and shared utilities (open_db)
//! - `expenses` - Add, list, summarize, edit, delete and search
//! - `serve` - MCP server commands (HTTP and stdio)

pub mod core;
pub mod expenses;
pub mod serve;

// Re-export command functions for main.rs
pub use self::core::*;
pub use expenses::*;
pub use serve::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

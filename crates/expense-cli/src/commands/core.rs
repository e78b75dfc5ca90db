//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database and categories file
//! - `cmd_status` - Show database status

use anyhow::{Context, Result};
use expense_core::db::{Database, DB_KEY_ENV};
use expense_core::resources::write_default_categories;
use expense_core::ExpenseConfig;
use tracing::debug;

/// Open the database, creating its directory if needed
///
/// Encrypted when `EXPENSE_DB_KEY` is set.
pub fn open_db(config: &ExpenseConfig) -> Result<Database> {
    config
        .ensure_db_dir()
        .context("Failed to create database directory")?;
    let path = config.db_path_str()?;
    debug!("Opening database at {}", path);
    Database::new(path).with_context(|| format!("Failed to open database at {}", path))
}

pub fn cmd_init(config: &ExpenseConfig) -> Result<()> {
    println!("🔧 Initializing database at {}...", config.db_path.display());

    let db = open_db(config)?;

    let created = write_default_categories(&config.categories_path).with_context(|| {
        format!(
            "Failed to write categories file {}",
            config.categories_path.display()
        )
    })?;
    if created {
        println!(
            "   Wrote default categories to {}",
            config.categories_path.display()
        );
    } else {
        println!(
            "   Keeping existing categories at {}",
            config.categories_path.display()
        );
    }

    if db.is_encrypted() {
        println!("   🔒 Encryption: ENABLED");
    } else {
        println!("   Encryption: disabled (set {} to enable)", DB_KEY_ENV);
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add an expense: expense add --date 2024-01-15 --amount 42.50 --category Food");
    println!("  2. Connect an MCP client: expense stdio");

    Ok(())
}

pub fn cmd_status(config: &ExpenseConfig) -> Result<()> {
    println!();
    println!("📊 Expense Tracker Status");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Database: {}", config.db_path.display());
    println!("   Categories: {}", config.categories_path.display());

    let db_exists = config.db_path.exists();
    if db_exists {
        if let Ok(metadata) = std::fs::metadata(&config.db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   Encryption: disabled");
    }

    if db_exists {
        match open_db(config).and_then(|db| Ok(db.count_expenses()?)) {
            Ok(count) => {
                println!();
                println!("   Expenses: {}", count);
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {:#}", e);
                if has_key {
                    println!("      (Check if {} is correct)", DB_KEY_ENV);
                }
            }
        }
    }

    if !config.categories_path.exists() {
        println!("   ⚠️  Categories file missing (run 'expense init')");
    }

    println!();
    Ok(())
}

//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Expense Tracker - record and query personal expenses
#[derive(Parser)]
#[command(name = "expense")]
#[command(about = "Personal expense tracker with an MCP server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Categories JSON file (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub categories: Option<PathBuf>,

    /// Print tool responses as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and a default categories file
    Init,

    /// Show database status (path, size, encryption, row count)
    Status,

    /// Add an expense
    Add {
        /// Date in YYYY-MM-DD format
        #[arg(short, long)]
        date: String,

        /// Amount spent
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,

        /// Category label
        #[arg(short, long)]
        category: String,

        /// Subcategory label
        #[arg(short, long, default_value = "")]
        subcategory: String,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List expenses in an inclusive date range
    List {
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },

    /// Total spending per category in an inclusive date range
    Summarize {
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last date (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Only total this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Change some fields of an expense
    Edit {
        /// Expense ID
        id: i64,

        /// New date
        #[arg(long)]
        date: Option<String>,

        /// New amount
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<f64>,

        /// New category
        #[arg(long)]
        category: Option<String>,

        /// New subcategory (pass "" to clear)
        #[arg(long)]
        subcategory: Option<String>,

        /// New note (pass "" to clear)
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Search notes, categories and subcategories
    Search {
        /// Text to look for (case-insensitive)
        keyword: String,
    },

    /// Start the MCP server over Streamable HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Run the MCP server on stdin/stdout (for clients that spawn it)
    Stdio,
}

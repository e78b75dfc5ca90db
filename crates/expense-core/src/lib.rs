//! Expense Tracker Core Library
//!
//! Shared functionality for the expense tracker:
//! - Expense store on SQLite (optional SQLCipher encryption)
//! - The six tool operations and their request/response types
//! - Static resources (categories document, instructions)
//! - File location defaults

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod resources;
pub mod tools;

pub use config::ExpenseConfig;
pub use db::{Database, DeleteOutcome, EditOutcome, ExpenseUpdate};
pub use error::{Error, Result};
pub use models::{CategoryTotal, Expense, NewExpense};

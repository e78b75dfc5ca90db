//! MCP server command implementations

use anyhow::Result;
use expense_core::ExpenseConfig;

use super::open_db;

pub async fn cmd_serve(config: &ExpenseConfig, host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting expense MCP server...");
    println!("   Database: {}", config.db_path.display());
    println!("   Categories: {}", config.categories_path.display());
    println!("   Listening: http://{}:{}/mcp", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(config)?;
    expense_server::start_mcp_server(db, config.categories_path.clone(), host, port).await
}

/// Serve MCP on stdin/stdout
///
/// Nothing may be printed to stdout here: it carries the protocol.
pub async fn cmd_stdio(config: &ExpenseConfig) -> Result<()> {
    let db = open_db(config)?;
    expense_server::serve_stdio(db, config.categories_path.clone()).await
}

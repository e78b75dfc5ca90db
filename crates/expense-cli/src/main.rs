//! Expense Tracker CLI
//!
//! Usage:
//!   expense init                                   Create database and categories file
//!   expense add --date D --amount A --category C   Record an expense
//!   expense list --from D --to D                   List expenses in a range
//!   expense serve --port 3001                      Start the MCP server (HTTP)
//!   expense stdio                                  Run the MCP server on stdin/stdout

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use expense_core::tools::{
    AddExpenseParams, DeleteExpenseParams, EditExpenseParams, ListExpensesParams,
    SearchExpensesParams, SummarizeParams,
};
use expense_core::ExpenseConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    // Logs go to stderr so stdout stays free for output and the stdio transport
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = ExpenseConfig::resolve(cli.db, cli.categories);
    let json = cli.json;

    match cli.command {
        Commands::Init => commands::cmd_init(&config),
        Commands::Status => commands::cmd_status(&config),
        Commands::Add {
            date,
            amount,
            category,
            subcategory,
            note,
        } => {
            let db = commands::open_db(&config)?;
            commands::cmd_add(
                &db,
                AddExpenseParams {
                    date,
                    amount,
                    category,
                    subcategory,
                    note,
                },
                json,
            )
        }
        Commands::List { from, to } => {
            let db = commands::open_db(&config)?;
            commands::cmd_list(
                &db,
                ListExpensesParams {
                    start_date: from,
                    end_date: to,
                },
                json,
            )
        }
        Commands::Summarize { from, to, category } => {
            let db = commands::open_db(&config)?;
            commands::cmd_summarize(
                &db,
                SummarizeParams {
                    start_date: from,
                    end_date: to,
                    category,
                },
                json,
            )
        }
        Commands::Edit {
            id,
            date,
            amount,
            category,
            subcategory,
            note,
        } => {
            let db = commands::open_db(&config)?;
            commands::cmd_edit(
                &db,
                EditExpenseParams {
                    id,
                    date,
                    amount,
                    category,
                    subcategory,
                    note,
                },
                json,
            )
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&config)?;
            commands::cmd_delete(&db, DeleteExpenseParams { id }, json)
        }
        Commands::Search { keyword } => {
            let db = commands::open_db(&config)?;
            commands::cmd_search(&db, SearchExpensesParams { keyword }, json)
        }
        Commands::Serve { port, host } => commands::cmd_serve(&config, &host, port).await,
        Commands::Stdio => commands::cmd_stdio(&config).await,
    }
}

//! Expense Tracker Server
//!
//! Hosts the expense tools and resources over the Model Context Protocol,
//! either on a Streamable HTTP endpoint or on stdin/stdout.

pub mod mcp;

pub use mcp::{serve_stdio, start_mcp_server, ExpenseMcpServer};

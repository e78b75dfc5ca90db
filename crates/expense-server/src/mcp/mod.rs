//! MCP (Model Context Protocol) Server for the expense tracker
//!
//! Exposes the expense store to LLMs via MCP tools and resources.
//!
//! # Transports
//!
//! - Streamable HTTP at `http://<host>:<port>/mcp` (`start_mcp_server`)
//! - stdin/stdout, for clients that launch the server as a subprocess
//!   (`serve_stdio`)
//!
//! # Example
//!
//! ```bash
//! expense serve --port 3001
//! expense stdio
//! ```
//!
//! # Available Tools
//!
//! - `add_expense` - Record a new expense
//! - `list_expenses` - Expenses in an inclusive date range
//! - `summarize` - Totals per category for a date range
//! - `edit_expense` - Change some fields of an expense
//! - `delete_expense` - Remove an expense
//! - `search_expenses` - Keyword search over note, category and subcategory
//!
//! # Resources
//!
//! - `expense://categories` - Category definitions (read from disk on each access)
//! - `expense://instructions` - Usage notes with the current date

mod tools;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
        PaginatedRequestParam, ProtocolVersion, RawResource, ReadResourceRequestParam,
        ReadResourceResult, Resource, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use expense_core::db::Database;
use expense_core::resources::{self, CATEGORIES_URI, INSTRUCTIONS_URI, RESOURCES};

pub use tools::*;

/// Expense MCP Server state
#[derive(Clone)]
pub struct ExpenseMcpServer {
    /// Database handle; the mutex keeps tool calls one at a time
    db: Arc<Mutex<Database>>,
    /// Categories document served as `expense://categories`
    categories_path: PathBuf,
    /// Tool router for MCP operations
    tool_router: ToolRouter<Self>,
}

impl ExpenseMcpServer {
    /// Create a new MCP server with the given database and categories file
    pub fn new(db: Database, categories_path: impl Into<PathBuf>) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            categories_path: categories_path.into(),
            tool_router: Self::tool_router(),
        }
    }

    /// Get database access for tool implementations
    pub(crate) async fn db(&self) -> tokio::sync::MutexGuard<'_, Database> {
        self.db.lock().await
    }

    /// Resources advertised by `resources/list`
    pub(crate) fn resource_list() -> Vec<Resource> {
        RESOURCES
            .iter()
            .map(|info| {
                let mut raw = RawResource::new(info.uri, info.name.to_string());
                raw.description = Some(info.description.to_string());
                raw.mime_type = Some(info.mime_type.to_string());
                raw.no_annotation()
            })
            .collect()
    }

    /// Produce the contents of a resource by URI
    pub(crate) fn resource_contents(&self, uri: &str) -> Result<ResourceContents, McpError> {
        let text = match uri {
            CATEGORIES_URI => resources::read_categories(&self.categories_path).map_err(|e| {
                McpError::internal_error(
                    format!(
                        "Failed to read categories from {}: {}",
                        self.categories_path.display(),
                        e
                    ),
                    None,
                )
            })?,
            INSTRUCTIONS_URI => resources::instructions(),
            _ => {
                warn!(uri, "Unknown resource requested");
                return Err(McpError::resource_not_found(
                    format!("Unknown resource: {}", uri),
                    Some(serde_json::json!({ "uri": uri })),
                ));
            }
        };

        let mut contents = ResourceContents::text(text, uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = resources::resource_info(uri).map(|r| r.mime_type.to_string());
        }
        Ok(contents)
    }
}

/// Render a tool response as pretty JSON text content
fn json_result<T: Serialize>(result: expense_core::Result<T>) -> Result<CallToolResult, McpError> {
    let value = result.map_err(|e| McpError::internal_error(e.to_string(), None))?;
    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_handler]
impl ServerHandler for ExpenseMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "expense-tracker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Expense Tracker".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Expense Tracker records personal expenses. Use add_expense, edit_expense and \
                 delete_expense to change data, and list_expenses, summarize and \
                 search_expenses to query it. Dates are YYYY-MM-DD text. Read \
                 expense://instructions for today's date and expense://categories for the \
                 category list."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: Self::resource_list(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let contents = self.resource_contents(&request.uri)?;
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

#[tool_router]
impl ExpenseMcpServer {
    /// Record a new expense
    #[tool(
        description = "Add a new expense entry to the database. Returns the new expense id."
    )]
    async fn add_expense(
        &self,
        Parameters(params): Parameters<AddExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        json_result(tools::add_expense(&db, params))
    }

    /// List expenses in an inclusive date range
    #[tool(description = "List expense entries within an inclusive date range, ordered by id.")]
    async fn list_expenses(
        &self,
        Parameters(params): Parameters<ListExpensesParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        json_result(tools::list_expenses(&db, params))
    }

    /// Total spending per category
    #[tool(
        description = "Summarize expenses by category within an inclusive date range, optionally for one category."
    )]
    async fn summarize(
        &self,
        Parameters(params): Parameters<SummarizeParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        json_result(tools::summarize(&db, params))
    }

    /// Change some fields of an expense
    #[tool(
        description = "Update one or more fields of an existing expense entry. Fields that are not given keep their value."
    )]
    async fn edit_expense(
        &self,
        Parameters(params): Parameters<EditExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        json_result(tools::edit_expense(&db, params))
    }

    /// Remove an expense
    #[tool(description = "Delete an expense entry by id.")]
    async fn delete_expense(
        &self,
        Parameters(params): Parameters<DeleteExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        json_result(tools::delete_expense(&db, params))
    }

    /// Keyword search
    #[tool(
        description = "Search expenses by keyword in notes, category, or subcategory. Newest first."
    )]
    async fn search_expenses(
        &self,
        Parameters(params): Parameters<SearchExpensesParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        json_result(tools::search_expenses(&db, params))
    }
}

/// Start the MCP server on the given port
pub async fn start_mcp_server(
    db: Database,
    categories_path: PathBuf,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
    use rmcp::transport::streamable_http_server::StreamableHttpService;
    use tower_http::trace::TraceLayer;

    info!("Starting MCP server at http://{}:{}/mcp", host, port);

    // Every session shares one server so calls stay serialized across clients
    let server = ExpenseMcpServer::new(db, categories_path);
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new()
        .nest_service("/mcp", service)
        .layer(TraceLayer::new_for_http());
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("MCP server ready at http://{}/mcp", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            // Wait for shutdown signal
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

/// Serve MCP over stdin/stdout until the client disconnects
pub async fn serve_stdio(db: Database, categories_path: PathBuf) -> anyhow::Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting MCP server on stdio");

    let service = ExpenseMcpServer::new(db, categories_path)
        .serve(stdio())
        .await?;
    let reason = service.waiting().await?;

    info!(?reason, "MCP stdio session ended");
    Ok(())
}

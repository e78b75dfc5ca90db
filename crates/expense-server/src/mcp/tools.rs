//! MCP Tool implementations for the expense tracker
//!
//! Re-exports from expense_core::tools for MCP server use.
//! The actual implementations live in expense-core so the CLI can call
//! them directly.

pub use expense_core::tools::{
    // Functions
    add_expense,
    delete_expense,
    edit_expense,
    list_expenses,
    search_expenses,
    summarize,
    // Params types
    AddExpenseParams,
    DeleteExpenseParams,
    EditExpenseParams,
    ListExpensesParams,
    SearchExpensesParams,
    SummarizeParams,
    // Result types
    ListExpensesResult,
    SearchExpensesResult,
    SummarizeResult,
    ToolResponse,
    ToolStatus,
};

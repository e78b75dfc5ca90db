//! Expense command implementations
//!
//! Each command goes through the same tool functions the MCP server uses, so
//! `--json` output matches a tool call response exactly.

use anyhow::{bail, Result};
use expense_core::db::Database;
use expense_core::tools::{
    self, AddExpenseParams, DeleteExpenseParams, EditExpenseParams, ListExpensesParams,
    SearchExpensesParams, SummarizeParams, ToolResponse,
};
use expense_core::Expense;
use serde_json::to_string_pretty;

use super::truncate;

/// Turn an error response into a CLI failure
fn check(response: &ToolResponse) -> Result<()> {
    if response.is_ok() {
        Ok(())
    } else {
        bail!(
            "{}",
            response.message.as_deref().unwrap_or("Operation failed")
        )
    }
}

fn print_expenses(expenses: &[Expense]) {
    for e in expenses {
        let label = if e.subcategory.is_empty() {
            e.category.clone()
        } else {
            format!("{} / {}", e.category, e.subcategory)
        };
        println!(
            "   [{:>4}] {} │ {:>10.2} │ {:<28} │ {}",
            e.id,
            e.date,
            e.amount,
            truncate(&label, 28),
            truncate(&e.note, 30)
        );
    }
}

pub fn cmd_add(db: &Database, params: AddExpenseParams, json: bool) -> Result<()> {
    let response = tools::add_expense(db, params)?;
    if json {
        println!("{}", to_string_pretty(&response)?);
    } else if let Some(id) = response.id {
        println!("✅ Added expense {}", id);
    }
    check(&response)
}

pub fn cmd_list(db: &Database, params: ListExpensesParams, json: bool) -> Result<()> {
    let result = tools::list_expenses(db, params)?;
    if json {
        println!("{}", to_string_pretty(&result)?);
        return Ok(());
    }

    if result.results.is_empty() {
        println!(
            "No expenses between {} and {}.",
            result.start_date, result.end_date
        );
        return Ok(());
    }

    println!();
    println!(
        "📝 Expenses {} → {} ({})",
        result.start_date, result.end_date, result.count
    );
    println!("   ─────────────────────────────────────────────────────────────");
    print_expenses(&result.results);

    let total: f64 = result.results.iter().map(|e| e.amount).sum();
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total: {:.2}", total);

    Ok(())
}

pub fn cmd_summarize(db: &Database, params: SummarizeParams, json: bool) -> Result<()> {
    let result = tools::summarize(db, params)?;
    if json {
        println!("{}", to_string_pretty(&result)?);
        return Ok(());
    }

    if result.results.is_empty() {
        println!(
            "No expenses between {} and {}.",
            result.start_date, result.end_date
        );
        return Ok(());
    }

    println!();
    println!(
        "📊 Spending by category {} → {}",
        result.start_date, result.end_date
    );
    println!("   ─────────────────────────────────────────────────────────────");
    for total in &result.results {
        println!(
            "   {:<30} {:>12.2}",
            truncate(&total.category, 30),
            total.total_amount
        );
    }

    Ok(())
}

pub fn cmd_edit(db: &Database, params: EditExpenseParams, json: bool) -> Result<()> {
    let response = tools::edit_expense(db, params)?;
    if json {
        println!("{}", to_string_pretty(&response)?);
    } else if let (Some(id), Some(n)) = (response.id, response.updated_fields) {
        println!("✅ Updated {} field(s) of expense {}", n, id);
    }
    check(&response)
}

pub fn cmd_delete(db: &Database, params: DeleteExpenseParams, json: bool) -> Result<()> {
    let response = tools::delete_expense(db, params)?;
    if json {
        println!("{}", to_string_pretty(&response)?);
    } else if let Some(id) = response.id {
        println!("🗑️  Deleted expense {}", id);
    }
    check(&response)
}

pub fn cmd_search(db: &Database, params: SearchExpensesParams, json: bool) -> Result<()> {
    let result = tools::search_expenses(db, params)?;
    if json {
        println!("{}", to_string_pretty(&result)?);
        return Ok(());
    }

    if result.results.is_empty() {
        println!("No expenses matching '{}'.", result.keyword);
        return Ok(());
    }

    println!();
    println!("🔍 {} match(es) for '{}'", result.count, result.keyword);
    println!("   ─────────────────────────────────────────────────────────────");
    print_expenses(&result.results);

    Ok(())
}

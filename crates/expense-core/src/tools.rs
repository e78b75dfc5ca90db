//! Tool implementations for the expense tracker
//!
//! These are the six operations exposed to MCP clients. Each one takes a
//! deserialized parameter struct, runs against the store, and returns a
//! serializable response. They are shared by:
//! 1. The MCP server (`expense-server`)
//! 2. The CLI, which prints the same JSON a tool call would return
//!
//! Unknown ids and empty edits come back as `status: "error"` responses.
//! Only storage failures are returned as `Err`.

use serde::{Deserialize, Serialize};

use crate::db::{Database, DeleteOutcome, EditOutcome, ExpenseUpdate};
use crate::error::Result;
use crate::models::{CategoryTotal, Expense, NewExpense};

/// Discriminator every tool response carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Ok,
    Error,
}

/// Response of the mutating tools (add, edit, delete)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ToolResponse {
    pub status: ToolStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_fields: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ToolResponse {
    pub fn added(id: i64) -> Self {
        Self {
            status: ToolStatus::Ok,
            id: Some(id),
            updated_fields: None,
            message: None,
        }
    }

    pub fn updated(id: i64, updated_fields: usize) -> Self {
        Self {
            status: ToolStatus::Ok,
            id: Some(id),
            updated_fields: Some(updated_fields),
            message: None,
        }
    }

    pub fn deleted(id: i64) -> Self {
        Self {
            status: ToolStatus::Ok,
            id: Some(id),
            updated_fields: None,
            message: Some("Expense deleted successfully".to_string()),
        }
    }

    pub fn not_found(id: i64) -> Self {
        Self::error(format!("Expense with id {} not found", id))
    }

    pub fn no_fields() -> Self {
        Self::error("No fields provided to update")
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            id: None,
            updated_fields: None,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ToolStatus::Ok
    }
}

// =============================================================================
// add_expense
// =============================================================================

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct AddExpenseParams {
    #[schemars(description = "Expense date in YYYY-MM-DD format")]
    pub date: String,

    #[schemars(description = "Amount spent")]
    pub amount: f64,

    #[schemars(description = "Category label, e.g. Food")]
    pub category: String,

    #[serde(default)]
    #[schemars(description = "Optional subcategory, e.g. Groceries")]
    pub subcategory: String,

    #[serde(default)]
    #[schemars(description = "Optional free-text note")]
    pub note: String,
}

impl From<AddExpenseParams> for NewExpense {
    fn from(params: AddExpenseParams) -> Self {
        NewExpense {
            date: params.date,
            amount: params.amount,
            category: params.category,
            subcategory: params.subcategory,
            note: params.note,
        }
    }
}

pub fn add_expense(db: &Database, params: AddExpenseParams) -> Result<ToolResponse> {
    let id = db.add_expense(&params.into())?;
    Ok(ToolResponse::added(id))
}

// =============================================================================
// list_expenses
// =============================================================================

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct ListExpensesParams {
    #[schemars(description = "First date of the range (inclusive), YYYY-MM-DD")]
    pub start_date: String,

    #[schemars(description = "Last date of the range (inclusive), YYYY-MM-DD")]
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListExpensesResult {
    pub status: ToolStatus,
    pub start_date: String,
    pub end_date: String,
    pub count: usize,
    pub results: Vec<Expense>,
}

pub fn list_expenses(db: &Database, params: ListExpensesParams) -> Result<ListExpensesResult> {
    let results = db.list_expenses(&params.start_date, &params.end_date)?;
    Ok(ListExpensesResult {
        status: ToolStatus::Ok,
        start_date: params.start_date,
        end_date: params.end_date,
        count: results.len(),
        results,
    })
}

// =============================================================================
// summarize
// =============================================================================

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SummarizeParams {
    #[schemars(description = "First date of the range (inclusive), YYYY-MM-DD")]
    pub start_date: String,

    #[schemars(description = "Last date of the range (inclusive), YYYY-MM-DD")]
    pub end_date: String,

    /// Restrict the summary to a single category
    #[schemars(description = "Only total this category (optional)")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SummarizeResult {
    pub status: ToolStatus,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub count: usize,
    pub results: Vec<CategoryTotal>,
}

pub fn summarize(db: &Database, params: SummarizeParams) -> Result<SummarizeResult> {
    let category = params.category.filter(|c| !c.is_empty());
    let results =
        db.summarize_expenses(&params.start_date, &params.end_date, category.as_deref())?;
    Ok(SummarizeResult {
        status: ToolStatus::Ok,
        start_date: params.start_date,
        end_date: params.end_date,
        category,
        count: results.len(),
        results,
    })
}

// =============================================================================
// edit_expense
// =============================================================================

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct EditExpenseParams {
    #[schemars(description = "Id of the expense to update")]
    pub id: i64,

    #[schemars(description = "New date, YYYY-MM-DD")]
    pub date: Option<String>,

    #[schemars(description = "New amount")]
    pub amount: Option<f64>,

    #[schemars(description = "New category")]
    pub category: Option<String>,

    #[schemars(description = "New subcategory (an empty string clears it)")]
    pub subcategory: Option<String>,

    #[schemars(description = "New note (an empty string clears it)")]
    pub note: Option<String>,
}

impl EditExpenseParams {
    /// Split into the target id and the partial update
    pub fn into_update(self) -> (i64, ExpenseUpdate) {
        (
            self.id,
            ExpenseUpdate {
                date: self.date,
                amount: self.amount,
                category: self.category,
                subcategory: self.subcategory,
                note: self.note,
            },
        )
    }
}

pub fn edit_expense(db: &Database, params: EditExpenseParams) -> Result<ToolResponse> {
    let (id, update) = params.into_update();
    let response = match db.edit_expense(id, &update)? {
        EditOutcome::Updated { id, updated_fields } => ToolResponse::updated(id, updated_fields),
        EditOutcome::NotFound(id) => ToolResponse::not_found(id),
        EditOutcome::NoFieldsProvided => ToolResponse::no_fields(),
    };
    Ok(response)
}

// =============================================================================
// delete_expense
// =============================================================================

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct DeleteExpenseParams {
    #[schemars(description = "Id of the expense to delete")]
    pub id: i64,
}

pub fn delete_expense(db: &Database, params: DeleteExpenseParams) -> Result<ToolResponse> {
    let response = match db.delete_expense(params.id)? {
        DeleteOutcome::Deleted(id) => ToolResponse::deleted(id),
        DeleteOutcome::NotFound(id) => ToolResponse::not_found(id),
    };
    Ok(response)
}

// =============================================================================
// search_expenses
// =============================================================================

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SearchExpensesParams {
    #[schemars(
        description = "Text to look for in notes, categories and subcategories (case-insensitive)"
    )]
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchExpensesResult {
    pub status: ToolStatus,
    pub keyword: String,
    pub count: usize,
    pub results: Vec<Expense>,
}

pub fn search_expenses(
    db: &Database,
    params: SearchExpensesParams,
) -> Result<SearchExpensesResult> {
    let results = db.search_expenses(&params.keyword)?;
    Ok(SearchExpensesResult {
        status: ToolStatus::Ok,
        keyword: params.keyword,
        count: results.len(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn add(db: &Database, date: &str, amount: f64, category: &str, sub: &str, note: &str) -> i64 {
        let response = add_expense(
            db,
            AddExpenseParams {
                date: date.to_string(),
                amount,
                category: category.to_string(),
                subcategory: sub.to_string(),
                note: note.to_string(),
            },
        )
        .unwrap();
        response.id.unwrap()
    }

    #[test]
    fn test_end_to_end_example() {
        let db = Database::in_memory().unwrap();

        let added = add_expense(
            &db,
            serde_json::from_value(json!({
                "date": "2024-01-15",
                "amount": 42.50,
                "category": "Food",
                "subcategory": "Groceries",
                "note": "Weekly shop"
            }))
            .unwrap(),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&added).unwrap(),
            json!({"status": "ok", "id": 1})
        );

        let listed = list_expenses(
            &db,
            ListExpensesParams {
                start_date: "2024-01-01".to_string(),
                end_date: "2024-01-31".to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&listed.results).unwrap(),
            json!([{
                "id": 1,
                "date": "2024-01-15",
                "amount": 42.5,
                "category": "Food",
                "subcategory": "Groceries",
                "note": "Weekly shop"
            }])
        );

        let summary = summarize(
            &db,
            SummarizeParams {
                start_date: "2024-01-01".to_string(),
                end_date: "2024-01-31".to_string(),
                category: None,
            },
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "status": "ok",
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
                "count": 1,
                "results": [{"category": "Food", "total_amount": 42.5}]
            })
        );
    }

    #[test]
    fn test_add_params_default_optional_text() {
        let params: AddExpenseParams =
            serde_json::from_value(json!({"date": "2024-01-01", "amount": 3, "category": "Misc"}))
                .unwrap();
        assert_eq!(params.subcategory, "");
        assert_eq!(params.note, "");
    }

    #[test]
    fn test_edit_responses() {
        let db = Database::in_memory().unwrap();
        let id = add(&db, "2024-01-01", 10.0, "Food", "", "");

        let missing = edit_expense(
            &db,
            serde_json::from_value(json!({"id": 99, "amount": 1.0})).unwrap(),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({"status": "error", "message": "Expense with id 99 not found"})
        );

        let empty = edit_expense(&db, serde_json::from_value(json!({"id": id})).unwrap()).unwrap();
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            json!({"status": "error", "message": "No fields provided to update"})
        );

        let updated = edit_expense(
            &db,
            serde_json::from_value(json!({"id": id, "note": "", "category": "Dining"})).unwrap(),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&updated).unwrap(),
            json!({"status": "ok", "id": id, "updated_fields": 2})
        );
    }

    #[test]
    fn test_delete_responses() {
        let db = Database::in_memory().unwrap();
        let id = add(&db, "2024-01-01", 10.0, "Food", "", "");

        let deleted = delete_expense(&db, DeleteExpenseParams { id }).unwrap();
        assert_eq!(
            serde_json::to_value(&deleted).unwrap(),
            json!({"status": "ok", "id": id, "message": "Expense deleted successfully"})
        );

        let again = delete_expense(&db, DeleteExpenseParams { id }).unwrap();
        assert!(!again.is_ok());
        assert_eq!(
            again.message.as_deref(),
            Some(format!("Expense with id {} not found", id).as_str())
        );
    }

    #[test]
    fn test_search_envelope() {
        let db = Database::in_memory().unwrap();
        add(&db, "2024-01-01", 5.0, "Food", "Snacks", "");
        add(&db, "2024-01-03", 7.0, "Transport", "", "food truck parking");
        add(&db, "2024-01-02", 9.0, "Books", "", "");

        let result = search_expenses(
            &db,
            SearchExpensesParams {
                keyword: "FOOD".to_string(),
            },
        )
        .unwrap();
        assert_eq!(result.keyword, "FOOD");
        assert_eq!(result.count, result.results.len());
        assert_eq!(result.count, 2);
        assert_eq!(result.results[0].date, "2024-01-03");
    }

    #[test]
    fn test_summarize_echoes_category_filter() {
        let db = Database::in_memory().unwrap();
        add(&db, "2024-01-01", 5.0, "Food", "", "");
        add(&db, "2024-01-02", 6.0, "Books", "", "");

        let result = summarize(
            &db,
            SummarizeParams {
                start_date: "2024-01-01".to_string(),
                end_date: "2024-01-31".to_string(),
                category: Some("Books".to_string()),
            },
        )
        .unwrap();
        assert_eq!(result.category.as_deref(), Some("Books"));
        assert_eq!(result.count, 1);
        assert_eq!(result.results[0].total_amount, 6.0);
    }
}

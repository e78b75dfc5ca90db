//! Expense operations

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::expense_update::ExpenseUpdate;
use super::Database;
use crate::error::Result;
use crate::models::{CategoryTotal, Expense, NewExpense};

/// Result of editing an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The listed number of fields were written
    Updated { id: i64, updated_fields: usize },
    /// No expense has this id; nothing was written
    NotFound(i64),
    /// The expense exists but the update carried no fields
    NoFieldsProvided,
}

/// Result of deleting an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The expense was removed
    Deleted(i64),
    /// No expense has this id; nothing was removed
    NotFound(i64),
}

const EXPENSE_COLUMNS: &str = "id, date, amount, category, subcategory, note";

impl Database {
    /// Insert an expense and return its new id
    ///
    /// Values are stored exactly as given: the date format and amount sign are
    /// not checked.
    pub fn add_expense(&self, expense: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO expenses (date, amount, category, subcategory, note) VALUES (?, ?, ?, ?, ?)",
            params![
                expense.date,
                expense.amount,
                expense.category,
                expense.subcategory,
                expense.note,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, category = %expense.category, "Added expense");
        Ok(id)
    }

    /// List expenses whose date lies in `[start_date, end_date]`, oldest id first
    ///
    /// Dates compare as text, so callers should pass `YYYY-MM-DD`.
    pub fn list_expenses(&self, start_date: &str, end_date: &str) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE date BETWEEN ? AND ? ORDER BY id ASC",
            EXPENSE_COLUMNS
        ))?;

        let expenses = stmt
            .query_map(params![start_date, end_date], |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(start_date, end_date, count = expenses.len(), "Listed expenses");
        Ok(expenses)
    }

    /// Total spending per category over `[start_date, end_date]`
    ///
    /// When `category` is given (and non-empty) only that category is totalled.
    /// Categories without matching rows are left out.
    pub fn summarize_expenses(
        &self,
        start_date: &str,
        end_date: &str,
        category: Option<&str>,
    ) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;

        let mut sql = String::from(
            "SELECT category, SUM(amount) AS total_amount FROM expenses WHERE date BETWEEN ? AND ?",
        );
        let mut query_params: Vec<Box<dyn rusqlite::ToSql>> =
            vec![Box::new(start_date.to_string()), Box::new(end_date.to_string())];

        if let Some(cat) = category.filter(|c| !c.is_empty()) {
            sql.push_str(" AND category = ?");
            query_params.push(Box::new(cat.to_string()));
        }

        sql.push_str(" GROUP BY category ORDER BY category ASC");

        let params_refs: Vec<&dyn rusqlite::ToSql> =
            query_params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let totals = stmt
            .query_map(params_refs.as_slice(), |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    total_amount: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(start_date, end_date, ?category, count = totals.len(), "Summarized expenses");
        Ok(totals)
    }

    /// Apply a partial update to an expense
    ///
    /// The existence check and the update run in one transaction. Missing ids
    /// and empty updates are reported through `EditOutcome`, not as errors.
    pub fn edit_expense(&self, id: i64, update: &ExpenseUpdate) -> Result<EditOutcome> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        if !Self::expense_exists(&tx, id)? {
            debug!(id, "Edit skipped: expense not found");
            return Ok(EditOutcome::NotFound(id));
        }

        if update.is_empty() {
            debug!(id, "Edit skipped: no fields provided");
            return Ok(EditOutcome::NoFieldsProvided);
        }

        let clause = update.build();
        let sql = format!("UPDATE expenses SET {} WHERE id = ?", clause.assignments);

        let mut params_refs: Vec<&dyn rusqlite::ToSql> =
            clause.params.iter().map(|p| p.as_ref()).collect();
        params_refs.push(&id);

        tx.execute(&sql, params_refs.as_slice())?;
        tx.commit()?;

        let updated_fields = clause.fields.len();
        debug!(id, updated_fields, "Edited expense");
        Ok(EditOutcome::Updated { id, updated_fields })
    }

    /// Delete an expense by id
    pub fn delete_expense(&self, id: i64) -> Result<DeleteOutcome> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        if !Self::expense_exists(&tx, id)? {
            debug!(id, "Delete skipped: expense not found");
            return Ok(DeleteOutcome::NotFound(id));
        }

        tx.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        tx.commit()?;

        debug!(id, "Deleted expense");
        Ok(DeleteOutcome::Deleted(id))
    }

    /// Find expenses whose note, category or subcategory contains `keyword`
    ///
    /// Uses SQL `LIKE`, so matching ignores ASCII case and `%`/`_` in the
    /// keyword act as wildcards. Newest date first.
    pub fn search_expenses(&self, keyword: &str) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let pattern = format!("%{}%", keyword);

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM expenses
            WHERE note LIKE ?1
               OR category LIKE ?1
               OR subcategory LIKE ?1
            ORDER BY date DESC, id DESC
            "#,
            EXPENSE_COLUMNS
        ))?;

        let expenses = stmt
            .query_map(params![pattern], |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(keyword, count = expenses.len(), "Searched expenses");
        Ok(expenses)
    }

    /// Get a single expense by id
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE id = ?",
            EXPENSE_COLUMNS
        ))?;

        let expense = stmt
            .query_row(params![id], |row| Self::row_to_expense(row))
            .optional()?;

        Ok(expense)
    }

    /// Count all stored expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }

    fn expense_exists(conn: &rusqlite::Connection, id: i64) -> Result<bool> {
        let found: Option<i64> = conn
            .query_row(
                "SELECT id FROM expenses WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub(crate) fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
        // Rows written outside the store may carry NULL in the defaulted columns
        let subcategory: Option<String> = row.get(4)?;
        let note: Option<String> = row.get(5)?;
        Ok(Expense {
            id: row.get(0)?,
            date: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            subcategory: subcategory.unwrap_or_default(),
            note: note.unwrap_or_default(),
        })
    }
}

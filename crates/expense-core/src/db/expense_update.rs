//! Typed partial update for expenses
//!
//! An `ExpenseUpdate` holds one optional new value per mutable column. Only
//! the present entries end up in the UPDATE statement, and every value is a
//! bound parameter: column names come from `ExpenseField`, never from input.

use serde::{Deserialize, Serialize};

/// Columns of the `expenses` table that an edit may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Date,
    Amount,
    Category,
    Subcategory,
    Note,
}

impl ExpenseField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::Note => "note",
        }
    }
}

impl std::fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Partial update of an expense
///
/// A field is updated when it is `Some`, even if the new value is an empty
/// string or zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    pub date: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

/// SET clause built from an update - contains SQL and parameters
pub struct SetClause {
    /// Comma-separated `column = ?` assignments (no "SET" keyword)
    pub assignments: String,
    /// Parameters in assignment order (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
    /// Fields that will be written, in assignment order
    pub fields: Vec<ExpenseField>,
}

impl ExpenseUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new date
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the new amount
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the new category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the new subcategory
    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Set the new note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Fields present in this update, in column order
    pub fn present_fields(&self) -> Vec<ExpenseField> {
        let mut fields = Vec::new();
        if self.date.is_some() {
            fields.push(ExpenseField::Date);
        }
        if self.amount.is_some() {
            fields.push(ExpenseField::Amount);
        }
        if self.category.is_some() {
            fields.push(ExpenseField::Category);
        }
        if self.subcategory.is_some() {
            fields.push(ExpenseField::Subcategory);
        }
        if self.note.is_some() {
            fields.push(ExpenseField::Note);
        }
        fields
    }

    /// Number of fields this update will write
    pub fn len(&self) -> usize {
        self.present_fields().len()
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the SET clause components
    pub fn build(&self) -> SetClause {
        let mut assignments = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        let mut fields = Vec::new();

        let mut push = |field: ExpenseField, value: Box<dyn rusqlite::ToSql>| {
            assignments.push(format!("{} = ?", field.column()));
            params.push(value);
            fields.push(field);
        };

        if let Some(ref date) = self.date {
            push(ExpenseField::Date, Box::new(date.clone()));
        }
        if let Some(amount) = self.amount {
            push(ExpenseField::Amount, Box::new(amount));
        }
        if let Some(ref category) = self.category {
            push(ExpenseField::Category, Box::new(category.clone()));
        }
        if let Some(ref subcategory) = self.subcategory {
            push(ExpenseField::Subcategory, Box::new(subcategory.clone()));
        }
        if let Some(ref note) = self.note {
            push(ExpenseField::Note, Box::new(note.clone()));
        }

        SetClause {
            assignments: assignments.join(", "),
            params,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update() {
        let update = ExpenseUpdate::new();
        assert!(update.is_empty());
        let clause = update.build();
        assert!(clause.assignments.is_empty());
        assert!(clause.params.is_empty());
    }

    #[test]
    fn test_set_clause_uses_placeholders_only() {
        let update = ExpenseUpdate::new()
            .note("'; DROP TABLE expenses; --")
            .amount(12.0);
        let clause = update.build();
        assert_eq!(clause.assignments, "amount = ?, note = ?");
        assert_eq!(clause.params.len(), 2);
        assert_eq!(clause.fields, vec![ExpenseField::Amount, ExpenseField::Note]);
    }

    #[test]
    fn test_empty_string_counts_as_present() {
        let update = ExpenseUpdate::new().subcategory("");
        assert_eq!(update.len(), 1);
        assert_eq!(update.present_fields(), vec![ExpenseField::Subcategory]);
    }

    #[test]
    fn test_all_fields() {
        let update = ExpenseUpdate::new()
            .date("2024-02-01")
            .amount(0.0)
            .category("Travel")
            .subcategory("Train")
            .note("Return");
        assert_eq!(update.len(), 5);
        assert_eq!(
            update.build().assignments,
            "date = ?, amount = ?, category = ?, subcategory = ?, note = ?"
        );
    }
}

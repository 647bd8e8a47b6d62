use rust_decimal::Decimal;
use time::Date;

use crate::{database_id::DatabaseID, expense::Category};

/// Database identifier for an expense.
pub type ExpenseId = DatabaseID;

/// Money spent on something, e.g. $12.50 on lunch.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The id of the expense.
    pub id: ExpenseId,
    /// The amount of money spent.
    pub value: Decimal,
    /// What kind of expense this is.
    pub category: Category,
    /// Free text detailing the expense, may be empty.
    pub description: String,
    /// When the money was spent.
    pub date: Date,
}

/// The validated fields of an expense that has not been stored yet.
///
/// Used both for creating an expense and for replacing all the fields of an
/// existing expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The amount of money spent.
    pub value: Decimal,
    /// What kind of expense this is.
    pub category: Category,
    /// Free text detailing the expense, may be empty.
    pub description: String,
    /// When the money was spent.
    pub date: Date,
}

impl NewExpense {
    /// Attach a database id to the fields.
    pub fn with_id(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            value: self.value,
            category: self.category,
            description: self.description,
            date: self.date,
        }
    }
}

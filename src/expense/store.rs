//! Defines the expense store trait.

use crate::{
    Error,
    expense::{Expense, ExpenseId, NewExpense},
};

/// Creates, retrieves, replaces and deletes expenses.
///
/// Implementations return [Error::NotFound] when an operation refers to an
/// expense that does not exist.
pub trait ExpenseStore {
    /// Create a new expense and add it to the store.
    fn create(&self, expense: NewExpense) -> Result<Expense, Error>;

    /// Get an expense by its ID.
    fn get(&self, id: ExpenseId) -> Result<Expense, Error>;

    /// Get all expenses in the order they were created.
    fn get_all(&self) -> Result<Vec<Expense>, Error>;

    /// Replace every field of the expense with `id`.
    fn update(&self, id: ExpenseId, expense: NewExpense) -> Result<Expense, Error>;

    /// Remove the expense with `id`.
    fn delete(&self, id: ExpenseId) -> Result<(), Error>;
}

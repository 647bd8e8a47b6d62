//! Expense recording: the expense record, its JSON representation, storage and
//! the HTTP endpoints.

mod category;
mod core;
mod detail_endpoint;
mod list_endpoint;
mod serializer;
mod sqlite_store;
mod store;

pub use category::{Category, UnknownCategory};
pub use core::{Expense, ExpenseId, NewExpense};
pub use detail_endpoint::{delete_expense_endpoint, get_expense_endpoint, update_expense_endpoint};
pub use list_endpoint::{create_expense_endpoint, list_expenses_endpoint};
pub use serializer::{
    DECIMAL_PLACES, ExpensePayload, ExpenseResponse, FieldErrors, MAX_DESCRIPTION_LENGTH,
    MAX_DIGITS, NON_FIELD_ERRORS,
};
pub use sqlite_store::{SQLiteExpenseStore, create_expense_table};
pub use store::ExpenseStore;

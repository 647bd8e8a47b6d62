#![allow(missing_docs)]

use std::str::FromStr;

use rusqlite::Connection;
use rust_decimal::Decimal;
use time::macros::date;

use crate::{
    SQLAppState, create_app_state,
    expense::{Category, Expense, ExpenseStore, NewExpense},
};

/// App state backed by a fresh in-memory SQLite database.
#[track_caller]
pub(crate) fn get_test_state() -> SQLAppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    create_app_state(connection).expect("Could not create app state")
}

#[track_caller]
pub(crate) fn must_create_expense(state: &SQLAppState, category: Category) -> Expense {
    state
        .expense_store
        .create(NewExpense {
            value: Decimal::from_str("12.34").expect("could not parse decimal"),
            category,
            description: format!("{} expense", category.label()),
            date: date!(2025 - 03 - 14),
        })
        .expect("could not create test expense")
}

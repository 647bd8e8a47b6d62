//! Implements a SQLite backed expense store.

use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, params, types::Type};
use rust_decimal::Decimal;

use crate::{
    Error,
    expense::{Expense, ExpenseId, ExpenseStore, NewExpense},
};

/// Creates, retrieves, replaces and deletes expenses in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new expense store with a SQLite database.
    ///
    /// The caller should make sure the expense table exists, e.g. with
    /// [create_expense_table].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        self.connection()?
            .prepare(
                "INSERT INTO expense (value, category, description, date)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, value, category, description, date",
            )?
            .query_row(
                params![
                    expense.value.to_string(),
                    expense.category,
                    expense.description,
                    expense.date
                ],
                map_row,
            )
            .map_err(Error::from)
    }

    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        self.connection()?
            .prepare(
                "SELECT id, value, category, description, date FROM expense WHERE id = :id;",
            )?
            .query_row(&[(":id", &id)], map_row)
            .map_err(Error::from)
    }

    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        self.connection()?
            .prepare("SELECT id, value, category, description, date FROM expense ORDER BY id ASC;")?
            .query_map([], map_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::from))
            .collect()
    }

    /// Replace an expense in the database.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense has the given `id`.
    fn update(&self, id: ExpenseId, expense: NewExpense) -> Result<Expense, Error> {
        let rows_affected = self.connection()?.execute(
            "UPDATE expense
            SET \
                value = ?1, \
                category = ?2, \
                description = ?3, \
                date = ?4 \
            WHERE id = ?5;",
            params![
                expense.value.to_string(),
                expense.category,
                expense.description,
                expense.date,
                id
            ],
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(expense.with_id(id))
    }

    /// Delete an expense from the database.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense has the given `id`.
    fn delete(&self, id: ExpenseId) -> Result<(), Error> {
        let rows_affected = self
            .connection()?
            .execute("DELETE FROM expense WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// Create the expense table.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            value TEXT NOT NULL,
            category TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;

    // Values are stored as text so no precision is lost to floating point.
    let raw_value: String = row.get(1)?;
    let value = Decimal::from_str(&raw_value)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(error)))?;

    let category = row.get(2)?;
    let description = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id,
        value,
        category,
        description,
        date,
    })
}

#[cfg(test)]
mod sqlite_expense_store_tests {
    use std::{
        str::FromStr,
        sync::{Arc, Mutex},
    };

    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        Error,
        expense::{Category, ExpenseStore, NewExpense},
        initialize_db,
    };

    use super::{SQLiteExpenseStore, create_expense_table};

    fn get_test_store() -> SQLiteExpenseStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();

        SQLiteExpenseStore::new(Arc::new(Mutex::new(connection)))
    }

    fn new_expense(value: &str, category: Category) -> NewExpense {
        NewExpense {
            value: Decimal::from_str(value).unwrap(),
            category,
            description: "lunch".to_owned(),
            date: date!(2025 - 01 - 31),
        }
    }

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_expense_table(&connection));
    }

    #[test]
    fn create_expense_succeeds() {
        let store = get_test_store();
        let want = new_expense("12.50", Category::Food);

        let expense = store.create(want.clone()).unwrap();

        assert!(expense.id > 0);
        assert_eq!(expense, want.with_id(expense.id));
    }

    #[test]
    fn get_expense_succeeds() {
        let store = get_test_store();
        let inserted = store.create(new_expense("3.20", Category::Transport)).unwrap();

        let selected = store.get(inserted.id);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn value_keeps_precision() {
        let store = get_test_store();
        let inserted = store.create(new_expense("0.10", Category::Other)).unwrap();

        let selected = store.get(inserted.id).unwrap();

        assert_eq!(selected.value.to_string(), "0.10");
    }

    #[test]
    fn get_expense_with_invalid_id_returns_not_found() {
        let store = get_test_store();
        let inserted = store.create(new_expense("1", Category::Food)).unwrap();

        let selected = store.get(inserted.id + 123);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn get_all_returns_insertion_order() {
        let store = get_test_store();
        let want = vec![
            store.create(new_expense("1", Category::Housing)).unwrap(),
            store.create(new_expense("2", Category::Food)).unwrap(),
            store.create(new_expense("3", Category::Leisure)).unwrap(),
        ];

        let got = store.get_all().unwrap();

        assert_eq!(want, got);
    }

    #[test]
    fn get_all_on_empty_table_returns_empty_list() {
        let store = get_test_store();

        assert_eq!(store.get_all(), Ok(vec![]));
    }

    #[test]
    fn update_replaces_all_fields() {
        let store = get_test_store();
        let inserted = store.create(new_expense("1", Category::Food)).unwrap();
        let replacement = NewExpense {
            value: Decimal::from_str("99.99").unwrap(),
            category: Category::Education,
            description: String::new(),
            date: date!(1988 - 09 - 22),
        };

        let updated = store.update(inserted.id, replacement.clone()).unwrap();

        assert_eq!(updated, replacement.with_id(inserted.id));
        assert_eq!(store.get(inserted.id), Ok(updated));
    }

    #[test]
    fn update_missing_expense_returns_not_found() {
        let store = get_test_store();

        let result = store.update(42, new_expense("1", Category::Food));

        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(store.get_all(), Ok(vec![]));
    }

    #[test]
    fn delete_removes_expense() {
        let store = get_test_store();
        let keep = store.create(new_expense("1", Category::Food)).unwrap();
        let remove = store.create(new_expense("2", Category::Health)).unwrap();

        store.delete(remove.id).unwrap();

        assert_eq!(store.get(remove.id), Err(Error::NotFound));
        assert_eq!(store.get_all(), Ok(vec![keep]));
    }

    #[test]
    fn delete_missing_expense_returns_not_found() {
        let store = get_test_store();

        assert_eq!(store.delete(1), Err(Error::NotFound));
    }

    #[test]
    fn unknown_category_in_database_is_an_error() {
        let store = get_test_store();
        let inserted = store.create(new_expense("1", Category::Food)).unwrap();
        store
            .connection
            .lock()
            .unwrap()
            .execute(
                "UPDATE expense SET category = 'bogus' WHERE id = ?1",
                [inserted.id],
            )
            .unwrap();

        let result = store.get(inserted.id);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }
}

use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Date, Month};

use expense_tracker::{
    expense::{Category, ExpenseStore, NewExpense, SQLiteExpenseStore},
    initialize_db,
};

/// A utility for creating a test database for the expense tracker REST API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test expenses...");

    let store = SQLiteExpenseStore::new(Arc::new(Mutex::new(conn)));

    for (day, category) in (1..).zip(Category::ALL) {
        store.create(NewExpense {
            value: Decimal::from_str("10.00")? * Decimal::from(day),
            category,
            description: format!("Sample {} expense", category.label().to_lowercase()),
            date: Date::from_calendar_date(2025, Month::January, day)?,
        })?;
    }

    println!("Success!");

    Ok(())
}

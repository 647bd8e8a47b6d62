//! Conversion between expenses and their JSON representation.
//!
//! Outbound, an [Expense] becomes an [ExpenseResponse]. Inbound, a loosely
//! typed [ExpensePayload] is validated field by field into a [NewExpense], with
//! every problem collected into [FieldErrors] so the client can fix all of them
//! in one go.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use axum::{Json, extract::rejection::JsonRejection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::expense::{Category, Expense, ExpenseId, NewExpense};

/// The maximum number of digits an expense value may have.
pub const MAX_DIGITS: u32 = 10;
/// The maximum number of digits after the decimal point of an expense value.
pub const DECIMAL_PLACES: u32 = 2;
/// The maximum number of characters in an expense description.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// The key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const REQUIRED: &str = "This field is required.";

// Month and day may be written without a leading zero, e.g. "1988-9-22".
const DATE_INPUT_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month padding:none]-[day padding:none]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Validation messages keyed by the name of the offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty set of field errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create field errors with a single error that is not tied to a field.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    /// Record `message` against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// The messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut separator = "";

        for (field, messages) in &self.0 {
            write!(f, "{separator}{field}: {}", messages.join(" "))?;
            separator = "; ";
        }

        Ok(())
    }
}

/// An expense as it is sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    /// The id of the expense.
    pub id: ExpenseId,
    /// The amount as a decimal string with exactly two decimal places.
    pub value: String,
    /// The category code.
    pub category: Category,
    /// The human readable name of the category.
    pub category_display: String,
    /// The date formatted as YYYY-MM-DD.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Free text detailing the expense.
    pub description: String,
}

impl From<&Expense> for ExpenseResponse {
    fn from(expense: &Expense) -> Self {
        let mut value = expense.value;
        value.rescale(DECIMAL_PLACES);

        Self {
            id: expense.id,
            value: value.to_string(),
            category: expense.category,
            category_display: expense.category.label().to_owned(),
            date: expense.date,
            description: expense.description.clone(),
        }
    }
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self::from(&expense)
    }
}

/// The JSON body for creating or replacing an expense.
///
/// Fields are kept as raw JSON so that type errors can be reported per field
/// instead of rejecting the whole body. Missing fields and `null` are both
/// `None`. Unknown keys, such as `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpensePayload {
    /// The amount, as a JSON string or number.
    #[serde(default)]
    pub value: Option<Value>,
    /// The category code.
    #[serde(default)]
    pub category: Option<Value>,
    /// Optional free text, defaults to an empty string.
    #[serde(default)]
    pub description: Option<Value>,
    /// The date as "YYYY-MM-DD".
    #[serde(default)]
    pub date: Option<Value>,
}

impl ExpensePayload {
    /// Unwrap the payload from a JSON extractor, turning a body that is not a
    /// JSON object into [FieldErrors].
    pub fn from_json(json: Result<Json<Self>, JsonRejection>) -> Result<Self, FieldErrors> {
        json.map(|Json(payload)| payload).map_err(|rejection| {
            tracing::debug!("rejected expense payload: {rejection}");
            FieldErrors::non_field(rejection.body_text())
        })
    }

    /// Validate every field and build the expense fields.
    ///
    /// # Errors
    ///
    /// Returns [FieldErrors] listing every invalid field if any field is
    /// invalid. No partial expense is produced.
    pub fn validate(&self) -> Result<NewExpense, FieldErrors> {
        let mut errors = FieldErrors::new();

        let value = parse_value(self.value.as_ref())
            .map_err(|message| errors.add("value", message))
            .ok();
        let category = parse_category(self.category.as_ref())
            .map_err(|message| errors.add("category", message))
            .ok();
        let description = parse_description(self.description.as_ref())
            .map_err(|message| errors.add("description", message))
            .ok();
        let date = parse_date(self.date.as_ref())
            .map_err(|message| errors.add("date", message))
            .ok();

        match (value, category, description, date) {
            (Some(value), Some(category), Some(description), Some(date)) => Ok(NewExpense {
                value,
                category,
                description,
                date,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&ExpenseResponse> for ExpensePayload {
    fn from(response: &ExpenseResponse) -> Self {
        Self {
            value: Some(Value::String(response.value.clone())),
            category: Some(Value::String(response.category.code().to_owned())),
            description: Some(Value::String(response.description.clone())),
            date: Some(Value::String(
                response
                    .date
                    .format(format_description!("[year]-[month]-[day]"))
                    .unwrap_or_default(),
            )),
        }
    }
}

fn parse_value(raw: Option<&Value>) -> Result<Decimal, String> {
    const INVALID: &str = "A valid number is required.";

    let value = match raw {
        None => return Err(REQUIRED.to_owned()),
        Some(Value::String(text)) => {
            let text = text.trim();

            match Decimal::from_str(text) {
                Ok(value) => value,
                // Well formed, but more digits than a `Decimal` can hold.
                Err(_) if is_plain_decimal(text) => return Err(too_many_digits()),
                Err(_) => return Err(INVALID.to_owned()),
            }
        }
        Some(Value::Number(number)) => {
            let text = number.to_string();

            match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
                Ok(value) => value,
                Err(_) if number.as_f64().is_some_and(|n| n.abs() < 1.0) => {
                    return Err(too_many_decimal_places());
                }
                Err(_) => return Err(too_many_digits()),
            }
        }
        Some(_) => return Err(INVALID.to_owned()),
    };

    let decimal_places = value.scale();
    let whole_digits = count_whole_digits(value);

    if whole_digits + decimal_places > MAX_DIGITS {
        return Err(too_many_digits());
    }

    if decimal_places > DECIMAL_PLACES {
        return Err(too_many_decimal_places());
    }

    if whole_digits > MAX_DIGITS - DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            MAX_DIGITS - DECIMAL_PLACES
        ));
    }

    Ok(value)
}

fn too_many_digits() -> String {
    format!("Ensure that there are no more than {MAX_DIGITS} digits in total.")
}

fn too_many_decimal_places() -> String {
    format!("Ensure that there are no more than {DECIMAL_PLACES} decimal places.")
}

/// Whether `text` is an optionally signed run of digits with at most one
/// decimal point, e.g. "-123.45".
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

fn count_whole_digits(value: Decimal) -> u32 {
    let whole = value.abs().trunc().normalize();

    if whole.is_zero() {
        0
    } else {
        whole.to_string().len() as u32
    }
}

fn parse_category(raw: Option<&Value>) -> Result<Category, String> {
    match raw {
        None => Err(REQUIRED.to_owned()),
        Some(Value::String(code)) => code
            .parse()
            .map_err(|_| format!("\"{code}\" is not a valid choice.")),
        Some(other) => Err(format!("\"{other}\" is not a valid choice.")),
    }
}

fn parse_description(raw: Option<&Value>) -> Result<String, String> {
    match raw {
        None => Ok(String::new()),
        Some(Value::String(text)) if text.chars().count() > MAX_DESCRIPTION_LENGTH => Err(format!(
            "Ensure this field has no more than {MAX_DESCRIPTION_LENGTH} characters."
        )),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err("Not a valid string.".to_owned()),
    }
}

fn parse_date(raw: Option<&Value>) -> Result<Date, String> {
    const INVALID: &str =
        "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

    match raw {
        None => Err(REQUIRED.to_owned()),
        Some(Value::String(text)) => {
            Date::parse(text.trim(), DATE_INPUT_FORMAT).map_err(|_| INVALID.to_owned())
        }
        Some(_) => Err(INVALID.to_owned()),
    }
}

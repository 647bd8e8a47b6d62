//! The closed set of expense categories.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// The kind of an expense, e.g. 'Food' or 'Transport'.
///
/// Each category has a short code that is stored in the database and sent over
/// the wire, and a human readable label for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Groceries, eating out, etc.
    Food,
    /// Public transport, fuel, parking, etc.
    Transport,
    /// Rent, utilities, repairs, etc.
    Housing,
    /// Doctor visits, medicine, etc.
    Health,
    /// Courses, books, tuition, etc.
    Education,
    /// Entertainment, hobbies, holidays, etc.
    Leisure,
    /// Anything that does not fit the other categories.
    Other,
}

impl Category {
    /// All categories in their canonical order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Health,
        Category::Education,
        Category::Leisure,
        Category::Other,
    ];

    /// The code used to identify the category in the database and in JSON.
    pub fn code(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Housing => "housing",
            Category::Health => "health",
            Category::Education => "education",
            Category::Leisure => "leisure",
            Category::Other => "other",
        }
    }

    /// The human readable name of the category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Leisure => "Leisure",
            Category::Other => "Other",
        }
    }
}

/// The string did not match any category code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid category code")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.code() == code)
            .ok_or_else(|| UnknownCategory(code.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod category_tests {
    use std::collections::HashSet;

    use super::{Category, UnknownCategory};

    #[test]
    fn parses_every_code() {
        for category in Category::ALL {
            assert_eq!(category.code().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn rejects_unknown_code() {
        assert_eq!(
            "groceries".parse::<Category>(),
            Err(UnknownCategory("groceries".to_owned()))
        );
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!("Food".parse::<Category>().is_err());
    }

    #[test]
    fn codes_and_labels_are_unique() {
        let codes: HashSet<_> = Category::ALL.iter().map(Category::code).collect();
        let labels: HashSet<_> = Category::ALL.iter().map(Category::label).collect();

        assert_eq!(codes.len(), Category::ALL.len());
        assert_eq!(labels.len(), Category::ALL.len());
    }

    #[test]
    fn serde_uses_code() {
        let json = serde_json::to_string(&Category::Transport).unwrap();

        assert_eq!(json, "\"transport\"");
    }

    #[test]
    fn first_category_is_food() {
        assert_eq!(Category::ALL[0], Category::Food);
        assert_eq!(Category::Food.label(), "Food");
    }
}

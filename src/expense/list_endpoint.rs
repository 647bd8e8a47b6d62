//! Defines the endpoints for listing and creating expenses.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    expense::{ExpensePayload, ExpenseResponse, ExpenseStore},
};

/// A route handler for listing every expense in the order they were created.
///
/// Responds with an empty list if there are no expenses.
pub async fn list_expenses_endpoint<E>(
    State(state): State<AppState<E>>,
) -> Result<Json<Vec<ExpenseResponse>>, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let expenses = state.expense_store.get_all()?;

    Ok(Json(expenses.iter().map(ExpenseResponse::from).collect()))
}

/// A route handler for creating a new expense, responds with the created
/// expense and the status code 201.
///
/// Responds with 400 and the field errors if the payload is invalid, in which
/// case nothing is stored.
pub async fn create_expense_endpoint<E>(
    State(state): State<AppState<E>>,
    payload: Result<Json<ExpensePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseResponse>), Error>
where
    E: ExpenseStore + Send + Sync,
{
    let new_expense = ExpensePayload::from_json(payload)?.validate()?;

    let expense = state.expense_store.create(new_expense)?;
    tracing::info!("created expense {}", expense.id);

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))))
}

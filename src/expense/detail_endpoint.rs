//! Defines the endpoints for getting, replacing and deleting a single expense.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    AppState, Error,
    expense::{ExpenseId, ExpensePayload, ExpenseResponse, ExpenseStore},
};

/// A path id that is not an integer cannot refer to an expense.
fn expense_id(path: Result<Path<ExpenseId>, PathRejection>) -> Result<ExpenseId, Error> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("rejected expense id: {rejection}");
        Error::NotFound
    })
}

/// A route handler for getting an expense by its database ID.
///
/// This function will return the status code 404 if the requested resource does not exist (e.g., not created yet).
pub async fn get_expense_endpoint<E>(
    State(state): State<AppState<E>>,
    path: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Json<ExpenseResponse>, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let expense = state.expense_store.get(expense_id(path)?)?;

    Ok(Json(ExpenseResponse::from(expense)))
}

/// A route handler for replacing every field of an expense.
///
/// Responds with 404 if the expense does not exist and with 400 if the payload
/// is invalid. The stored expense is only changed when the whole payload is
/// valid.
pub async fn update_expense_endpoint<E>(
    State(state): State<AppState<E>>,
    path: Result<Path<ExpenseId>, PathRejection>,
    payload: Result<Json<ExpensePayload>, JsonRejection>,
) -> Result<Json<ExpenseResponse>, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let id = expense_id(path)?;
    // Unknown ids take precedence over payload errors.
    state.expense_store.get(id)?;

    let new_expense = ExpensePayload::from_json(payload)?.validate()?;

    let expense = state.expense_store.update(id, new_expense)?;
    tracing::info!("updated expense {id}");

    Ok(Json(ExpenseResponse::from(expense)))
}

/// A route handler for deleting an expense, responds with 204 and an empty body.
pub async fn delete_expense_endpoint<E>(
    State(state): State<AppState<E>>,
    path: Result<Path<ExpenseId>, PathRejection>,
) -> Result<StatusCode, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let id = expense_id(path)?;

    state.expense_store.delete(id)?;
    tracing::info!("deleted expense {id}");

    Ok(StatusCode::NO_CONTENT)
}

//! Application router configuration.

use axum::{Router, middleware, response::Response, routing::get};

use crate::{
    AppState, endpoints,
    error::not_found_response,
    expense::{
        ExpenseStore, create_expense_endpoint, delete_expense_endpoint, get_expense_endpoint,
        list_expenses_endpoint, update_expense_endpoint,
    },
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
pub fn build_router<E>(state: AppState<E>) -> Router
where
    E: ExpenseStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint::<E>).post(create_expense_endpoint::<E>),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint::<E>)
                .put(update_expense_endpoint::<E>)
                .delete(delete_expense_endpoint::<E>),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    not_found_response()
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{build_router, endpoints, test_utils::get_test_state};

    #[tokio::test]
    async fn unknown_route_returns_json_404() {
        let server = TestServer::new(build_router(get_test_state()));

        let response = server.get("/not-a-route").await;

        response.assert_status_not_found();
        response.assert_json(&json!({"detail": "Not found."}));
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let server = TestServer::new(build_router(get_test_state()));

        server
            .delete(endpoints::EXPENSES)
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}

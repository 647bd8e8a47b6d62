//! Expense Tracker is a small web API for recording personal expenses.
//!
//! This library provides a JSON REST API for listing, creating, getting,
//! replacing and deleting expenses stored in a SQLite database.
//!
//! | Verb   | Path                     | Success                  |
//! |--------|--------------------------|--------------------------|
//! | GET    | `/expenses`              | 200, list of expenses    |
//! | POST   | `/expenses`              | 201, the created expense |
//! | GET    | `/expenses/{expense_id}` | 200, the expense         |
//! | PUT    | `/expenses/{expense_id}` | 200, the updated expense |
//! | DELETE | `/expenses/{expense_id}` | 204, empty body          |

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
pub mod endpoints;
mod error;
pub mod expense;
mod logging;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, SQLAppState, create_app_state};
pub use database_id::DatabaseID;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_REQUEST_BODY_BYTES, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

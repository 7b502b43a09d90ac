//! Budget Items is a web app for planning a monthly budget.
//!
//! The app shows the budget items and transactions for one account, year and
//! month at a time. The user picks the account, year and month from menus on
//! the page, and the choice is remembered between visits. Items can be moved
//! up and down to change the order they are displayed in.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{fmt::Display, net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod account;
mod alert;
mod app_state;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod item;
mod logging;
mod month;
mod navigation;
mod not_found;
mod preferences;
mod routing;
mod scope;
pub mod stores;

#[cfg(test)]
mod test_utils;

pub use account::{Account, AccountId};
pub use app_state::AppState;
pub use database_id::DatabaseId;
pub use db::initialize as initialize_db;
pub use item::{Direction, Item, ItemId, ItemTable, NewItem, Rank, move_item, reorder_item};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::{Month, sort_months};
pub use preferences::Preferences;
pub use routing::build_router;
pub use scope::{ResolvedScope, Scope, ScopeOverrides, resolve_scope};

use crate::{
    alert::Alert,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate_signal) => {
                terminate_signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
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

/// The lookup data that the scope resolver needs to build its menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// The list of all accounts.
    Accounts,
    /// The years that have items for an account.
    Years,
    /// The months that have items for an account and year.
    Months,
}

impl Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Artifact::Accounts => write!(f, "accounts"),
            Artifact::Years => write!(f, "years"),
            Artifact::Months => write!(f, "months"),
        }
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// There is no preferences record for the user.
    ///
    /// Preferences are created out-of-band, e.g. by the `create_test_db`
    /// binary, so this indicates a misconfigured server.
    #[error("could not load preferences for user {0}")]
    PreferencesNotFound(String),

    /// One of the lists used to populate the account, year and month menus
    /// could not be loaded.
    #[error("could not load the {0} from the database")]
    DataUnavailable(Artifact),

    /// Fetching or saving the ranks of the items in a scope failed while
    /// moving an item.
    ///
    /// Depending on how far the update got, the stored ranks may be unchanged
    /// or partially changed.
    #[error("could not reorder items: {0}")]
    ReorderFailed(String),

    /// The user's preferences could not be written to the database.
    #[error("failed to save preferences")]
    PreferencesSaveError,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete an item that does not exist.
    #[error("tried to delete an item that is not in the database")]
    DeleteMissingItem,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::PreferencesNotFound(user) => InternalServerError {
                description: "Missing Preferences",
                fix: &format!(
                    "Could not load preferences for user \"{user}\". \
                    Check that the user has a preferences record in the database."
                ),
            }
            .into_response(),
            Error::DataUnavailable(artifact) => InternalServerError {
                description: "Database Error",
                fix: &format!("Could not load the {artifact} from the database."),
            }
            .into_response(),
            Error::PreferencesSaveError => InternalServerError {
                description: "Save Failed",
                fix: "Failed to save your preferences. Please try again.",
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::DeleteMissingItem => Alert {
                message: "Could not delete item".to_owned(),
                details: "The item could not be found. \
                    Try refreshing the page to see if the item has already been deleted."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::PreferencesNotFound(user) => Alert {
                message: "Missing preferences".to_owned(),
                details: format!("Could not load preferences for user \"{user}\"."),
            }
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            Error::ReorderFailed(_) => Alert {
                message: "Could not move item".to_owned(),
                details: "The new order could not be saved. \
                    Refresh the page to see the current order and try again."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            _ => Alert {
                message: "Something went wrong".to_owned(),
                details: "An unexpected error occurred, check the server logs for more details."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

//! SQLite backed implementations of the store traits.

mod account;
mod item;
mod preference;

pub use account::SQLiteAccountStore;
pub use item::SQLiteItemStore;
pub use preference::SQLitePreferenceStore;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::Error;

/// Acquire the shared database connection.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned.
fn lock_connection(
    connection: &Arc<Mutex<Connection>>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

//! Implements a SQLite backed account store.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    account::{Account, map_row_to_account},
    stores::AccountStore,
};

use super::lock_connection;

/// Retrieves accounts from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteAccountStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteAccountStore {
    /// Create a new account store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl AccountStore for SQLiteAccountStore {
    /// Retrieve all accounts, ordered by ID.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Account>, Error> {
        lock_connection(&self.connection)?
            .prepare("SELECT id, name FROM account ORDER BY id")?
            .query_map([], map_row_to_account)?
            .map(|maybe_account| maybe_account.map_err(|error| error.into()))
            .collect()
    }
}

//! The per-user record of which account, year and month the user is viewing.
//!
//! Preferences are created out-of-band (see the `create_test_db` binary) and
//! only ever updated by the [scope resolver](crate::scope::resolve_scope).

use rusqlite::{Connection, Row};

use crate::account::AccountId;

/// The account, year and month a user last chose to view.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    /// The user the preferences belong to.
    pub user: String,
    /// The account to show items for.
    ///
    /// `None` when the user picked an account name that does not exist.
    pub current_account: Option<AccountId>,
    /// The year to show items for.
    pub current_year: i32,
    /// The month to show items for, e.g. "March".
    ///
    /// This is free text and is not checked against the calendar month names.
    pub current_month: String,
}

/// Create the preferences table in the database.
///
/// `current_account` is nullable and is not a foreign key so that an unknown
/// account name can be stored as NULL.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_preferences_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS preferences (
            user TEXT PRIMARY KEY,
            current_month TEXT NOT NULL,
            current_year INTEGER NOT NULL,
            current_account INTEGER
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_preferences(row: &Row) -> Result<Preferences, rusqlite::Error> {
    Ok(Preferences {
        user: row.get(0)?,
        current_month: row.get(1)?,
        current_year: row.get(2)?,
        current_account: row.get(3)?,
    })
}

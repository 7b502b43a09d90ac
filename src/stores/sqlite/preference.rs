//! Implements a SQLite backed preference store.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    preferences::{Preferences, map_row_to_preferences},
    stores::PreferenceStore,
};

use super::lock_connection;

/// Loads and saves user preferences in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLitePreferenceStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLitePreferenceStore {
    /// Create a new preference store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl PreferenceStore for SQLitePreferenceStore {
    fn get(&self, user: &str) -> Result<Preferences, Error> {
        lock_connection(&self.connection)?
            .prepare(
                "SELECT user, current_month, current_year, current_account
                FROM preferences WHERE user = :user",
            )?
            .query_row(&[(":user", &user)], map_row_to_preferences)
            .map_err(|error| error.into())
    }

    fn put(&self, preferences: &Preferences) -> Result<(), Error> {
        let rows_affected = lock_connection(&self.connection)?.execute(
            "UPDATE preferences
            SET current_month = ?1, current_year = ?2, current_account = ?3
            WHERE user = ?4",
            (
                &preferences.current_month,
                preferences.current_year,
                preferences.current_account,
                &preferences.user,
            ),
        )?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        preferences::Preferences,
        stores::{PreferenceStore, sqlite::SQLitePreferenceStore},
    };

    fn get_test_store() -> SQLitePreferenceStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
            .execute(
                "INSERT INTO preferences (user, current_month, current_year, current_account)
                VALUES ('alice', 'March', 2024, 1)",
                (),
            )
            .unwrap();

        SQLitePreferenceStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn get_preferences() {
        let store = get_test_store();

        let preferences = store.get("alice").unwrap();

        assert_eq!(
            preferences,
            Preferences {
                user: "alice".to_owned(),
                current_account: Some(1),
                current_year: 2024,
                current_month: "March".to_owned(),
            }
        );
    }

    #[test]
    fn get_missing_user_returns_not_found() {
        let store = get_test_store();

        assert_eq!(store.get("bob"), Err(Error::NotFound));
    }

    #[test]
    fn put_overwrites_preferences() {
        let store = get_test_store();
        let want = Preferences {
            user: "alice".to_owned(),
            current_account: None,
            current_year: 2023,
            current_month: "Smarch".to_owned(),
        };

        store.put(&want).unwrap();

        assert_eq!(store.get("alice"), Ok(want));
    }

    #[test]
    fn put_missing_user_returns_not_found() {
        let store = get_test_store();
        let preferences = Preferences {
            user: "bob".to_owned(),
            current_account: Some(1),
            current_year: 2024,
            current_month: "May".to_owned(),
        };

        assert_eq!(store.put(&preferences), Err(Error::NotFound));
    }
}

//! Defines the preference store trait.

use crate::{Error, preferences::Preferences};

/// Loads and saves each user's choice of account, year and month.
pub trait PreferenceStore {
    /// Get the preferences for `user`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the user has no preferences record.
    fn get(&self, user: &str) -> Result<Preferences, Error>;

    /// Overwrite the stored preferences for `preferences.user`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the user has no preferences record.
    fn put(&self, preferences: &Preferences) -> Result<(), Error>;
}

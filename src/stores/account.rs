//! Defines the account store trait.

use crate::{Error, account::Account};

/// Retrieves the accounts that items can belong to.
pub trait AccountStore {
    /// Get every account.
    fn get_all(&self) -> Result<Vec<Account>, Error>;
}

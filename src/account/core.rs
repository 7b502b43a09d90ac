use crate::database_id::DatabaseId;

/// The database ID of an [Account].
pub type AccountId = DatabaseId;

/// A named bank account or credit card.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The unique, human-readable name of the account.
    pub name: String,
}

pub fn create_account_table(connection: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_account(row: &rusqlite::Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;

    Ok(Account { id, name })
}

/// Find the ID of the account whose name is exactly `name`.
///
/// Returns `None` if no account has that name.
pub fn find_account_id(accounts: &[Account], name: &str) -> Option<AccountId> {
    accounts
        .iter()
        .find(|account| account.name == name)
        .map(|account| account.id)
}


#[cfg(test)]
mod find_account_id_tests {
    use super::{Account, find_account_id};

    fn accounts() -> Vec<Account> {
        vec![
            Account {
                id: 1,
                name: "Checking".to_owned(),
            },
            Account {
                id: 2,
                name: "Savings".to_owned(),
            },
        ]
    }

    #[test]
    fn finds_exact_match() {
        assert_eq!(find_account_id(&accounts(), "Savings"), Some(2));
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(find_account_id(&accounts(), "savings"), None);
    }

    #[test]
    fn returns_none_for_unknown_name() {
        assert_eq!(find_account_id(&accounts(), "Brokerage"), None);
    }
}

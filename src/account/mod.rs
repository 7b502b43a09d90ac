//! Accounts that budget items and transactions belong to.

mod core;

pub use core::{Account, AccountId, create_account_table, find_account_id, map_row_to_account};

//! The item domain model and its database tables.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{database_id::DatabaseId, scope::Scope};

/// The database ID of an [Item].
pub type ItemId = DatabaseId;

/// The display position of an item within its scope (the "orderbyte").
///
/// Ranks of zero or more are visible and ordered, negative ranks are hidden.
pub type Rank = i64;

/// Whether an item with `rank` is shown and takes part in reordering.
pub fn is_visible(rank: Rank) -> bool {
    rank >= 0
}

/// The two tables that hold items.
///
/// Both tables have identical columns. Each variant selects its own fixed SQL
/// statements so a table name is never built from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTable {
    /// Planned budget lines.
    BudgetItems,
    /// Money that was actually spent or received.
    Transactions,
}

impl ItemTable {
    /// Every item table.
    pub const ALL: [ItemTable; 2] = [ItemTable::BudgetItems, ItemTable::Transactions];

    /// The URL path segment for the table, matching its serde name.
    pub fn path_segment(self) -> &'static str {
        match self {
            ItemTable::BudgetItems => "budget_items",
            ItemTable::Transactions => "transactions",
        }
    }

    /// The heading used when displaying the table's items.
    pub fn title(self) -> &'static str {
        match self {
            ItemTable::BudgetItems => "Budget Items",
            ItemTable::Transactions => "Transactions",
        }
    }
}

/// A budget line or transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// The ID of the item.
    pub id: ItemId,
    /// What the money is for.
    pub name: String,
    /// The amount of money in dollars.
    pub amount: f64,
    /// The display position of the item within its scope.
    pub rank: Rank,
    /// The account, year and month the item belongs to.
    pub scope: Scope,
}

/// The data needed to create an [Item].
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// What the money is for.
    pub name: String,
    /// The amount of money in dollars.
    pub amount: f64,
    /// The account, year and month the item belongs to.
    pub scope: Scope,
    /// An explicit rank. When `None` the item is placed after the last visible
    /// item in its scope.
    pub rank: Option<Rank>,
}

impl NewItem {
    /// Create a new item that will be appended to the end of its scope.
    pub fn build(name: &str, amount: f64, scope: Scope) -> Self {
        Self {
            name: name.to_owned(),
            amount,
            scope,
            rank: None,
        }
    }

    /// Set an explicit rank, e.g. a negative rank for a hidden item.
    pub fn rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }
}

/// Create the budget item and transaction tables.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_item_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget_item (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            orderbyte INTEGER NOT NULL,
            increment INTEGER,
            year INTEGER NOT NULL,
            month TEXT NOT NULL,
            account INTEGER
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_budget_item_scope
        ON budget_item(account, year, month, orderbyte)",
        (),
    )?;

    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            orderbyte INTEGER NOT NULL,
            increment INTEGER,
            year INTEGER NOT NULL,
            month TEXT NOT NULL,
            account INTEGER
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_scope
        ON \"transaction\"(account, year, month, orderbyte)",
        (),
    )?;

    Ok(())
}

/// Map a row of `id, name, amount, orderbyte, account, year, month` to an [Item].
pub fn map_row_to_item(row: &Row) -> Result<Item, rusqlite::Error> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: row.get(2)?,
        rank: row.get(3)?,
        scope: Scope {
            account: row.get(4)?,
            year: row.get(5)?,
            month: row.get(6)?,
        },
    })
}

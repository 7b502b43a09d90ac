//! Implements a SQLite backed item store for the budget item and transaction tables.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    account::AccountId,
    item::{Item, ItemId, ItemTable, NewItem, Rank, map_row_to_item},
    scope::Scope,
    stores::ItemStore,
};

use super::lock_connection;

/// The SQL statements for one item table.
struct ItemQueries {
    insert: &'static str,
    next_rank: &'static str,
    select_by_scope: &'static str,
    update_rank: &'static str,
    delete: &'static str,
    distinct_years: &'static str,
    distinct_months: &'static str,
}

static BUDGET_ITEM_QUERIES: ItemQueries = ItemQueries {
    insert: "INSERT INTO budget_item (name, amount, orderbyte, account, year, month)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    next_rank: "SELECT COALESCE(MAX(orderbyte) + 1, 0) FROM budget_item
        WHERE account = ?1 AND year = ?2 AND month = ?3 AND orderbyte >= 0",
    select_by_scope: "SELECT id, name, amount, orderbyte, account, year, month FROM budget_item
        WHERE account = ?1 AND year = ?2 AND month = ?3
        ORDER BY orderbyte, id",
    update_rank: "UPDATE budget_item SET orderbyte = ?1 WHERE id = ?2",
    delete: "DELETE FROM budget_item WHERE id = ?1",
    distinct_years: "SELECT DISTINCT year FROM budget_item WHERE account = ?1",
    distinct_months: "SELECT DISTINCT month FROM budget_item WHERE account = ?1 AND year = ?2",
};

static TRANSACTION_QUERIES: ItemQueries = ItemQueries {
    insert: "INSERT INTO \"transaction\" (name, amount, orderbyte, account, year, month)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    next_rank: "SELECT COALESCE(MAX(orderbyte) + 1, 0) FROM \"transaction\"
        WHERE account = ?1 AND year = ?2 AND month = ?3 AND orderbyte >= 0",
    select_by_scope: "SELECT id, name, amount, orderbyte, account, year, month FROM \"transaction\"
        WHERE account = ?1 AND year = ?2 AND month = ?3
        ORDER BY orderbyte, id",
    update_rank: "UPDATE \"transaction\" SET orderbyte = ?1 WHERE id = ?2",
    delete: "DELETE FROM \"transaction\" WHERE id = ?1",
    distinct_years: "SELECT DISTINCT year FROM \"transaction\" WHERE account = ?1",
    distinct_months: "SELECT DISTINCT month FROM \"transaction\" WHERE account = ?1 AND year = ?2",
};

fn queries(table: ItemTable) -> &'static ItemQueries {
    match table {
        ItemTable::BudgetItems => &BUDGET_ITEM_QUERIES,
        ItemTable::Transactions => &TRANSACTION_QUERIES,
    }
}

/// Stores budget items and transactions in a SQLite database.
///
/// A scope with no account (`NULL`) matches no rows, following SQL's `= NULL`
/// semantics.
#[derive(Debug, Clone)]
pub struct SQLiteItemStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteItemStore {
    /// Create a new item store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ItemStore for SQLiteItemStore {
    fn create(&self, table: ItemTable, item: NewItem) -> Result<Item, Error> {
        let queries = queries(table);
        let connection = lock_connection(&self.connection)?;
        let NewItem {
            name,
            amount,
            scope,
            rank,
        } = item;

        let rank = match rank {
            Some(rank) => rank,
            None => connection.query_row(
                queries.next_rank,
                (scope.account, scope.year, &scope.month),
                |row| row.get(0),
            )?,
        };

        connection.execute(
            queries.insert,
            (&name, amount, rank, scope.account, scope.year, &scope.month),
        )?;
        let id = connection.last_insert_rowid();

        Ok(Item {
            id,
            name,
            amount,
            rank,
            scope,
        })
    }

    fn list_by_scope(&self, table: ItemTable, scope: &Scope) -> Result<Vec<Item>, Error> {
        lock_connection(&self.connection)?
            .prepare(queries(table).select_by_scope)?
            .query_map((scope.account, scope.year, &scope.month), map_row_to_item)?
            .map(|maybe_item| maybe_item.map_err(|error| error.into()))
            .collect()
    }

    /// Write all `ranks` in one SQL transaction.
    ///
    /// # Errors
    /// Returns an error if any update fails, in which case none of the ranks
    /// are changed.
    fn bulk_set_ranks(&self, table: ItemTable, ranks: &[(ItemId, Rank)]) -> Result<(), Error> {
        let connection = lock_connection(&self.connection)?;
        let transaction = connection.unchecked_transaction()?;

        {
            let mut statement = transaction.prepare_cached(queries(table).update_rank)?;

            for (id, rank) in ranks {
                statement.execute((rank, id))?;
            }
        }

        transaction.commit()?;

        Ok(())
    }

    fn delete(&self, table: ItemTable, id: ItemId) -> Result<usize, Error> {
        lock_connection(&self.connection)?
            .execute(queries(table).delete, (id,))
            .map_err(|error| error.into())
    }

    fn distinct_years(
        &self,
        table: ItemTable,
        account: Option<AccountId>,
    ) -> Result<Vec<i32>, Error> {
        lock_connection(&self.connection)?
            .prepare(queries(table).distinct_years)?
            .query_map((account,), |row| row.get(0))?
            .map(|maybe_year| maybe_year.map_err(|error| error.into()))
            .collect()
    }

    fn distinct_months(
        &self,
        table: ItemTable,
        account: Option<AccountId>,
        year: i32,
    ) -> Result<Vec<String>, Error> {
        lock_connection(&self.connection)?
            .prepare(queries(table).distinct_months)?
            .query_map((account, year), |row| row.get(0))?
            .map(|maybe_month| maybe_month.map_err(|error| error.into()))
            .collect()
    }
}

//! Defines the item store trait.

use crate::{
    Error,
    account::AccountId,
    item::{Item, ItemId, ItemTable, NewItem, Rank},
    scope::Scope,
};

/// Creates, lists, reorders and deletes the items in the budget item and
/// transaction tables.
pub trait ItemStore {
    /// Add a new item to `table`.
    ///
    /// If `item.rank` is `None` the item is placed after the last visible item
    /// in its scope.
    fn create(&self, table: ItemTable, item: NewItem) -> Result<Item, Error>;

    /// Get every item in `scope`, hidden items included, ordered by rank.
    fn list_by_scope(&self, table: ItemTable, scope: &Scope) -> Result<Vec<Item>, Error>;

    /// Set the rank of each item in `ranks` as a single unit of work.
    fn bulk_set_ranks(&self, table: ItemTable, ranks: &[(ItemId, Rank)]) -> Result<(), Error>;

    /// Delete an item, returning the number of rows deleted.
    fn delete(&self, table: ItemTable, id: ItemId) -> Result<usize, Error>;

    /// Get the distinct years that have items for `account`.
    fn distinct_years(&self, table: ItemTable, account: Option<AccountId>)
    -> Result<Vec<i32>, Error>;

    /// Get the distinct month names that have items for `account` in `year`.
    fn distinct_months(
        &self,
        table: ItemTable,
        account: Option<AccountId>,
        year: i32,
    ) -> Result<Vec<String>, Error>;
}

//! Budget items and transactions: the item tables, ordering within a scope,
//! and the pages and endpoints for viewing and changing items.

mod budget_page;
mod core;
mod create;
mod delete_endpoint;
mod ordering;
mod reorder;

pub use budget_page::get_budget_page;
pub use core::{
    Item, ItemId, ItemTable, NewItem, Rank, create_item_tables, is_visible, map_row_to_item,
};
pub use create::{create_item_endpoint, get_new_item_page};
pub use delete_endpoint::delete_item_endpoint;
pub use ordering::{Direction, move_item};
pub use reorder::{move_item_down_endpoint, move_item_up_endpoint, reorder_item};

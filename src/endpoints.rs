//! The API endpoints URIs.
//!
//! For item endpoints, e.g., '/api/{table}/{item_id}', use [format_item_endpoint].

use crate::item::{ItemId, ItemTable};

/// The budget page.
pub const ROOT: &str = "/";
/// The page for creating a new budget item or transaction.
pub const NEW_ITEM_VIEW: &str = "/items/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an item.
pub const ITEMS_API: &str = "/api/items";
/// The route to delete a single item.
pub const ITEM: &str = "/api/{table}/{item_id}";
/// The route to move an item up in its list.
pub const MOVE_ITEM_UP: &str = "/api/{table}/{item_id}/move_up";
/// The route to move an item down in its list.
pub const MOVE_ITEM_DOWN: &str = "/api/{table}/{item_id}/move_down";

/// Replace the `{table}` and `{item_id}` parameters in `endpoint_path`.
pub fn format_item_endpoint(endpoint_path: &str, table: ItemTable, id: ItemId) -> String {
    endpoint_path
        .replace("{table}", table.path_segment())
        .replace("{item_id}", &id.to_string())
}

//! Moving an item up or down and saving the new order.

use std::collections::HashMap;

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;

use crate::{
    AppState, Error,
    item::{Direction, Item, ItemId, ItemTable, Rank, move_item},
    scope::Scope,
    stores::{
        ItemStore, PreferenceStore,
        sqlite::{SQLiteItemStore, SQLitePreferenceStore},
    },
};

/// Move `item_id` one place in `direction` within the user's current scope and
/// save the ranks that changed.
///
/// Returns every item in the scope with its new rank. Moving the first item
/// up, the last item down, a hidden item, or an item that is not in the
/// current scope changes nothing and writes nothing.
///
/// # Errors
/// - [Error::PreferencesNotFound] if the user has no preferences.
/// - [Error::ReorderFailed] if the items cannot be loaded or the new ranks
///   cannot be saved.
pub fn reorder_item(
    preference_store: &impl PreferenceStore,
    item_store: &impl ItemStore,
    user: &str,
    table: ItemTable,
    item_id: ItemId,
    direction: Direction,
) -> Result<Vec<Item>, Error> {
    let preferences = preference_store.get(user).map_err(|error| match error {
        Error::NotFound => Error::PreferencesNotFound(user.to_owned()),
        error => Error::ReorderFailed(format!("could not load preferences: {error}")),
    })?;

    let scope = Scope {
        account: preferences.current_account,
        year: preferences.current_year,
        month: preferences.current_month,
    };

    let items = item_store
        .list_by_scope(table, &scope)
        .map_err(|error| Error::ReorderFailed(format!("could not load items: {error}")))?;

    let old_ranks: HashMap<ItemId, Rank> = items
        .iter()
        .map(|item| (item.id, item.rank))
        .collect();
    let items = move_item(items, item_id, direction);

    let changed_ranks: Vec<(ItemId, Rank)> = items
        .iter()
        .filter(|item| old_ranks.get(&item.id) != Some(&item.rank))
        .map(|item| (item.id, item.rank))
        .collect();

    if changed_ranks.is_empty() {
        tracing::debug!("moving item {item_id} {direction:?} in {table:?} changed nothing");
        return Ok(items);
    }

    item_store
        .bulk_set_ranks(table, &changed_ranks)
        .map_err(|error| Error::ReorderFailed(format!("could not save ranks: {error}")))?;

    Ok(items)
}

/// The state needed to move an item.
#[derive(Debug, Clone)]
pub struct ReorderState {
    preference_store: SQLitePreferenceStore,
    item_store: SQLiteItemStore,
    user: String,
}

impl FromRef<AppState> for ReorderState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            preference_store: SQLitePreferenceStore::new(state.db_connection.clone()),
            item_store: SQLiteItemStore::new(state.db_connection.clone()),
            user: state.user.clone(),
        }
    }
}

/// A route handler for moving an item up, responds with a HX-Refresh header so
/// the page shows the new order.
pub async fn move_item_up_endpoint(
    State(state): State<ReorderState>,
    Path((table, item_id)): Path<(ItemTable, ItemId)>,
) -> Response {
    move_item_endpoint(&state, table, item_id, Direction::Up)
}

/// A route handler for moving an item down, responds with a HX-Refresh header
/// so the page shows the new order.
pub async fn move_item_down_endpoint(
    State(state): State<ReorderState>,
    Path((table, item_id)): Path<(ItemTable, ItemId)>,
) -> Response {
    move_item_endpoint(&state, table, item_id, Direction::Down)
}

fn move_item_endpoint(
    state: &ReorderState,
    table: ItemTable,
    item_id: ItemId,
    direction: Direction,
) -> Response {
    match reorder_item(
        &state.preference_store,
        &state.item_store,
        &state.user,
        table,
        item_id,
        direction,
    ) {
        Ok(_) => (HxRefresh(true), StatusCode::OK).into_response(),
        Err(error) => {
            tracing::error!("Could not move item {item_id} {direction:?} in {table:?}: {error}");
            error.into_alert_response()
        }
    }
}

//! Defines the endpoint for deleting a budget item or transaction.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;

use crate::{
    AppState, Error,
    item::{ItemId, ItemTable},
    stores::{ItemStore, sqlite::SQLiteItemStore},
};

/// The state needed to delete an item.
#[derive(Debug, Clone)]
pub struct DeleteItemState {
    item_store: SQLiteItemStore,
}

impl FromRef<AppState> for DeleteItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            item_store: SQLiteItemStore::new(state.db_connection.clone()),
        }
    }
}

/// A route handler for deleting an item, responds with a HX-Refresh header so
/// the move buttons of the remaining rows are redrawn.
///
/// The remaining items keep their ranks. The gap is closed the next time an
/// item in the same scope is moved.
pub async fn delete_item_endpoint(
    State(state): State<DeleteItemState>,
    Path((table, item_id)): Path<(ItemTable, ItemId)>,
) -> Response {
    match state.item_store.delete(table, item_id) {
        Ok(0) => Error::DeleteMissingItem.into_alert_response(),
        Ok(_) => (HxRefresh(true), StatusCode::OK).into_response(),
        Err(error) => {
            tracing::error!("Could not delete item {item_id} from {table:?}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        item::{ItemTable, NewItem},
        scope::Scope,
        stores::{ItemStore, sqlite::SQLiteItemStore},
        test_utils::assert_hx_refresh,
    };

    use super::{DeleteItemState, delete_item_endpoint};

    fn get_test_state() -> DeleteItemState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        DeleteItemState {
            item_store: SQLiteItemStore::new(Arc::new(Mutex::new(connection))),
        }
    }

    fn march_2024() -> Scope {
        Scope {
            account: Some(1),
            year: 2024,
            month: "March".to_owned(),
        }
    }

    #[tokio::test]
    async fn deletes_item() {
        let state = get_test_state();
        let item = state
            .item_store
            .create(
                ItemTable::Transactions,
                NewItem::build("Coffee", 4.5, march_2024()),
            )
            .unwrap();

        let response = delete_item_endpoint(
            State(state.clone()),
            Path((ItemTable::Transactions, item.id)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_hx_refresh(&response);
        let items = state
            .item_store
            .list_by_scope(ItemTable::Transactions, &march_2024())
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn only_deletes_from_the_given_table() {
        let state = get_test_state();
        let item = state
            .item_store
            .create(
                ItemTable::BudgetItems,
                NewItem::build("Rent", 400.0, march_2024()),
            )
            .unwrap();

        let response = delete_item_endpoint(
            State(state.clone()),
            Path((ItemTable::Transactions, item.id)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("hx-refresh").is_none());
        let items = state
            .item_store
            .list_by_scope(ItemTable::BudgetItems, &march_2024())
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn missing_item_returns_not_found() {
        let state = get_test_state();

        let response = delete_item_endpoint(State(state), Path((ItemTable::BudgetItems, 42))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

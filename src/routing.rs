//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    item::{
        create_item_endpoint, delete_item_endpoint, get_budget_page, get_new_item_page,
        move_item_down_endpoint, move_item_up_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_budget_page))
        .route(endpoints::NEW_ITEM_VIEW, get(get_new_item_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::ITEMS_API, post(create_item_endpoint))
        .route(endpoints::ITEM, delete(delete_item_endpoint))
        .route(endpoints::MOVE_ITEM_UP, post(move_item_up_endpoint))
        .route(endpoints::MOVE_ITEM_DOWN, post(move_item_down_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

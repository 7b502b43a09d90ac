//! The page and endpoint for adding a budget item or transaction to the
//! current scope.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        dollar_input_styles,
    },
    item::{Item, ItemTable, NewItem},
    navigation::NavBar,
    scope::Scope,
    stores::{
        ItemStore, PreferenceStore,
        sqlite::{SQLiteItemStore, SQLitePreferenceStore},
    },
};

/// The state needed for creating an item.
#[derive(Debug, Clone)]
pub struct CreateItemState {
    preference_store: SQLitePreferenceStore,
    item_store: SQLiteItemStore,
    user: String,
}

impl FromRef<AppState> for CreateItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            preference_store: SQLitePreferenceStore::new(state.db_connection.clone()),
            item_store: SQLiteItemStore::new(state.db_connection.clone()),
            user: state.user.clone(),
        }
    }
}

/// The form data for creating an item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewItemForm {
    /// What the money is for.
    pub name: String,
    /// The amount in dollars.
    pub amount: f64,
    /// Whether the item is a budget item or a transaction.
    pub table: ItemTable,
}

/// Render the page for creating an item.
pub async fn get_new_item_page() -> Response {
    new_item_view().into_response()
}

/// Handle the new item form, redirecting to the budget page on success.
///
/// The item is added to the end of the user's current scope.
pub async fn create_item_endpoint(
    State(state): State<CreateItemState>,
    Form(form): Form<NewItemForm>,
) -> Response {
    let name = form.name.trim();

    if name.is_empty() {
        return new_item_form_view("Error: Name cannot be empty").into_response();
    }

    if !form.amount.is_finite() {
        return new_item_form_view("Error: Amount must be a number").into_response();
    }

    match create_item(&state, name, form.amount, form.table) {
        Ok(item) => {
            tracing::info!("Created item {} in {:?}", item.id, form.table);

            (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER)
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not create item from {form:?}: {error}");
            error.into_alert_response()
        }
    }
}

fn create_item(
    state: &CreateItemState,
    name: &str,
    amount: f64,
    table: ItemTable,
) -> Result<Item, Error> {
    let preferences = state
        .preference_store
        .get(&state.user)
        .map_err(|error| match error {
            Error::NotFound => Error::PreferencesNotFound(state.user.clone()),
            error => error,
        })?;

    let scope = Scope {
        account: preferences.current_account,
        year: preferences.current_year,
        month: preferences.current_month,
    };

    state
        .item_store
        .create(table, NewItem::build(name, amount, scope))
}

fn new_item_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_ITEM_VIEW).into_html();
    let form = new_item_form_view("");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Add Item", &[dollar_input_styles()], &content)
}

fn new_item_form_view(error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::ITEMS_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Rent"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="table" class=(FORM_LABEL_STYLE) { "Type" }

                select id="table" name="table" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for table in ItemTable::ALL {
                        option value=(table.path_segment()) { (table.title()) }
                    }
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Item" }
        }
    }
}

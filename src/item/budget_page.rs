//! The budget page: scope menus plus the budget item and transaction lists.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    endpoints::{self, format_item_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_MOVE_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, link,
    },
    item::{Item, ItemTable, is_visible},
    navigation::NavBar,
    scope::{ResolvedScope, ScopeQuery, resolve_scope},
    stores::{
        ItemStore,
        sqlite::{SQLiteAccountStore, SQLiteItemStore, SQLitePreferenceStore},
    },
};

/// The state needed for the [get_budget_page] route handler.
#[derive(Debug, Clone)]
pub struct BudgetPageState {
    preference_store: SQLitePreferenceStore,
    account_store: SQLiteAccountStore,
    item_store: SQLiteItemStore,
    user: String,
}

impl FromRef<AppState> for BudgetPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            preference_store: SQLitePreferenceStore::new(state.db_connection.clone()),
            account_store: SQLiteAccountStore::new(state.db_connection.clone()),
            item_store: SQLiteItemStore::new(state.db_connection.clone()),
            user: state.user.clone(),
        }
    }
}

/// Renders the budget page for the user's current scope.
///
/// The query parameters `account`, `year` and `month` change the current
/// scope before the page is rendered, e.g. `/?month=June`.
pub async fn get_budget_page(
    State(state): State<BudgetPageState>,
    Query(query): Query<ScopeQuery>,
) -> Result<Response, Error> {
    let resolved = resolve_scope(
        &state.user,
        query.into_overrides(),
        &state.preference_store,
        &state.account_store,
        &state.item_store,
    )
    .inspect_err(|error| tracing::error!("could not resolve scope: {error}"))?;

    let scope = resolved.scope();
    let tables = ItemTable::ALL
        .into_iter()
        .map(|table| {
            state
                .item_store
                .list_by_scope(table, &scope)
                .map(|items| ItemTableView::new(table, items))
        })
        .collect::<Result<Vec<_>, Error>>()
        .inspect_err(|error| tracing::error!("could not load items: {error}"))?;

    Ok(budget_view(&resolved, &tables).into_response())
}

/// A row in one of the item tables.
#[derive(Debug, PartialEq)]
struct ItemRow {
    name: String,
    amount: f64,
    move_up_url: String,
    move_down_url: String,
    delete_url: String,
}

/// The visible items of one table and a summary of the hidden ones.
#[derive(Debug, PartialEq)]
struct ItemTableView {
    table: ItemTable,
    rows: Vec<ItemRow>,
    hidden_count: usize,
    total: f64,
}

impl ItemTableView {
    /// `items` must be in rank order.
    fn new(table: ItemTable, items: Vec<Item>) -> Self {
        let (visible, hidden): (Vec<Item>, Vec<Item>) =
            items.into_iter().partition(|item| is_visible(item.rank));

        let total: f64 = visible.iter().map(|item| item.amount).sum();
        let rows = visible
            .into_iter()
            .map(|item| ItemRow {
                move_up_url: format_item_endpoint(endpoints::MOVE_ITEM_UP, table, item.id),
                move_down_url: format_item_endpoint(endpoints::MOVE_ITEM_DOWN, table, item.id),
                delete_url: format_item_endpoint(endpoints::ITEM, table, item.id),
                name: item.name,
                amount: item.amount,
            })
            .collect();

        Self {
            table,
            rows,
            hidden_count: hidden.len(),
            total,
        }
    }
}

/// An entry in one of the scope menus.
struct MenuEntry {
    label: String,
    url: String,
    is_current: bool,
}

/// Build a link to the budget page that sets one scope parameter.
fn scope_url(key: &str, value: &str) -> String {
    match serde_urlencoded::to_string([(key, value)]) {
        Ok(query) => format!("{}?{query}", endpoints::ROOT),
        Err(error) => {
            tracing::error!("could not encode {key}={value:?} as a query string: {error}");
            endpoints::ROOT.to_owned()
        }
    }
}

fn menu_entries(resolved: &ResolvedScope) -> [(&'static str, Vec<MenuEntry>); 3] {
    let preferences = &resolved.preferences;

    let accounts = resolved
        .accounts
        .iter()
        .map(|account| MenuEntry {
            label: account.name.clone(),
            url: scope_url("account", &account.name),
            is_current: preferences.current_account == Some(account.id),
        })
        .collect();

    let years = resolved
        .years
        .iter()
        .map(|year| MenuEntry {
            label: year.to_string(),
            url: scope_url("year", &year.to_string()),
            is_current: preferences.current_year == *year,
        })
        .collect();

    let months = resolved
        .months
        .iter()
        .map(|month| MenuEntry {
            label: month.clone(),
            url: scope_url("month", month),
            is_current: preferences.current_month == *month,
        })
        .collect();

    [("Account", accounts), ("Year", years), ("Month", months)]
}

fn menu_view(title: &str, entries: &[MenuEntry]) -> Markup {
    let entry_style = |is_current: bool| {
        if is_current {
            "px-3 py-1 rounded bg-blue-600 text-white"
        } else {
            "px-3 py-1 rounded text-blue-600 hover:bg-blue-50 dark:text-blue-400 \
            dark:hover:bg-gray-800"
        }
    };

    html!(
        nav aria-label=(title) data-menu=(title.to_lowercase())
        {
            h2 class="text-sm font-semibold uppercase text-gray-500 dark:text-gray-400"
            {
                (title)
            }

            ul class="flex flex-wrap gap-2 mt-1"
            {
                @for entry in entries {
                    li
                    {
                        a
                            href=(entry.url)
                            class=(entry_style(entry.is_current))
                            aria-current=[entry.is_current.then_some("true")]
                        {
                            (entry.label)
                        }
                    }
                }

                @if entries.is_empty() {
                    li class="text-sm text-gray-500 dark:text-gray-400" { "None" }
                }
            }
        }
    )
}

fn item_table_view(view: &ItemTableView) -> Markup {
    let row_count = view.rows.len();

    let table_row = |index: usize, row: &ItemRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th
                    scope="row"
                    class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                {
                    (row.name)
                }

                td class="px-6 py-4 text-right tabular-nums"
                {
                    (format_currency(row.amount))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-2"
                    {
                        button
                            type="button"
                            class=(BUTTON_MOVE_STYLE)
                            title="Move up"
                            hx-post=(row.move_up_url)
                            hx-target-error="#alert-container"
                            disabled[index == 0]
                        {
                            "▲"
                        }

                        button
                            type="button"
                            class=(BUTTON_MOVE_STYLE)
                            title="Move down"
                            hx-post=(row.move_down_url)
                            hx-target-error="#alert-container"
                            disabled[index + 1 == row_count]
                        {
                            "▼"
                        }

                        button
                            type="button"
                            class=(BUTTON_DELETE_STYLE)
                            hx-delete=(row.delete_url)
                            hx-confirm=(format!(
                                "Are you sure you want to delete '{}'? This cannot be undone.",
                                row.name
                            ))
                            hx-target-error="#alert-container"
                        {
                            "Delete"
                        }
                    }
                }
            }
        )
    };

    html!(
        section class="w-full lg:max-w-5xl space-y-2" data-table=(view.table.path_segment())
        {
            h2 class="text-lg font-bold" { (view.table.title()) }

            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for (index, row) in view.rows.iter().enumerate() {
                        (table_row(index, row))
                    }

                    @if view.rows.is_empty() {
                        tr
                        {
                            td
                                colspan="3"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "Nothing here yet. Add an item "
                                (link(endpoints::NEW_ITEM_VIEW, "here"))
                                "."
                            }
                        }
                    }
                }

                tfoot
                {
                    tr class="font-semibold text-gray-900 dark:text-white"
                    {
                        th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                        td class="px-6 py-4 text-right tabular-nums" data-total="true"
                        {
                            (format_currency(view.total))
                        }
                        td {}
                    }
                }
            }

            @if view.hidden_count > 0 {
                p class="text-xs text-gray-500 dark:text-gray-400" data-hidden-count="true"
                {
                    (view.hidden_count)
                    @if view.hidden_count == 1 { " hidden item" } @else { " hidden items" }
                }
            }
        }
    )
}

fn budget_view(resolved: &ResolvedScope, tables: &[ItemTableView]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let preferences = &resolved.preferences;
    let heading = format!(
        "{} {} - {}",
        preferences.current_month,
        preferences.current_year,
        resolved.current_account_name().unwrap_or("No account"),
    );

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full lg:max-w-5xl space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { (heading) }

                    (link(endpoints::NEW_ITEM_VIEW, "Add Item"))
                }

                div class="flex flex-col gap-3"
                {
                    @for (title, entries) in menu_entries(resolved) {
                        (menu_view(title, &entries))
                    }
                }
            }

            div class="w-full flex flex-col items-center gap-8 mt-6"
            {
                @for table in tables {
                    (item_table_view(table))
                }
            }
        }
    );

    base("Budget", &[], &content)
}

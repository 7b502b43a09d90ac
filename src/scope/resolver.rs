//! Applies scope overrides to the user's preferences and gathers the menu data
//! for the budget page.

use std::collections::{BTreeSet, HashSet};

use crate::{
    Artifact, Error,
    account::{Account, find_account_id},
    item::ItemTable,
    month::sort_months,
    preferences::Preferences,
    scope::Scope,
    stores::{AccountStore, ItemStore, PreferenceStore},
};

/// The changes a request asks to make to the user's scope.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScopeOverrides {
    /// The month name to switch to.
    pub month: Option<String>,
    /// The name of the account to switch to.
    pub account_name: Option<String>,
    /// The year to switch to.
    pub year: Option<i32>,
}

/// The user's effective scope and everything needed to draw the scope menus.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScope {
    /// The user's preferences after the overrides were applied and saved.
    pub preferences: Preferences,
    /// Every account.
    pub accounts: Vec<Account>,
    /// The years with items for the current account, newest first.
    pub years: Vec<i32>,
    /// The months with items for the current account and year, in calendar order.
    pub months: Vec<String>,
}

impl ResolvedScope {
    /// The scope that selects which items are shown.
    pub fn scope(&self) -> Scope {
        Scope {
            account: self.preferences.current_account,
            year: self.preferences.current_year,
            month: self.preferences.current_month.clone(),
        }
    }

    /// The name of the current account, or `None` if it does not exist.
    pub fn current_account_name(&self) -> Option<&str> {
        let id = self.preferences.current_account?;

        self.accounts
            .iter()
            .find(|account| account.id == id)
            .map(|account| account.name.as_str())
    }
}

/// Load `user`'s preferences, apply and save `overrides`, then load the
/// accounts, years and months for the menus.
///
/// Overrides are applied in the order month, account, year and each one that
/// is present is saved straight away. The account list is read to look up an
/// account override and read again for the menu. An account name that matches
/// no account sets the current account to `None`.
///
/// # Errors
/// - [Error::PreferencesNotFound] if the preferences cannot be loaded.
/// - [Error::PreferencesSaveError] if an override cannot be saved. Overrides
///   saved before the failure stay saved.
/// - [Error::DataUnavailable] if the accounts, years or months cannot be loaded.
pub fn resolve_scope(
    user: &str,
    overrides: ScopeOverrides,
    preference_store: &impl PreferenceStore,
    account_store: &impl AccountStore,
    item_store: &impl ItemStore,
) -> Result<ResolvedScope, Error> {
    let mut preferences = preference_store.get(user).map_err(|error| {
        tracing::error!("could not load preferences for {user}: {error}");
        Error::PreferencesNotFound(user.to_owned())
    })?;

    let save = |preferences: &Preferences| {
        preference_store.put(preferences).map_err(|error| {
            tracing::error!("could not save preferences for {user}: {error}");
            Error::PreferencesSaveError
        })
    };

    let load_accounts = || {
        account_store.get_all().map_err(|error| {
            tracing::error!("could not load accounts: {error}");
            Error::DataUnavailable(Artifact::Accounts)
        })
    };

    if let Some(month) = overrides.month {
        preferences.current_month = month;
        save(&preferences)?;
    }

    if let Some(account_name) = overrides.account_name {
        preferences.current_account = find_account_id(&load_accounts()?, &account_name);
        save(&preferences)?;
    }

    if let Some(year) = overrides.year {
        preferences.current_year = year;
        save(&preferences)?;
    }

    let accounts = load_accounts()?;
    let years = distinct_years(item_store, &preferences)?;
    let months = distinct_months(item_store, &preferences)?;

    Ok(ResolvedScope {
        preferences,
        accounts,
        years,
        months,
    })
}

fn distinct_years(
    item_store: &impl ItemStore,
    preferences: &Preferences,
) -> Result<Vec<i32>, Error> {
    let mut years = BTreeSet::new();

    for table in ItemTable::ALL {
        let table_years = item_store
            .distinct_years(table, preferences.current_account)
            .map_err(|error| {
                tracing::error!("could not load years from {}: {error}", table.title());
                Error::DataUnavailable(Artifact::Years)
            })?;
        years.extend(table_years);
    }

    Ok(years.into_iter().rev().collect())
}

fn distinct_months(
    item_store: &impl ItemStore,
    preferences: &Preferences,
) -> Result<Vec<String>, Error> {
    let mut seen = HashSet::new();
    let mut months = Vec::new();

    for table in ItemTable::ALL {
        let table_months = item_store
            .distinct_months(table, preferences.current_account, preferences.current_year)
            .map_err(|error| {
                tracing::error!("could not load months from {}: {error}", table.title());
                Error::DataUnavailable(Artifact::Months)
            })?;

        for month in table_months {
            if seen.insert(month.clone()) {
                months.push(month);
            }
        }
    }

    sort_months(&mut months);

    Ok(months)
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        sync::{Arc, Mutex},
    };

    use rusqlite::Connection;

    use crate::{
        Artifact, Error,
        account::Account,
        db::initialize,
        item::{Item, ItemId, ItemTable, NewItem, Rank},
        preferences::Preferences,
        scope::{Scope, ScopeOverrides},
        stores::{
            AccountStore, ItemStore, PreferenceStore,
            sqlite::{SQLiteAccountStore, SQLiteItemStore, SQLitePreferenceStore},
        },
    };

    use super::resolve_scope;

    struct Stores {
        preferences: SQLitePreferenceStore,
        accounts: SQLiteAccountStore,
        items: SQLiteItemStore,
    }

    fn get_test_stores() -> Stores {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
            .execute(
                "INSERT INTO account (id, name) VALUES (1, 'Everyday'), (2, 'Savings')",
                (),
            )
            .unwrap();
        connection
            .execute(
                "INSERT INTO preferences (user, current_month, current_year, current_account)
                VALUES ('alice', 'March', 2024, 1)",
                (),
            )
            .unwrap();
        let connection = Arc::new(Mutex::new(connection));

        Stores {
            preferences: SQLitePreferenceStore::new(connection.clone()),
            accounts: SQLiteAccountStore::new(connection.clone()),
            items: SQLiteItemStore::new(connection),
        }
    }

    fn add_item(stores: &Stores, table: ItemTable, account: i64, year: i32, month: &str) {
        let scope = Scope {
            account: Some(account),
            year,
            month: month.to_owned(),
        };
        stores
            .items
            .create(table, NewItem::build("Thing", 1.0, scope))
            .unwrap();
    }

    fn resolve(stores: &Stores, overrides: ScopeOverrides) -> Result<super::ResolvedScope, Error> {
        resolve_scope(
            "alice",
            overrides,
            &stores.preferences,
            &stores.accounts,
            &stores.items,
        )
    }

    #[test]
    fn no_overrides_returns_stored_scope() {
        let stores = get_test_stores();

        let resolved = resolve(&stores, ScopeOverrides::default()).unwrap();

        assert_eq!(
            resolved.scope(),
            Scope {
                account: Some(1),
                year: 2024,
                month: "March".to_owned(),
            }
        );
        assert_eq!(resolved.current_account_name(), Some("Everyday"));
        assert_eq!(resolved.accounts.len(), 2);
    }

    #[test]
    fn overrides_are_saved() {
        let stores = get_test_stores();

        resolve(
            &stores,
            ScopeOverrides {
                month: Some("June".to_owned()),
                account_name: Some("Savings".to_owned()),
                year: Some(2023),
            },
        )
        .unwrap();

        assert_eq!(
            stores.preferences.get("alice"),
            Ok(Preferences {
                user: "alice".to_owned(),
                current_account: Some(2),
                current_year: 2023,
                current_month: "June".to_owned(),
            })
        );
    }

    #[test]
    fn unknown_account_clears_current_account() {
        let stores = get_test_stores();
        add_item(&stores, ItemTable::BudgetItems, 1, 2024, "March");

        let resolved = resolve(
            &stores,
            ScopeOverrides {
                account_name: Some("Offshore".to_owned()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(resolved.preferences.current_account, None);
        assert_eq!(resolved.current_account_name(), None);
        assert!(resolved.years.is_empty());
        assert!(resolved.months.is_empty());
    }

    #[test]
    fn years_are_unioned_and_newest_first() {
        let stores = get_test_stores();
        add_item(&stores, ItemTable::BudgetItems, 1, 2022, "March");
        add_item(&stores, ItemTable::BudgetItems, 1, 2024, "March");
        add_item(&stores, ItemTable::Transactions, 1, 2024, "March");
        add_item(&stores, ItemTable::Transactions, 1, 2023, "March");
        add_item(&stores, ItemTable::Transactions, 2, 2019, "March");

        let resolved = resolve(&stores, ScopeOverrides::default()).unwrap();

        assert_eq!(resolved.years, vec![2024, 2023, 2022]);
    }

    #[test]
    fn months_are_unioned_without_duplicates_in_calendar_order() {
        let stores = get_test_stores();
        add_item(&stores, ItemTable::BudgetItems, 1, 2024, "May");
        add_item(&stores, ItemTable::BudgetItems, 1, 2024, "January");
        add_item(&stores, ItemTable::Transactions, 1, 2024, "May");
        add_item(&stores, ItemTable::Transactions, 1, 2024, "February");
        add_item(&stores, ItemTable::Transactions, 1, 2023, "December");

        let resolved = resolve(&stores, ScopeOverrides::default()).unwrap();

        assert_eq!(resolved.months, vec!["January", "February", "May"]);
    }

    #[test]
    fn months_follow_the_new_year() {
        let stores = get_test_stores();
        add_item(&stores, ItemTable::BudgetItems, 1, 2024, "May");
        add_item(&stores, ItemTable::BudgetItems, 1, 2023, "December");

        let resolved = resolve(
            &stores,
            ScopeOverrides {
                year: Some(2023),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(resolved.months, vec!["December"]);
    }

    #[test]
    fn missing_preferences_is_an_error() {
        let stores = get_test_stores();

        let result = resolve_scope(
            "bob",
            ScopeOverrides::default(),
            &stores.preferences,
            &stores.accounts,
            &stores.items,
        );

        assert_eq!(result, Err(Error::PreferencesNotFound("bob".to_owned())));
    }

    /// A preference store that counts writes and can be told to fail them.
    struct CountingPreferenceStore {
        preferences: RefCell<Preferences>,
        puts: RefCell<usize>,
        fail_puts: bool,
    }

    impl CountingPreferenceStore {
        fn new(fail_puts: bool) -> Self {
            Self {
                preferences: RefCell::new(Preferences {
                    user: "alice".to_owned(),
                    current_account: Some(1),
                    current_year: 2024,
                    current_month: "March".to_owned(),
                }),
                puts: RefCell::new(0),
                fail_puts,
            }
        }
    }

    impl PreferenceStore for CountingPreferenceStore {
        fn get(&self, _user: &str) -> Result<Preferences, Error> {
            Ok(self.preferences.borrow().clone())
        }

        fn put(&self, preferences: &Preferences) -> Result<(), Error> {
            if self.fail_puts {
                return Err(Error::DatabaseLockError);
            }

            *self.puts.borrow_mut() += 1;
            *self.preferences.borrow_mut() = preferences.clone();
            Ok(())
        }
    }

    struct FailingAccountStore;

    impl AccountStore for FailingAccountStore {
        fn get_all(&self) -> Result<Vec<Account>, Error> {
            Err(Error::DatabaseLockError)
        }
    }

    /// An item store whose year or month queries fail.
    struct FailingItemStore {
        fail_years: bool,
    }

    impl ItemStore for FailingItemStore {
        fn create(&self, _table: ItemTable, _item: NewItem) -> Result<Item, Error> {
            unimplemented!()
        }

        fn list_by_scope(&self, _table: ItemTable, _scope: &Scope) -> Result<Vec<Item>, Error> {
            Ok(vec![])
        }

        fn bulk_set_ranks(
            &self,
            _table: ItemTable,
            _ranks: &[(ItemId, Rank)],
        ) -> Result<(), Error> {
            Ok(())
        }

        fn delete(&self, _table: ItemTable, _id: ItemId) -> Result<usize, Error> {
            Ok(0)
        }

        fn distinct_years(
            &self,
            _table: ItemTable,
            _account: Option<i64>,
        ) -> Result<Vec<i32>, Error> {
            if self.fail_years {
                Err(Error::DatabaseLockError)
            } else {
                Ok(vec![2024])
            }
        }

        fn distinct_months(
            &self,
            _table: ItemTable,
            _account: Option<i64>,
            _year: i32,
        ) -> Result<Vec<String>, Error> {
            Err(Error::DatabaseLockError)
        }
    }

    #[test]
    fn each_override_is_saved_once() {
        let stores = get_test_stores();
        let preference_store = CountingPreferenceStore::new(false);

        resolve_scope(
            "alice",
            ScopeOverrides {
                month: Some("April".to_owned()),
                account_name: None,
                year: Some(2025),
            },
            &preference_store,
            &stores.accounts,
            &stores.items,
        )
        .unwrap();

        assert_eq!(*preference_store.puts.borrow(), 2);
    }

    #[test]
    fn no_overrides_saves_nothing() {
        let stores = get_test_stores();
        let preference_store = CountingPreferenceStore::new(false);

        resolve_scope(
            "alice",
            ScopeOverrides::default(),
            &preference_store,
            &stores.accounts,
            &stores.items,
        )
        .unwrap();

        assert_eq!(*preference_store.puts.borrow(), 0);
    }

    #[test]
    fn failed_save_is_an_error() {
        let stores = get_test_stores();
        let preference_store = CountingPreferenceStore::new(true);

        let result = resolve_scope(
            "alice",
            ScopeOverrides {
                month: Some("April".to_owned()),
                ..Default::default()
            },
            &preference_store,
            &stores.accounts,
            &stores.items,
        );

        assert_eq!(result, Err(Error::PreferencesSaveError));
    }

    #[test]
    fn failed_account_load_is_data_unavailable() {
        let stores = get_test_stores();

        let result = resolve_scope(
            "alice",
            ScopeOverrides::default(),
            &stores.preferences,
            &FailingAccountStore,
            &stores.items,
        );

        assert_eq!(result, Err(Error::DataUnavailable(Artifact::Accounts)));
    }

    #[test]
    fn month_is_saved_before_a_failed_account_lookup() {
        let preference_store = CountingPreferenceStore::new(false);
        let stores = get_test_stores();

        let result = resolve_scope(
            "alice",
            ScopeOverrides {
                month: Some("April".to_owned()),
                account_name: Some("Savings".to_owned()),
                year: Some(2025),
            },
            &preference_store,
            &FailingAccountStore,
            &stores.items,
        );

        assert_eq!(result, Err(Error::DataUnavailable(Artifact::Accounts)));
        assert_eq!(*preference_store.puts.borrow(), 1);
        let saved = preference_store.preferences.borrow();
        assert_eq!(saved.current_month, "April");
        assert_eq!(saved.current_account, Some(1));
        assert_eq!(saved.current_year, 2024);
    }

    #[test]
    fn failed_year_load_is_data_unavailable() {
        let stores = get_test_stores();

        let result = resolve_scope(
            "alice",
            ScopeOverrides::default(),
            &stores.preferences,
            &stores.accounts,
            &FailingItemStore { fail_years: true },
        );

        assert_eq!(result, Err(Error::DataUnavailable(Artifact::Years)));
    }

    #[test]
    fn failed_month_load_is_data_unavailable() {
        let stores = get_test_stores();

        let result = resolve_scope(
            "alice",
            ScopeOverrides::default(),
            &stores.preferences,
            &stores.accounts,
            &FailingItemStore { fail_years: false },
        );

        assert_eq!(result, Err(Error::DataUnavailable(Artifact::Months)));
    }
}

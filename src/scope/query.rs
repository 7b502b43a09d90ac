//! Query parameters for changing the scope of the budget page.

use serde::Deserialize;

use crate::scope::ScopeOverrides;

/// The raw query parameters accepted by the budget page.
///
/// For example, `/?account=Savings&year=2024` switches to the 'Savings'
/// account for the year 2024.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ScopeQuery {
    /// The name of the month to switch to.
    pub month: Option<String>,
    /// The name of the account to switch to.
    pub account: Option<String>,
    /// The year to switch to.
    pub year: Option<String>,
}

impl ScopeQuery {
    /// Convert the query parameters into scope overrides.
    ///
    /// This is the only place user supplied scope values are checked. Empty
    /// parameters are ignored and a year that is not an integer is ignored.
    /// Month and account names are passed through as is, even if they do not
    /// name a real month or account.
    pub fn into_overrides(self) -> ScopeOverrides {
        let year = self.year.filter(|year| !year.is_empty()).and_then(|year| {
            year.trim()
                .parse()
                .inspect_err(|error| tracing::warn!("ignoring invalid year {year:?}: {error}"))
                .ok()
        });

        ScopeOverrides {
            month: self.month.filter(|month| !month.is_empty()),
            account_name: self.account.filter(|account| !account.is_empty()),
            year,
        }
    }
}

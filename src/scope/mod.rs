//! Working out which account, year and month a request is about.

mod query;
mod resolver;

pub use query::ScopeQuery;
pub use resolver::{ResolvedScope, ScopeOverrides, resolve_scope};

use crate::account::AccountId;

/// The account, year and month that select which items are shown and
/// reordered together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    /// The account the items belong to.
    ///
    /// `None` never matches any item.
    pub account: Option<AccountId>,
    /// The year the items belong to.
    pub year: i32,
    /// The name of the month the items belong to, e.g. "March".
    pub month: String,
}

//! Contains traits and implementations for objects that store the domain models.

mod account;
mod item;
mod preference;

pub mod sqlite;

pub use account::AccountStore;
pub use item::ItemStore;
pub use preference::PreferenceStore;

//! SQLite backend for the declaration store.
//!
//! Each tax year is one row holding the JSON document of its
//! [`tax_core::TaxData`] plus the time of the last save.

mod factory;
mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteStore;

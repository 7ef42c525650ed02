//! # Forex Repo
//!
//! Concrete store adapter for the forex sync service. This crate provides
//! the SQLite adapter that implements the `ForexStore` port.

pub mod sqlite;


pub use sqlite::SqliteStore;

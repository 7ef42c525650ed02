//! Port traits implemented by the adapter crates.

pub mod source;
pub mod store;

pub use source::RateSource;
pub use store::{ForexStore, UpsertOutcome};

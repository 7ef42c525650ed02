//! Console Inbound Adapter
//!
//! Interactive command loop that drives the application layer.

mod console;

pub use console::run;

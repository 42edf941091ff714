//! Commands Layer
//!
//! Command handlers that bridge the admin console to the repositories.
//! Errors are flattened to `String` for display.

mod collection_cmd;

pub use collection_cmd::*;

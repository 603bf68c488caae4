//! Shared helpers for the record services: logging setup, runtime checks and
//! the small response types every route group reuses.

pub mod types;
pub mod utils;
pub mod env;

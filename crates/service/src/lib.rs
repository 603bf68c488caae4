//! Service layer providing the CRUD contract shared by every record variant.
//! - `storage` holds the backends (memory, JSON file, SeaORM).
//! - `services` adds the per-variant rules on top of a backend.
//! - Validation rules live with the record types in the `models` crate.

pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
#[cfg(test)]
pub mod test_support;

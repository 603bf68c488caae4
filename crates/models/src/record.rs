//! Traits shared by every record variant held in a resource store.

use std::{fmt::Display, hash::Hash};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ModelError;

/// A record with a client-supplied identifier that is unique within its store.
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Display + Send + Sync + Serialize + DeserializeOwned + 'static;

    /// Lowercase record kind used in error messages and log fields.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    /// Field-level checks run before the record enters a store.
    fn validate(&self) -> Result<(), ModelError>;
}

/// Records persisted as one map entry: the id is the key, the remaining fields the value.
pub trait KeyedRecord: Record {
    type Body: Clone + Send + Sync + Serialize + DeserializeOwned + 'static;

    fn into_entry(self) -> (Self::Id, Self::Body);

    fn from_entry(id: Self::Id, body: Self::Body) -> Self;
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid_field(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError::invalid_field(field, "must be greater than 0"));
    }
    Ok(())
}

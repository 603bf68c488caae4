//! Storage abstractions for service layer
//!
//! [`ResourceStore`] is the CRUD contract every record collection honours,
//! whatever holds the data: a process-local list, a JSON file or a table.

use async_trait::async_trait;
use models::record::Record;

use crate::errors::ServiceError;

pub mod json_map_store;
pub mod json_file_store;
pub mod memory_store;
pub mod seaorm_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use seaorm_store::SeaOrmProductStore;

/// Transformation applied to the current record by [`ResourceStore::update`].
pub type Mutation<R> = Box<dyn FnOnce(R) -> Result<R, ServiceError> + Send>;

#[async_trait]
pub trait ResourceStore<R: Record>: Send + Sync {
    /// All records in backend order.
    async fn list(&self) -> Result<Vec<R>, ServiceError>;

    async fn get(&self, id: &R::Id) -> Result<R, ServiceError>;

    /// Insert a new record; the id check and the insert are one step.
    async fn create(&self, record: R) -> Result<R, ServiceError>;

    /// Load the record, apply `mutate`, re-validate and persist the result.
    async fn update(&self, id: &R::Id, mutate: Mutation<R>) -> Result<R, ServiceError>;

    /// Remove and return the record.
    async fn delete(&self, id: &R::Id) -> Result<R, ServiceError>;

    /// Overwrite every field of an existing record.
    async fn replace(&self, id: &R::Id, record: R) -> Result<R, ServiceError> {
        self.update(id, Box::new(move |_| Ok(record))).await
    }
}

/// Checks shared by all backends once a mutation has produced the next value.
pub(crate) fn settle<R: Record>(id: &R::Id, next: R) -> Result<R, ServiceError> {
    if next.id() != id {
        return Err(ServiceError::InvalidArgument(format!(
            "{} id {} does not match {}",
            R::KIND,
            next.id(),
            id
        )));
    }
    next.validate()?;
    Ok(next)
}

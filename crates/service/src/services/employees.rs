use std::sync::Arc;

use models::employee::Employee;
use tracing::instrument;

use crate::errors::ServiceError;
use crate::storage::ResourceStore;

pub struct EmployeeService {
    store: Arc<dyn ResourceStore<Employee>>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn ResourceStore<Employee>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        self.store.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Employee, ServiceError> {
        self.store.get(&id).await
    }

    #[instrument(skip(self, employee), fields(id = employee.id))]
    pub async fn create(&self, employee: Employee) -> Result<Employee, ServiceError> {
        self.store.create(employee).await
    }

    /// Replace the employee addressed by `id`. A body carrying another id is rejected.
    #[instrument(skip(self, employee))]
    pub async fn replace(&self, id: i64, employee: Employee) -> Result<Employee, ServiceError> {
        self.store.replace(&id, employee).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<Employee, ServiceError> {
        self.store.delete(&id).await
    }
}

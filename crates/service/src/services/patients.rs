use std::sync::Arc;

use models::patient::{sort_patients, Patient, PatientUpdate, SortField, SortOrder};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::ResourceStore;

/// Patient registry: CRUD, partial edits and sorted views.
pub struct PatientService {
    store: Arc<dyn ResourceStore<Patient>>,
}

impl PatientService {
    pub fn new(store: Arc<dyn ResourceStore<Patient>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Patient>, ServiceError> {
        self.store.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Patient, ServiceError> {
        self.store.get(&id.to_string()).await
    }

    #[instrument(skip(self, patient), fields(id = %patient.id))]
    pub async fn create(&self, patient: Patient) -> Result<Patient, ServiceError> {
        self.store.create(patient).await
    }

    /// Overwrite the fields present in `patch`; the merged patient is validated
    /// again so derived values always reflect the stored fields.
    #[instrument(skip(self, patch))]
    pub async fn merge(&self, id: &str, patch: PatientUpdate) -> Result<Patient, ServiceError> {
        let merged = self
            .store
            .update(&id.to_string(), Box::new(move |current: Patient| Ok(patch.apply(current))))
            .await?;
        info!(bmi = merged.bmi(), "patient updated");
        Ok(merged)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Patient, ServiceError> {
        self.store.delete(&id.to_string()).await
    }

    /// All patients ordered by `sort_by` (`height`, `weight` or `bmi`), `asc` or `desc`.
    pub async fn sort(&self, sort_by: &str, order: &str) -> Result<Vec<Patient>, ServiceError> {
        let field: SortField = sort_by.parse()?;
        let order: SortOrder = order.parse()?;
        let mut patients = self.store.list().await?;
        sort_patients(&mut patients, field, order);
        Ok(patients)
    }
}

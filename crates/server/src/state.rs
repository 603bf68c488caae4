use std::sync::Arc;

use models::{employee::Employee, patient::Patient, product::Product};
use service::services::{employees::EmployeeService, patients::PatientService, products::ProductService};
use service::storage::ResourceStore;

/// Shared handler state: one service per record variant.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub patients: Arc<PatientService>,
    pub employees: Arc<EmployeeService>,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ResourceStore<Product>>,
        patients: Arc<dyn ResourceStore<Patient>>,
        employees: Arc<dyn ResourceStore<Employee>>,
    ) -> Self {
        Self {
            products: Arc::new(ProductService::new(products)),
            patients: Arc::new(PatientService::new(patients)),
            employees: Arc::new(EmployeeService::new(employees)),
        }
    }
}

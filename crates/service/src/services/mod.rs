//! One service per record variant, each wrapping a [`crate::storage::ResourceStore`].

pub mod employees;
pub mod patients;
pub mod products;

pub use employees::EmployeeService;
pub use patients::PatientService;
pub use products::ProductService;

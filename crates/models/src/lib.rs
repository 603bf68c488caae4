//! Record types and their validation rules.
//!
//! `product` is a sea-orm entity; `patient` and `employee` are plain serde
//! structs. All of them implement [`record::Record`].

pub mod errors;
pub mod db;
pub mod record;
pub mod product;
pub mod patient;
pub mod employee;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, record::{self, Record}};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Domain name for a product row.
pub type Product = Model;

impl Model {
    pub fn new(id: i32, name: &str, description: &str, price: f64, quantity: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            quantity,
        }
    }
}

impl Record for Model {
    type Id = i32;

    const KIND: &'static str = "product";

    fn id(&self) -> &i32 {
        &self.id
    }

    fn validate(&self) -> Result<(), errors::ModelError> {
        if self.id <= 0 {
            return Err(errors::ModelError::invalid_field("id", "must be greater than 0"));
        }
        record::require_text("name", &self.name)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(errors::ModelError::invalid_field("price", "must not be negative"));
        }
        if self.quantity < 0 {
            return Err(errors::ModelError::invalid_field("quantity", "must not be negative"));
        }
        Ok(())
    }
}

/// Catalogue inserted into an empty product store at startup.
pub fn seed() -> Vec<Model> {
    vec![
        Model::new(1, "Phone", "Budget phone", 99.0, 10),
        Model::new(2, "Laptop", "Gaming Laptop", 999.0, 6),
    ]
}

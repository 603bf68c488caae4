use std::sync::Arc;

use models::product::Product;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::ResourceStore;

/// Product catalogue operations over any product backend.
pub struct ProductService {
    store: Arc<dyn ResourceStore<Product>>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ResourceStore<Product>>) -> Self {
        Self { store }
    }

    /// Insert `seed` only when the store holds no products; returns how many were inserted.
    #[instrument(skip_all)]
    pub async fn seed_if_empty(&self, seed: Vec<Product>) -> Result<usize, ServiceError> {
        if !self.store.list().await?.is_empty() {
            return Ok(0);
        }
        let mut inserted = 0;
        for product in seed {
            self.store.create(product).await?;
            inserted += 1;
        }
        info!(count = inserted, "seeded product catalogue");
        Ok(inserted)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.store.list().await
    }

    pub async fn get(&self, id: i32) -> Result<Product, ServiceError> {
        self.store.get(&id).await
    }

    #[instrument(skip(self, product), fields(id = product.id))]
    pub async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        self.store.create(product).await
    }

    /// Full replace. The id always comes from the request target, never the body.
    #[instrument(skip(self, product))]
    pub async fn replace(&self, id: i32, mut product: Product) -> Result<Product, ServiceError> {
        product.id = id;
        self.store.replace(&id, product).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Product, ServiceError> {
        self.store.delete(&id).await
    }
}

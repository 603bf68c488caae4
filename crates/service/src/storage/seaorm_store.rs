use async_trait::async_trait;
use models::{
    product::{self, Entity as ProductEntity, Product},
    record::Record,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder, Set, SqlErr,
};
use tracing::warn;

use super::{settle, Mutation, ResourceStore};
use crate::errors::ServiceError;

/// SeaORM-backed product store over the `product` table.
pub struct SeaOrmProductStore {
    pub db: DatabaseConnection,
}

impl SeaOrmProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Plain row insert. The primary key guards against a concurrent insert
    /// landing between the lookup in `create` and this write.
    async fn insert(&self, record: Product) -> Result<Product, ServiceError> {
        let id = record.id;
        record
            .into_active_model()
            .reset_all()
            .insert(&self.db)
            .await
            .map_err(|e| insert_error(id, e))
    }

    async fn find(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        ProductEntity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)
    }
}

fn insert_error(id: i32, e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            warn!(id, "product insert lost a race on the primary key");
            ServiceError::already_exists(Product::KIND, id)
        }
        _ => ServiceError::db(e),
    }
}

#[async_trait]
impl ResourceStore<Product> for SeaOrmProductStore {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        ProductEntity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn get(&self, id: &i32) -> Result<Product, ServiceError> {
        self.find(*id).await?.ok_or_else(|| ServiceError::not_found(Product::KIND, id))
    }

    async fn create(&self, record: Product) -> Result<Product, ServiceError> {
        record.validate()?;
        let id = record.id;
        if self.find(id).await?.is_some() {
            return Err(ServiceError::already_exists(Product::KIND, id));
        }
        self.insert(record).await
    }

    async fn update(&self, id: &i32, mutate: Mutation<Product>) -> Result<Product, ServiceError> {
        let Some(existing) = self.find(*id).await? else {
            return Err(ServiceError::not_found(Product::KIND, id));
        };
        let next = settle(id, mutate(existing.clone())?)?;
        let mut am: product::ActiveModel = existing.into();
        am.name = Set(next.name);
        am.description = Set(next.description);
        am.price = Set(next.price);
        am.quantity = Set(next.quantity);
        am.update(&self.db).await.map_err(ServiceError::db)
    }

    async fn delete(&self, id: &i32) -> Result<Product, ServiceError> {
        let Some(existing) = self.find(*id).await? else {
            return Err(ServiceError::not_found(Product::KIND, id));
        };
        let res = ProductEntity::delete_by_id(*id).exec(&self.db).await.map_err(ServiceError::db)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found(Product::KIND, id));
        }
        Ok(existing)
    }
}

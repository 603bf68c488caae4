use std::path::PathBuf;

use async_trait::async_trait;
use models::record::{KeyedRecord, Record};

use super::{json_map_store::JsonMapStore, settle, Mutation, ResourceStore};
use crate::errors::ServiceError;

/// Records persisted in a JSON object keyed by id; each value holds the
/// remaining fields. State survives restarts.
pub struct JsonFileStore<R: KeyedRecord> {
    map: JsonMapStore<R::Id, R::Body>,
}

impl<R: KeyedRecord> JsonFileStore<R> {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let map = JsonMapStore::new(path).await?;
        Ok(Self { map })
    }
}

#[async_trait]
impl<R: KeyedRecord> ResourceStore<R> for JsonFileStore<R> {
    async fn list(&self) -> Result<Vec<R>, ServiceError> {
        Ok(self
            .map
            .list()
            .await
            .into_iter()
            .map(|(id, body)| R::from_entry(id, body))
            .collect())
    }

    async fn get(&self, id: &R::Id) -> Result<R, ServiceError> {
        self.map
            .get(id)
            .await
            .map(|body| R::from_entry(id.clone(), body))
            .ok_or_else(|| ServiceError::not_found(R::KIND, id))
    }

    async fn create(&self, record: R) -> Result<R, ServiceError> {
        record.validate()?;
        let (id, body) = record.clone().into_entry();
        self.map
            .update_map(move |entries| {
                if entries.iter().any(|(k, _)| *k == id) {
                    return Err(ServiceError::already_exists(R::KIND, &id));
                }
                entries.push((id, body));
                Ok(())
            })
            .await?;
        Ok(record)
    }

    async fn update(&self, id: &R::Id, mutate: Mutation<R>) -> Result<R, ServiceError> {
        let id = id.clone();
        self.map
            .update_map(move |entries| {
                let slot = entries
                    .iter_mut()
                    .find(|(k, _)| *k == id)
                    .ok_or_else(|| ServiceError::not_found(R::KIND, &id))?;
                let current = R::from_entry(id.clone(), slot.1.clone());
                let next = settle(&id, mutate(current)?)?;
                let (_, body) = next.clone().into_entry();
                slot.1 = body;
                Ok(next)
            })
            .await
    }

    async fn delete(&self, id: &R::Id) -> Result<R, ServiceError> {
        let id = id.clone();
        self.map
            .update_map(move |entries| {
                let index = entries
                    .iter()
                    .position(|(k, _)| *k == id)
                    .ok_or_else(|| ServiceError::not_found(R::KIND, &id))?;
                let (key, body) = entries.remove(index);
                Ok(R::from_entry(key, body))
            })
            .await
    }
}

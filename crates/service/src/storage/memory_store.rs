use async_trait::async_trait;
use models::record::Record;
use tokio::sync::RwLock;
use tracing::debug;

use super::{settle, Mutation, ResourceStore};
use crate::errors::ServiceError;

/// Process-local store keeping records in insertion order. Nothing survives a restart.
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<R>) -> Self {
        Self { records: RwLock::new(records) }
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> ResourceStore<R> for MemoryStore<R> {
    async fn list(&self) -> Result<Vec<R>, ServiceError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &R::Id) -> Result<R, ServiceError> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(R::KIND, id))
    }

    async fn create(&self, record: R) -> Result<R, ServiceError> {
        record.validate()?;
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(ServiceError::already_exists(R::KIND, record.id()));
        }
        records.push(record.clone());
        debug!(kind = R::KIND, id = %record.id(), count = records.len(), "memory_store_insert");
        Ok(record)
    }

    async fn update(&self, id: &R::Id, mutate: Mutation<R>) -> Result<R, ServiceError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(R::KIND, id))?;
        let next = settle(id, mutate(slot.clone())?)?;
        *slot = next.clone();
        Ok(next)
    }

    async fn delete(&self, id: &R::Id) -> Result<R, ServiceError> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(R::KIND, id))?;
        Ok(records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::employee::Employee;
    use std::sync::Arc;

    fn employee(id: i64, name: &str) -> Employee {
        Employee { id, name: name.into(), age: 30, department: "dept1".into() }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() -> Result<(), anyhow::Error> {
        let store = MemoryStore::<Employee>::new();
        let created = store.create(employee(1, "Jane Doe")).await?;
        assert_eq!(created, employee(1, "Jane Doe"));
        assert_eq!(store.get(&1).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_id_rejected_and_single_copy_kept() -> Result<(), anyhow::Error> {
        let store = MemoryStore::<Employee>::new();
        store.create(employee(1, "Jane Doe")).await?;
        let dup = store.create(employee(1, "John Doe")).await;
        assert!(matches!(dup, Err(ServiceError::AlreadyExists(_))));
        let all = store.list().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Jane Doe");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_record_never_stored() -> Result<(), anyhow::Error> {
        let store = MemoryStore::<Employee>::new();
        let mut e = employee(1, "Jane Doe");
        e.age = 17;
        assert!(matches!(store.create(e).await, Err(ServiceError::Validation(_))));
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() -> Result<(), anyhow::Error> {
        let store = MemoryStore::<Employee>::new();
        for id in [3, 1, 2] {
            store.create(employee(id, "Worker")).await?;
        }
        let ids: Vec<i64> = store.list().await?.iter().map(|e| e.id).collect();
        assert_eq!(ids, [3, 1, 2]);
        Ok(())
    }

    #[tokio::test]
    async fn replace_and_delete() -> Result<(), anyhow::Error> {
        let store = MemoryStore::<Employee>::new();
        store.create(employee(1, "Jane Doe")).await?;
        let updated = store.replace(&1, employee(1, "Jane Smith")).await?;
        assert_eq!(updated.name, "Jane Smith");
        assert_eq!(store.get(&1).await?.name, "Jane Smith");

        let removed = store.delete(&1).await?;
        assert_eq!(removed.id, 1);
        assert!(matches!(store.get(&1).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.delete(&1).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_cannot_change_id_or_break_invariants() -> Result<(), anyhow::Error> {
        let store = MemoryStore::<Employee>::new();
        store.create(employee(1, "Jane Doe")).await?;
        let moved = store.replace(&1, employee(2, "Jane Doe")).await;
        assert!(matches!(moved, Err(ServiceError::InvalidArgument(_))));
        let too_young = store
            .update(&1, Box::new(|mut e: Employee| { e.age = 10; Ok(e) }))
            .await;
        assert!(matches!(too_young, Err(ServiceError::Validation(_))));
        assert_eq!(store.get(&1).await?, employee(1, "Jane Doe"));
        assert!(matches!(store.replace(&9, employee(9, "Nobody")).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_with_same_id_insert_once() -> Result<(), anyhow::Error> {
        let store = Arc::new(MemoryStore::<Employee>::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.create(employee(7, "Racer")).await.is_ok() }));
        }
        let mut wins = 0;
        for h in handles {
            if h.await? { wins += 1; }
        }
        assert_eq!(wins, 1);
        assert_eq!(store.list().await?.len(), 1);
        Ok(())
    }
}

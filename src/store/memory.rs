use crate::core::entity::{Entity, EntityStorage, matches_properties};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory entity storage keyed by entity id
pub struct MemoryStorage<E: Entity> {
    inner: Arc<RwLock<BTreeMap<String, E>>>,
}

impl<E: Entity> MemoryStorage<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Creates a storage pre-populated with `entities`.
    pub fn with_entities(entities: impl IntoIterator<Item = E>) -> Self {
        let map = entities.into_iter().map(|e| (e.id(), e)).collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }
}

impl<E: Entity> Default for MemoryStorage<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for MemoryStorage<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<E: Entity> EntityStorage<E> for MemoryStorage<E> {
    async fn load(&self, id: &str) -> Result<Option<E>> {
        let entities = self.inner.read().await;
        let entity = entities.get(id).cloned();
        debug!(
            entity_type = E::ENTITY_TYPE,
            id,
            found = entity.is_some(),
            "Memory storage load"
        );
        Ok(entity)
    }

    async fn load_by_properties(&self, properties: &[(&str, &str)]) -> Result<Vec<E>> {
        let entities = self.inner.read().await;
        Ok(entities
            .values()
            .filter(|e| matches_properties(*e, properties))
            .cloned()
            .collect())
    }

    async fn load_all(&self) -> Result<Vec<E>> {
        let entities = self.inner.read().await;
        Ok(entities.values().cloned().collect())
    }

    async fn save(&self, entity: &E) -> Result<()> {
        let mut entities = self.inner.write().await;
        debug!(entity_type = E::ENTITY_TYPE, id = %entity.id(), "Memory storage save");
        entities.insert(entity.id(), entity.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Currency;

    #[tokio::test]
    async fn test_memory_storage_load_and_save() {
        let storage = MemoryStorage::<Currency>::new();

        // Initially, storage is empty
        assert!(storage.load("USD").await.unwrap().is_none());

        storage
            .save(&Currency::new("USD", "US Dollar", "840", "$", 2))
            .await
            .unwrap();

        let loaded = storage.load("USD").await.unwrap().unwrap();
        assert_eq!(loaded.name, "US Dollar");

        // Get a non-existent key
        assert!(storage.load("EUR").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_storage_save_replaces() {
        let storage =
            MemoryStorage::with_entities([Currency::new("USD", "US Dollar", "840", "$", 2)]);

        storage
            .save(&Currency::new("USD", "Dollar", "840", "US$", 2))
            .await
            .unwrap();

        let all = storage.load_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].symbol, "US$");
    }

    #[tokio::test]
    async fn test_memory_storage_load_by_properties() {
        let storage = MemoryStorage::with_entities([
            Currency::new("USD", "US Dollar", "840", "$", 2),
            Currency::new("EUR", "Euro", "978", "€", 2),
            Currency::new("JPY", "Yen", "392", "¥", 0),
        ]);

        let found = storage
            .load_by_properties(&[("numericCode", "978")])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].currency_code, "EUR");

        let found = storage
            .load_by_properties(&[("fractionDigits", "2")])
            .await
            .unwrap();
        let codes: Vec<&str> = found.iter().map(|c| c.currency_code.as_str()).collect();
        assert_eq!(codes, vec!["EUR", "USD"]);

        let none = storage
            .load_by_properties(&[("numericCode", "999")])
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::<Currency>::new();
        let other = storage.clone();
        other
            .save(&Currency::new("EUR", "Euro", "978", "€", 2))
            .await
            .unwrap();
        assert!(storage.load("EUR").await.unwrap().is_some());
    }
}

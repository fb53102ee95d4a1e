use crate::core::entity::{Entity, EntityStorage, matches_properties};
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// A fjall keyspace holding one partition per entity type
#[derive(Clone)]
pub struct DiskStore {
    keyspace: Arc<Keyspace>,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create store directory: {}", path.display()))?;
        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        debug!("Opened disk store at {}", path.display());
        Ok(Self {
            keyspace: Arc::new(keyspace),
        })
    }

    /// Opens (creating if missing) the partition backing entity type `E`.
    pub fn storage<E: Entity>(&self) -> Result<DiskStorage<E>> {
        let partition = self
            .keyspace
            .open_partition(E::ENTITY_TYPE, PartitionCreateOptions::default())
            .with_context(|| format!("Failed to open partition {}", E::ENTITY_TYPE))?;
        Ok(DiskStorage {
            keyspace: Arc::clone(&self.keyspace),
            partition,
            _marker: PhantomData,
        })
    }
}

/// Entity storage over a single fjall partition; values are JSON.
pub struct DiskStorage<E: Entity> {
    keyspace: Arc<Keyspace>,
    partition: PartitionHandle,
    _marker: PhantomData<E>,
}

impl<E: Entity> DiskStorage<E> {
    fn decode(bytes: &[u8]) -> Result<E> {
        serde_json::from_slice(bytes)
            .with_context(|| format!("Failed to decode {} entity", E::ENTITY_TYPE))
    }
}

#[async_trait]
impl<E: Entity> EntityStorage<E> for DiskStorage<E> {
    async fn load(&self, id: &str) -> Result<Option<E>> {
        match self.partition.get(id)? {
            Some(value) => {
                debug!(entity_type = E::ENTITY_TYPE, id, "Disk storage HIT");
                Ok(Some(Self::decode(&value)?))
            }
            None => {
                debug!(entity_type = E::ENTITY_TYPE, id, "Disk storage MISS");
                Ok(None)
            }
        }
    }

    async fn load_by_properties(&self, properties: &[(&str, &str)]) -> Result<Vec<E>> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .filter(|e| matches_properties(e, properties))
            .collect())
    }

    async fn load_all(&self) -> Result<Vec<E>> {
        let mut entities = Vec::new();
        for item in self.partition.iter() {
            let (_, value) = item?;
            entities.push(Self::decode(&value)?);
        }
        Ok(entities)
    }

    async fn save(&self, entity: &E) -> Result<()> {
        let id = entity.id();
        self.partition.insert(id.as_bytes(), serde_json::to_vec(entity)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(entity_type = E::ENTITY_TYPE, id, "Disk storage PUT");
        Ok(())
    }
}

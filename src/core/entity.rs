//! Entity abstractions shared by the storage backends and the form/autocomplete layers

use anyhow::Result;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// A stored record addressable by a string id.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Machine name of the entity type, e.g. `commerce_currency`.
    const ENTITY_TYPE: &'static str;

    fn id(&self) -> String;

    fn label(&self) -> String;

    /// Bundles subdivide an entity type. Types without bundles use the type name.
    fn bundle(&self) -> String {
        Self::ENTITY_TYPE.to_string()
    }

    /// Value of a named property, used by property filters.
    fn property(&self, name: &str) -> Option<String>;
}

/// Storage collaborator for a single entity type.
#[async_trait]
pub trait EntityStorage<E: Entity>: Send + Sync {
    async fn load(&self, id: &str) -> Result<Option<E>>;

    /// Loads every entity whose properties equal all of the given values.
    async fn load_by_properties(&self, properties: &[(&str, &str)]) -> Result<Vec<E>>;

    /// Loads all entities ordered by id.
    async fn load_all(&self) -> Result<Vec<E>>;

    async fn save(&self, entity: &E) -> Result<()>;
}

/// Returns true when `entity` matches every property filter.
pub fn matches_properties<E: Entity>(entity: &E, properties: &[(&str, &str)]) -> bool {
    properties
        .iter()
        .all(|(name, value)| entity.property(name).as_deref() == Some(*value))
}

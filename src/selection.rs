//! Storage-backed selection handlers

use crate::core::entity::{Entity, EntityStorage};
use crate::core::selection::{
    MatchOperator, ReferenceResolver, Referenceable, ReferenceableEntities, SelectionSettings,
};
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Selects entities of one type by matching the query against their labels.
pub struct DefaultSelection<E: Entity> {
    storage: Arc<dyn EntityStorage<E>>,
}

impl<E: Entity> DefaultSelection<E> {
    pub fn new(storage: Arc<dyn EntityStorage<E>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<E: Entity> ReferenceResolver for DefaultSelection<E> {
    async fn get_referenceable_entities(
        &self,
        target_type: &str,
        settings: &SelectionSettings,
        query: &str,
        match_operator: MatchOperator,
        limit: usize,
    ) -> Result<ReferenceableEntities> {
        if target_type != E::ENTITY_TYPE {
            bail!(
                "Selection for {} cannot reference {}",
                E::ENTITY_TYPE,
                target_type
            );
        }

        let mut candidates = self.storage.load_all().await?;
        candidates.sort_by_cached_key(|entity| id_sort_key(&entity.id()));
        let mut entities = ReferenceableEntities::default();
        for entity in candidates {
            if limit > 0 && entities.len() >= limit {
                break;
            }
            let bundle = entity.bundle();
            if !settings.target_bundles.is_empty() && !settings.target_bundles.contains(&bundle) {
                continue;
            }
            let label = entity.label();
            if !query.is_empty() && !match_operator.matches(&label, query) {
                continue;
            }
            entities.push(
                &bundle,
                Referenceable {
                    id: entity.id(),
                    label,
                },
            );
        }

        debug!(
            target_type,
            query,
            %match_operator,
            count = entities.len(),
            "Resolved referenceable entities"
        );
        Ok(entities)
    }
}

/// Orders numeric ids by value ("2" before "10"), other ids after them by text.
fn id_sort_key(id: &str) -> (bool, usize, String) {
    let numeric = !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit());
    let trimmed = id.trim_start_matches('0');
    if numeric {
        (false, trimmed.len(), trimmed.to_string())
    } else {
        (true, 0, id.to_string())
    }
}

/// Routes selection requests to the handler registered for each target type.
#[derive(Default, Clone)]
pub struct SelectionManager {
    handlers: HashMap<String, Arc<dyn ReferenceResolver>>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target_type: &str, handler: Arc<dyn ReferenceResolver>) {
        self.handlers.insert(target_type.to_string(), handler);
    }

    /// Registers a [`DefaultSelection`] over `storage` for entity type `E`.
    pub fn with_default<E: Entity>(mut self, storage: Arc<dyn EntityStorage<E>>) -> Self {
        self.register(E::ENTITY_TYPE, Arc::new(DefaultSelection::new(storage)));
        self
    }
}

#[async_trait]
impl ReferenceResolver for SelectionManager {
    async fn get_referenceable_entities(
        &self,
        target_type: &str,
        settings: &SelectionSettings,
        query: &str,
        match_operator: MatchOperator,
        limit: usize,
    ) -> Result<ReferenceableEntities> {
        let Some(handler) = self.handlers.get(target_type) else {
            bail!("No selection handler for target type {}", target_type);
        };
        handler
            .get_referenceable_entities(target_type, settings, query, match_operator, limit)
            .await
    }
}

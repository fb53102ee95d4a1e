//! Entity reference selection: which entities a reference field may point at

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOperator {
    #[default]
    #[serde(rename = "CONTAINS")]
    Contains,
    #[serde(rename = "STARTS_WITH")]
    StartsWith,
    #[serde(rename = "ENDS_WITH")]
    EndsWith,
    #[serde(rename = "=")]
    Equals,
}

impl MatchOperator {
    /// Case-insensitive comparison of `label` against `query`.
    pub fn matches(&self, label: &str, query: &str) -> bool {
        let label = label.to_lowercase();
        let query = query.to_lowercase();
        match self {
            MatchOperator::Contains => label.contains(&query),
            MatchOperator::StartsWith => label.starts_with(&query),
            MatchOperator::EndsWith => label.ends_with(&query),
            MatchOperator::Equals => label == query,
        }
    }
}

impl Display for MatchOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MatchOperator::Contains => "CONTAINS",
                MatchOperator::StartsWith => "STARTS_WITH",
                MatchOperator::EndsWith => "ENDS_WITH",
                MatchOperator::Equals => "=",
            }
        )
    }
}

impl FromStr for MatchOperator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CONTAINS" => Ok(MatchOperator::Contains),
            "STARTS_WITH" => Ok(MatchOperator::StartsWith),
            "ENDS_WITH" => Ok(MatchOperator::EndsWith),
            "=" => Ok(MatchOperator::Equals),
            _ => Err(anyhow::anyhow!("Invalid match operator: {}", s)),
        }
    }
}

/// Settings of the selection handler attached to a reference field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSettings {
    #[serde(default = "default_handler")]
    pub handler: String,
    pub match_operator: Option<MatchOperator>,
    /// Restricts matches to these bundles. Empty means all bundles.
    #[serde(default)]
    pub target_bundles: Vec<String>,
}

fn default_handler() -> String {
    "default".to_string()
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            handler: default_handler(),
            match_operator: None,
            target_bundles: Vec::new(),
        }
    }
}

impl SelectionSettings {
    pub fn match_operator(&self) -> MatchOperator {
        self.match_operator.unwrap_or_default()
    }
}

/// A referenceable entity, as returned by a selection handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referenceable {
    pub id: String,
    pub label: String,
}

/// Referenceable entities grouped by bundle, in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceableEntities {
    pub groups: Vec<(String, Vec<Referenceable>)>,
}

impl ReferenceableEntities {
    /// Appends an entity to its bundle group, creating the group on first sight.
    pub fn push(&mut self, bundle: &str, entity: Referenceable) {
        match self.groups.iter_mut().find(|(b, _)| b == bundle) {
            Some((_, entities)) => entities.push(entity),
            None => self.groups.push((bundle.to_string(), vec![entity])),
        }
    }

    /// All entities across groups, in order.
    pub fn flatten(&self) -> impl Iterator<Item = &Referenceable> {
        self.groups.iter().flat_map(|(_, entities)| entities.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, entities)| entities.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    async fn get_referenceable_entities(
        &self,
        target_type: &str,
        settings: &SelectionSettings,
        query: &str,
        match_operator: MatchOperator,
        limit: usize,
    ) -> Result<ReferenceableEntities>;
}

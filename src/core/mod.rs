//! Core domain types and collaborator abstractions

pub mod config;
pub mod currency;
pub mod entity;
pub mod log;
pub mod price;
pub mod selection;
pub mod variation;

// Re-export main types for cleaner imports
pub use currency::Currency;
pub use entity::{Entity, EntityStorage};
pub use price::{Price, PriceFormatter};
pub use selection::{MatchOperator, ReferenceResolver, ReferenceableEntities, SelectionSettings};
pub use variation::ProductVariation;

//! Semantic concept catalog.

mod catalog;

pub use catalog::{Concept, ConceptCatalog, ConceptGroup, ConceptMapping};

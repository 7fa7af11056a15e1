//! Fiscal concepts a column can be mapped to.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FiscalError, Result};
use crate::types::{PrimitiveType, TypeRegistry, TypeSet};

/// Whether a concept describes a measure or a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptGroup {
    Measure,
    Dimension,
}

/// How a concept maps onto a field of the output package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMapping {
    /// Field name in the output model.
    pub name: String,
    /// Dimension kind in the output model.
    #[serde(rename = "dimensionType")]
    pub dimension_type: String,
}

/// A semantic role a column can be mapped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Dotted path identifier, empty for the "no selection" sentinel.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Primitive types this concept accepts.
    #[serde(rename = "allowedTypes")]
    pub allowed_types: Vec<PrimitiveType>,
    pub group: Option<ConceptGroup>,
    pub required: bool,
    pub map: ConceptMapping,
}

impl Concept {
    /// Create a concept.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        allowed_types: impl IntoIterator<Item = PrimitiveType>,
        group: Option<ConceptGroup>,
        required: bool,
        map_name: impl Into<String>,
        dimension_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            allowed_types: allowed_types.into_iter().collect(),
            group,
            required,
            map: ConceptMapping {
                name: map_name.into(),
                dimension_type: dimension_type.into(),
            },
        }
    }

    /// True for the "no selection" sentinel.
    pub fn is_unselected(&self) -> bool {
        self.id.is_empty()
    }

    /// Check whether any of `types` is accepted by this concept.
    ///
    /// A concept without allowed types never matches.
    pub fn accepts_any(&self, types: &TypeSet) -> bool {
        self.allowed_types.iter().any(|t| types.contains(t))
    }
}

/// Fixed, ordered list of concepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptCatalog {
    concepts: Vec<Concept>,
    all_types: TypeSet,
}

impl ConceptCatalog {
    /// Create a catalog from an explicit concept list.
    pub fn new(concepts: Vec<Concept>) -> Self {
        let all_types = concepts
            .iter()
            .flat_map(|c| c.allowed_types.iter().copied())
            .collect();
        Self {
            concepts,
            all_types,
        }
    }

    /// Build the fiscal data package catalog over the given registry.
    pub fn fiscal(registry: &TypeRegistry) -> Self {
        use ConceptGroup::{Dimension, Measure};
        use PrimitiveType as P;

        let all: Vec<PrimitiveType> = registry.list_types().to_vec();
        let id_types = [P::Integer, P::Number, P::String];
        let keep = |types: &[PrimitiveType]| -> Vec<PrimitiveType> {
            types.iter().copied().filter(|t| registry.contains(*t)).collect()
        };

        let concepts = vec![
            Concept::new("", "", all.clone(), None, false, "other", "other"),
            Concept::new(
                "measures.amount",
                "Amount",
                keep(&[P::Number, P::Integer]),
                Some(Measure),
                true,
                "amount",
                "amount",
            ),
            Concept::new(
                "dimensions.datetime",
                "Date / Time",
                keep(&[P::DateTime, P::Date, P::Time, P::Integer, P::Number]),
                Some(Dimension),
                true,
                "datetime",
                "datetime",
            ),
            Concept::new(
                "dimensions.classification",
                "Classification",
                keep(&id_types),
                Some(Dimension),
                false,
                "classification",
                "classification",
            ),
            Concept::new(
                "dimensions.classification.id",
                "Classification > ID",
                keep(&id_types),
                Some(Dimension),
                false,
                "classification-id",
                "classification",
            ),
            Concept::new(
                "dimensions.classification.label",
                "Classification > Label",
                all.clone(),
                Some(Dimension),
                false,
                "classification-label",
                "classification",
            ),
            Concept::new(
                "dimensions.entity",
                "Entity",
                keep(&id_types),
                Some(Dimension),
                false,
                "entity",
                "entity",
            ),
            Concept::new(
                "dimensions.entity.id",
                "Entity > ID",
                keep(&id_types),
                Some(Dimension),
                false,
                "entity-id",
                "entity",
            ),
            Concept::new(
                "dimensions.entity.label",
                "Entity > Label",
                all,
                Some(Dimension),
                false,
                "entity-label",
                "entity",
            ),
        ];

        let mut catalog = Self::new(concepts);
        catalog.all_types = registry.ids();
        catalog
    }

    /// Parse a catalog from a JSON array of concepts.
    pub fn from_json(json: &str) -> Result<Self> {
        let concepts: Vec<Concept> = serde_json::from_str(json)?;
        Ok(Self::new(concepts))
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| FiscalError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// All concepts in catalog order.
    pub fn list_concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Union of every type id known to the catalog.
    pub fn all_type_ids(&self) -> &TypeSet {
        &self.all_types
    }

    /// Look up a concept by id.
    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.id == id)
    }

    /// Concepts every package must map.
    pub fn required_concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter().filter(|c| c.required)
    }

    /// Concepts whose allowed types intersect `types`, in catalog order.
    pub fn matching(&self, types: &TypeSet) -> Vec<&Concept> {
        self.concepts.iter().filter(|c| c.accepts_any(types)).collect()
    }
}

impl Default for ConceptCatalog {
    fn default() -> Self {
        Self::fiscal(&TypeRegistry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiscal_catalog_order() {
        let catalog = ConceptCatalog::default();
        let ids: Vec<&str> = catalog.list_concepts().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "",
                "measures.amount",
                "dimensions.datetime",
                "dimensions.classification",
                "dimensions.classification.id",
                "dimensions.classification.label",
                "dimensions.entity",
                "dimensions.entity.id",
                "dimensions.entity.label",
            ]
        );
    }

    #[test]
    fn test_sentinel_accepts_all_types() {
        let registry = TypeRegistry::new();
        let catalog = ConceptCatalog::fiscal(&registry);
        let sentinel = catalog.get("").unwrap();
        assert!(sentinel.is_unselected());
        assert_eq!(sentinel.allowed_types, registry.list_types());
        assert_eq!(catalog.all_type_ids(), &registry.ids());
    }

    #[test]
    fn test_allowed_types_are_registered_and_non_empty() {
        let registry = TypeRegistry::new();
        for concept in ConceptCatalog::fiscal(&registry).list_concepts() {
            assert!(!concept.allowed_types.is_empty(), "{}", concept.id);
            assert!(concept.allowed_types.iter().all(|t| registry.contains(*t)));
        }
    }

    #[test]
    fn test_required_concepts() {
        let catalog = ConceptCatalog::default();
        let required: Vec<&str> = catalog.required_concepts().map(|c| c.name.as_str()).collect();
        assert_eq!(required, vec!["Amount", "Date / Time"]);
    }

    #[test]
    fn test_reduced_registry_filters_allowed_types() {
        let registry = TypeRegistry::with_types([PrimitiveType::Integer, PrimitiveType::String]);
        let catalog = ConceptCatalog::fiscal(&registry);
        let amount = catalog.get("measures.amount").unwrap();
        assert_eq!(amount.allowed_types, vec![PrimitiveType::Integer]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{
            "id": "measures.amount",
            "name": "Amount",
            "allowedTypes": ["number", "integer"],
            "group": "measure",
            "required": true,
            "map": {"name": "amount", "dimensionType": "amount"}
        }]"#;
        let catalog = ConceptCatalog::from_json(json).unwrap();
        assert_eq!(catalog.list_concepts().len(), 1);
        assert_eq!(
            catalog.list_concepts()[0].group,
            Some(ConceptGroup::Measure)
        );
        assert!(ConceptCatalog::from_json(r#"[{"id": 1}]"#).is_err());
    }
}

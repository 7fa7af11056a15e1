//! Type and concept compatibility resolution.

use crate::concepts::{Concept, ConceptCatalog};
use crate::types::{PrimitiveType, TypeRegistry, TypeSet};

/// Values to resolve compatible types for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample<'a> {
    /// A single raw value.
    Scalar(&'a str),
    /// Sampled values of one column.
    Column(Vec<&'a str>),
}

impl<'a> From<&'a str> for Sample<'a> {
    fn from(value: &'a str) -> Self {
        Sample::Scalar(value)
    }
}

impl<'a> From<Vec<&'a str>> for Sample<'a> {
    fn from(values: Vec<&'a str>) -> Self {
        Sample::Column(values)
    }
}

impl<'a> From<&'a [String]> for Sample<'a> {
    fn from(values: &'a [String]) -> Self {
        Sample::Column(values.iter().map(String::as_str).collect())
    }
}

/// Types to resolve compatible concepts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSelection {
    Single(PrimitiveType),
    Many(Vec<PrimitiveType>),
}

impl TypeSelection {
    fn to_set(&self) -> TypeSet {
        match self {
            TypeSelection::Single(t) => std::iter::once(*t).collect(),
            TypeSelection::Many(types) => types.iter().copied().collect(),
        }
    }
}

impl From<PrimitiveType> for TypeSelection {
    fn from(t: PrimitiveType) -> Self {
        TypeSelection::Single(t)
    }
}

impl From<Vec<PrimitiveType>> for TypeSelection {
    fn from(types: Vec<PrimitiveType>) -> Self {
        TypeSelection::Many(types)
    }
}

impl From<&[PrimitiveType]> for TypeSelection {
    fn from(types: &[PrimitiveType]) -> Self {
        TypeSelection::Many(types.to_vec())
    }
}

impl From<&TypeSet> for TypeSelection {
    fn from(types: &TypeSet) -> Self {
        TypeSelection::Many(types.iter().copied().collect())
    }
}

/// Resolves which types a sample admits and which concepts those types allow.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityResolver<'r> {
    registry: &'r TypeRegistry,
    catalog: &'r ConceptCatalog,
}

impl<'r> CompatibilityResolver<'r> {
    pub fn new(registry: &'r TypeRegistry, catalog: &'r ConceptCatalog) -> Self {
        Self { registry, catalog }
    }

    /// Types every value of the sample can be cast to, in registry order.
    ///
    /// A column yields the intersection of its values' type sets. An empty
    /// column has no evidence for any type and yields the empty set.
    pub fn compatible_types<'a>(&self, sample: impl Into<Sample<'a>>) -> TypeSet {
        match sample.into() {
            Sample::Scalar(value) => self.registry.matching(value),
            Sample::Column(values) => {
                let mut values = values.into_iter();
                let Some(first) = values.next() else {
                    return TypeSet::new();
                };
                let mut types = self.registry.matching(first);
                for value in values {
                    if types.is_empty() {
                        break;
                    }
                    types.retain(|t| t.test(value));
                }
                types
            }
        }
    }

    /// Catalog concepts accepting at least one of the selected types, in catalog order.
    pub fn compatible_concepts(&self, selection: impl Into<TypeSelection>) -> Vec<&'r Concept> {
        self.catalog.matching(&selection.into().to_set())
    }
}

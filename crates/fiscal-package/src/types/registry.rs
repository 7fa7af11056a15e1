//! Ordered registry of primitive types.

use indexmap::IndexSet;

use super::primitive::PrimitiveType;

/// Insertion-ordered set of primitive types.
pub type TypeSet = IndexSet<PrimitiveType>;

/// The ordered set of primitive types available for inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    types: Vec<PrimitiveType>,
}

impl TypeRegistry {
    /// Create the standard registry containing every primitive type.
    pub fn new() -> Self {
        Self {
            types: PrimitiveType::ALL.to_vec(),
        }
    }

    /// Create a registry restricted to the given types.
    ///
    /// Duplicates are dropped and the canonical type order is restored, so
    /// tie-breaking stays most-specific-first regardless of input order.
    pub fn with_types(types: impl IntoIterator<Item = PrimitiveType>) -> Self {
        let mut types: Vec<PrimitiveType> = types
            .into_iter()
            .collect::<TypeSet>()
            .into_iter()
            .collect();
        types.sort();
        Self { types }
    }

    /// All types in registry order.
    pub fn list_types(&self) -> &[PrimitiveType] {
        &self.types
    }

    /// Union of every registered type id, in registry order.
    pub fn ids(&self) -> TypeSet {
        self.types.iter().copied().collect()
    }

    /// Check whether a type is registered.
    pub fn contains(&self, t: PrimitiveType) -> bool {
        self.types.contains(&t)
    }

    /// Types whose test accepts `value`, in registry order.
    pub fn matching(&self, value: &str) -> TypeSet {
        self.types.iter().copied().filter(|t| t.test(value)).collect()
    }

    /// Most specific registered type among `candidates`.
    pub fn most_specific(&self, candidates: &TypeSet) -> Option<PrimitiveType> {
        self.types.iter().copied().find(|t| candidates.contains(t))
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = TypeRegistry::new();
        let ids: Vec<&str> = registry.list_types().iter().map(|t| t.id()).collect();
        let integer = ids.iter().position(|id| *id == "integer").unwrap();
        let number = ids.iter().position(|id| *id == "number").unwrap();
        let string = ids.iter().position(|id| *id == "string").unwrap();
        assert!(integer < number && number < string);
        assert_eq!(registry.len(), 13);
    }

    #[test]
    fn test_with_types_normalizes_order() {
        let registry = TypeRegistry::with_types([
            PrimitiveType::String,
            PrimitiveType::Integer,
            PrimitiveType::String,
        ]);
        assert_eq!(
            registry.list_types(),
            &[PrimitiveType::Integer, PrimitiveType::String]
        );
    }

    #[test]
    fn test_matching_and_most_specific() {
        let registry = TypeRegistry::new();
        let matches = registry.matching("10");
        assert!(matches.contains(&PrimitiveType::Integer));
        assert!(matches.contains(&PrimitiveType::Number));
        assert!(!matches.contains(&PrimitiveType::Boolean));
        assert_eq!(registry.most_specific(&matches), Some(PrimitiveType::Integer));
        assert_eq!(registry.most_specific(&TypeSet::new()), None);
    }
}

use std::collections::HashMap;

use scl_types::{TemplateKind, TypeDefinition, TypeKey};
use tracing::warn;

use crate::traits::TypeRegistry;

/// In-memory, HashMap-based type registry.
///
/// Built once per document (by the loader or by hand in tests) and read-only
/// afterwards. Definitions are keyed by `(kind, id)`.
#[derive(Clone, Default)]
pub struct InMemoryTypeRegistry {
    definitions: HashMap<TypeKey, TypeDefinition>,
}

impl InMemoryTypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions in document order.
    pub fn from_definitions(definitions: impl IntoIterator<Item = TypeDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.insert(definition);
        }
        registry
    }

    /// Register a definition. Returns `false` if the key was already taken.
    ///
    /// The first definition registered under a key wins; later duplicates
    /// are dropped with a warning.
    pub fn insert(&mut self, definition: TypeDefinition) -> bool {
        let key = definition.key();
        if self.definitions.contains_key(&key) {
            warn!(%key, "duplicate type template; keeping the first definition");
            return false;
        }
        self.definitions.insert(key, definition);
        true
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, definition: TypeDefinition) -> Self {
        self.insert(definition);
        self
    }

    /// Returns `true` if a definition is registered under `key`.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.definitions.contains_key(key)
    }

    /// Look up an `LNodeType` by id.
    pub fn lnode_type(&self, id: &str) -> Option<&TypeDefinition> {
        self.get(&TypeKey::new(TemplateKind::LNodeType, id))
    }

    /// Return a sorted list of all keys in the registry.
    pub fn all_keys(&self) -> Vec<TypeKey> {
        let mut keys: Vec<TypeKey> = self.definitions.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl TypeRegistry for InMemoryTypeRegistry {
    fn get(&self, key: &TypeKey) -> Option<&TypeDefinition> {
        self.definitions.get(key)
    }

    fn len(&self) -> usize {
        self.definitions.len()
    }
}

impl std::fmt::Debug for InMemoryTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTypeRegistry")
            .field("definition_count", &self.definitions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scl_types::TypedMember;

    fn dpc() -> TypeDefinition {
        TypeDefinition::new(TemplateKind::DOType, "DPC_1")
            .with_classification("DPC")
            .with_member(TypedMember::data_attribute("stVal", Some("Enum"), Some("Dbpos")))
            .with_member(TypedMember::data_attribute("q", Some("Quality"), None))
    }

    fn registry() -> InMemoryTypeRegistry {
        InMemoryTypeRegistry::new()
            .with(dpc())
            .with(TypeDefinition::new(TemplateKind::EnumType, "Dbpos"))
    }

    #[test]
    fn empty_registry() {
        let reg = InMemoryTypeRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
        assert!(reg.lnode_type("any").is_none());
    }

    #[test]
    fn get_by_kind_and_id() {
        let reg = registry();
        assert_eq!(reg.len(), 2);
        let def = reg.get(&TypeKey::new(TemplateKind::DOType, "DPC_1")).unwrap();
        assert_eq!(def.classification(), Some("DPC"));
        // Same id in a different namespace is a different key.
        assert!(reg.get(&TypeKey::new(TemplateKind::DAType, "DPC_1")).is_none());
    }

    #[test]
    fn first_definition_wins() {
        let mut reg = InMemoryTypeRegistry::new();
        assert!(reg.insert(dpc()));
        let shadow = TypeDefinition::new(TemplateKind::DOType, "DPC_1").with_classification("SPC");
        assert!(!reg.insert(shadow));
        let key = TypeKey::new(TemplateKind::DOType, "DPC_1");
        assert_eq!(reg.get(&key).unwrap().classification(), Some("DPC"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn resolve_data_object() {
        let reg = registry();
        let member = TypedMember::data_object("Pos", Some("DPC_1"));
        assert_eq!(reg.resolve(&member).unwrap().id(), "DPC_1");
    }

    #[test]
    fn resolve_enum_attribute() {
        let reg = registry();
        let member = TypedMember::data_attribute("stVal", Some("Enum"), Some("Dbpos"));
        let def = reg.resolve(&member).unwrap();
        assert_eq!(def.kind(), TemplateKind::EnumType);
    }

    #[test]
    fn resolve_misses_are_none() {
        let reg = registry();
        // Dangling reference.
        assert!(reg.resolve(&TypedMember::data_object("Pos", Some("DPC_9"))).is_none());
        // No reference at all.
        assert!(reg.resolve(&TypedMember::data_object("Pos", None)).is_none());
        // Basic type: category undefined even though the id exists.
        let basic = TypedMember::data_attribute("stVal", Some("INT32"), Some("Dbpos"));
        assert!(reg.resolve(&basic).is_none());
        // Struct attribute looks in DAType, not DOType.
        let wrong_ns = TypedMember::data_attribute("x", Some("Struct"), Some("DPC_1"));
        assert!(reg.resolve(&wrong_ns).is_none());
    }

    #[test]
    fn all_keys_sorted() {
        let reg = InMemoryTypeRegistry::from_definitions([
            TypeDefinition::new(TemplateKind::EnumType, "b"),
            TypeDefinition::new(TemplateKind::LNodeType, "z"),
            TypeDefinition::new(TemplateKind::LNodeType, "a"),
        ]);
        let keys = reg.all_keys();
        assert_eq!(keys[0], TypeKey::new(TemplateKind::LNodeType, "a"));
        assert_eq!(keys[1], TypeKey::new(TemplateKind::LNodeType, "z"));
        assert_eq!(keys[2], TypeKey::new(TemplateKind::EnumType, "b"));
    }

    #[test]
    fn debug_shows_count() {
        let reg = registry();
        assert_eq!(
            format!("{reg:?}"),
            "InMemoryTypeRegistry { definition_count: 2 }"
        );
    }
}

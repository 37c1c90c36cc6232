use scl_types::{TypeDefinition, TypeKey, TypedMember};

/// Read-only view over the type templates of one document.
///
/// All implementations must satisfy these invariants:
/// - Lookups are O(1) or O(log n) in the number of definitions.
/// - The registry does not change while a comparison is running.
/// - Lookups have no side effects.
pub trait TypeRegistry: Send + Sync {
    /// Look a definition up by its `(kind, id)` key.
    fn get(&self, key: &TypeKey) -> Option<&TypeDefinition>;

    /// Number of definitions held.
    fn len(&self) -> usize;

    /// Returns `true` if the registry holds no definitions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Follow a member's type reference to its definition.
    ///
    /// Returns `None` when the member's category is undefined, when it
    /// carries no type reference, or when nothing is registered under the
    /// derived key. None of these are errors: they mean the member has no
    /// further substructure in this document.
    fn resolve(&self, member: &TypedMember) -> Option<&TypeDefinition> {
        let key = member.template_key()?;
        self.get(&key)
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::member::{MemberClass, TypedMember};

/// The template namespace a type definition lives in.
///
/// SCL keeps a separate id space per template element, so a lookup key is
/// always the pair of kind and id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateKind {
    /// `LNodeType`: the root type of a logical node.
    LNodeType,
    /// `DOType`: structured type of a data object or sub-data object.
    DOType,
    /// `DAType`: structured type of a data attribute.
    DAType,
    /// `EnumType`: enumerated type of a data attribute.
    EnumType,
}

impl TemplateKind {
    /// The SCL element tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::LNodeType => "LNodeType",
            Self::DOType => "DOType",
            Self::DAType => "DAType",
            Self::EnumType => "EnumType",
        }
    }

    /// Parse from an SCL element tag.
    pub fn from_tag(tag: &str) -> Result<Self, TypeError> {
        match tag {
            "LNodeType" => Ok(Self::LNodeType),
            "DOType" => Ok(Self::DOType),
            "DAType" => Ok(Self::DAType),
            "EnumType" => Ok(Self::EnumType),
            other => Err(TypeError::UnknownTemplateTag(other.to_string())),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Registry lookup key: template namespace plus template id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeKey {
    pub kind: TemplateKind,
    pub id: String,
}

impl TypeKey {
    pub fn new(kind: TemplateKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[id=\"{}\"]", self.kind, self.id)
    }
}

/// A shared, read-only type template.
///
/// Many members may reference the same definition; the definition itself
/// only owns its direct child members, in document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeDefinition {
    kind: TemplateKind,
    id: String,
    classification: Option<String>,
    members: Vec<TypedMember>,
}

impl TypeDefinition {
    /// Create an empty definition.
    pub fn new(kind: TemplateKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            classification: None,
            members: Vec::new(),
        }
    }

    /// Attach a classification tag (the `cdc` of a `DOType`).
    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }

    /// Append a child member.
    pub fn with_member(mut self, member: TypedMember) -> Self {
        self.members.push(member);
        self
    }

    /// Append a child member in place.
    pub fn push_member(&mut self, member: TypedMember) {
        self.members.push(member);
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `(kind, id)` key this definition is registered under.
    pub fn key(&self) -> TypeKey {
        TypeKey::new(self.kind, self.id.clone())
    }

    pub fn classification(&self) -> Option<&str> {
        self.classification.as_deref()
    }

    /// All direct child members, in document order.
    pub fn members(&self) -> &[TypedMember] {
        &self.members
    }

    /// Direct data-object children only.
    pub fn data_objects(&self) -> impl Iterator<Item = &TypedMember> {
        self.members
            .iter()
            .filter(|m| m.class() == MemberClass::DataObject)
    }

    /// First direct child whose name equals `name` exactly.
    pub fn member(&self, name: &str) -> Option<&TypedMember> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// First direct data-object child whose name equals `name` exactly.
    pub fn data_object(&self, name: &str) -> Option<&TypedMember> {
        self.data_objects().find(|m| m.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lnode_type() -> TypeDefinition {
        TypeDefinition::new(TemplateKind::LNodeType, "XCBR_1")
            .with_member(TypedMember::data_object("Pos", Some("DPC_1")))
            .with_member(TypedMember::data_attribute("dummy", Some("BOOLEAN"), None))
            .with_member(TypedMember::data_object("Loc", Some("SPS_1")))
    }

    #[test]
    fn tag_roundtrip() {
        for kind in [
            TemplateKind::LNodeType,
            TemplateKind::DOType,
            TemplateKind::DAType,
            TemplateKind::EnumType,
        ] {
            assert_eq!(TemplateKind::from_tag(kind.tag()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        assert_eq!(
            TemplateKind::from_tag("Substation"),
            Err(TypeError::UnknownTemplateTag("Substation".into()))
        );
    }

    #[test]
    fn key_display_reads_like_a_selector() {
        let key = TypeKey::new(TemplateKind::DOType, "DPC_1");
        assert_eq!(key.to_string(), "DOType[id=\"DPC_1\"]");
    }

    #[test]
    fn data_objects_filters_attributes() {
        let def = lnode_type();
        let names: Vec<&str> = def.data_objects().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Pos", "Loc"]);
    }

    #[test]
    fn member_lookup_first_match_wins() {
        let def = TypeDefinition::new(TemplateKind::DOType, "dup")
            .with_member(TypedMember::data_attribute("stVal", Some("Enum"), Some("first")))
            .with_member(TypedMember::data_attribute("stVal", Some("Enum"), Some("second")));
        assert_eq!(def.member("stVal").unwrap().type_ref(), Some("first"));
    }

    #[test]
    fn member_lookup_is_case_sensitive() {
        let def = lnode_type();
        assert!(def.member("pos").is_none());
        assert!(def.data_object("Pos").is_some());
        assert!(def.data_object("dummy").is_none());
    }

    #[test]
    fn key_matches_kind_and_id() {
        let def = lnode_type();
        assert_eq!(def.key(), TypeKey::new(TemplateKind::LNodeType, "XCBR_1"));
        assert!(def.classification().is_none());
    }
}

use serde::Serialize;

use crate::error::TypeError;
use crate::template::{TemplateKind, TypeKey};

/// Which family of member this is. Decides the registry namespace a
/// structured reference points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MemberClass {
    /// `DO` or `SDO`.
    DataObject,
    /// `DA` or `BDA`.
    DataAttribute,
}

impl MemberClass {
    /// Parse from an SCL member element tag.
    pub fn from_tag(tag: &str) -> Result<Self, TypeError> {
        match tag {
            "DO" | "SDO" => Ok(Self::DataObject),
            "DA" | "BDA" => Ok(Self::DataAttribute),
            other => Err(TypeError::UnknownMemberTag(other.to_string())),
        }
    }
}

/// What kind of template a member's type reference points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeCategory {
    Struct,
    Enum,
    /// Basic types and unknown kinds. Never resolved.
    Undefined,
}

impl TypeCategory {
    /// Classify a member from its class and declared `bType`.
    ///
    /// Data objects always reference a structured type. Data attributes
    /// reference one only when `bType` is `Struct` or `Enum`.
    pub fn classify(class: MemberClass, b_type: Option<&str>) -> Self {
        match (class, b_type) {
            (MemberClass::DataObject, _) => Self::Struct,
            (MemberClass::DataAttribute, Some("Struct")) => Self::Struct,
            (MemberClass::DataAttribute, Some("Enum")) => Self::Enum,
            (MemberClass::DataAttribute, _) => Self::Undefined,
        }
    }
}

/// A named child of a type definition that may reference another template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypedMember {
    name: String,
    class: MemberClass,
    category: TypeCategory,
    type_ref: Option<String>,
}

impl TypedMember {
    /// Create a member, classifying it once from `b_type`.
    pub fn new(
        name: impl Into<String>,
        class: MemberClass,
        b_type: Option<&str>,
        type_ref: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            category: TypeCategory::classify(class, b_type),
            type_ref: type_ref.map(str::to_string),
        }
    }

    /// A `DO`/`SDO` member.
    pub fn data_object(name: impl Into<String>, type_ref: Option<&str>) -> Self {
        Self::new(name, MemberClass::DataObject, None, type_ref)
    }

    /// A `DA`/`BDA` member.
    pub fn data_attribute(
        name: impl Into<String>,
        b_type: Option<&str>,
        type_ref: Option<&str>,
    ) -> Self {
        Self::new(name, MemberClass::DataAttribute, b_type, type_ref)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> MemberClass {
        self.class
    }

    pub fn category(&self) -> TypeCategory {
        self.category
    }

    pub fn type_ref(&self) -> Option<&str> {
        self.type_ref.as_deref()
    }

    /// The registry key this member points at, if it can point anywhere.
    ///
    /// Returns `None` for undefined categories and for members without a
    /// type reference.
    pub fn template_key(&self) -> Option<TypeKey> {
        let kind = match (self.class, self.category) {
            (_, TypeCategory::Undefined) => return None,
            (MemberClass::DataObject, TypeCategory::Struct) => TemplateKind::DOType,
            (MemberClass::DataAttribute, TypeCategory::Struct) => TemplateKind::DAType,
            (_, TypeCategory::Enum) => TemplateKind::EnumType,
        };
        let id = self.type_ref.as_deref()?;
        Some(TypeKey::new(kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_tags() {
        assert_eq!(MemberClass::from_tag("DO").unwrap(), MemberClass::DataObject);
        assert_eq!(MemberClass::from_tag("SDO").unwrap(), MemberClass::DataObject);
        assert_eq!(MemberClass::from_tag("DA").unwrap(), MemberClass::DataAttribute);
        assert_eq!(MemberClass::from_tag("BDA").unwrap(), MemberClass::DataAttribute);
        assert!(matches!(
            MemberClass::from_tag("EnumVal"),
            Err(TypeError::UnknownMemberTag(t)) if t == "EnumVal"
        ));
    }

    #[test]
    fn data_objects_are_always_struct() {
        assert_eq!(
            TypeCategory::classify(MemberClass::DataObject, None),
            TypeCategory::Struct
        );
        assert_eq!(
            TypeCategory::classify(MemberClass::DataObject, Some("Enum")),
            TypeCategory::Struct
        );
    }

    #[test]
    fn attributes_follow_btype() {
        let class = MemberClass::DataAttribute;
        assert_eq!(TypeCategory::classify(class, Some("Struct")), TypeCategory::Struct);
        assert_eq!(TypeCategory::classify(class, Some("Enum")), TypeCategory::Enum);
        assert_eq!(TypeCategory::classify(class, Some("BOOLEAN")), TypeCategory::Undefined);
        assert_eq!(TypeCategory::classify(class, None), TypeCategory::Undefined);
        // bType comparison is exact.
        assert_eq!(TypeCategory::classify(class, Some("struct")), TypeCategory::Undefined);
    }

    #[test]
    fn template_key_per_class() {
        let dobj = TypedMember::data_object("Pos", Some("DPC_1"));
        assert_eq!(dobj.template_key(), Some(TypeKey::new(TemplateKind::DOType, "DPC_1")));

        let st = TypedMember::data_attribute("origin", Some("Struct"), Some("Originator_1"));
        assert_eq!(
            st.template_key(),
            Some(TypeKey::new(TemplateKind::DAType, "Originator_1"))
        );

        let en = TypedMember::data_attribute("ctlModel", Some("Enum"), Some("CtlModels"));
        assert_eq!(
            en.template_key(),
            Some(TypeKey::new(TemplateKind::EnumType, "CtlModels"))
        );
    }

    #[test]
    fn no_key_without_reference_or_category() {
        assert!(TypedMember::data_object("Pos", None).template_key().is_none());
        assert!(TypedMember::data_attribute("q", Some("Quality"), Some("ignored"))
            .template_key()
            .is_none());
    }

    #[test]
    fn serializes_classification() {
        let member = TypedMember::data_attribute("stVal", Some("Enum"), Some("Dbpos"));
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["category"], "Enum");
        assert_eq!(json["class"], "DataAttribute");
        assert_eq!(json["type_ref"], "Dbpos");
    }
}

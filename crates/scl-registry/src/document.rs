//! A loaded SCL document: type templates plus the logical-node references
//! used to pick which two `LNodeType`s to compare.

use serde::Serialize;

use scl_types::TypeDefinition;

use crate::memory::InMemoryTypeRegistry;

/// A substation-side `LNode`: the logical node a function specifies, with
/// an optional link to the IED logical node implementing it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LNodeRef {
    pub ied_name: Option<String>,
    pub ld_inst: Option<String>,
    pub prefix: Option<String>,
    pub ln_class: String,
    pub ln_inst: Option<String>,
    /// Id of the specified `LNodeType`.
    pub ln_type: Option<String>,
}

impl LNodeRef {
    /// `false` only for the explicit `iedName="None"` placeholder. An LNode
    /// with no `iedName` at all counts as linked and resolves to nothing.
    pub fn is_linked(&self) -> bool {
        self.ied_name.as_deref() != Some("None")
    }

    /// Short display title, e.g. `CB_XCBR1`.
    pub fn title(&self) -> String {
        format!(
            "{}{}{}",
            self.prefix.as_deref().unwrap_or(""),
            self.ln_class,
            self.ln_inst.as_deref().unwrap_or("")
        )
    }

    /// Reference path into the IED, e.g. `IED1/CTRL/CBXCBR1`.
    pub fn target_path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.ied_name.as_deref().unwrap_or(""),
            self.ld_inst.as_deref().unwrap_or(""),
            self.title()
        )
    }
}

/// An `LN0` or `LN` inside an IED's logical device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LnInstance {
    pub ied_name: String,
    pub ld_inst: String,
    pub prefix: Option<String>,
    pub ln_class: String,
    pub inst: Option<String>,
    /// Id of the instantiated `LNodeType`.
    pub ln_type: Option<String>,
}

/// The parts of an SCL document the comparison needs.
#[derive(Debug, Default)]
pub struct SclDocument {
    registry: InMemoryTypeRegistry,
    lnodes: Vec<LNodeRef>,
    lns: Vec<LnInstance>,
}

impl SclDocument {
    pub fn new(
        registry: InMemoryTypeRegistry,
        lnodes: Vec<LNodeRef>,
        lns: Vec<LnInstance>,
    ) -> Self {
        Self {
            registry,
            lnodes,
            lns,
        }
    }

    pub fn registry(&self) -> &InMemoryTypeRegistry {
        &self.registry
    }

    /// Substation `LNode`s in document order.
    pub fn lnodes(&self) -> &[LNodeRef] {
        &self.lnodes
    }

    /// IED logical nodes in document order.
    pub fn logical_nodes(&self) -> &[LnInstance] {
        &self.lns
    }

    /// The `LNodeType` with the given id.
    pub fn lnode_type(&self, id: &str) -> Option<&TypeDefinition> {
        self.registry.lnode_type(id)
    }

    /// The `LNodeType` an `LNode` specifies.
    pub fn specified_type(&self, lnode: &LNodeRef) -> Option<&TypeDefinition> {
        self.lnode_type(lnode.ln_type.as_deref()?)
    }

    /// The IED logical node an `LNode` is linked to.
    ///
    /// IED name, LDevice inst and lnClass must match exactly; prefix and
    /// inst match with an absent value treated as `""`.
    pub fn instantiated_ln(&self, lnode: &LNodeRef) -> Option<&LnInstance> {
        let ied_name = lnode.ied_name.as_deref()?;
        let ld_inst = lnode.ld_inst.as_deref()?;
        self.lns.iter().find(|ln| {
            ln.ied_name == ied_name
                && ln.ld_inst == ld_inst
                && ln.ln_class == lnode.ln_class
                && ln.prefix.as_deref().unwrap_or("") == lnode.prefix.as_deref().unwrap_or("")
                && ln.inst.as_deref().unwrap_or("") == lnode.ln_inst.as_deref().unwrap_or("")
        })
    }

    /// The `LNodeType` the linked IED logical node instantiates.
    pub fn instantiated_type(&self, lnode: &LNodeRef) -> Option<&TypeDefinition> {
        let ln = self.instantiated_ln(lnode)?;
        self.lnode_type(ln.ln_type.as_deref()?)
    }
}

//! Batch comparison of every substation `LNode` in a document.
//!
//! For a linked `LNode` the specified `LNodeType` (its own `lnType`) is
//! compared against the type of the IED logical node it points at. Unlinked
//! `LNode`s are listed but not compared.

use serde::Serialize;
use tracing::debug;

use scl_registry::{LNodeRef, SclDocument};

use crate::config::DiffConfig;
use crate::error::CompareResult;
use crate::type_diff::{DiffResult, NodeStatus, TypeDiffer};

/// One linked `LNode` and the outcome of comparing its types.
#[derive(Clone, Debug, Serialize)]
pub struct LNodeComparison {
    pub lnode: LNodeRef,
    /// Id of the specified `LNodeType`, if it exists in the document.
    pub specified_type: Option<String>,
    /// Id of the instantiated `LNodeType`, if the link and the type resolve.
    pub instantiated_type: Option<String>,
    /// `None` when either type could not be located.
    pub diff: Option<DiffResult>,
}

impl LNodeComparison {
    /// `Ok` only when both types were found and do not differ.
    pub fn status(&self) -> NodeStatus {
        match &self.diff {
            Some(diff) if !diff.is_different => NodeStatus::Ok,
            _ => NodeStatus::Warning,
        }
    }
}

/// All `LNode`s of a document, split by link state.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LNodeReport {
    pub linked: Vec<LNodeComparison>,
    pub unlinked: Vec<LNodeRef>,
}

impl LNodeReport {
    /// Number of linked `LNode`s that are not `Ok`.
    pub fn mismatches(&self) -> usize {
        self.linked
            .iter()
            .filter(|c| c.status() != NodeStatus::Ok)
            .count()
    }

    /// Returns `true` if every linked `LNode` matches its implementation.
    pub fn all_match(&self) -> bool {
        self.mismatches() == 0
    }
}

/// Compare the specified and instantiated types of every `LNode`.
pub fn compare_lnodes(doc: &SclDocument, config: &DiffConfig) -> CompareResult<LNodeReport> {
    let differ = TypeDiffer::new(doc.registry(), doc.registry()).with_config(config.clone());
    let mut report = LNodeReport::default();

    for lnode in doc.lnodes() {
        if !lnode.is_linked() {
            report.unlinked.push(lnode.clone());
            continue;
        }

        let specified = doc.specified_type(lnode);
        let instantiated = doc.instantiated_type(lnode);
        let diff = match (specified, instantiated) {
            (Some(ours), Some(theirs)) => Some(differ.compare_types(ours, theirs)?),
            _ => {
                debug!(lnode = %lnode.title(), "LNode types not found; skipping comparison");
                None
            }
        };

        report.linked.push(LNodeComparison {
            lnode: lnode.clone(),
            specified_type: specified.map(|d| d.id().to_string()),
            instantiated_type: instantiated.map(|d| d.id().to_string()),
            diff,
        });
    }

    debug!(
        linked = report.linked.len(),
        unlinked = report.unlinked.len(),
        mismatches = report.mismatches(),
        "LNode report built"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scl_registry::{InMemoryTypeRegistry, LnInstance};
    use scl_types::{TemplateKind, TypeDefinition, TypedMember};

    fn lnode(ied: &str, inst: &str, ln_type: &str) -> LNodeRef {
        LNodeRef {
            ied_name: Some(ied.into()),
            ld_inst: Some("LD1".into()),
            prefix: None,
            ln_class: "XCBR".into(),
            ln_inst: Some(inst.into()),
            ln_type: Some(ln_type.into()),
        }
    }

    fn ln(inst: &str, ln_type: &str) -> LnInstance {
        LnInstance {
            ied_name: "IED1".into(),
            ld_inst: "LD1".into(),
            prefix: None,
            ln_class: "XCBR".into(),
            inst: Some(inst.into()),
            ln_type: Some(ln_type.into()),
        }
    }

    fn document() -> SclDocument {
        let registry = InMemoryTypeRegistry::new()
            .with(
                TypeDefinition::new(TemplateKind::LNodeType, "spec")
                    .with_member(TypedMember::data_object("Pos", None))
                    .with_member(TypedMember::data_object("Loc", None)),
            )
            .with(
                TypeDefinition::new(TemplateKind::LNodeType, "full")
                    .with_member(TypedMember::data_object("Pos", None))
                    .with_member(TypedMember::data_object("Loc", None)),
            )
            .with(
                TypeDefinition::new(TemplateKind::LNodeType, "partial")
                    .with_member(TypedMember::data_object("Pos", None)),
            );
        SclDocument::new(
            registry,
            vec![
                lnode("IED1", "1", "spec"),
                lnode("IED1", "2", "spec"),
                lnode("None", "3", "spec"),
                lnode("IED1", "9", "spec"),
            ],
            vec![ln("1", "full"), ln("2", "partial")],
        )
    }

    #[test]
    fn linked_lnodes_are_compared() {
        let report = compare_lnodes(&document(), &DiffConfig::default()).unwrap();
        assert_eq!(report.linked.len(), 3);
        assert_eq!(report.unlinked.len(), 1);
        assert_eq!(report.unlinked[0].ln_inst.as_deref(), Some("3"));

        let matching = &report.linked[0];
        assert_eq!(matching.instantiated_type.as_deref(), Some("full"));
        assert_eq!(matching.status(), NodeStatus::Ok);

        let partial = &report.linked[1];
        assert_eq!(partial.status(), NodeStatus::Warning);
        let diff = partial.diff.as_ref().unwrap();
        assert!(diff.child("Loc").unwrap().is_missing());
    }

    #[test]
    fn dangling_link_has_no_diff() {
        let report = compare_lnodes(&document(), &DiffConfig::default()).unwrap();
        let dangling = &report.linked[2];
        assert_eq!(dangling.specified_type.as_deref(), Some("spec"));
        assert!(dangling.instantiated_type.is_none());
        assert!(dangling.diff.is_none());
        assert_eq!(dangling.status(), NodeStatus::Warning);
        assert_eq!(report.mismatches(), 2);
        assert!(!report.all_match());
    }

    #[test]
    fn lnode_without_ied_name_is_a_mismatch() {
        let base = document();
        let mut orphan = lnode("IED1", "1", "spec");
        orphan.ied_name = None;
        let doc = SclDocument::new(
            base.registry().clone(),
            vec![orphan],
            base.logical_nodes().to_vec(),
        );
        let report = compare_lnodes(&doc, &DiffConfig::default()).unwrap();
        assert!(report.unlinked.is_empty());
        assert_eq!(report.linked.len(), 1);
        assert!(report.linked[0].diff.is_none());
        assert_eq!(report.linked[0].status(), NodeStatus::Warning);
    }

    #[test]
    fn empty_document() {
        let report = compare_lnodes(&SclDocument::default(), &DiffConfig::default()).unwrap();
        assert!(report.linked.is_empty());
        assert!(report.all_match());
    }
}

//! Type-level diff: compare two logical-node types member by member.
//!
//! Top-level data objects are matched by name; each matched pair has its
//! type reference resolved on both sides and the resolved templates are
//! compared recursively. The output mirrors the ours-side tree in document
//! order and always contains every ours member, different or not.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use scl_registry::TypeRegistry;
use scl_types::{TypeDefinition, TypeKey, TypedMember};

use crate::config::DiffConfig;
use crate::error::{CompareResult, DiffError};

/// Why a node is different.
///
/// A node can also be different with no kind at all: that happens when only
/// one side's type reference resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffKind {
    /// No member with this name exists on the theirs side.
    Missing,
    /// The counterpart exists but some descendant differs.
    NestedDifference,
}

/// Display status of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NodeStatus {
    /// Not different.
    Ok,
    /// Counterpart missing.
    Unknown,
    /// Any other difference.
    Warning,
}

/// One compared member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffNode {
    pub name: String,
    /// Classification (`cdc`) of the ours-side type; top-level nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default)]
    pub children: Vec<DiffNode>,
    pub is_different: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_kind: Option<DiffKind>,
}

impl DiffNode {
    /// A leaf that matches its counterpart.
    pub fn same(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classification: None,
            children: Vec::new(),
            is_different: false,
            diff_kind: None,
        }
    }

    /// A leaf whose counterpart is missing.
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            is_different: true,
            diff_kind: Some(DiffKind::Missing),
            ..Self::same(name)
        }
    }

    /// Returns `true` if the counterpart was not found by name.
    pub fn is_missing(&self) -> bool {
        self.diff_kind == Some(DiffKind::Missing)
    }

    pub fn status(&self) -> NodeStatus {
        match (self.is_different, self.diff_kind) {
            (false, _) => NodeStatus::Ok,
            (true, Some(DiffKind::Missing)) => NodeStatus::Unknown,
            (true, _) => NodeStatus::Warning,
        }
    }

    /// Direct child by name.
    pub fn child(&self, name: &str) -> Option<&DiffNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Descendant by a path of names, starting below this node.
    pub fn find(&self, path: &[&str]) -> Option<&DiffNode> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self.child(head)?.find(rest),
        }
    }

    /// Number of different nodes in this subtree, this node included.
    pub fn differences(&self) -> usize {
        usize::from(self.is_different)
            + self.children.iter().map(DiffNode::differences).sum::<usize>()
    }
}

/// The result of comparing two logical-node types.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// One node per ours-side data object, in document order.
    pub children: Vec<DiffNode>,
    /// `true` if any node at any depth is different.
    pub is_different: bool,
}

impl DiffResult {
    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the ours side had no data objects.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Top-level node by name.
    pub fn child(&self, name: &str) -> Option<&DiffNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Node by a path of names, e.g. `["Pos", "origin", "orCat"]`.
    pub fn find(&self, path: &[&str]) -> Option<&DiffNode> {
        let (head, rest) = path.split_first()?;
        self.child(head)?.find(rest)
    }

    /// Total number of different nodes at any depth.
    pub fn differences(&self) -> usize {
        self.children.iter().map(DiffNode::differences).sum()
    }

    /// Pretty-printed JSON dump of the whole tree.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Which side of a comparison something belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Side {
    Ours,
    Theirs,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ours => write!(f, "ours"),
            Self::Theirs => write!(f, "theirs"),
        }
    }
}

/// Templates entered on the current recursion path, per side.
#[derive(Default)]
struct TypePath {
    ours: Vec<TypeKey>,
    theirs: Vec<TypeKey>,
}

impl TypePath {
    fn depth(&self) -> usize {
        self.ours.len()
    }

    fn enter(&mut self, ours: TypeKey, theirs: TypeKey) -> CompareResult<()> {
        if self.ours.contains(&ours) {
            return Err(DiffError::CyclicTypeGraph {
                side: Side::Ours,
                key: ours,
            });
        }
        if self.theirs.contains(&theirs) {
            return Err(DiffError::CyclicTypeGraph {
                side: Side::Theirs,
                key: theirs,
            });
        }
        self.ours.push(ours);
        self.theirs.push(theirs);
        Ok(())
    }

    fn leave(&mut self) {
        self.ours.pop();
        self.theirs.pop();
    }
}

/// Compares type trees, resolving each side through its own registry.
pub struct TypeDiffer<'a> {
    ours: &'a dyn TypeRegistry,
    theirs: &'a dyn TypeRegistry,
    config: DiffConfig,
}

impl<'a> TypeDiffer<'a> {
    /// A differ with the default configuration.
    pub fn new(ours: &'a dyn TypeRegistry, theirs: &'a dyn TypeRegistry) -> Self {
        Self {
            ours,
            theirs,
            config: DiffConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DiffConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare two logical-node types.
    ///
    /// Every data object of `ours_root` yields one node, in document order.
    /// Data objects only present in `theirs_root` are not reported.
    pub fn compare_types(
        &self,
        ours_root: &TypeDefinition,
        theirs_root: &TypeDefinition,
    ) -> CompareResult<DiffResult> {
        let mut path = TypePath::default();
        path.enter(ours_root.key(), theirs_root.key())?;

        let mut result = DiffResult::default();
        for ours_do in ours_root.data_objects() {
            let mut node = match theirs_root.data_object(ours_do.name()) {
                Some(theirs_do) => self.compare_on_path(ours_do, theirs_do, &mut path)?,
                None => {
                    trace!(member = ours_do.name(), "data object missing on theirs side");
                    DiffNode::missing(ours_do.name())
                }
            };
            node.classification = self
                .ours
                .resolve(ours_do)
                .and_then(TypeDefinition::classification)
                .map(str::to_string);

            result.is_different |= node.is_different;
            result.children.push(node);
        }

        debug!(
            ours = ours_root.id(),
            theirs = theirs_root.id(),
            data_objects = result.len(),
            differences = result.differences(),
            "logical-node types compared"
        );
        Ok(result)
    }

    /// Compare two members and everything below them.
    pub fn compare_member(
        &self,
        ours: &TypedMember,
        theirs: &TypedMember,
    ) -> CompareResult<DiffNode> {
        self.compare_on_path(ours, theirs, &mut TypePath::default())
    }

    fn compare_on_path(
        &self,
        ours: &TypedMember,
        theirs: &TypedMember,
        path: &mut TypePath,
    ) -> CompareResult<DiffNode> {
        let mut node = DiffNode::same(ours.name());

        let (ours_def, theirs_def) = match (self.ours.resolve(ours), self.theirs.resolve(theirs)) {
            (None, None) => return Ok(node),
            (Some(_), None) | (None, Some(_)) => {
                // Different, but deliberately without a kind.
                trace!(member = ours.name(), "type resolves on one side only");
                node.is_different = true;
                return Ok(node);
            }
            (Some(o), Some(t)) => (o, t),
        };

        if path.depth() >= self.config.max_depth {
            return Err(DiffError::DepthExceeded {
                max_depth: self.config.max_depth,
                member: ours.name().to_string(),
            });
        }
        path.enter(ours_def.key(), theirs_def.key())?;

        for ours_child in ours_def.members() {
            let child = match theirs_def.member(ours_child.name()) {
                Some(theirs_child) => self.compare_on_path(ours_child, theirs_child, path)?,
                None => DiffNode::missing(ours_child.name()),
            };
            if child.is_different {
                node.is_different = true;
                node.diff_kind = Some(DiffKind::NestedDifference);
            }
            node.children.push(child);
        }

        path.leave();
        Ok(node)
    }
}

/// Compare two logical-node types from the same document.
pub fn compare_types(
    registry: &dyn TypeRegistry,
    ours_root: &TypeDefinition,
    theirs_root: &TypeDefinition,
) -> CompareResult<DiffResult> {
    TypeDiffer::new(registry, registry).compare_types(ours_root, theirs_root)
}

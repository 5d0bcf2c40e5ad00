//! Node types of the document model

use smol_str::SmolStr;
use std::path::PathBuf;

/// Index of a node inside its [`Document`](super::Document) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The arena index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a node is, together with its kind-specific payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A feature file on disk
    File {
        /// Path the file was loaded from
        path: PathBuf,
    },
    /// `Feature:` block
    Feature {
        /// Feature name
        name: SmolStr,
    },
    /// `Rule:` block grouping scenarios
    Rule {
        /// Rule name
        name: SmolStr,
    },
    /// `Background:` block
    Background {
        /// Background name (usually empty)
        name: SmolStr,
    },
    /// `Scenario:` / `Example:`
    Scenario {
        /// Scenario name
        name: SmolStr,
    },
    /// `Scenario Outline:` / `Scenario Template:`
    Outline {
        /// Templated name, may contain `<placeholder>` tokens
        name: SmolStr,
    },
    /// `Examples:` table attached to an outline
    Examples {
        /// Examples name (usually empty)
        name: SmolStr,
    },
    /// A table row
    Row,
    /// A table cell
    Cell {
        /// Cell text with escapes decoded
        value: SmolStr,
    },
}

impl NodeKind {
    /// The payload-free tag for this kind
    #[must_use]
    pub const fn tag(&self) -> NodeTag {
        match self {
            NodeKind::File { .. } => NodeTag::File,
            NodeKind::Feature { .. } => NodeTag::Feature,
            NodeKind::Rule { .. } => NodeTag::Rule,
            NodeKind::Background { .. } => NodeTag::Background,
            NodeKind::Scenario { .. } => NodeTag::Scenario,
            NodeKind::Outline { .. } => NodeTag::Outline,
            NodeKind::Examples { .. } => NodeTag::Examples,
            NodeKind::Row => NodeTag::Row,
            NodeKind::Cell { .. } => NodeTag::Cell,
        }
    }

    /// The name of named nodes
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeKind::Feature { name }
            | NodeKind::Rule { name }
            | NodeKind::Background { name }
            | NodeKind::Scenario { name }
            | NodeKind::Outline { name }
            | NodeKind::Examples { name } => Some(name),
            NodeKind::File { .. } | NodeKind::Row | NodeKind::Cell { .. } => None,
        }
    }
}

/// Payload-free node kind, used for ancestor and child lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    /// File node
    File,
    /// Feature node
    Feature,
    /// Rule node
    Rule,
    /// Background node
    Background,
    /// Scenario node
    Scenario,
    /// Scenario outline node
    Outline,
    /// Examples table node
    Examples,
    /// Table row node
    Row,
    /// Table cell node
    Cell,
}

impl std::fmt::Display for NodeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeTag::File => "file",
            NodeTag::Feature => "feature",
            NodeTag::Rule => "rule",
            NodeTag::Background => "background",
            NodeTag::Scenario => "scenario",
            NodeTag::Outline => "scenario outline",
            NodeTag::Examples => "examples",
            NodeTag::Row => "row",
            NodeTag::Cell => "cell",
        };
        write!(f, "{name}")
    }
}

/// A node stored in the document arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Kind and payload
    pub kind: NodeKind,
    /// 1-based source line
    pub line: usize,
    /// Parent index (None for the root)
    pub(crate) parent: Option<NodeId>,
    /// Ordered child indices
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, line: usize, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            line,
            parent,
            children: Vec::new(),
        }
    }
}

//! Document model for parsed feature files
//!
//! A [`Document`] is an immutable arena tree. Nodes own their children by
//! index and point back at their parent by index, so ancestor lookups never
//! need shared ownership. Navigation goes through the [`NodeRef`] cursor:
//!
//! ```text
//! File
//! └── Feature
//!     ├── Scenario
//!     ├── Outline
//!     │   └── Examples
//!     │       └── Row
//!     │           └── Cell
//!     └── Rule
//!         └── Scenario
//! ```

mod builder;
mod node;

pub use builder::DocumentBuilder;
pub use node::{Node, NodeId, NodeKind, NodeTag};

use std::path::Path;

/// An immutable tree of nodes built by the parser or a [`DocumentBuilder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// The root node
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: NodeId(0),
        }
    }

    /// Get a node by id
    ///
    /// Returns `None` if the id does not belong to this document.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { doc: self, id })
    }

    /// Number of nodes in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds only its root
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Path of the file this document was parsed from, if the root is a file
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.root().file_path()
    }

    /// Visit every node in pre-order (parents before children, children in
    /// source order)
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            doc: self,
            stack: vec![NodeId(0)],
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// Pre-order iterator over a [`Document`]
pub struct Walk<'doc> {
    doc: &'doc Document,
    stack: Vec<NodeId>,
}

impl<'doc> Iterator for Walk<'doc> {
    type Item = NodeRef<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.node(id).children.iter().rev().copied());
        Some(NodeRef { doc: self.doc, id })
    }
}

/// A borrowed cursor onto one node of a [`Document`]
#[derive(Clone, Copy)]
pub struct NodeRef<'doc> {
    doc: &'doc Document,
    id: NodeId,
}

impl<'doc> NodeRef<'doc> {
    /// Node id
    #[must_use]
    pub const fn id(self) -> NodeId {
        self.id
    }

    /// The document this node belongs to
    #[must_use]
    pub const fn document(self) -> &'doc Document {
        self.doc
    }

    /// Kind and payload
    #[must_use]
    pub fn kind(self) -> &'doc NodeKind {
        &self.doc.node(self.id).kind
    }

    /// Payload-free kind
    #[must_use]
    pub fn tag(self) -> NodeTag {
        self.kind().tag()
    }

    /// Check the node's kind
    #[must_use]
    pub fn is(self, tag: NodeTag) -> bool {
        self.tag() == tag
    }

    /// 1-based source line
    #[must_use]
    pub fn line(self) -> usize {
        self.doc.node(self.id).line
    }

    /// Name of named nodes (features, rules, scenarios, outlines, ...)
    #[must_use]
    pub fn name(self) -> Option<&'doc str> {
        self.kind().name()
    }

    /// Value of a cell node
    #[must_use]
    pub fn value(self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Cell { value } => Some(value),
            _ => None,
        }
    }

    /// Path of a file node
    #[must_use]
    pub fn file_path(self) -> Option<&'doc Path> {
        match self.kind() {
            NodeKind::File { path } => Some(path),
            _ => None,
        }
    }

    /// Parent node
    #[must_use]
    pub fn parent(self) -> Option<NodeRef<'doc>> {
        self.doc.node(self.id).parent.map(|id| NodeRef { doc: self.doc, id })
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'doc>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Nearest ancestor of the given kind
    #[must_use]
    pub fn ancestor(self, tag: NodeTag) -> Option<NodeRef<'doc>> {
        self.ancestors().find(|node| node.is(tag))
    }

    /// The file node this node belongs to
    #[must_use]
    pub fn file(self) -> Option<NodeRef<'doc>> {
        if self.is(NodeTag::File) {
            return Some(self);
        }
        self.ancestor(NodeTag::File)
    }

    /// Ordered children
    pub fn children(self) -> impl Iterator<Item = NodeRef<'doc>> {
        let doc = self.doc;
        doc.node(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    /// Ordered children of the given kind
    pub fn children_of(self, tag: NodeTag) -> impl Iterator<Item = NodeRef<'doc>> {
        self.children().filter(move |child| child.is(tag))
    }

    /// Cell values of a row node, in column order
    #[must_use]
    pub fn cells(self) -> Vec<&'doc str> {
        self.children_of(NodeTag::Cell)
            .filter_map(NodeRef::value)
            .collect()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", self.kind())
            .field("line", &self.line())
            .finish()
    }
}

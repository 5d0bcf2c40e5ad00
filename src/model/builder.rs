//! Incremental construction of documents

use super::node::{Node, NodeId, NodeKind};
use super::Document;

/// Builds a [`Document`] one node at a time
///
/// Nodes are appended under an existing parent and keep insertion order
/// among their siblings. The first node is the root.
#[derive(Debug)]
pub struct DocumentBuilder {
    nodes: Vec<Node>,
}

impl DocumentBuilder {
    /// Start a tree with the given root
    #[must_use]
    pub fn new(root: NodeKind, line: usize) -> Self {
        Self {
            nodes: vec![Node::new(root, line, None)],
        }
    }

    /// Id of the root node
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a node as the last child of `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not produced by this builder.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind, line: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, line, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append a table row with one cell per value
    pub fn push_row<S: AsRef<str>>(&mut self, parent: NodeId, cells: &[S], line: usize) -> NodeId {
        let row = self.push(parent, NodeKind::Row, line);
        for cell in cells {
            self.push(
                row,
                NodeKind::Cell {
                    value: cell.as_ref().into(),
                },
                line,
            );
        }
        row
    }

    /// Kind of an already pushed node
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|node| &node.kind)
    }

    /// Finish the tree
    #[must_use]
    pub fn build(self) -> Document {
        Document { nodes: self.nodes }
    }
}

//! Name resolution for scenarios and outline templates

use crate::model::{NodeKind, NodeRef, NodeTag};

/// Resolve the concrete scenario names a node stands for
///
/// A scenario stands for its own name. An outline stands for one name per
/// data row of each of its examples tables, in table order and then row
/// order. Anything else resolves to nothing.
#[must_use]
pub fn resolve(node: NodeRef<'_>) -> Vec<String> {
    match node.kind() {
        NodeKind::Scenario { name } => vec![name.to_string()],
        NodeKind::Outline { name } => expand_outline(name, node),
        _ => Vec::new(),
    }
}

/// Expand an outline's templated name against its examples tables
///
/// The first row of each table is the header. Tables without data rows add
/// no names.
fn expand_outline(template: &str, outline: NodeRef<'_>) -> Vec<String> {
    let mut names = Vec::new();

    for examples in outline.children_of(NodeTag::Examples) {
        let mut rows = examples.children_of(NodeTag::Row);
        let Some(header) = rows.next() else {
            continue;
        };
        let header = header.cells();

        for row in rows {
            names.push(interpolate(template, &header, &row.cells()));
        }
    }

    names
}

/// Substitute every `<header>` placeholder with the value in the same column
///
/// Columns are applied in header order. A placeholder without a matching
/// header stays literal; a column whose header is not used is a no-op. When
/// the row is shorter than the header the missing columns substitute nothing.
#[must_use]
pub fn interpolate(template: &str, header: &[&str], row: &[&str]) -> String {
    let mut name = template.to_string();

    for (column, value) in header.iter().zip(row) {
        let placeholder = format!("<{column}>");
        if name.contains(&placeholder) {
            name = name.replace(&placeholder, value);
        }
    }

    name
}

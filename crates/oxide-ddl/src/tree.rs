//! Serializable view of a node tree.

use oxide_ddl_core::Node;
use serde::{Deserialize, Serialize};

/// One node: its identity and its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Identity with `' '` as the delimiter.
    pub id: String,
    /// Child nodes in traversal order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Builds the tree rooted at `node`.
    #[must_use]
    pub fn from_node(node: &dyn Node) -> Self {
        Self {
            id: node.identity(' '),
            children: node.children().into_iter().map(Self::from_node).collect(),
        }
    }

    /// Number of nodes in this tree, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_ddl_core::parse_statement;

    #[test]
    fn test_from_node() {
        let stmt = parse_statement("CREATE TABLE db1.t (x Int32) ENGINE = Memory").unwrap();
        let tree = TreeNode::from_node(&stmt);
        assert_eq!(tree.id, "CreateQuery db1 t");
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[1].id, "Storage definition");
        assert_eq!(tree.children[1].children[0].id, "Function Memory");
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_json_skips_empty_children() {
        let tree = TreeNode {
            id: String::from("Identifier x"),
            children: vec![],
        };
        assert_eq!(
            serde_json::to_string(&tree).unwrap(),
            r#"{"id":"Identifier x"}"#
        );
        let back: TreeNode = serde_json::from_str(r#"{"id":"Identifier x"}"#).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn test_password_not_in_tree() {
        let stmt = parse_statement(
            "CREATE DICTIONARY d (k UInt64) SOURCE(CLICKHOUSE(USER 'u' PASSWORD 'secret'))",
        )
        .unwrap();
        let json = serde_json::to_string(&TreeNode::from_node(&stmt)).unwrap();
        assert!(!json.contains("secret"));
    }
}

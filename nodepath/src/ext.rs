use nodepath_core::{find, ExprId, ExprTree, NodeList};
use serde_json::Value;

/// Extension trait that allows for expression-tree queries directly on [`serde_json::Value`]
///
/// ## Usage
/// ```rust
/// use serde_json::json;
/// use nodepath::{ExprTree, JsonPathExt};
///
/// let mut tree = ExprTree::new();
/// let query = tree.root().name(&mut tree, Some("foo")).all(&mut tree);
/// let value = json!({"foo": ["bar", "baz"]});
/// let result = value.json_path(&tree, query.id());
/// let nodes: Vec<_> = result.iter().map(|n| n.as_ref()).collect();
/// assert_eq!(nodes, vec!["bar", "baz"]);
/// ```
pub trait JsonPathExt {
    /// Query a [`serde_json::Value`] with an expression tree, starting from `id`'s chain
    fn json_path<'v>(&'v self, tree: &ExprTree, id: ExprId) -> NodeList<'v>;
}

impl JsonPathExt for Value {
    fn json_path<'v>(&'v self, tree: &ExprTree, id: ExprId) -> NodeList<'v> {
        find(tree, id, self)
    }
}

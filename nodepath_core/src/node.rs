//! Types representing the result of evaluating an expression against a JSON value
use std::borrow::Cow;
use std::slice::Iter;

use serde::Serialize;
use serde_json::Value;

/// A single evaluated value
///
/// Most operators (`Root`, `Name`, `Array`, `Slice`, `Self`, the unfiltered half of
/// `Predicate`) produce a reference borrowed from the document being queried. A few
/// (`Brace`, `Compare`, `Function::Key`, `Function::Not`, the `Value` literal) must
/// synthesize a brand new JSON value that exists nowhere in the original document.
/// [`Cow`] lets both kinds flow through the same evaluator without forcing the borrowed
/// case to needlessly clone.
pub type Node<'v> = Cow<'v, Value>;

/// A list of nodes resulting from evaluating an expression
///
/// Mirrors the teacher crate's own `NodeList`, generalized from `Vec<&'a Value>` to
/// `Vec<Node<'v>>` so it can carry both borrowed and synthesized values.
#[derive(Debug, Default, PartialEq, Serialize, Clone)]
pub struct NodeList<'v>(pub(crate) Vec<Node<'v>>);

impl<'v> NodeList<'v> {
    /// An empty node list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a node list from an already-collected vector of nodes
    pub fn from_vec(nodes: Vec<Node<'v>>) -> Self {
        Self(nodes)
    }

    /// Extract _at most_ one node from a [`NodeList`]
    pub fn at_most_one(&self) -> Result<Option<&Node<'v>>, AtMostOneError> {
        match self.0.len() {
            0 => Ok(None),
            1 => Ok(self.0.first()),
            n => Err(AtMostOneError(n)),
        }
    }

    /// Extract _exactly_ one node from a [`NodeList`]
    pub fn exactly_one(&self) -> Result<&Node<'v>, ExactlyOneError> {
        match self.0.len() {
            0 => Err(ExactlyOneError::Empty),
            1 => Ok(self.0.first().expect("length checked above")),
            n => Err(ExactlyOneError::MoreThanOne(n)),
        }
    }

    /// Consume the list, returning every node it contains
    pub fn all(self) -> Vec<Node<'v>> {
        self.0
    }

    /// The number of nodes in the list
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list contains no nodes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An iterator over the nodes in the list
    pub fn iter(&self) -> Iter<'_, Node<'v>> {
        self.0.iter()
    }

    /// The first node in the list, or `None` if it is empty
    pub fn first(&self) -> Option<&Node<'v>> {
        self.0.first()
    }

    /// The last node in the list, or `None` if it is empty
    pub fn last(&self) -> Option<&Node<'v>> {
        self.0.last()
    }

    /// The node at the given index, or `None` if out of bounds
    pub fn get(&self, index: usize) -> Option<&Node<'v>> {
        self.0.get(index)
    }
}

/// Error produced when expecting no more than one node from a query
#[derive(Debug, thiserror::Error)]
#[error("nodelist expected to contain at most one entry, but instead contains {0} entries")]
pub struct AtMostOneError(pub usize);

/// Error produced when expecting exactly one node from a query
#[derive(Debug, thiserror::Error)]
pub enum ExactlyOneError {
    /// The query resulted in an empty [`NodeList`]
    #[error("nodelist expected to contain one entry, but is empty")]
    Empty,
    /// The query resulted in a [`NodeList`] containing more than one node
    #[error("nodelist expected to contain one entry, but instead contains {0} entries")]
    MoreThanOne(usize),
}

impl ExactlyOneError {
    /// Check that it is the `Empty` variant
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Check that it is the `MoreThanOne` variant
    pub fn is_more_than_one(&self) -> bool {
        self.as_more_than_one().is_some()
    }

    /// Extract the number of nodes, if it was more than one, or `None` otherwise
    pub fn as_more_than_one(&self) -> Option<usize> {
        match self {
            ExactlyOneError::Empty => None,
            ExactlyOneError::MoreThanOne(u) => Some(*u),
        }
    }
}

impl<'v> From<Vec<Node<'v>>> for NodeList<'v> {
    fn from(nodes: Vec<Node<'v>>) -> Self {
        Self(nodes)
    }
}

impl<'v> IntoIterator for NodeList<'v> {
    type Item = Node<'v>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, 'v> IntoIterator for &'a NodeList<'v> {
    type Item = &'a Node<'v>;
    type IntoIter = Iter<'a, Node<'v>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send() {
        fn assert_send<T: Send>() {}
        assert_send::<NodeList<'static>>();
    }

    #[test]
    fn test_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<NodeList<'static>>();
    }

    #[test]
    fn at_most_one_reports_excess() {
        let list = NodeList::from_vec(vec![Cow::Owned(json!(1)), Cow::Owned(json!(2))]);
        assert!(matches!(list.at_most_one(), Err(AtMostOneError(2))));
    }

    #[test]
    fn exactly_one_on_empty() {
        let list: NodeList<'_> = NodeList::new();
        assert!(list.exactly_one().unwrap_err().is_empty());
    }
}

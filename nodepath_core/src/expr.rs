//! The expression node set (spec.md §3) and the fluent builder used to construct trees
//!
//! Because no textual parser is in scope, an [`ExprTree`] is always built programmatically:
//! entry points like [`ExprTree::root`] allocate the first node of a chain and return a
//! [`Cursor`] pointing at it; [`Cursor`] methods allocate further nodes and chain them on.
//! Nested children (a predicate's inner expression, a slice bound, a comparison's right-hand
//! side) are built the same way, via a closure that receives the shared arena.

use serde_json::Value;

use crate::arena::{ExprId, ExprTree};

/// A variant of the expression node set (spec.md §3)
#[derive(Debug)]
pub(crate) enum ExprKind {
    Value(Value),
    Root,
    Name(Option<String>),
    Array(Option<ArrayIndex>),
    Predicate(ExprId),
    Brace(ExprId),
    Search(ExprId),
    SelfRef,
    Compare(CompareOp, Operand),
    FunctionKey,
    FunctionContains(ExprId, Operand),
    FunctionNot(ExprId),
}

/// The payload of an `Array` node: a single index, a slice, or neither (select all items)
#[derive(Debug)]
pub(crate) enum ArrayIndex {
    Index(i64),
    Slice(SliceSpec),
}

/// The three (optional) bounds of a `Slice` payload
#[derive(Debug)]
pub(crate) struct SliceSpec {
    pub(crate) start: Option<Bound>,
    pub(crate) stop: Option<Bound>,
    pub(crate) step: Option<Bound>,
}

/// One bound of a slice: a literal integer, or an expression resolved against the parent
#[derive(Debug, Clone, Copy)]
pub enum Bound {
    /// A literal integer bound
    Literal(i64),
    /// A bound resolved by evaluating a nested expression
    Expr(ExprId),
}

impl From<i64> for Bound {
    fn from(value: i64) -> Self {
        Bound::Literal(value)
    }
}

/// The right-hand side of a `Compare` node, or the target of `Function::Contains`
#[derive(Debug, Clone)]
pub enum Operand {
    /// A literal JSON value, used directly without evaluation
    Literal(Value),
    /// An expression resolved by a nested find
    Expr(ExprId),
}

impl Operand {
    /// An operand that is a literal JSON value, used directly without evaluation
    pub fn literal(value: impl Into<Value>) -> Self {
        Operand::Literal(value.into())
    }

    /// An operand resolved by evaluating a nested expression built via `build`
    pub fn expr(tree: &mut ExprTree, build: impl FnOnce(&mut ExprTree) -> ExprId) -> Self {
        Operand::Expr(build(tree))
    }
}

/// The comparison and boolean operators carried by a `Compare` node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompareOp {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
    Ne,
    And,
    Or,
}

/// A builder handle pointing at one node within an [`ExprTree`]'s arena
///
/// `Cursor` is a plain `Copy` value; it carries no borrow of the tree, so building a nested
/// child expression (which needs its own `&mut ExprTree`) never conflicts with holding on to an
/// outer cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(ExprId);

impl Cursor {
    /// The underlying arena index this cursor points at
    pub fn id(&self) -> ExprId {
        self.0
    }
}

impl ExprTree {
    fn unchained(&mut self, kind: ExprKind) -> Cursor {
        Cursor(self.alloc(kind))
    }

    fn chained(&mut self, from: ExprId, kind: ExprKind) -> Cursor {
        let id = self.alloc(kind);
        self.chain(from, id);
        Cursor(id)
    }

    /// Start a new chain with the document root producer
    pub fn root(&mut self) -> Cursor {
        self.unchained(ExprKind::Root)
    }

    /// Start a new chain with the current-element producer (`@`)
    pub fn self_ref(&mut self) -> Cursor {
        self.unchained(ExprKind::SelfRef)
    }

    /// Start a new chain with a literal value producer
    pub fn value(&mut self, value: impl Into<Value>) -> Cursor {
        self.unchained(ExprKind::Value(value.into()))
    }

    /// Start a new chain with the current-key function (`key()`)
    pub fn key(&mut self) -> Cursor {
        self.unchained(ExprKind::FunctionKey)
    }

    /// Start a new chain with a field accessor; `None` selects every field
    pub fn name(&mut self, name: Option<impl Into<String>>) -> Cursor {
        self.unchained(ExprKind::Name(name.map(Into::into)))
    }

    /// Start a new chain with a boolean negation of a nested expression
    pub fn not(&mut self, build: impl FnOnce(&mut ExprTree) -> ExprId) -> Cursor {
        let inner = build(self);
        self.unchained(ExprKind::FunctionNot(inner))
    }

    /// Start a new chain with a `contains(inner, target)` membership test
    pub fn contains(
        &mut self,
        build_inner: impl FnOnce(&mut ExprTree) -> ExprId,
        target: Operand,
    ) -> Cursor {
        let inner = build_inner(self);
        self.unchained(ExprKind::FunctionContains(inner, target))
    }

    /// Start a new chain with a predicate filter over a nested expression
    pub fn predicate(&mut self, build: impl FnOnce(&mut ExprTree) -> ExprId) -> Cursor {
        let inner = build(self);
        self.unchained(ExprKind::Predicate(inner))
    }

    /// Start a new chain that groups a nested expression's results into a singleton bundle
    pub fn brace(&mut self, build: impl FnOnce(&mut ExprTree) -> ExprId) -> Cursor {
        let inner = build(self);
        self.unchained(ExprKind::Brace(inner))
    }

    /// Start a new chain with a recursive descent applying a nested expression
    pub fn search(&mut self, build: impl FnOnce(&mut ExprTree) -> ExprId) -> Cursor {
        let inner = build(self);
        self.unchained(ExprKind::Search(inner))
    }
}

impl Cursor {
    /// Chain a field accessor after this cursor; `None` selects every field
    pub fn name(self, tree: &mut ExprTree, name: Option<impl Into<String>>) -> Cursor {
        tree.chained(self.0, ExprKind::Name(name.map(Into::into)))
    }

    /// Chain an integer array index after this cursor (negative indices count from the end)
    pub fn index(self, tree: &mut ExprTree, i: i64) -> Cursor {
        tree.chained(self.0, ExprKind::Array(Some(ArrayIndex::Index(i))))
    }

    /// Chain an "all items" array accessor after this cursor
    pub fn all(self, tree: &mut ExprTree) -> Cursor {
        tree.chained(self.0, ExprKind::Array(None))
    }

    /// Chain a slice accessor after this cursor
    pub fn slice(
        self,
        tree: &mut ExprTree,
        start: Option<Bound>,
        stop: Option<Bound>,
        step: Option<Bound>,
    ) -> Cursor {
        tree.chained(
            self.0,
            ExprKind::Array(Some(ArrayIndex::Slice(SliceSpec { start, stop, step }))),
        )
    }

    /// Chain a predicate filter after this cursor
    pub fn predicate(
        self,
        tree: &mut ExprTree,
        build: impl FnOnce(&mut ExprTree) -> ExprId,
    ) -> Cursor {
        let inner = build(tree);
        tree.chained(self.0, ExprKind::Predicate(inner))
    }

    /// Chain a brace grouping after this cursor
    pub fn brace(self, tree: &mut ExprTree, build: impl FnOnce(&mut ExprTree) -> ExprId) -> Cursor {
        let inner = build(tree);
        tree.chained(self.0, ExprKind::Brace(inner))
    }

    /// Chain a recursive search after this cursor
    pub fn search(
        self,
        tree: &mut ExprTree,
        build: impl FnOnce(&mut ExprTree) -> ExprId,
    ) -> Cursor {
        let inner = build(tree);
        tree.chained(self.0, ExprKind::Search(inner))
    }

    /// Chain the current-key function after this cursor
    pub fn key(self, tree: &mut ExprTree) -> Cursor {
        tree.chained(self.0, ExprKind::FunctionKey)
    }

    /// Chain the current-element producer after this cursor
    pub fn self_ref(self, tree: &mut ExprTree) -> Cursor {
        tree.chained(self.0, ExprKind::SelfRef)
    }

    /// Chain a boolean negation of a nested expression after this cursor
    pub fn not_(self, tree: &mut ExprTree, build: impl FnOnce(&mut ExprTree) -> ExprId) -> Cursor {
        let inner = build(tree);
        tree.chained(self.0, ExprKind::FunctionNot(inner))
    }

    /// Chain a `contains(inner, target)` membership test after this cursor
    pub fn contains(
        self,
        tree: &mut ExprTree,
        build_inner: impl FnOnce(&mut ExprTree) -> ExprId,
        target: Operand,
    ) -> Cursor {
        let inner = build_inner(tree);
        tree.chained(self.0, ExprKind::FunctionContains(inner, target))
    }

    fn compare(self, tree: &mut ExprTree, op: CompareOp, rhs: Operand) -> Cursor {
        tree.chained(self.0, ExprKind::Compare(op, rhs))
    }

    /// Chain a `<` comparison after this cursor
    pub fn lt(self, tree: &mut ExprTree, rhs: Operand) -> Cursor {
        self.compare(tree, CompareOp::Lt, rhs)
    }

    /// Chain a `<=` comparison after this cursor
    pub fn le(self, tree: &mut ExprTree, rhs: Operand) -> Cursor {
        self.compare(tree, CompareOp::Le, rhs)
    }

    /// Chain a `==` comparison after this cursor
    pub fn eq_(self, tree: &mut ExprTree, rhs: Operand) -> Cursor {
        self.compare(tree, CompareOp::Eq, rhs)
    }

    /// Chain a `>=` comparison after this cursor
    pub fn ge(self, tree: &mut ExprTree, rhs: Operand) -> Cursor {
        self.compare(tree, CompareOp::Ge, rhs)
    }

    /// Chain a `>` comparison after this cursor
    pub fn gt(self, tree: &mut ExprTree, rhs: Operand) -> Cursor {
        self.compare(tree, CompareOp::Gt, rhs)
    }

    /// Chain a `!=` comparison after this cursor
    pub fn ne_(self, tree: &mut ExprTree, rhs: Operand) -> Cursor {
        self.compare(tree, CompareOp::Ne, rhs)
    }

    /// Chain a strict boolean AND after this cursor
    ///
    /// The result is not a synthesized `bool` — it is whichever operand JSON value the
    /// evaluator picked, per spec.md §4.2/§9. Use this only where the result feeds straight
    /// into a predicate's truthiness check, not where a literal `true`/`false` is expected.
    pub fn and_(self, tree: &mut ExprTree, rhs: Operand) -> Cursor {
        self.compare(tree, CompareOp::And, rhs)
    }

    /// Chain a strict boolean OR after this cursor
    ///
    /// See [`Cursor::and_`] for why the result is an operand value, not a `bool`.
    pub fn or_(self, tree: &mut ExprTree, rhs: Operand) -> Cursor {
        self.compare(tree, CompareOp::Or, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_simple_chain() {
        let mut tree = ExprTree::new();
        let root = tree.root();
        let a = root.name(&mut tree, Some("a"));
        assert_eq!(tree.begin(a.id()), root.id());
    }

    #[test]
    fn predicate_owns_its_inner_without_chaining_it() {
        let mut tree = ExprTree::new();
        let root = tree.root();
        let filtered = root.all(&mut tree).predicate(&mut tree, |t| {
            t.self_ref().lt(t, Operand::literal(100)).id()
        });
        // the predicate's inner expression is a separate, unchained sub-tree
        assert_eq!(tree.next(filtered.id()), None);
    }
}

//! Ambient evaluation bindings threaded explicitly through the driver

use serde_json::Value;

/// The current key under iteration: an object field name, or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfKey {
    /// An object field name
    Name(String),
    /// An array index
    Index(usize),
}

/// The `(key, value)` pair bound while iterating inside a [`Predicate`](crate::expr::Cursor::predicate)
///
/// Held as owned data (see DESIGN.md): the value being iterated may itself be a value
/// synthesized mid-evaluation (e.g. the bundle produced by a `Brace`), which does not live as
/// long as the document being queried, so the context cannot merely borrow it.
#[derive(Debug, Clone)]
pub struct SelfBinding {
    /// The key half of the pair
    pub key: SelfKey,
    /// The value half of the pair
    pub value: Value,
}

/// Ambient bindings consulted by leaf operators (`Root`, `Self`, `Function::Key`) and by
/// sub-expression evaluators.
///
/// `Context` is threaded as an explicit, `Clone` parameter rather than stored in thread-local or
/// global state (see DESIGN.md, "Dynamically-scoped context"). Every nested find installs a new
/// `Context` for the scope of that call; when the call returns, the caller's own `Context` value
/// is simply still sitting in its stack frame, which is the entire "restore" step. Only `root`
/// borrows from the document (`'v`); `parent` and `self_` hold owned clones, since the element
/// they need to remember is not always part of the original document (see [`SelfBinding`]).
#[derive(Debug, Clone)]
pub struct Context<'v> {
    root: Option<&'v Value>,
    parent: Option<Value>,
    self_: Option<SelfBinding>,
    finding: bool,
}

impl<'v> Context<'v> {
    /// An empty context, as seen before any outer `find` has set the root
    pub fn empty() -> Self {
        Self {
            root: None,
            parent: None,
            self_: None,
            finding: false,
        }
    }

    /// The document root, if one has been set by an enclosing outer find
    pub fn root(&self) -> Option<&'v Value> {
        self.root
    }

    /// The current parent container, if any
    pub fn parent(&self) -> Option<&Value> {
        self.parent.as_ref()
    }

    /// The current `(key, value)` self-binding, if inside a predicate's iteration
    pub fn self_binding(&self) -> Option<&SelfBinding> {
        self.self_.as_ref()
    }

    /// Whether this call is part of an outer (chained) find, as opposed to a nested find
    pub fn is_finding(&self) -> bool {
        self.finding
    }

    /// Returns a context identical to this one, but with `root` set if it was previously unset
    ///
    /// Matches the driver's step 2 ("if no document root is currently set in context, set it to
    /// `doc`"): an outer find only installs the root once, at the outermost scope.
    pub fn with_root_if_unset(self, doc: &'v Value) -> Self {
        if self.root.is_some() {
            self
        } else {
            Self {
                root: Some(doc),
                ..self
            }
        }
    }

    /// Returns a context identical to this one, with the `finding` flag set
    pub fn with_finding(self, finding: bool) -> Self {
        Self { finding, ..self }
    }

    /// Returns a context identical to this one, with `parent` rebound
    pub fn with_parent(self, parent: Value) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    /// Returns a context identical to this one, with `self_` rebound
    pub fn with_self(self, binding: SelfBinding) -> Self {
        Self {
            self_: Some(binding),
            ..self
        }
    }
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

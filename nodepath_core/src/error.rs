//! Error types produced by expression construction and evaluation

/// Top-level error family for the expression tree and its evaluator
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A textual expression could not be parsed
    ///
    /// The core evaluator never raises this variant itself; it exists so that a parser
    /// built on top of this crate has a natural place to report its own failures.
    #[error("invalid jsonpath expression: {0}")]
    SyntaxError(String),

    /// An expression tree referenced a function name the evaluator does not know
    ///
    /// This engine's function set (`key`, `contains`, `not`) is closed, so this variant is
    /// not reachable through the safe public API today; it is kept for forward compatibility
    /// with an extensible function registry.
    #[error("undefined function: {0}")]
    UndefinedFunction(String),

    /// An evaluation-time control signal; see [`FindError`]
    #[error(transparent)]
    Find(#[from] FindError),
}

/// Error raised when a `find`-family operation yields no match
///
/// `NotFound` is also used internally as a control signal to unwind a failed local match; it
/// never escapes [`find`](crate::eval::find) or
/// [`find_iter`](crate::eval::find_iter) — only
/// [`find_first`](crate::eval::find_first) surfaces it, and only when the entire result
/// sequence turned out empty.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("no match")]
pub struct FindError;

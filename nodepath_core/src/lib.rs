//! Core expression tree and evaluator for the `nodepath` JSONPath-flavoured query engine.
//!
//! This crate defines the expression node set, the fluent builder used to construct trees
//! (there is no textual parser in scope — see [`expr`]), the depth-first evaluator, and the
//! string renderer. The outer `nodepath` crate layers ergonomics on top.

#![warn(
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    missing_debug_implementations,
    missing_docs
)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod context;
pub mod error;
pub mod eval;
pub mod expr;
pub mod node;
pub mod render;

pub use arena::{ExprId, ExprTree};
pub use context::{Context, SelfBinding, SelfKey};
pub use error::{Error, FindError};
pub use eval::{find, find_first, find_iter, FindIter};
pub use expr::{Bound, Cursor, Operand};
pub use node::{AtMostOneError, ExactlyOneError, Node, NodeList};
pub use render::{full_expression, partial_expression};

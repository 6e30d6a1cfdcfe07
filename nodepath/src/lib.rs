//! This crate lets you build JSONPath-flavoured query expressions programmatically and
//! evaluate them against a [`serde_json::Value`].
//!
//! There is no textual query parser here: an expression is built node by node with
//! [`ExprTree`] and [`Cursor`], the fluent builder that mirrors the original dynamic-language
//! implementation's operator-overloaded chaining (`Root().Name("a").Array(0)`) as ordinary
//! named methods.
//!
//! The crate provides three key abstractions:
//!
//! * [`ExprTree`], the arena that owns every node of one or more expressions, built via
//!   [`Cursor`].
//! * [`NodeList`], the result of evaluating an expression against a [`serde_json::Value`] with
//!   [`find`], [`find_first`], or [`find_iter`].
//! * The [`JsonPathExt`] trait, which extends [`serde_json::Value`] with a
//!   [`json_path`][JsonPathExt::json_path] method for evaluating a built expression directly.
//!
//! # Usage
//!
//! ## Building and querying
//!
//! ```rust
//! use nodepath::{ExprTree, JsonPathExt};
//! use serde_json::json;
//!
//! let mut tree = ExprTree::new();
//! let query = tree.root().name(&mut tree, Some("foo")).name(&mut tree, Some("bar"));
//! let value = json!({ "foo": { "bar": ["baz", 42] } });
//! let nodes = value.json_path(&tree, query.id());
//! assert_eq!(nodes.exactly_one().unwrap().as_ref(), &json!(["baz", 42]));
//! ```
//!
//! ## Querying for a single node
//!
//! For queries expected to return a single node, use [`exactly_one`][NodeList::exactly_one] or
//! [`at_most_one`][NodeList::at_most_one]:
//!
//! ```rust
//! use nodepath::{ExprTree, JsonPathExt};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = ExprTree::new();
//! let query = tree
//!     .root()
//!     .name(&mut tree, Some("foo"))
//!     .name(&mut tree, Some("bar"))
//!     .index(&mut tree, 0);
//! let value = json!({ "foo": { "bar": ["baz", 42] } });
//! let node = value.json_path(&tree, query.id()).exactly_one()?;
//! assert_eq!(node.as_ref(), "baz");
//! # Ok(())
//! # }
//! ```
//!
//! Negative indices count from the end of the array:
//!
//! ```rust
//! # use nodepath::{ExprTree, JsonPathExt};
//! # use serde_json::json;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = ExprTree::new();
//! let query = tree.root().index(&mut tree, -1);
//! let value = json!([1, 2, 3, 4, 5]);
//! let node = value.json_path(&tree, query.id()).at_most_one()?;
//! assert_eq!(node.map(|n| n.as_ref()), Some(&json!(5)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Querying for multiple nodes
//!
//! #### All items (`.all(...)`)
//!
//! ```rust
//! use nodepath::{ExprTree, JsonPathExt};
//! use serde_json::json;
//!
//! let mut tree = ExprTree::new();
//! let query = tree
//!     .root()
//!     .name(&mut tree, Some("foo"))
//!     .name(&mut tree, Some("bar"))
//!     .all(&mut tree);
//! let value = json!({ "foo": { "bar": ["baz", "bop"] } });
//! let result = value.json_path(&tree, query.id());
//! let nodes: Vec<_> = result.iter().map(|n| n.as_ref()).collect();
//! assert_eq!(nodes, vec!["baz", "bop"]);
//! ```
//!
//! #### Slices (`.slice(...)`)
//!
//! ```rust
//! use nodepath::{Bound, ExprTree, JsonPathExt};
//! use serde_json::json;
//!
//! let mut tree = ExprTree::new();
//! let query = tree.root().name(&mut tree, Some("foo")).slice(
//!     &mut tree,
//!     Some(Bound::Literal(1)),
//!     None,
//!     None,
//! );
//! let value = json!({ "foo": [1, 2, 3, 4, 5] });
//! let result = value.json_path(&tree, query.id());
//! let nodes: Vec<_> = result.iter().map(|n| n.as_ref()).collect();
//! assert_eq!(nodes, vec![2, 3, 4, 5]);
//! ```
//!
//! #### Predicates (filters)
//!
//! A predicate iterates the items of an array or object, binding each in turn as the current
//! self (`@`), and keeps those for which its inner expression's first result is truthy. It is
//! chained directly onto whatever produces the array or object being filtered — it does its own
//! iteration, so it never needs a preceding wildcard:
//!
//! ```rust
//! use nodepath::{ExprTree, JsonPathExt, Operand};
//! use serde_json::json;
//!
//! let mut tree = ExprTree::new();
//! let query = tree.root().predicate(&mut tree, |t| {
//!     t.self_ref().gt(t, Operand::literal(2)).id()
//! });
//! let value = json!([1, 2, 3, 4, 5]);
//! let result = value.json_path(&tree, query.id());
//! let nodes: Vec<_> = result.iter().map(|n| n.as_ref()).collect();
//! assert_eq!(nodes, vec![3, 4, 5]);
//! ```
//!
//! Predicates can reach into the root document, not just the current self:
//!
//! ```rust
//! use nodepath::{ExprTree, JsonPathExt, Operand};
//! use serde_json::json;
//!
//! let mut tree = ExprTree::new();
//! let threshold = Operand::expr(&mut tree, |t| {
//!     t.root().name(t, Some("threshold")).id()
//! });
//! let query = tree
//!     .root()
//!     .name(&mut tree, Some("readings"))
//!     .predicate(&mut tree, |t| {
//!         t.self_ref().name(t, Some("val")).gt(t, threshold).id()
//!     })
//!     .name(&mut tree, Some("msg"));
//! let value = json!({
//!     "threshold": 40,
//!     "readings": [
//!         { "val": 35, "msg": "foo" },
//!         { "val": 40, "msg": "bar" },
//!         { "val": 42, "msg": "biz" },
//!         { "val": 48, "msg": "bop" },
//!     ]
//! });
//! let result = value.json_path(&tree, query.id());
//! let nodes: Vec<_> = result.iter().map(|n| n.as_ref()).collect();
//! assert_eq!(nodes, vec!["biz", "bop"]);
//! ```
//!
//! #### Recursive search (`.search(...)`)
//!
//! ```rust
//! use nodepath::{ExprTree, JsonPathExt};
//! use serde_json::json;
//!
//! let mut tree = ExprTree::new();
//! let query = tree
//!     .root()
//!     .name(&mut tree, Some("foo"))
//!     .search(&mut tree, |t| t.name(Some("baz")).id());
//! let value = json!({
//!     "foo": { "bar": { "baz": 1 }, "baz": 2 },
//!     "baz": 3,
//! });
//! let result = value.json_path(&tree, query.id());
//! let nodes: Vec<_> = result.iter().map(|n| n.as_ref()).collect();
//! assert_eq!(nodes, vec![2, 1]);
//! ```
//!
//! #### Functions (`key()`, `contains(...)`, `not(...)`)
//!
//! `contains(inner, target)` tests whether `inner`'s result (a string, array, or object)
//! contains `target`; `key()` resolves to the current predicate binding's field name or array
//! index; `not(inner)` negates `inner`'s truthiness:
//!
//! ```rust
//! use nodepath::{ExprTree, JsonPathExt, Operand};
//! use serde_json::json;
//!
//! let mut tree = ExprTree::new();
//! let query = tree.root().predicate(&mut tree, |t| {
//!     t.contains(|t2| t2.key().id(), Operand::literal("book")).id()
//! });
//! let value = json!({ "book 1": 1, "picture 2": 2 });
//! let result = value.json_path(&tree, query.id());
//! let nodes: Vec<_> = result.iter().map(|n| n.as_ref()).collect();
//! assert_eq!(nodes, vec![1]);
//! ```
//!
//! ```rust
//! use nodepath::{ExprTree, JsonPathExt};
//! use serde_json::json;
//!
//! let mut tree = ExprTree::new();
//! let query = tree.root().predicate(&mut tree, |t| {
//!     t.not(|t2| t2.self_ref().name(t2, Some("archived")).id()).id()
//! });
//! let value = json!([{ "archived": true }, { "archived": false }, {}]);
//! let result = value.json_path(&tree, query.id());
//! let nodes: Vec<_> = result.iter().map(|n| n.as_ref()).collect();
//! assert_eq!(nodes, vec![&json!({ "archived": false }), &json!({})]);
//! ```
//!
//! #### Grouping a filter's results for a further filter (`.brace(...)`)
//!
//! `.brace(...)` runs its inner expression to completion and bundles every result into a single
//! array, which can then itself be the target of another predicate — useful for chaining two
//! independent filters where the second doesn't simply narrow the first's own items:
//!
//! ```rust
//! use nodepath::{ExprTree, JsonPathExt, Operand};
//! use serde_json::json;
//!
//! let mut tree = ExprTree::new();
//! let below_100 = tree.root().brace(&mut tree, |t| {
//!     t.root()
//!         .predicate(t, |t2| t2.self_ref().lt(t2, Operand::literal(100)).id())
//!         .id()
//! });
//! let query = below_100.predicate(&mut tree, |t| t.self_ref().ge(t, Operand::literal(50)).id());
//! let value = json!([100, 99, 50, 1]);
//! let result = value.json_path(&tree, query.id());
//! let nodes: Vec<_> = result.iter().map(|n| n.as_ref()).collect();
//! assert_eq!(nodes, vec![99, 50]);
//! ```
//!
//! ## Feature flags
//!
//! - `trace` — enable internal tracing via [tracing](https://docs.rs/tracing)

#![warn(
    clippy::all,
    clippy::dbg_macro,
    clippy::todo,
    clippy::empty_enum,
    clippy::enum_glob_use,
    clippy::mem_forget,
    clippy::unused_self,
    clippy::filter_map_next,
    clippy::needless_continue,
    clippy::needless_borrow,
    clippy::match_wildcard_for_single_variants,
    clippy::if_let_mutex,
    clippy::mismatched_target_os,
    clippy::await_holding_lock,
    clippy::match_on_vec_items,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::lossy_float_literal,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::fn_params_excessive_bools,
    clippy::exit,
    clippy::inefficient_to_string,
    clippy::linkedlist,
    clippy::macro_use_imports,
    clippy::option_option,
    clippy::verbose_file_reads,
    clippy::unnested_or_patterns,
    clippy::str_to_string,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    missing_debug_implementations,
    missing_docs
)]
#![deny(unreachable_pub)]
#![allow(elided_lifetimes_in_paths, clippy::type_complexity)]
#![forbid(unsafe_code)]

mod ext;

#[doc(inline)]
pub use ext::JsonPathExt;

#[doc(inline)]
pub use nodepath_core::{
    find, find_first, find_iter, AtMostOneError, Bound, Context, Cursor, Error, ExactlyOneError,
    ExprId, ExprTree, FindError, FindIter, Node, NodeList, Operand, SelfBinding, SelfKey,
};

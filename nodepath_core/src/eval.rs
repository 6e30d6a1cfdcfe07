//! The evaluator: depth-first chain driver (spec.md §4.1) and per-variant local match rules
//! (spec.md §4.2)

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::VecDeque;

use serde_json::{Number, Value};

use crate::arena::{ExprId, ExprTree};
use crate::context::{Context, SelfBinding, SelfKey};
use crate::error::FindError;
use crate::expr::{ArrayIndex, Bound, CompareOp, ExprKind, Operand, SliceSpec};
use crate::node::{Node, NodeList};

/// JSON truthiness (GLOSSARY): everything is truthy except `false`, `null`, `0`, `0.0`, `""`,
/// `[]`, and `{}`.
pub(crate) fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(false) => 1,
        Value::Bool(true) => 2,
        Value::Number(_) => 3,
        Value::String(_) => 4,
        Value::Array(_) => 5,
        Value::Object(_) => 6,
    }
}

fn cmp_numbers(a: &Number, b: &Number) -> Ordering {
    let a = a.as_f64().unwrap_or(f64::NAN);
    let b = b.as_f64().unwrap_or(f64::NAN);
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Total order across JSON values (DESIGN.md, "mixed-type ordering"):
/// `null < false < true < numbers < strings < arrays < objects`, falling back to type rank for
/// heterogeneous comparisons.
pub(crate) fn cmp_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => cmp_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (xi, yi) in x.iter().zip(y.iter()) {
                match cmp_values(xi, yi) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            for ((xk, xv), (yk, yv)) in x.iter().zip(y.iter()) {
                match xk.cmp(yk) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
                match cmp_values(xv, yv) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            x.len().cmp(&y.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Borrow the document's original lifetime back out of a `Node` when it is the `Borrowed`
/// variant; otherwise project into the (locally owned) value and detach with a clone.
///
/// This is the crux of mixing borrowed and synthesized nodes in one evaluator: an operator
/// chained after a synthesized value (e.g. `Brace`'s bundle) simply can't keep borrowing from
/// the document, because the thing it's indexing into doesn't live that long.
fn project_one<'v>(
    elem: &Node<'v>,
    f: impl for<'a> Fn(&'a Value) -> Option<&'a Value>,
) -> Option<Node<'v>> {
    match elem {
        Cow::Borrowed(v) => f(*v).map(Cow::Borrowed),
        Cow::Owned(v) => f(v).map(|r| Cow::Owned(r.clone())),
    }
}

fn project_many<'v>(
    elem: &Node<'v>,
    f: impl for<'a> Fn(&'a Value) -> Option<Vec<&'a Value>>,
) -> Option<Vec<Node<'v>>> {
    match elem {
        Cow::Borrowed(v) => f(*v).map(|items| items.into_iter().map(Cow::Borrowed).collect()),
        Cow::Owned(v) => {
            f(v).map(|items| items.into_iter().map(|r| Cow::Owned(r.clone())).collect())
        }
    }
}

fn normalize_index(i: i64, len: usize) -> Option<usize> {
    let idx = if i < 0 { i + len as i64 } else { i };
    if idx < 0 || idx as usize >= len {
        None
    } else {
        Some(idx as usize)
    }
}

fn eval_array_index<'v>(elem: &Node<'v>, i: i64) -> Result<Vec<Node<'v>>, FindError> {
    let len = match elem.as_ref() {
        Value::Array(a) => a.len(),
        _ => return Err(FindError),
    };
    Ok(match normalize_index(i, len) {
        Some(idx) => project_one(elem, |v| v.as_array().and_then(|a| a.get(idx)))
            .into_iter()
            .collect(),
        None => Vec::new(),
    })
}

fn resolve_bound<'v>(
    tree: &ExprTree,
    bound: &Option<Bound>,
    default: i64,
    ctx: &Context<'v>,
) -> Result<i64, FindError> {
    match bound {
        None => Ok(default),
        Some(Bound::Literal(v)) => Ok(*v),
        Some(Bound::Expr(id)) => {
            let parent = ctx.parent().cloned().ok_or(FindError)?;
            let nested_ctx = ctx.clone().with_finding(false);
            let results = run_subexpr(tree, *id, vec![Cow::Owned(parent)], nested_ctx);
            results
                .into_iter()
                .next()
                .and_then(|v| v.as_ref().as_i64())
                .ok_or(FindError)
        }
    }
}

/// Python-style half-open strided slice, matching spec.md §4.2's "Slice" local match rule.
fn eval_slice<'v>(
    tree: &ExprTree,
    spec: &SliceSpec,
    elem: &Node<'v>,
    ctx: &Context<'v>,
) -> Result<Vec<Node<'v>>, FindError> {
    let len = match elem.as_ref() {
        Value::Array(a) => a.len(),
        _ => return Err(FindError),
    } as i64;

    let step = resolve_bound(tree, &spec.step, 1, ctx)?;
    if step == 0 {
        return Err(FindError);
    }
    // Missing start/stop default to 0/len regardless of step's sign (a negative step with both
    // bounds omitted therefore walks 0..len and produces nothing, not a reversed array).
    let start = resolve_bound(tree, &spec.start, 0, ctx)?;
    let stop = resolve_bound(tree, &spec.stop, len, ctx)?;

    let clamp = |idx: i64| -> i64 {
        let idx = if idx < 0 { idx + len } else { idx };
        if step > 0 {
            idx.clamp(0, len)
        } else {
            idx.clamp(-1, len - 1)
        }
    };
    let start = clamp(start);
    let stop = clamp(stop);

    let mut out = Vec::new();
    let mut i = start;
    while (step > 0 && i < stop) || (step < 0 && i > stop) {
        if let Some(n) = project_one(elem, |v| {
            v.as_array().and_then(|a| a.get(i as usize))
        }) {
            out.push(n);
        }
        i += step;
    }
    Ok(out)
}

/// Iterate `(key, value)` pairs of `elem` in order, per spec.md §4.2's "Predicate" rule:
/// `(index, item)` for arrays, `(key, value)` for objects.
fn pairs<'v>(elem: &Node<'v>) -> Result<Vec<(SelfKey, Node<'v>)>, FindError> {
    match elem.as_ref() {
        Value::Array(a) => {
            let len = a.len();
            let items = project_many(elem, |v| v.as_array().map(|a| a.iter().collect()))
                .unwrap_or_default();
            debug_assert_eq!(items.len(), len);
            Ok(items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (SelfKey::Index(i), v))
                .collect())
        }
        Value::Object(o) => {
            let keys: Vec<String> = o.keys().cloned().collect();
            let items = project_many(elem, |v| v.as_object().map(|o| o.values().collect()))
                .unwrap_or_default();
            Ok(keys
                .into_iter()
                .zip(items)
                .map(|(k, v)| (SelfKey::Name(k), v))
                .collect())
        }
        _ => Err(FindError),
    }
}

fn eval_predicate<'v>(
    tree: &ExprTree,
    inner: ExprId,
    elem: &Node<'v>,
    ctx: &Context<'v>,
) -> Result<Vec<Node<'v>>, FindError> {
    let mut out = Vec::new();
    for (key, value) in pairs(elem)? {
        let binding = SelfBinding {
            key,
            value: value.as_ref().clone(),
        };
        let nested_ctx = ctx.clone().with_finding(false).with_self(binding);
        let results = run_subexpr(tree, inner, vec![value.clone()], nested_ctx);
        let accepted = results
            .first()
            .map(|v| is_truthy(v.as_ref()))
            .unwrap_or(false);
        if accepted {
            out.push(value);
        }
    }
    Ok(out)
}

fn eval_brace<'v>(
    tree: &ExprTree,
    inner: ExprId,
    elem: &Node<'v>,
    ctx: &Context<'v>,
) -> Result<Vec<Node<'v>>, FindError> {
    let nested_ctx = ctx.clone().with_finding(false);
    let results = run_subexpr(tree, inner, vec![elem.clone()], nested_ctx);
    let bundle: Vec<Value> = results.into_iter().map(Cow::into_owned).collect();
    Ok(vec![Cow::Owned(Value::Array(bundle))])
}

fn eval_search<'v>(
    tree: &ExprTree,
    inner: ExprId,
    elem: &Node<'v>,
    ctx: &Context<'v>,
) -> Result<Vec<Node<'v>>, FindError> {
    let mut out = Vec::new();
    // spec.md §9: when `inner` is itself a Predicate, the *initial* visit wraps `elem` in a
    // singleton array so the predicate's per-item iteration begins at `elem` itself. The wrap
    // happens exactly once, here, at the root of the search — every recursive visit below this
    // point (including the wrapper's own sole child, `elem` again) runs `inner` directly on the
    // node it is given, the same as for any other inner expression.
    if matches!(tree.kind(inner), ExprKind::Predicate(_)) {
        let wrapped: Node<'v> = Cow::Owned(Value::Array(vec![elem.as_ref().clone()]));
        search_visit(tree, inner, &wrapped, ctx, &mut out);
    } else {
        search_visit(tree, inner, elem, ctx, &mut out);
    }
    Ok(out)
}

fn search_visit<'v>(
    tree: &ExprTree,
    inner: ExprId,
    elem: &Node<'v>,
    ctx: &Context<'v>,
    out: &mut Vec<Node<'v>>,
) {
    let visiting_ctx = ctx.clone().with_finding(true);
    out.extend(run_subexpr(tree, inner, vec![elem.clone()], visiting_ctx));

    let child_ctx = ctx.clone().with_parent(elem.as_ref().clone());
    match elem.as_ref() {
        Value::Array(items) => {
            for i in 0..items.len() {
                if let Some(child) = project_one(elem, |v| v.as_array().and_then(|a| a.get(i))) {
                    search_visit(tree, inner, &child, &child_ctx, out);
                }
            }
        }
        Value::Object(map) => {
            for key in map.keys().cloned().collect::<Vec<_>>() {
                if let Some(child) =
                    project_one(elem, |v| v.as_object().and_then(|o| o.get(key.as_str())))
                {
                    search_visit(tree, inner, &child, &child_ctx, out);
                }
            }
        }
        _ => {}
    }
}

fn eval_self<'v>(elem: &Node<'v>, ctx: &Context<'v>) -> Node<'v> {
    match ctx.self_binding() {
        Some(binding) => Cow::Owned(binding.value.clone()),
        None => elem.clone(),
    }
}

fn eval_compare_value<'v>(op: CompareOp, left: &Value, right: &Value) -> Node<'v> {
    match op {
        CompareOp::And => Cow::Owned(if is_truthy(left) {
            right.clone()
        } else {
            left.clone()
        }),
        CompareOp::Or => Cow::Owned(if is_truthy(left) {
            left.clone()
        } else {
            right.clone()
        }),
        _ => Cow::Owned(Value::Bool(match op {
            CompareOp::Lt => cmp_values(left, right) == Ordering::Less,
            CompareOp::Le => cmp_values(left, right) != Ordering::Greater,
            CompareOp::Eq => left == right,
            CompareOp::Ge => cmp_values(left, right) != Ordering::Less,
            CompareOp::Gt => cmp_values(left, right) == Ordering::Greater,
            CompareOp::Ne => left != right,
            CompareOp::And | CompareOp::Or => unreachable!("handled above"),
        })),
    }
}

fn eval_compare_node<'v>(
    tree: &ExprTree,
    op: CompareOp,
    rhs: &Operand,
    elem: &Node<'v>,
    ctx: &Context<'v>,
) -> Result<Vec<Node<'v>>, FindError> {
    let left = elem.as_ref().clone();
    let right = match rhs {
        Operand::Literal(v) => v.clone(),
        Operand::Expr(id) => {
            // Invariant 6: a Compare node only appears inside a Predicate or a boolean-operator
            // chain, both of which bind `context.self` before evaluating this node — a missing
            // binding here means the tree violates that invariant.
            let binding = ctx.self_binding().expect(
                "Compare's expression right-hand side requires context.self to be bound (spec.md invariant 6)",
            );
            let start = Cow::Owned(binding.value.clone());
            let nested_ctx = ctx.clone().with_finding(false);
            let results = run_subexpr(tree, *id, vec![start], nested_ctx);
            results
                .into_iter()
                .next()
                .map(Cow::into_owned)
                .ok_or(FindError)?
        }
    };
    Ok(vec![eval_compare_value(op, &left, &right)])
}

fn contains_value(container: &Value, needle: &Value) -> bool {
    match container {
        Value::String(s) => needle.as_str().map(|n| s.contains(n)).unwrap_or(false),
        Value::Array(a) => a.contains(needle),
        Value::Object(o) => needle.as_str().map(|k| o.contains_key(k)).unwrap_or(false),
        _ => false,
    }
}

fn eval_contains<'v>(
    tree: &ExprTree,
    inner: ExprId,
    target: &Operand,
    elem: &Node<'v>,
    ctx: &Context<'v>,
) -> Result<Vec<Node<'v>>, FindError> {
    let nested_ctx = ctx.clone().with_finding(false);
    let container = run_subexpr(tree, inner, vec![elem.clone()], nested_ctx.clone())
        .into_iter()
        .next()
        .ok_or(FindError)?;

    let needle = match target {
        Operand::Literal(v) => Cow::Owned(v.clone()),
        Operand::Expr(id) => run_subexpr(tree, *id, vec![elem.clone()], nested_ctx)
            .into_iter()
            .next()
            .ok_or(FindError)?,
    };

    Ok(vec![Cow::Owned(Value::Bool(contains_value(
        container.as_ref(),
        needle.as_ref(),
    )))])
}

fn eval_not<'v>(
    tree: &ExprTree,
    inner: ExprId,
    elem: &Node<'v>,
    ctx: &Context<'v>,
) -> Result<Vec<Node<'v>>, FindError> {
    let nested_ctx = ctx.clone().with_finding(false);
    let results = run_subexpr(tree, inner, vec![elem.clone()], nested_ctx);
    if results.is_empty() {
        // The inner expression matched nothing at all (e.g. a missing field) rather than
        // matching something falsy. An absent value negates to true (DESIGN.md, "Not on an
        // empty inner result").
        return Ok(vec![Cow::Owned(Value::Bool(true))]);
    }
    Ok(results
        .into_iter()
        .map(|v| Cow::Owned(Value::Bool(!is_truthy(v.as_ref()))))
        .collect())
}

fn local_match<'v>(
    tree: &ExprTree,
    id: ExprId,
    elem: &Node<'v>,
    ctx: &Context<'v>,
) -> Result<Vec<Node<'v>>, FindError> {
    match tree.kind(id) {
        ExprKind::Value(v) => Ok(vec![Cow::Owned(v.clone())]),
        ExprKind::Root => {
            let root = ctx.root().ok_or(FindError)?;
            Ok(vec![Cow::Borrowed(root)])
        }
        ExprKind::Name(None) => {
            project_many(elem, |v| v.as_object().map(|o| o.values().collect())).ok_or(FindError)
        }
        ExprKind::Name(Some(key)) => {
            project_one(elem, |v| v.as_object().and_then(|o| o.get(key.as_str())))
                .map(|n| vec![n])
                .ok_or(FindError)
        }
        ExprKind::Array(None) => {
            project_many(elem, |v| v.as_array().map(|a| a.iter().collect())).ok_or(FindError)
        }
        ExprKind::Array(Some(ArrayIndex::Index(i))) => eval_array_index(elem, *i),
        ExprKind::Array(Some(ArrayIndex::Slice(spec))) => eval_slice(tree, spec, elem, ctx),
        ExprKind::Predicate(inner) => eval_predicate(tree, *inner, elem, ctx),
        ExprKind::Brace(inner) => eval_brace(tree, *inner, elem, ctx),
        ExprKind::Search(inner) => eval_search(tree, *inner, elem, ctx),
        ExprKind::SelfRef => Ok(vec![eval_self(elem, ctx)]),
        ExprKind::Compare(op, rhs) => eval_compare_node(tree, *op, rhs, elem, ctx),
        ExprKind::FunctionKey => {
            let binding = ctx.self_binding().ok_or(FindError)?;
            let key_value = match &binding.key {
                SelfKey::Name(s) => Value::String(s.clone()),
                SelfKey::Index(i) => Value::Number(Number::from(*i)),
            };
            Ok(vec![Cow::Owned(key_value)])
        }
        ExprKind::FunctionContains(inner, target) => eval_contains(tree, *inner, target, elem, ctx),
        ExprKind::FunctionNot(inner) => eval_not(tree, *inner, elem, ctx),
    }
}

/// Run a (sub)expression to completion against an explicit set of starting inputs, eagerly
/// collecting every result.
///
/// Used both for nested finds (predicate bodies, slice bounds, comparison operands — anything
/// initiated from inside another node's local match) and, with `ctx`'s `finding` flag left at
/// `true`, for `Search`'s own per-node visit (spec.md §4.2, "Search"). `NotFound` is suppressed
/// uniformly at every step regardless of that flag (DESIGN.md, "NotFound suppression").
fn run_subexpr<'v>(
    tree: &ExprTree,
    id: ExprId,
    inputs: Vec<Node<'v>>,
    ctx: Context<'v>,
) -> Vec<Node<'v>> {
    let begin = tree.begin(id);
    let mut out = Vec::new();
    dfs_eager(tree, begin, inputs, ctx, &mut out);
    out
}

fn dfs_eager<'v>(
    tree: &ExprTree,
    node: ExprId,
    inputs: Vec<Node<'v>>,
    ctx: Context<'v>,
    out: &mut Vec<Node<'v>>,
) {
    let nxt = tree.next(node);
    for elem in inputs {
        let produced = match local_match(tree, node, &elem, &ctx) {
            Ok(v) if !v.is_empty() => v,
            _ => continue,
        };
        match nxt {
            None => out.extend(produced),
            Some(next_id) => {
                let child_ctx = ctx.clone().with_parent(elem.as_ref().clone());
                dfs_eager(tree, next_id, produced, child_ctx, out);
            }
        }
    }
}

/// Return all matches of `id`'s chain against `doc`, in traversal order (spec.md §4.1, `find`).
#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", skip(tree, doc)))]
pub fn find<'v>(tree: &ExprTree, id: ExprId, doc: &'v Value) -> NodeList<'v> {
    let begin = tree.begin(id);
    let ctx = Context::empty().with_root_if_unset(doc).with_finding(true);
    let mut out = Vec::new();
    dfs_eager(tree, begin, vec![Cow::Borrowed(doc)], ctx, &mut out);
    NodeList::from_vec(out)
}

/// Return the first match of `id`'s chain against `doc`, or `FindError` if there is none
/// (spec.md §4.1, `find_first`).
#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", skip(tree, doc)))]
pub fn find_first<'v>(tree: &ExprTree, id: ExprId, doc: &'v Value) -> Result<Node<'v>, FindError> {
    find(tree, id, doc).into_iter().next().ok_or(FindError)
}

#[derive(Debug)]
struct Frame<'v> {
    node: ExprId,
    nxt: Option<ExprId>,
    elems: std::vec::IntoIter<Node<'v>>,
    ctx: Context<'v>,
}

/// A lazily-produced sequence of matches, identical to [`find`] but yielded one at a time so a
/// consumer may stop early (spec.md §4.1, `find_iter`).
///
/// Implemented as an explicit stack of in-progress chain frames rather than recursion, so that
/// `next()` can suspend and resume between yields the way the original generator-based driver
/// does.
#[derive(Debug)]
pub struct FindIter<'t, 'v> {
    tree: &'t ExprTree,
    stack: Vec<Frame<'v>>,
    pending: VecDeque<Node<'v>>,
}

/// Build a lazy [`FindIter`] over `id`'s chain against `doc` (spec.md §4.1, `find_iter`).
#[cfg_attr(feature = "trace", tracing::instrument(level = "trace", skip(tree, doc)))]
pub fn find_iter<'t, 'v>(tree: &'t ExprTree, id: ExprId, doc: &'v Value) -> FindIter<'t, 'v> {
    let begin = tree.begin(id);
    let ctx = Context::empty().with_root_if_unset(doc).with_finding(true);
    let frame = Frame {
        node: begin,
        nxt: tree.next(begin),
        elems: vec![Cow::Borrowed(doc)].into_iter(),
        ctx,
    };
    FindIter {
        tree,
        stack: vec![frame],
        pending: VecDeque::new(),
    }
}

impl<'t, 'v> Iterator for FindIter<'t, 'v> {
    type Item = Node<'v>;

    fn next(&mut self) -> Option<Node<'v>> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            let idx = match self.stack.len().checked_sub(1) {
                Some(idx) => idx,
                None => return None,
            };
            let next_elem = self.stack[idx].elems.next();
            let elem = match next_elem {
                Some(elem) => elem,
                None => {
                    self.stack.pop();
                    continue;
                }
            };
            let node = self.stack[idx].node;
            let nxt = self.stack[idx].nxt;
            let produced = {
                let ctx = &self.stack[idx].ctx;
                match local_match(self.tree, node, &elem, ctx) {
                    Ok(v) if !v.is_empty() => v,
                    _ => continue,
                }
            };
            match nxt {
                None => self.pending.extend(produced),
                Some(next_id) => {
                    let child_ctx = self.stack[idx].ctx.clone().with_parent(elem.as_ref().clone());
                    self.stack.push(Frame {
                        node: next_id,
                        nxt: self.tree.next(next_id),
                        elems: produced.into_iter(),
                        ctx: child_ctx,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Operand;
    use serde_json::json;

    #[test]
    fn scenario_1_simple_name() {
        let mut tree = ExprTree::new();
        let a = tree.root().name(&mut tree, Some("a"));
        let hit = json!({"a": 1});
        assert_eq!(find(&tree, a.id(), &hit).all(), vec![Cow::Owned(json!(1))]);
        let miss = json!({"b": 1});
        assert!(find(&tree, a.id(), &miss).is_empty());
    }

    #[test]
    fn scenario_2_array_all_rejects_object() {
        let mut tree = ExprTree::new();
        let sel = tree.root().all(&mut tree);
        let doc = json!({"x": 1, "y": 2});
        assert!(find(&tree, sel.id(), &doc).is_empty());
    }

    #[test]
    fn scenario_3_slice() {
        let mut tree = ExprTree::new();
        let sel = tree
            .root()
            .slice(&mut tree, None, Some(Bound::Literal(3)), Some(Bound::Literal(2)));
        let doc = json!([1, 2, 3, 4]);
        let got: Vec<_> = find(&tree, sel.id(), &doc).all();
        assert_eq!(got, vec![Cow::Owned(json!(1)), Cow::Owned(json!(3))]);
    }

    #[test]
    fn scenario_4_predicate_equality() {
        // `Predicate` enumerates its own incoming container's (key, value) pairs, so it is
        // chained directly onto whatever produces the array/object being filtered — never onto
        // an already-exploded `Array(None)` wildcard, which would hand it one bare item at a
        // time instead of the container to iterate.
        let mut tree = ExprTree::new();
        let sel = tree.root().predicate(&mut tree, |t| {
            t.self_ref()
                .name(t, Some("a"))
                .eq_(t, Operand::literal(1))
                .id()
        });
        let doc = json!([{"a": 1}, {"a": 2}, {}]);
        let got = find(&tree, sel.id(), &doc).all();
        assert_eq!(got, vec![Cow::Owned(json!({"a": 1}))]);
    }

    #[test]
    fn scenario_5_recursive_search_preorder() {
        let mut tree = ExprTree::new();
        let sel = tree
            .root()
            .search(&mut tree, |t| t.name(Some("a")).id());
        let doc = json!({"a": {"a": 0}});
        let got = find(&tree, sel.id(), &doc).all();
        assert_eq!(got, vec![Cow::Owned(json!({"a": 0})), Cow::Owned(json!(0))]);
    }

    #[test]
    fn search_of_predicate_wraps_only_the_initial_visit() {
        // A match-all predicate (`@` truthy-checked against itself) chained under `Search`:
        // the singleton-array wrap applies only once, at the root of the search, not at every
        // recursive step — so descent below that point runs the predicate directly on each
        // node it reaches, container or not (non-containers simply produce nothing).
        let mut tree = ExprTree::new();
        let sel = tree
            .root()
            .search(&mut tree, |t| t.predicate(|t2| t2.self_ref().id()).id());
        let doc = json!([[1], 2]);
        let got = find(&tree, sel.id(), &doc).all();
        assert_eq!(
            got,
            vec![
                Cow::Owned(json!([[1], 2])),
                Cow::Owned(json!([1])),
                Cow::Owned(json!(2)),
                Cow::Owned(json!(1)),
            ]
        );
    }

    #[test]
    fn scenario_6_brace_enabled_chained_filtering() {
        let mut tree = ExprTree::new();
        let braced = tree.root().brace(&mut tree, |t| {
            t.root()
                .predicate(t, |t2| t2.self_ref().lt(t2, Operand::literal(100)).id())
                .id()
        });
        let sel = braced.predicate(&mut tree, |t| t.self_ref().ge(t, Operand::literal(50)).id());
        let doc = json!([100, 99, 50, 1]);
        let got = find(&tree, sel.id(), &doc).all();
        assert_eq!(got, vec![Cow::Owned(json!(99)), Cow::Owned(json!(50))]);
    }

    #[test]
    fn scenario_7_contains_key() {
        let mut tree = ExprTree::new();
        let sel = tree.root().predicate(&mut tree, |t| {
            t.contains(|t2| t2.key().id(), Operand::literal("book")).id()
        });
        let doc = json!({"book 1": 1, "picture 2": 2});
        let got = find(&tree, sel.id(), &doc).all();
        assert_eq!(got, vec![Cow::Owned(json!(1))]);
    }

    #[test]
    fn scenario_8_not_function() {
        let mut tree = ExprTree::new();
        let sel = tree.root().predicate(&mut tree, |t| {
            t.not(|t| t.self_ref().name(t, Some("enable")).id()).id()
        });
        let doc = json!([{"enable": true}, {"enable": false}, {}]);
        let got = find(&tree, sel.id(), &doc).all();
        assert_eq!(
            got,
            vec![Cow::Owned(json!({"enable": false})), Cow::Owned(json!({}))]
        );
    }

    #[test]
    fn find_iter_matches_find() {
        let mut tree = ExprTree::new();
        let sel = tree.root().all(&mut tree);
        let doc = json!([1, 2, 3]);
        let eager = find(&tree, sel.id(), &doc).all();
        let lazy: Vec<_> = find_iter(&tree, sel.id(), &doc).collect();
        assert_eq!(eager, lazy);
    }

    #[test]
    fn find_first_errs_on_empty() {
        let mut tree = ExprTree::new();
        let sel = tree.root().name(&mut tree, Some("missing"));
        let doc = json!({});
        assert!(find_first(&tree, sel.id(), &doc).is_err());
    }
}

//! Black-box scenarios against the public `nodepath` surface (no internal types).

use std::borrow::Cow;

use nodepath::{find, find_first, find_iter, Bound, ExprTree, FindError, JsonPathExt, Operand};
use serde_json::json;

#[test]
fn scenario_1_name_accessor() {
    let mut tree = ExprTree::new();
    let sel = tree.root().name(&mut tree, Some("a"));

    let present = json!({"a": 1});
    assert_eq!(find(&tree, sel.id(), &present).all(), vec![Cow::Owned(json!(1))]);

    let absent = json!({"b": 1});
    assert!(find(&tree, sel.id(), &absent).is_empty());
}

#[test]
fn scenario_2_wildcard_array_vs_object() {
    let mut tree = ExprTree::new();
    let sel = tree.root().all(&mut tree);

    let arr = json!([1, 2, 3]);
    assert_eq!(
        find(&tree, sel.id(), &arr).all(),
        vec![Cow::Owned(json!(1)), Cow::Owned(json!(2)), Cow::Owned(json!(3))]
    );

    let obj = json!({"x": 1, "y": 2});
    assert!(find(&tree, sel.id(), &obj).is_empty());
}

#[test]
fn scenario_3_slice() {
    let mut tree = ExprTree::new();
    let sel = tree
        .root()
        .slice(&mut tree, None, Some(Bound::Literal(3)), Some(Bound::Literal(2)));

    let doc = json!([1, 2, 3, 4]);
    assert_eq!(
        find(&tree, sel.id(), &doc).all(),
        vec![Cow::Owned(json!(1)), Cow::Owned(json!(3))]
    );
}

#[test]
fn scenario_4_predicate_equality() {
    // A predicate bracket is chained directly onto whatever produces the array/object it
    // filters, never onto an already-exploded wildcard — `Predicate` enumerates the container's
    // own (key, value) pairs itself.
    let mut tree = ExprTree::new();
    let sel = tree.root().predicate(&mut tree, |t| {
        t.self_ref().name(t, Some("a")).eq_(t, Operand::literal(1)).id()
    });

    let doc = json!([{"a": 1}, {"a": 2}, {}]);
    assert_eq!(find(&tree, sel.id(), &doc).all(), vec![Cow::Owned(json!({"a": 1}))]);
}

#[test]
fn scenario_5_recursive_search_preorder() {
    let mut tree = ExprTree::new();
    let sel = tree.root().search(&mut tree, |t| t.name(Some("a")).id());

    let doc = json!({"a": {"a": 0}});
    assert_eq!(
        find(&tree, sel.id(), &doc).all(),
        vec![Cow::Owned(json!({"a": 0})), Cow::Owned(json!(0))]
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
    assert_eq!(
        find(&tree, sel.id(), &doc).all(),
        vec![Cow::Owned(json!(99)), Cow::Owned(json!(50))]
    );
}

#[test]
fn scenario_7_contains_key() {
    let mut tree = ExprTree::new();
    let sel = tree.root().predicate(&mut tree, |t| {
        t.contains(|t2| t2.key().id(), Operand::literal("book")).id()
    });

    let doc = json!({"book 1": 1, "picture 2": 2});
    assert_eq!(find(&tree, sel.id(), &doc).all(), vec![Cow::Owned(json!(1))]);
}

#[test]
fn scenario_8_not_function() {
    let mut tree = ExprTree::new();
    let sel = tree.root().predicate(&mut tree, |t| {
        t.not(|t2| t2.self_ref().name(t2, Some("enable")).id()).id()
    });

    let doc = json!([{"enable": true}, {"enable": false}, {}]);
    assert_eq!(
        find(&tree, sel.id(), &doc).all(),
        vec![Cow::Owned(json!({"enable": false})), Cow::Owned(json!({}))]
    );
}

#[test]
fn find_first_matches_first_of_find() {
    let mut tree = ExprTree::new();
    let sel = tree.root().name(&mut tree, Some("a")).all(&mut tree);
    let doc = json!({"a": [1, 2, 3]});

    let all = find(&tree, sel.id(), &doc).all();
    let first = find_first(&tree, sel.id(), &doc).unwrap();
    assert_eq!(first, all[0]);
}

#[test]
fn find_first_errs_on_empty_result() {
    let mut tree = ExprTree::new();
    let sel = tree.root().name(&mut tree, Some("missing"));
    let doc = json!({});
    assert_eq!(find_first(&tree, sel.id(), &doc), Err(FindError));
}

#[test]
fn find_iter_yields_exactly_the_find_sequence() {
    let mut tree = ExprTree::new();
    let sel = tree.root().search(&mut tree, |t| t.name(Some("a")).id());
    let doc = json!({"a": {"a": 0, "b": {"a": 1}}, "c": {"a": 2}});

    let eager: Vec<_> = find(&tree, sel.id(), &doc).all();
    let lazy: Vec<_> = find_iter(&tree, sel.id(), &doc).collect();
    assert_eq!(eager, lazy);
}

#[test]
fn not_not_is_double_negation_of_truthiness() {
    let mut tree = ExprTree::new();
    let once = tree.root().predicate(&mut tree, |t| t.not(|t2| t2.self_ref().id()).id());
    let twice = tree.root().predicate(&mut tree, |t| {
        t.not(|t2| t2.not(|t3| t3.self_ref().id()).id()).id()
    });

    let doc = json!([true, false, 1, 0, "", "x", null, [], [1]]);
    let once_result = find(&tree, once.id(), &doc).all();
    let twice_result = find(&tree, twice.id(), &doc).all();

    // `not(not(e))` keeps exactly the complement of what `not(e)` keeps, out of every element
    // that was a candidate for either (the whole array here).
    for item in doc.as_array().unwrap() {
        let item = Cow::Borrowed(item);
        let kept_once = once_result.contains(&item);
        let kept_twice = twice_result.contains(&item);
        assert_ne!(kept_once, kept_twice, "item {item:?} should flip between not(e) and not(not(e))");
    }
}

#[test]
fn evaluation_does_not_mutate_the_document() {
    let mut tree = ExprTree::new();
    let sel = tree.root().search(&mut tree, |t| t.name(None::<&str>).id());
    let doc = json!({"a": [1, 2, {"b": 3}]});
    let before = doc.clone();

    let _ = find(&tree, sel.id(), &doc).all();

    assert_eq!(doc, before);
}

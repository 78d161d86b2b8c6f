use crate::testutil::*;
use crate::types::{ClassId, MemberKind};

fn method_key(graph: &crate::ClassGraph, name: &str, desc: &str) -> crate::MemberKey {
    graph.member_key(
        MemberKind::Method,
        graph.interner().intern(name),
        graph.interner().intern(desc),
    )
}

fn field_key(graph: &crate::ClassGraph, name: &str, desc: &str) -> crate::MemberKey {
    graph.member_key(
        MemberKind::Field,
        graph.interner().intern(name),
        graph.interner().intern(desc),
    )
}

fn lookup(graph: &crate::ClassGraph, name: &str) -> ClassId {
    graph
        .base_context()
        .unwrap()
        .get(graph.interner().intern(name))
        .unwrap()
}

#[test]
fn superclass_methods_beat_interface_defaults() {
    let graph = graph_of(vec![
        interface("pkg/Api").method("run", "()V").build(),
        class("pkg/Base").method("run", "()V").build(),
        class("pkg/Impl")
            .extends("pkg/Base")
            .implements("pkg/Api")
            .build(),
    ]);

    let impl_id = lookup(&graph, "pkg/Impl");
    let base_id = lookup(&graph, "pkg/Base");
    let key = method_key(&graph, "run", "()V");

    let resolved = graph.resolve_method(impl_id, &key).unwrap();
    assert_eq!(graph.member(resolved).owner(), base_id);
}

#[test]
fn interface_default_found_when_no_class_declares() {
    let graph = graph_of(vec![
        interface("pkg/Api").method("run", "()V").build(),
        class("pkg/Base").build(),
        class("pkg/Impl")
            .extends("pkg/Base")
            .implements("pkg/Api")
            .build(),
    ]);

    let impl_id = lookup(&graph, "pkg/Impl");
    let api_id = lookup(&graph, "pkg/Api");
    let key = method_key(&graph, "run", "()V");

    let resolved = graph.resolve_method(impl_id, &key).unwrap();
    assert_eq!(graph.member(resolved).owner(), api_id);
}

#[test]
fn maximally_specific_interface_wins() {
    let graph = graph_of(vec![
        interface("pkg/Wide").method("run", "()V").build(),
        interface("pkg/Narrow")
            .implements("pkg/Wide")
            .method("run", "()V")
            .build(),
        class("pkg/Impl")
            .implements("pkg/Wide")
            .implements("pkg/Narrow")
            .build(),
    ]);

    let impl_id = lookup(&graph, "pkg/Impl");
    let narrow_id = lookup(&graph, "pkg/Narrow");
    let key = method_key(&graph, "run", "()V");

    let resolved = graph.resolve_method(impl_id, &key).unwrap();
    assert_eq!(graph.member(resolved).owner(), narrow_id);
}

#[test]
fn abstract_candidates_lose_to_the_concrete_one() {
    let graph = graph_of(vec![
        interface("pkg/Contract").method_flags("run", "()V", PUBLIC | ABSTRACT).build(),
        interface("pkg/Default").method("run", "()V").build(),
        class("pkg/Impl")
            .implements("pkg/Contract")
            .implements("pkg/Default")
            .build(),
    ]);

    let impl_id = lookup(&graph, "pkg/Impl");
    let default_id = lookup(&graph, "pkg/Default");
    let key = method_key(&graph, "run", "()V");

    let resolved = graph.resolve_method(impl_id, &key).unwrap();
    assert_eq!(graph.member(resolved).owner(), default_id);
}

#[test]
fn static_and_private_interface_methods_are_not_inherited() {
    let graph = graph_of(vec![
        interface("pkg/Util")
            .method_flags("helper", "()V", PUBLIC | STATIC)
            .build(),
        class("pkg/User").implements("pkg/Util").build(),
    ]);

    let user_id = lookup(&graph, "pkg/User");
    let key = method_key(&graph, "helper", "()V");
    assert!(graph.resolve_method(user_id, &key).is_none());
}

#[test]
fn interface_fields_take_precedence_over_superclass_fields() {
    let graph = graph_of(vec![
        interface("pkg/Consts").field("MAX", "I").build(),
        class("pkg/Base").field("MAX", "I").build(),
        class("pkg/Impl")
            .extends("pkg/Base")
            .implements("pkg/Consts")
            .build(),
    ]);

    let impl_id = lookup(&graph, "pkg/Impl");
    let consts_id = lookup(&graph, "pkg/Consts");
    let key = field_key(&graph, "MAX", "I");

    let resolved = graph.resolve_field(impl_id, &key).unwrap();
    assert_eq!(graph.member(resolved).owner(), consts_id);
}

#[test]
fn field_resolution_climbs_the_superclass_chain() {
    let graph = graph_of(vec![
        class("pkg/Root").field("count", "I").build(),
        class("pkg/Mid").extends("pkg/Root").build(),
        class("pkg/Leaf").extends("pkg/Mid").build(),
    ]);

    let leaf_id = lookup(&graph, "pkg/Leaf");
    let root_id = lookup(&graph, "pkg/Root");
    let key = field_key(&graph, "count", "I");

    let resolved = graph.resolve_field(leaf_id, &key).unwrap();
    assert_eq!(graph.member(resolved).owner(), root_id);
}

#[test]
fn resolution_is_deterministic_and_memoized() {
    let graph = graph_of(vec![
        class("pkg/Base").method("run", "()V").build(),
        class("pkg/Impl").extends("pkg/Base").build(),
    ]);

    let impl_id = lookup(&graph, "pkg/Impl");
    let key = method_key(&graph, "run", "()V");
    let first = graph.resolve_method(impl_id, &key);
    let second = graph.resolve_method(impl_id, &key);
    assert_eq!(first, second);

    // Negative answers are cached too and stay stable.
    let missing = method_key(&graph, "absent", "()V");
    assert!(graph.resolve_method(impl_id, &missing).is_none());
    assert!(graph.resolve_method(impl_id, &missing).is_none());
}

#[test]
fn resolution_is_stable_under_concurrent_callers() {
    use std::sync::Arc;

    let graph = Arc::new(graph_of(vec![
        interface("pkg/Api").method("run", "()V").build(),
        class("pkg/Base").method("run", "()V").build(),
        class("pkg/Impl")
            .extends("pkg/Base")
            .implements("pkg/Api")
            .build(),
    ]));

    let impl_id = lookup(&graph, "pkg/Impl");
    let key = method_key(&graph, "run", "()V");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let graph = graph.clone();
        let key = key;
        handles.push(std::thread::spawn(move || graph.resolve_method(impl_id, &key)));
    }
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert!(results[0].is_some());
}

use super::*;
use crate::testutil::*;

fn sample() -> crate::graph::ClassGraph {
    graph_of(vec![
        class("pkg/Animal").build(),
        class("pkg/Cat").extends("pkg/Animal").build(),
        interface("pkg/Walker").build(),
        class("pkg/Dog")
            .extends("pkg/Animal")
            .implements("pkg/Walker")
            .build(),
    ])
}

#[test]
fn object_accepts_every_reference_type() {
    let graph = sample();
    let ctx = graph.base_context().unwrap();

    assert!(is_assignable_from(&graph, ctx, "Ljava/lang/Object;", "Lpkg/Cat;"));
    assert!(is_assignable_from(&graph, ctx, "Ljava/lang/Object;", "Lcom/unknown/Thing;"));
    assert!(is_assignable_from(&graph, ctx, "Ljava/lang/Object;", "[I"));
    // ... but not primitives.
    assert!(!is_assignable_from(&graph, ctx, "Ljava/lang/Object;", "I"));
}

#[test]
fn primitives_require_exact_match() {
    let graph = sample();
    let ctx = graph.base_context().unwrap();

    assert!(is_assignable_from(&graph, ctx, "I", "I"));
    assert!(!is_assignable_from(&graph, ctx, "J", "I"));
    assert!(!is_assignable_from(&graph, ctx, "I", "J"));
    assert!(!is_assignable_from(&graph, ctx, "D", "F"));
}

#[test]
fn arrays_require_equal_dimensions() {
    let graph = sample();
    let ctx = graph.base_context().unwrap();

    assert!(is_assignable_from(&graph, ctx, "[I", "[I"));
    assert!(!is_assignable_from(&graph, ctx, "[[I", "[I"));
    assert!(!is_assignable_from(&graph, ctx, "[I", "[[I"));
    assert!(!is_assignable_from(&graph, ctx, "[I", "[J"));
    // Equal dimensions with assignable object components.
    assert!(is_assignable_from(&graph, ctx, "[Lpkg/Animal;", "[Lpkg/Cat;"));
    assert!(!is_assignable_from(&graph, ctx, "[Lpkg/Cat;", "[Lpkg/Animal;"));
}

#[test]
fn upward_search_through_classes_and_interfaces() {
    let graph = sample();
    let ctx = graph.base_context().unwrap();

    assert!(is_assignable_from(&graph, ctx, "Lpkg/Animal;", "Lpkg/Cat;"));
    assert!(is_assignable_from(&graph, ctx, "Lpkg/Walker;", "Lpkg/Dog;"));
    // Not in the super direction.
    assert!(!is_assignable_from(&graph, ctx, "Lpkg/Cat;", "Lpkg/Animal;"));
    // Siblings are unrelated.
    assert!(!is_assignable_from(&graph, ctx, "Lpkg/Cat;", "Lpkg/Dog;"));
}

#[test]
fn unknown_relationships_are_never_assumed() {
    let graph = sample();
    let ctx = graph.base_context().unwrap();

    assert!(!is_assignable_from(&graph, ctx, "Lcom/a/X;", "Lcom/b/Y;"));
    assert!(!is_assignable_from(&graph, ctx, "Lpkg/Animal;", "Lcom/unknown/Pet;"));
    assert!(!is_assignable_from(&graph, ctx, "Lcom/unknown/Pet;", "Lpkg/Cat;"));
}

use super::*;
use crate::error::CoreError;
use crate::testutil::*;
use crate::types::MemberKind;

#[test]
fn edges_are_wired_both_ways() {
    let graph = graph_of(vec![
        class("pkg/Base").method("run", "()V").build(),
        class("pkg/Mid").extends("pkg/Base").build(),
        interface("pkg/Api").build(),
        class("pkg/Leaf")
            .extends("pkg/Mid")
            .implements("pkg/Api")
            .build(),
    ]);

    let ctx = graph.base_context().unwrap();
    let interner = graph.interner();
    let base = ctx.get(interner.intern("pkg/Base")).unwrap();
    let mid = ctx.get(interner.intern("pkg/Mid")).unwrap();
    let api = ctx.get(interner.intern("pkg/Api")).unwrap();
    let leaf = ctx.get(interner.intern("pkg/Leaf")).unwrap();

    assert_eq!(graph.class(mid).super_class(), Some(base));
    assert_eq!(graph.class(base).children(), &[mid]);
    assert_eq!(graph.class(leaf).super_class(), Some(mid));
    assert_eq!(graph.class(leaf).interface_classes(), &[api]);
    assert_eq!(graph.class(api).children(), &[leaf]);

    let parents: Vec<_> = graph.class(leaf).parents().collect();
    assert_eq!(parents, vec![mid, api]);
}

#[test]
fn unknown_supertypes_produce_no_edges() {
    let graph = graph_of(vec![
        class("pkg/Alone")
            .extends("com/vendor/Absent")
            .implements("com/vendor/AbsentApi")
            .build(),
    ]);

    let ctx = graph.base_context().unwrap();
    let alone = ctx.get(graph.interner().intern("pkg/Alone")).unwrap();
    assert_eq!(graph.class(alone).super_class(), None);
    assert!(graph.class(alone).interface_classes().is_empty());
    // The unresolved names are still remembered for the record.
    assert_eq!(
        graph.interner().resolve(graph.class(alone).super_name().unwrap()).as_ref(),
        "com/vendor/Absent"
    );
}

#[test]
fn duplicate_member_id_is_fatal() {
    let builder = GraphBuilder::new(RemapOptions::default());
    let err = builder
        .add_class(
            class("pkg/Broken")
                .method("m", "()V")
                .method("m", "()V")
                .build(),
        )
        .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateMember { .. }));
    assert!(!err.is_unit_fault());
}

#[test]
fn same_name_field_and_method_never_collide() {
    let builder = GraphBuilder::new(RemapOptions::default());
    builder
        .add_class(
            class("pkg/Dual")
                .method("value", "()I")
                .field("value", "I")
                .build(),
        )
        .expect("field and method ids live in distinct spaces");
    let graph = builder.freeze();

    let ctx = graph.base_context().unwrap();
    let dual = ctx.get(graph.interner().intern("pkg/Dual")).unwrap();
    assert_eq!(graph.class(dual).member_ids().len(), 2);
}

#[test]
fn malformed_descriptor_is_a_unit_fault() {
    let builder = GraphBuilder::new(RemapOptions::default());
    let err = builder
        .add_class(class("pkg/Bad").method("m", "(L;)V").build())
        .unwrap_err();
    assert!(matches!(err, CoreError::MalformedHeader { .. }));
    assert!(err.is_unit_fault());
}

#[test]
fn duplicate_class_definition_keeps_the_first() {
    let builder = GraphBuilder::new(RemapOptions::default());
    builder
        .add_class(class("pkg/Twice").method("first", "()V").build())
        .unwrap();
    builder
        .add_class(class("pkg/Twice").method("second", "()V").build())
        .unwrap();
    let graph = builder.freeze();

    let ctx = graph.base_context().unwrap();
    let id = ctx.get(graph.interner().intern("pkg/Twice")).unwrap();
    let key = graph.member_key(
        MemberKind::Method,
        graph.interner().intern("first"),
        graph.interner().intern("()V"),
    );
    assert!(graph.get_member(id, &key).is_some());
}

#[test]
fn descriptor_blind_field_lookup_scans_declaration_order() {
    let options = RemapOptions {
        ignore_field_desc: true,
        ..RemapOptions::default()
    };
    let graph = graph_with(
        options,
        vec![class("pkg/Holder").field("size", "I").build()],
    );

    let ctx = graph.base_context().unwrap();
    let holder = ctx.get(graph.interner().intern("pkg/Holder")).unwrap();
    // Lookup key carries no descriptor at all.
    let key = graph.member_key(
        MemberKind::Field,
        graph.interner().intern("size"),
        graph.interner().intern("J"),
    );
    assert!(key.desc.is_none());
    assert!(graph.get_member(holder, &key).is_some());
}

#[test]
fn class_ids_do_not_depend_on_insertion_order() {
    let forward = graph_of(vec![
        class("pkg/A").build(),
        class("pkg/B").extends("pkg/A").build(),
    ]);
    let reverse = graph_of(vec![
        class("pkg/B").extends("pkg/A").build(),
        class("pkg/A").build(),
    ]);

    for g in [&forward, &reverse] {
        let ctx = g.base_context().unwrap();
        let a = ctx.get(g.interner().intern("pkg/A")).unwrap();
        let b = ctx.get(g.interner().intern("pkg/B")).unwrap();
        assert_eq!(g.class(b).super_class(), Some(a));
    }
    assert_eq!(forward.class_count(), reverse.class_count());
}

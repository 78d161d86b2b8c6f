//! Descriptor assignability.
//!
//! Answers "is a value of the subtype descriptor assignable to the supertype
//! descriptor" against one version context, under the open-world rule:
//! unknown relationships are never assumed assignable. Total and
//! side-effect-free; the resolver and the bridge linker lean on it heavily.

use crate::graph::{ClassGraph, VersionContext};
use crate::types::ClassId;
use remap_common::descriptor;
use remap_common::limits::MAX_HIERARCHY_WALK;
use rustc_hash::FxHashSet;

const OBJECT_DESC: &str = "Ljava/lang/Object;";
const OBJECT_NAME: &str = "java/lang/Object";

/// Is `sub_desc` assignable to `super_desc`?
///
/// Primitives (including array element primitives) must match exactly.
/// Arrays require identical dimension counts and assignable components.
/// `Ljava/lang/Object;` accepts every reference type.
pub fn is_assignable_from(
    graph: &ClassGraph,
    ctx: &VersionContext,
    super_desc: &str,
    sub_desc: &str,
) -> bool {
    if super_desc == sub_desc {
        return true;
    }

    // The root object type accepts any reference type, arrays included.
    if super_desc == OBJECT_DESC {
        return !descriptor::is_primitive(sub_desc);
    }

    let super_dims = descriptor::array_dimensions(super_desc);
    let sub_dims = descriptor::array_dimensions(sub_desc);
    if super_dims != sub_dims {
        return false;
    }

    let super_elem = descriptor::element_type(super_desc);
    let sub_elem = descriptor::element_type(sub_desc);
    if descriptor::is_primitive(super_elem) || descriptor::is_primitive(sub_elem) {
        // Unequal primitives (the equal case was the short circuit above).
        return super_elem == sub_elem;
    }

    let (Some(super_name), Some(sub_name)) = (
        descriptor::object_name(super_elem),
        descriptor::object_name(sub_elem),
    ) else {
        return false;
    };
    if super_name == sub_name || super_name == OBJECT_NAME {
        return true;
    }

    let super_id = lookup(graph, ctx, super_name);
    let sub_id = lookup(graph, ctx, sub_name);

    match (super_id, sub_id) {
        (_, Some(sub_id)) => {
            // Walk upward from the subtype. When the supertype is a known
            // non-interface class the path can only run up the single
            // superclass chain; otherwise interfaces must be searched too.
            let super_is_class = super_id
                .map(|id| !graph.class(id).is_interface())
                .unwrap_or(false);
            search_up(graph, sub_id, super_name, super_is_class)
        }
        (Some(super_id), None) => search_down(graph, super_id, sub_name),
        (None, None) => false,
    }
}

fn lookup(graph: &ClassGraph, ctx: &VersionContext, name: &str) -> Option<ClassId> {
    ctx.get(graph.interner().intern(name))
}

fn search_up(graph: &ClassGraph, start: ClassId, target: &str, classes_only: bool) -> bool {
    let target = graph.interner().intern(target);
    let mut visited: FxHashSet<ClassId> = FxHashSet::default();
    let mut worklist = vec![start];
    visited.insert(start);

    while let Some(id) = worklist.pop() {
        let node = graph.class(id);
        if node.name() == target {
            return true;
        }
        if visited.len() > MAX_HIERARCHY_WALK {
            return false;
        }
        if let Some(sup) = node.super_class() {
            if visited.insert(sup) {
                worklist.push(sup);
            }
        }
        if !classes_only {
            for &itf in node.interface_classes() {
                if visited.insert(itf) {
                    worklist.push(itf);
                }
            }
        }
    }
    false
}

fn search_down(graph: &ClassGraph, start: ClassId, target: &str) -> bool {
    let target = graph.interner().intern(target);
    let mut visited: FxHashSet<ClassId> = FxHashSet::default();
    let mut worklist = vec![start];
    visited.insert(start);

    while let Some(id) = worklist.pop() {
        let node = graph.class(id);
        if node.name() == target {
            return true;
        }
        if visited.len() > MAX_HIERARCHY_WALK {
            return false;
        }
        for &child in node.children() {
            if visited.insert(child) {
                worklist.push(child);
            }
        }
    }
    false
}

#[cfg(test)]
#[path = "tests/assignable_tests.rs"]
mod tests;

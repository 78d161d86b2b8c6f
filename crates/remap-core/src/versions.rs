//! Multi-release version contexts.
//!
//! A multi-release artifact may redefine a class per runtime version. Each
//! version gets a fully isolated hierarchy: a class not redefined at version
//! `v` appears there as a *shadow* — a fresh node with the same structural
//! data, freshly re-created members and its own (initially empty) edge sets,
//! pointing back at its origin node. Shadows keep version-specific overrides
//! from leaking edges across versions while letting identity-sensitive
//! consumers follow the origin pointer.

use crate::graph::{ClassNode, VersionContext};
use crate::member::{MemberNode, NameCell};
use crate::types::{ClassId, MemberId, VersionTag};
use remap_common::Atom;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Clone `origin`'s structural data into a new node tagged `version`.
///
/// Members are re-created, never shared: each version's copy has its own
/// destination slot and bridge cache. Edges start empty and are wired by the
/// freeze pass against the shadow's own context.
pub(crate) fn shadow_class(
    classes: &mut Vec<ClassNode>,
    members: &mut Vec<MemberNode>,
    origin: ClassId,
    version: VersionTag,
) -> ClassId {
    let id = ClassId(classes.len() as u32);
    let (name, super_name, interfaces, access, is_input, tags, origin_members) = {
        let o = &classes[origin.index()];
        (
            o.name,
            o.super_name,
            o.interfaces.clone(),
            o.access,
            o.is_input,
            o.tags.clone(),
            o.member_list.clone(),
        )
    };

    let mut node = ClassNode {
        name,
        super_name,
        interfaces,
        access,
        version,
        origin,
        is_input,
        members: FxHashMap::default(),
        member_list: Vec::with_capacity(origin_members.len()),
        super_class: None,
        interface_classes: Vec::new(),
        children: Vec::new(),
        tags,
    };
    for omid in origin_members {
        let (key, desc, access) = {
            let om = &members[omid.index()];
            (*om.key(), om.desc(), om.access())
        };
        let mid = MemberId(members.len() as u32);
        members.push(MemberNode {
            owner: id,
            key,
            desc,
            access,
            dest: NameCell::new(),
            bridge_target: OnceLock::new(),
        });
        node.members.insert(key, mid);
        node.member_list.push(mid);
    }
    classes.push(node);
    id
}

/// Build one isolated context per version tag present in the input.
///
/// For each logical class, version `v` binds the definition with the
/// greatest tag ≤ `v` — the class's own node when defined at exactly `v`,
/// a fresh shadow otherwise. A class introduced only at a later version is
/// absent from earlier contexts.
pub(crate) fn build_contexts(
    classes: &mut Vec<ClassNode>,
    members: &mut Vec<MemberNode>,
    defs: &FxHashMap<Atom, BTreeMap<VersionTag, ClassId>>,
    logical_names: &[Atom],
    tags_seen: &BTreeSet<VersionTag>,
) -> BTreeMap<VersionTag, VersionContext> {
    let mut contexts = BTreeMap::new();
    for &version in tags_seen {
        let mut by_name = FxHashMap::default();
        for &name in logical_names {
            let Some(per_version) = defs.get(&name) else {
                continue;
            };
            let Some((&def_version, &def_id)) = per_version.range(..=version).next_back() else {
                continue;
            };
            let id = if def_version == version {
                def_id
            } else {
                shadow_class(classes, members, def_id, version)
            };
            by_name.insert(name, id);
        }
        contexts.insert(version, VersionContext { version, by_name });
    }
    contexts
}

#[cfg(test)]
#[path = "tests/versions_tests.rs"]
mod tests;

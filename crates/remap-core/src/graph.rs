//! The class graph: every known class of every binary-compatibility version,
//! with parent/child edges derived from superclass and interface lists.
//!
//! The graph has a two-stage life. A [`GraphBuilder`] accepts headers from
//! any number of analyze tasks concurrently; [`GraphBuilder::freeze`]
//! consumes the builder and is the merge barrier — arena layout, version
//! contexts and edges are all fixed there, single-threaded, before anything
//! can read them. The resulting [`ClassGraph`] is structurally immutable:
//! the only things that change afterwards are the set-once destination
//! slots, the lazily filled caches, and the append-only conflict record.
//!
//! Edges are intentionally partial: a super/interface name that resolves to
//! no analyzed class in the same version context simply produces no edge.
//! The classpath is allowed to be incomplete.

use crate::conflict::{Conflict, ConflictNote, ConflictSubject, ConflictTracker};
use crate::error::CoreError;
use crate::member::{MemberNode, NameCell};
use crate::options::RemapOptions;
use crate::types::{ClassHeader, ClassId, MemberId, MemberKey, MemberKind, TagSet, VersionTag};
use crate::versions;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use remap_common::descriptor;
use remap_common::{AccessFlags, Atom, ShardedInterner};
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::OnceLock;

/// One class (or one version shadow of a class) in the graph.
pub struct ClassNode {
    pub(crate) name: Atom,
    pub(crate) super_name: Option<Atom>,
    pub(crate) interfaces: Vec<Atom>,
    pub(crate) access: AccessFlags,
    pub(crate) version: VersionTag,
    /// Self, unless this node is a version shadow of another node.
    pub(crate) origin: ClassId,
    pub(crate) is_input: bool,
    pub(crate) members: FxHashMap<MemberKey, MemberId>,
    /// Declaration order; drives sibling scans and name-only field lookup.
    pub(crate) member_list: Vec<MemberId>,
    pub(crate) super_class: Option<ClassId>,
    pub(crate) interface_classes: Vec<ClassId>,
    pub(crate) children: Vec<ClassId>,
    pub(crate) tags: Option<TagSet>,
}

impl ClassNode {
    pub fn name(&self) -> Atom {
        self.name
    }

    pub fn super_name(&self) -> Option<Atom> {
        self.super_name
    }

    pub fn interface_names(&self) -> &[Atom] {
        &self.interfaces
    }

    pub fn access(&self) -> AccessFlags {
        self.access
    }

    pub fn version(&self) -> VersionTag {
        self.version
    }

    pub fn origin(&self) -> ClassId {
        self.origin
    }

    pub fn is_input(&self) -> bool {
        self.is_input
    }

    pub fn is_interface(&self) -> bool {
        self.access.is_interface()
    }

    pub fn super_class(&self) -> Option<ClassId> {
        self.super_class
    }

    pub fn interface_classes(&self) -> &[ClassId] {
        &self.interface_classes
    }

    /// Resolved superclass (first) then interfaces, declaration order.
    pub fn parents(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.super_class
            .into_iter()
            .chain(self.interface_classes.iter().copied())
    }

    pub fn children(&self) -> &[ClassId] {
        &self.children
    }

    pub fn member_ids(&self) -> &[MemberId] {
        &self.member_list
    }

    pub fn tags(&self) -> Option<&TagSet> {
        self.tags.as_ref()
    }
}

/// Name table of one binary-compatibility version.
pub struct VersionContext {
    pub(crate) version: VersionTag,
    pub(crate) by_name: FxHashMap<Atom, ClassId>,
}

impl VersionContext {
    pub fn version(&self) -> VersionTag {
        self.version
    }

    #[inline]
    pub fn get(&self, name: Atom) -> Option<ClassId> {
        self.by_name.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, ClassId)> + '_ {
        self.by_name.iter().map(|(&name, &id)| (name, id))
    }
}

pub(crate) struct PendingMember {
    pub(crate) key: MemberKey,
    pub(crate) desc: Atom,
    pub(crate) access: AccessFlags,
}

pub(crate) struct PendingClass {
    pub(crate) name: Atom,
    pub(crate) super_name: Option<Atom>,
    pub(crate) interfaces: Vec<Atom>,
    pub(crate) access: AccessFlags,
    pub(crate) version: VersionTag,
    pub(crate) is_input: bool,
    pub(crate) members: Vec<PendingMember>,
    pub(crate) tags: Option<TagSet>,
}

/// Concurrent intake for the analyze phase.
pub struct GraphBuilder {
    interner: Arc<ShardedInterner>,
    options: RemapOptions,
    pending: DashMap<(VersionTag, Atom), PendingClass>,
}

impl GraphBuilder {
    pub fn new(options: RemapOptions) -> GraphBuilder {
        let interner = Arc::new(ShardedInterner::new());
        interner.intern_common();
        GraphBuilder {
            interner,
            options,
            pending: DashMap::new(),
        }
    }

    pub fn interner(&self) -> &Arc<ShardedInterner> {
        &self.interner
    }

    /// Register one parsed class header. Safe to call from many analyze
    /// tasks at once.
    ///
    /// A malformed header yields [`CoreError::MalformedHeader`] (droppable,
    /// per-unit). A duplicate member id inside one header yields
    /// [`CoreError::DuplicateMember`] (fatal: the decoder contract was
    /// broken). A second definition of the same (version, name) keeps the
    /// first and logs a warning.
    pub fn add_class(&self, header: ClassHeader) -> Result<(), CoreError> {
        if header.name.is_empty() {
            return Err(CoreError::MalformedHeader {
                class: String::from("<unnamed>"),
                reason: String::from("empty class name"),
            });
        }

        let name = self.interner.intern(&header.name);
        let mut members = Vec::with_capacity(header.members.len());
        let mut seen = FxHashMap::default();
        for m in &header.members {
            if m.name.is_empty() {
                return Err(CoreError::MalformedHeader {
                    class: header.name.clone(),
                    reason: String::from("member with empty name"),
                });
            }
            let desc_ok = match m.kind {
                MemberKind::Method => descriptor::is_valid_method_desc(&m.desc),
                MemberKind::Field => descriptor::is_valid_field_desc(&m.desc),
            };
            if !desc_ok {
                return Err(CoreError::MalformedHeader {
                    class: header.name.clone(),
                    reason: format!("invalid descriptor `{}` for member `{}`", m.desc, m.name),
                });
            }

            let key = MemberKey {
                kind: m.kind,
                name: self.interner.intern(&m.name),
                desc: self.interner.intern(&m.desc),
            };
            if seen.insert(key, ()).is_some() {
                return Err(CoreError::DuplicateMember {
                    class: header.name.clone(),
                    member: format!("{}:{}", m.name, m.desc),
                });
            }
            members.push(PendingMember {
                key,
                desc: key.desc,
                access: AccessFlags::from_bits_truncate(m.access),
            });
        }

        let tags = if header.tags.is_empty() {
            None
        } else {
            Some(TagSet::from_atoms(
                header.tags.iter().map(|t| self.interner.intern(t)),
            ))
        };

        let pending = PendingClass {
            name,
            super_name: header
                .super_name
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| self.interner.intern(s)),
            interfaces: header
                .interfaces
                .iter()
                .map(|i| self.interner.intern(i))
                .collect(),
            access: AccessFlags::from_bits_truncate(header.access),
            version: header.version,
            is_input: header.is_input,
            members,
            tags,
        };

        match self.pending.entry((header.version, name)) {
            Entry::Vacant(slot) => {
                slot.insert(pending);
            }
            Entry::Occupied(mut slot) => {
                tracing::warn!(
                    class = %header.name,
                    version = header.version.0,
                    "duplicate class definition, keeping the first"
                );
                // Only the provenance markers of the loser survive.
                let kept = slot.get_mut();
                kept.tags = match (kept.tags.take(), pending.tags) {
                    (Some(a), Some(b)) => Some(a.union(&b)),
                    (a, b) => a.or(b),
                };
            }
        }
        Ok(())
    }

    /// The merge barrier: lay out the arenas, build the per-version
    /// contexts (including MRJ shadow copies) and wire all parent/child
    /// edges. Consuming `self` guarantees no class can be added, and no
    /// edge can change, once anything holds the returned graph.
    pub fn freeze(self) -> ClassGraph {
        let GraphBuilder {
            interner,
            options,
            pending,
        } = self;

        let mut entries: Vec<PendingClass> = pending.into_iter().map(|(_, v)| v).collect();
        // ClassId assignment must not depend on analyze-task scheduling.
        entries.sort_by(|a, b| {
            (a.version, interner.resolve(a.name)).cmp(&(b.version, interner.resolve(b.name)))
        });

        let mut classes: Vec<ClassNode> = Vec::with_capacity(entries.len());
        let mut members: Vec<MemberNode> = Vec::new();
        let mut defs: FxHashMap<Atom, BTreeMap<VersionTag, ClassId>> = FxHashMap::default();
        let mut tags_seen: BTreeSet<VersionTag> = BTreeSet::new();

        for p in entries {
            let id = ClassId(classes.len() as u32);
            let mut node = ClassNode {
                name: p.name,
                super_name: p.super_name,
                interfaces: p.interfaces,
                access: p.access,
                version: p.version,
                origin: id,
                is_input: p.is_input,
                members: FxHashMap::default(),
                member_list: Vec::with_capacity(p.members.len()),
                super_class: None,
                interface_classes: Vec::new(),
                children: Vec::new(),
                tags: p.tags,
            };
            for pm in p.members {
                let mid = MemberId(members.len() as u32);
                members.push(MemberNode {
                    owner: id,
                    key: pm.key,
                    desc: pm.desc,
                    access: pm.access,
                    dest: NameCell::new(),
                    bridge_target: OnceLock::new(),
                });
                node.members.insert(pm.key, mid);
                node.member_list.push(mid);
            }
            tags_seen.insert(p.version);
            defs.entry(p.name).or_default().insert(p.version, id);
            classes.push(node);
        }

        let mut logical_names: Vec<Atom> = defs.keys().copied().collect();
        logical_names.sort_by_key(|&a| interner.resolve(a));

        let contexts =
            versions::build_contexts(&mut classes, &mut members, &defs, &logical_names, &tags_seen);

        // Edge wiring, one context at a time; contexts never share edges.
        let mut plans: Vec<(ClassId, Option<ClassId>, Vec<ClassId>)> = Vec::new();
        for ctx in contexts.values() {
            let mut ids: Vec<ClassId> = ctx.by_name.values().copied().collect();
            ids.sort();
            for id in ids {
                let node = &classes[id.index()];
                let sup = node.super_name.and_then(|s| ctx.get(s));
                let itfs: Vec<ClassId> =
                    node.interfaces.iter().filter_map(|&i| ctx.get(i)).collect();
                plans.push((id, sup, itfs));
            }
        }
        for (id, sup, itfs) in plans {
            if let Some(s) = sup {
                classes[s.index()].children.push(id);
            }
            for &i in &itfs {
                classes[i.index()].children.push(id);
            }
            let node = &mut classes[id.index()];
            node.super_class = sup;
            node.interface_classes = itfs;
        }

        ClassGraph {
            interner,
            options,
            classes,
            members,
            contexts,
            field_cache: DashMap::new(),
            method_cache: DashMap::new(),
            inherited: DashMap::new(),
            class_dest: DashMap::new(),
            conflicts: ConflictTracker::new(),
        }
    }
}

/// The frozen graph plus the concurrent leaf state written during
/// propagation.
pub struct ClassGraph {
    interner: Arc<ShardedInterner>,
    options: RemapOptions,
    classes: Vec<ClassNode>,
    members: Vec<MemberNode>,
    contexts: BTreeMap<VersionTag, VersionContext>,
    /// Memoized field resolution, including the cached "not found" (None).
    pub(crate) field_cache: DashMap<(ClassId, MemberKey), Option<MemberId>>,
    /// Memoized method resolution, including the cached "not found" (None).
    pub(crate) method_cache: DashMap<(ClassId, MemberKey), Option<MemberId>>,
    /// Destination names recorded at classes that inherit a renamed member
    /// without redeclaring it (call sites may resolve through the subclass).
    inherited: DashMap<(ClassId, MemberKey), Atom>,
    /// Class renames, keyed by original internal name; shared by every
    /// version shadow of the class.
    class_dest: DashMap<Atom, Atom>,
    pub(crate) conflicts: ConflictTracker,
}

impl ClassGraph {
    #[inline]
    pub fn class(&self, id: ClassId) -> &ClassNode {
        &self.classes[id.index()]
    }

    #[inline]
    pub fn member(&self, id: MemberId) -> &MemberNode {
        &self.members[id.index()]
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn interner(&self) -> &ShardedInterner {
        &self.interner
    }

    pub fn options(&self) -> &RemapOptions {
        &self.options
    }

    pub fn resolve_atom(&self, atom: Atom) -> String {
        self.interner.resolve(atom).to_string()
    }

    pub fn contexts(&self) -> impl Iterator<Item = &VersionContext> {
        self.contexts.values()
    }

    pub fn context(&self, version: VersionTag) -> Option<&VersionContext> {
        self.contexts.get(&version)
    }

    /// The context answering queries for `version`: the greatest built
    /// context at or below it, falling back to the lowest one present.
    pub fn context_at(&self, version: VersionTag) -> Option<&VersionContext> {
        self.contexts
            .range(..=version)
            .next_back()
            .map(|(_, ctx)| ctx)
            .or_else(|| self.contexts.values().next())
    }

    /// Context for unversioned queries.
    pub fn base_context(&self) -> Option<&VersionContext> {
        self.context_at(VersionTag::BASE)
    }

    /// The context a node belongs to. Every node's version tag names a
    /// built context by construction.
    pub(crate) fn context_of(&self, id: ClassId) -> &VersionContext {
        let version = self.class(id).version;
        self.contexts
            .get(&version)
            .expect("every node version has a context")
    }

    /// Build the lookup key for a member query, honoring the
    /// field-descriptor-sensitivity policy.
    pub fn member_key(&self, kind: MemberKind, name: Atom, desc: Atom) -> MemberKey {
        if kind == MemberKind::Field && self.options.ignore_field_desc {
            MemberKey {
                kind,
                name,
                desc: Atom::NONE,
            }
        } else {
            MemberKey { kind, name, desc }
        }
    }

    /// Member declared directly on `class` matching the lookup key.
    /// A descriptor-blind field key scans declaration order for the first
    /// field with the name.
    pub fn get_member(&self, class: ClassId, key: &MemberKey) -> Option<MemberId> {
        let node = self.class(class);
        if key.kind == MemberKind::Field && key.desc.is_none() {
            node.member_list.iter().copied().find(|&mid| {
                let m = self.member(mid);
                m.key.kind == MemberKind::Field && m.key.name == key.name
            })
        } else {
            node.members.get(key).copied()
        }
    }

    pub(crate) fn record_inherited(
        &self,
        class: ClassId,
        key: MemberKey,
        dest: Atom,
        origin: Atom,
    ) {
        match self.inherited.entry((class, key)) {
            Entry::Vacant(slot) => {
                slot.insert(dest);
            }
            Entry::Occupied(slot) => {
                let existing = *slot.get();
                if existing != dest {
                    self.conflicts.record(
                        ConflictSubject::Inherited(class, key),
                        ConflictNote {
                            kept: existing,
                            proposed: dest,
                            origin,
                        },
                    );
                }
            }
        }
    }

    pub(crate) fn inherited_dest(&self, class: ClassId, key: &MemberKey) -> Option<Atom> {
        self.inherited.get(&(class, *key)).map(|v| *v)
    }

    pub(crate) fn set_class_dest(&self, name: Atom, dest: Atom, origin: Atom) {
        match self.class_dest.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(dest);
            }
            Entry::Occupied(slot) => {
                let existing = *slot.get();
                if existing != dest {
                    self.conflicts.record(
                        ConflictSubject::Class(name),
                        ConflictNote {
                            kept: existing,
                            proposed: dest,
                            origin,
                        },
                    );
                }
            }
        }
    }

    pub(crate) fn class_dest(&self, name: Atom) -> Option<Atom> {
        self.class_dest.get(&name).map(|v| *v)
    }

    /// Whether `name` is a known class in any version context.
    pub(crate) fn known_class_name(&self, name: Atom) -> bool {
        self.contexts.values().any(|ctx| ctx.get(name).is_some())
    }

    /// Hierarchy reachability within one context: is `sup` a (transitive)
    /// supertype of `sub`? Equality does not count.
    pub(crate) fn is_strict_supertype(&self, sup: ClassId, sub: ClassId) -> bool {
        use remap_common::limits::MAX_HIERARCHY_WALK;
        use rustc_hash::FxHashSet;

        let mut visited: FxHashSet<ClassId> = FxHashSet::default();
        let mut worklist: Vec<ClassId> = self.class(sub).parents().collect();
        while let Some(next) = worklist.pop() {
            if next == sup {
                return true;
            }
            if !visited.insert(next) || visited.len() > MAX_HIERARCHY_WALK {
                continue;
            }
            worklist.extend(self.class(next).parents());
        }
        false
    }

    /// Aggregate conflict report. Call after propagation has completed.
    pub fn conflict_report(&self) -> Vec<Conflict> {
        self.conflicts.report(self)
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/graph_tests.rs"]
mod tests;

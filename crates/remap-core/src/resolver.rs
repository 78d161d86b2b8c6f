//! JVM-style member resolution through the hierarchy.
//!
//! Reimplements the runtime's lookup rules at build time:
//!
//! - fields: the class itself, then direct superinterfaces depth-first
//!   recursively (interface fields take precedence over inherited class
//!   fields), then the superclass chain one level at a time re-running the
//!   interface search at each level;
//! - methods: the superclass chain first (class methods beat interface
//!   defaults), then a breadth-first collection of virtual superinterface
//!   matches with the maximally-specific non-abstract tie-break, falling
//!   back to the first candidate encountered.
//!
//! Every (class, key) answer — including "not found" — is memoized in a
//! concurrent insert-if-absent cache. The graph's structure is frozen before
//! any resolution runs, so the caches are monotonic: once computed, an
//! answer never changes.

use crate::graph::ClassGraph;
use crate::types::{ClassId, MemberId, MemberKey, MemberKind};
use remap_common::limits::MAX_HIERARCHY_WALK;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::collections::VecDeque;

impl ClassGraph {
    /// Hierarchy-following resolution, dispatched on the key's kind.
    pub fn resolve_member(&self, class: ClassId, key: &MemberKey) -> Option<MemberId> {
        match key.kind {
            MemberKind::Field => self.resolve_field(class, key),
            MemberKind::Method => self.resolve_method(class, key),
        }
    }

    /// Field lookup through superinterfaces and the superclass chain.
    pub fn resolve_field(&self, class: ClassId, key: &MemberKey) -> Option<MemberId> {
        let mut stack = FxHashSet::default();
        self.resolve_field_guarded(class, key, &mut stack)
    }

    fn resolve_field_guarded(
        &self,
        class: ClassId,
        key: &MemberKey,
        stack: &mut FxHashSet<ClassId>,
    ) -> Option<MemberId> {
        if let Some(cached) = self.field_cache.get(&(class, *key)) {
            return *cached;
        }
        // A class already on the recursion stack means a hierarchy cycle in
        // the input; treat the re-entry as "not found" and do not cache the
        // path-dependent answer.
        if !stack.insert(class) || stack.len() > MAX_HIERARCHY_WALK {
            return None;
        }

        let result = (|| {
            if let Some(own) = self.get_member(class, key) {
                return Some(own);
            }
            let node = self.class(class);
            for &itf in node.interface_classes() {
                if let Some(found) = self.resolve_field_guarded(itf, key, stack) {
                    return Some(found);
                }
            }
            let sup = node.super_class()?;
            self.resolve_field_guarded(sup, key, stack)
        })();

        stack.remove(&class);
        *self
            .field_cache
            .entry((class, *key))
            .or_insert(result)
            .value()
    }

    /// Method lookup: superclass chain, then maximally-specific interface
    /// default.
    pub fn resolve_method(&self, class: ClassId, key: &MemberKey) -> Option<MemberId> {
        if let Some(cached) = self.method_cache.get(&(class, *key)) {
            return *cached;
        }

        let result = self.resolve_method_uncached(class, key);
        *self
            .method_cache
            .entry((class, *key))
            .or_insert(result)
            .value()
    }

    fn resolve_method_uncached(&self, class: ClassId, key: &MemberKey) -> Option<MemberId> {
        // Superclass methods take precedence over interface defaults.
        let mut chain_visited: FxHashSet<ClassId> = FxHashSet::default();
        let mut cur = Some(class);
        while let Some(c) = cur {
            if !chain_visited.insert(c) || chain_visited.len() > MAX_HIERARCHY_WALK {
                break;
            }
            if let Some(own) = self.get_member(c, key) {
                return Some(own);
            }
            cur = self.class(c).super_class();
        }

        // Breadth-first over every superinterface reachable from the class
        // or its superclasses, collecting virtual matches.
        let mut candidates: SmallVec<[MemberId; 4]> = SmallVec::new();
        let mut visited: FxHashSet<ClassId> = FxHashSet::default();
        let mut queue: VecDeque<ClassId> = VecDeque::new();
        queue.push_back(class);
        visited.insert(class);

        while let Some(c) = queue.pop_front() {
            let node = self.class(c);
            if node.is_interface() {
                if let Some(mid) = self.get_member(c, key) {
                    let m = self.member(mid);
                    if !m.access().is_static() && !m.access().is_private() {
                        candidates.push(mid);
                    }
                }
            }
            if visited.len() > MAX_HIERARCHY_WALK {
                break;
            }
            for parent in node.parents() {
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }

        if candidates.is_empty() {
            return None;
        }

        let concrete: SmallVec<[MemberId; 4]> = candidates
            .iter()
            .copied()
            .filter(|&mid| !self.member(mid).access().is_abstract())
            .collect();

        match concrete.len() {
            0 => Some(candidates[0]),
            1 => Some(concrete[0]),
            _ => {
                // Maximally specific: an owner that is not a supertype of
                // any other concrete candidate's owner.
                let winner = concrete.iter().copied().find(|&mid| {
                    let owner = self.member(mid).owner();
                    concrete.iter().all(|&other| {
                        other == mid || !self.is_strict_supertype(owner, self.member(other).owner())
                    })
                });
                Some(winner.unwrap_or(candidates[0]))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;

//! Finalized name-mapping surface for external consumers.
//!
//! Both functions are total: an unmapped (or unknown) symbol maps to
//! itself. Read these only after propagation and conflict reporting have
//! completed; earlier reads race with the seeds.

use crate::graph::ClassGraph;
use crate::types::{MemberKind, VersionTag};
use std::borrow::Cow;

pub struct Mappings<'g> {
    graph: &'g ClassGraph,
}

impl ClassGraph {
    pub fn mappings(&self) -> Mappings<'_> {
        Mappings { graph: self }
    }
}

impl Mappings<'_> {
    /// New name of a class, identity if unmapped. Version shadows share the
    /// class name, so class mappings are version-independent.
    pub fn map_class_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        let atom = self.graph.interner().intern(name);
        match self.graph.class_dest(atom) {
            Some(dest) => Cow::Owned(self.graph.resolve_atom(dest)),
            None => Cow::Borrowed(name),
        }
    }

    /// New name of a member as seen through `owner`, identity if unmapped.
    ///
    /// `owner` need not redeclare the member: an access the runtime would
    /// resolve through a subclass answers with the propagated record at the
    /// subclass, or failing that with the resolved declaration's name.
    pub fn map_member_name<'a>(
        &self,
        owner: &str,
        name: &'a str,
        desc: &str,
        kind: MemberKind,
    ) -> Cow<'a, str> {
        self.map_member_name_versioned(VersionTag::BASE, owner, name, desc, kind)
    }

    /// Like [`Mappings::map_member_name`], answered against the greatest
    /// version context at or below `version`.
    pub fn map_member_name_versioned<'a>(
        &self,
        version: VersionTag,
        owner: &str,
        name: &'a str,
        desc: &str,
        kind: MemberKind,
    ) -> Cow<'a, str> {
        let graph = self.graph;
        let Some(ctx) = graph.context_at(version) else {
            return Cow::Borrowed(name);
        };
        let interner = graph.interner();
        let Some(class) = ctx.get(interner.intern(owner)) else {
            return Cow::Borrowed(name);
        };
        let key = graph.member_key(kind, interner.intern(name), interner.intern(desc));

        // A declared member is the authoritative slot at this owner.
        if let Some(mid) = graph.get_member(class, &key) {
            return match graph.member(mid).dest_name() {
                Some(dest) => Cow::Owned(graph.resolve_atom(dest)),
                None => Cow::Borrowed(name),
            };
        }

        // Mapping recorded here during a DOWN walk, for call sites that
        // resolve through this class.
        if let Some(dest) = graph.inherited_dest(class, &key) {
            return Cow::Owned(graph.resolve_atom(dest));
        }

        // Otherwise answer through resolution, like the runtime would.
        if let Some(mid) = graph.resolve_member(class, &key) {
            if let Some(dest) = graph.member(mid).dest_name() {
                return Cow::Owned(graph.resolve_atom(dest));
            }
        }
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
#[path = "tests/mappings_tests.rs"]
mod tests;

//! Concurrent record of contradictory destination-name assignments.
//!
//! Propagation never resolves a conflict and never overwrites: the first
//! writer keeps the slot and every later disagreeing proposal lands here.
//! The tracker is an append-only concurrent multimap; it is drained into a
//! deterministic report only after the propagate barrier.

use crate::graph::ClassGraph;
use crate::types::{ClassId, MemberKey, MemberKind};
use dashmap::DashMap;
use remap_common::Atom;

/// What received contradictory names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConflictSubject {
    /// A class rename, keyed by original internal name.
    Class(Atom),
    /// A declared member.
    Declared(crate::types::MemberId),
    /// An inherited-access mapping recorded at a class that does not
    /// redeclare the member.
    Inherited(ClassId, MemberKey),
}

/// One disagreeing proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConflictNote {
    /// Name the slot already held.
    pub kept: Atom,
    /// Name this seed wanted instead.
    pub proposed: Atom,
    /// Internal name of the class the seed originated at.
    pub origin: Atom,
}

#[derive(Default)]
pub struct ConflictTracker {
    map: DashMap<ConflictSubject, Vec<ConflictNote>>,
}

impl ConflictTracker {
    pub fn new() -> ConflictTracker {
        ConflictTracker::default()
    }

    pub fn record(&self, subject: ConflictSubject, note: ConflictNote) {
        self.map.entry(subject).or_default().push(note);
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Produce the sorted, resolved report. Call only after propagation has
    /// completed; the tracker itself is not cleared.
    pub fn report(&self, graph: &ClassGraph) -> Vec<Conflict> {
        let mut out: Vec<Conflict> = self
            .map
            .iter()
            .map(|entry| {
                let subject = render_subject(graph, *entry.key());
                let kept = entry
                    .value()
                    .first()
                    .map(|n| graph.resolve_atom(n.kept))
                    .unwrap_or_default();
                let mut proposals: Vec<ConflictProposal> = entry
                    .value()
                    .iter()
                    .map(|n| ConflictProposal {
                        origin: graph.resolve_atom(n.origin),
                        name: graph.resolve_atom(n.proposed),
                    })
                    .collect();
                proposals.sort();
                proposals.dedup();
                Conflict {
                    subject,
                    kept,
                    proposals,
                }
            })
            .collect();
        out.sort();
        out
    }
}

/// A finalized conflict report entry.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Conflict {
    /// Rendered identity, e.g. `com/example/Widget.size()I`.
    pub subject: String,
    /// The name that won the slot.
    pub kept: String,
    /// Every disagreeing proposal with its originating class.
    pub proposals: Vec<ConflictProposal>,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConflictProposal {
    pub origin: String,
    pub name: String,
}

fn render_subject(graph: &ClassGraph, subject: ConflictSubject) -> String {
    match subject {
        ConflictSubject::Class(name) => graph.resolve_atom(name),
        ConflictSubject::Declared(member) => {
            let m = graph.member(member);
            let owner = graph.class(m.owner());
            render_member(
                graph,
                graph.resolve_atom(owner.name()),
                m.kind(),
                m.name(),
                m.desc(),
            )
        }
        ConflictSubject::Inherited(class, key) => {
            let owner = graph.class(class);
            render_member(
                graph,
                graph.resolve_atom(owner.name()),
                key.kind,
                key.name,
                key.desc,
            )
        }
    }
}

fn render_member(
    graph: &ClassGraph,
    owner: String,
    kind: MemberKind,
    name: Atom,
    desc: Atom,
) -> String {
    let name = graph.resolve_atom(name);
    let desc = graph.resolve_atom(desc);
    match kind {
        MemberKind::Method => format!("{owner}.{name}{desc}"),
        MemberKind::Field => format!("{owner}.{name}:{desc}"),
    }
}

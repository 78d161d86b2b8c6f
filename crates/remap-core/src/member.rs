//! Member model: one node per declared field or method, with the atomic
//! set-once destination-name slot that makes concurrent propagation safe.

use crate::types::{ClassId, MemberId, MemberKey, MemberKind};
use remap_common::{AccessFlags, Atom};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

/// Result of attempting to assign a destination name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// Slot was empty; this writer won it.
    Fresh,
    /// Slot already held exactly this value; idempotent success.
    AlreadySet,
    /// Slot holds a different value; the write did not happen.
    Conflict { existing: Atom },
}

/// Atomic set-once destination-name slot.
///
/// Backed by a single `AtomicU32` holding the atom index; 0 (`Atom::NONE`)
/// means unset, and no non-empty name ever interns to 0. First writer wins
/// via compare-and-swap; identical re-writes are no-ops; a different value is
/// reported as a conflict and never overwrites.
#[derive(Debug, Default)]
pub struct NameCell(AtomicU32);

impl NameCell {
    pub const fn new() -> NameCell {
        NameCell(AtomicU32::new(0))
    }

    #[inline]
    pub fn get(&self) -> Option<Atom> {
        match self.0.load(Ordering::Acquire) {
            0 => None,
            raw => Some(Atom(raw)),
        }
    }

    pub fn set(&self, value: Atom) -> SetOutcome {
        debug_assert!(!value.is_none(), "destination name must be non-empty");
        match self
            .0
            .compare_exchange(0, value.0, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => SetOutcome::Fresh,
            Err(existing) if existing == value.0 => SetOutcome::AlreadySet,
            Err(existing) => SetOutcome::Conflict {
                existing: Atom(existing),
            },
        }
    }
}

/// One declared field or method.
pub struct MemberNode {
    pub(crate) owner: ClassId,
    pub(crate) key: MemberKey,
    /// True descriptor, independent of how the lookup key was built.
    pub(crate) desc: Atom,
    pub(crate) access: AccessFlags,
    pub(crate) dest: NameCell,
    /// Lazily computed bridge-target sibling; `None` inside means "computed,
    /// no target".
    pub(crate) bridge_target: OnceLock<Option<MemberId>>,
}

impl MemberNode {
    pub fn owner(&self) -> ClassId {
        self.owner
    }

    pub fn key(&self) -> &MemberKey {
        &self.key
    }

    pub fn kind(&self) -> MemberKind {
        self.key.kind
    }

    pub fn name(&self) -> Atom {
        self.key.name
    }

    /// The member's actual descriptor (never `Atom::NONE`, even when field
    /// lookup keys are descriptor-blind).
    pub fn desc(&self) -> Atom {
        self.desc
    }

    pub fn access(&self) -> AccessFlags {
        self.access
    }

    /// The destination name assigned by propagation, if any.
    pub fn dest_name(&self) -> Option<Atom> {
        self.dest.get()
    }

    /// Participates in dynamic dispatch: a method that is neither static nor
    /// private. Fields never do.
    pub fn is_virtual(&self) -> bool {
        self.key.kind == MemberKind::Method
            && !self.access.is_static()
            && !self.access.is_private()
    }

    pub fn is_bridge(&self) -> bool {
        self.key.kind == MemberKind::Method && self.access.is_bridge()
    }
}

#[cfg(test)]
#[path = "tests/member_tests.rs"]
mod tests;

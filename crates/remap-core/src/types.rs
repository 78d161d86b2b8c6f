//! Core identifier types and the external input contracts.
//!
//! `ClassId` and `MemberId` are arena indices into the frozen graph; they are
//! plain u32 newtypes so hot maps and visited sets stay dense. The header and
//! rename-table structs are the hand-off format from the excluded
//! collaborators (class-file decoder, mapping-file reader): plain data,
//! serde-friendly, no interned atoms.

use remap_common::Atom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Index of a class node in the graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a member node in the graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub u32);

impl MemberId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Binary-compatibility version of a class definition inside a
/// multi-release artifact.
///
/// `BASE` is the unversioned content; versioned entries carry the runtime
/// version number they target (9, 11, 17, ...).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct VersionTag(pub u16);

impl VersionTag {
    pub const BASE: VersionTag = VersionTag(0);

    #[inline]
    pub fn is_base(self) -> bool {
        self == VersionTag::BASE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberKind {
    Method,
    Field,
}

/// Lookup key of a member within one class.
///
/// The `kind` discriminant keeps a field and a method with identical
/// name+descriptor from ever sharing a slot. When field lookups are
/// configured descriptor-insensitive, field keys are built with
/// `desc == Atom::NONE`; the member node keeps the true descriptor
/// separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberKey {
    pub kind: MemberKind,
    pub name: Atom,
    pub desc: Atom,
}

/// Pre-extracted class header, produced by the external class-file decoder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassHeader {
    /// Internal name, e.g. `com/example/Widget`.
    pub name: String,
    /// Internal name of the superclass; `None` only for the root object type
    /// (and module-info style pseudo-classes).
    pub super_name: Option<String>,
    /// Internal names of the direct superinterfaces, in declaration order.
    pub interfaces: Vec<String>,
    /// Raw class access flag word.
    pub access: u32,
    /// Which multi-release slice this definition came from.
    pub version: VersionTag,
    /// True for classes being rewritten, false for classpath-only context
    /// classes that only inform resolution.
    pub is_input: bool,
    pub members: Vec<MemberHeader>,
    /// Opaque provenance markers carried through for selective
    /// re-processing by external layers.
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberHeader {
    pub kind: MemberKind,
    pub name: String,
    pub desc: String,
    /// Raw member access flag word.
    pub access: u32,
}

/// One entry of the sparse rename table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenameEntry {
    pub target: RenameTarget,
    pub new_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RenameTarget {
    Class {
        name: String,
    },
    Member {
        kind: MemberKind,
        owner: String,
        name: String,
        /// Required for methods. Optional for fields when the engine runs
        /// with descriptor-insensitive field lookup.
        desc: Option<String>,
    },
}

impl RenameEntry {
    pub fn class(name: impl Into<String>, new_name: impl Into<String>) -> RenameEntry {
        RenameEntry {
            target: RenameTarget::Class { name: name.into() },
            new_name: new_name.into(),
        }
    }

    pub fn method(
        owner: impl Into<String>,
        name: impl Into<String>,
        desc: impl Into<String>,
        new_name: impl Into<String>,
    ) -> RenameEntry {
        RenameEntry {
            target: RenameTarget::Member {
                kind: MemberKind::Method,
                owner: owner.into(),
                name: name.into(),
                desc: Some(desc.into()),
            },
            new_name: new_name.into(),
        }
    }

    pub fn field(
        owner: impl Into<String>,
        name: impl Into<String>,
        desc: Option<String>,
        new_name: impl Into<String>,
    ) -> RenameEntry {
        RenameEntry {
            target: RenameTarget::Member {
                kind: MemberKind::Field,
                owner: owner.into(),
                name: name.into(),
                desc,
            },
            new_name: new_name.into(),
        }
    }
}

/// Content-compared, copy-on-write set of provenance markers.
///
/// Merging two tag sets reuses one side's allocation whenever the union
/// equals it, so widely shared sets stay shared.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TagSet(Arc<BTreeSet<Atom>>);

impl TagSet {
    pub fn from_atoms(atoms: impl IntoIterator<Item = Atom>) -> TagSet {
        TagSet(Arc::new(atoms.into_iter().collect()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: Atom) -> bool {
        self.0.contains(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = Atom> + '_ {
        self.0.iter().copied()
    }

    /// Set union that preserves sharing when one side already covers the other.
    pub fn union(&self, other: &TagSet) -> TagSet {
        if other.0.is_subset(&self.0) {
            return self.clone();
        }
        if self.0.is_subset(&other.0) {
            return other.clone();
        }
        TagSet(Arc::new(self.0.union(&other.0).copied().collect()))
    }
}

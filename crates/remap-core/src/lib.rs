//! Dispatch-aware symbol graph and rename propagation engine.
//!
//! Given pre-extracted class headers and a sparse rename table, this crate
//! determines every symbol occurrence that must change in lockstep with the
//! requested renames — overrides in subclasses, interface implementations,
//! bridge adapters, inherited-but-undeclared accesses — without breaking
//! dynamic dispatch. It reimplements the runtime's resolution rules at
//! build time, under concurrency, over a possibly incomplete classpath.
//!
//! Lifecycle: feed headers into a [`GraphBuilder`] (concurrently), call
//! [`GraphBuilder::freeze`] (the merge barrier), run a [`Propagator`] over
//! the rename table (concurrently), then read [`ClassGraph::mappings`] and
//! [`ClassGraph::conflict_report`].
//!
//! Class-file decoding/encoding, archive I/O and the rewrite pipeline are
//! collaborator concerns on the far side of the header/mapping contracts.

pub mod assignable;
pub mod bridge;
pub mod conflict;
pub mod error;
pub mod graph;
pub mod mappings;
pub mod member;
pub mod options;
pub mod propagate;
pub mod resolver;
pub mod types;
pub mod versions;

pub use assignable::is_assignable_from;
pub use conflict::{Conflict, ConflictProposal};
pub use error::CoreError;
pub use graph::{ClassGraph, ClassNode, GraphBuilder, VersionContext};
pub use mappings::Mappings;
pub use member::{MemberNode, NameCell, SetOutcome};
pub use options::{BridgeMode, RemapOptions};
pub use propagate::Propagator;
pub use types::{
    ClassHeader, ClassId, MemberHeader, MemberId, MemberKey, MemberKind, RenameEntry,
    RenameTarget, TagSet, VersionTag,
};

#[cfg(test)]
pub(crate) mod testutil;

//! Phase orchestration for the remap engine.
//!
//! A remap run has exactly one hard ordering constraint: every analyzed
//! header must be merged into the graph before any edge is read. The
//! pipeline makes the phases explicit:
//!
//! 1. **analyze** — parallel, one task per input unit; parse failures are
//!    logged and dropped at file granularity
//! 2. **merge** — the freeze barrier, single-threaded
//! 3. **propagate** — parallel, one task per batch of rename entries
//! 4. **report** — conflicts drained; the run fails on conflicts unless the
//!    tolerate-conflicts policy is set
//!
//! The driver performs no I/O. Decoded headers come in, finalized name
//! mappings go out; everything else belongs to external collaborators.

mod pipeline;

pub use pipeline::{DriverError, Pipeline, RemapOutput, UnitError, UnitResult};

// Re-export the engine surface hosts actually touch, so a driver dependency
// is enough for the common case.
pub use remap_core::{
    BridgeMode, ClassHeader, Conflict, MemberHeader, MemberKind, RemapOptions, RenameEntry,
    RenameTarget, VersionTag,
};

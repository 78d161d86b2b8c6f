//! Engine error taxonomy.
//!
//! Missing data is never an error here: absent superclasses, unresolvable
//! owners and unknown descriptors all degrade to "no information" per the
//! open-world model. Errors are reserved for genuinely contradictory state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A class header failed validation. Isolated per unit: the driver logs
    /// it and drops the unit, the run continues.
    #[error("malformed class header for `{class}`: {reason}")]
    MalformedHeader { class: String, reason: String },

    /// One class header declared the same member id twice. The parser
    /// collaborator guarantees deduplicated member lists, so this is a bug
    /// upstream of the engine, not bad user input. Fatal.
    #[error("duplicate member id `{member}` in class `{class}`")]
    DuplicateMember { class: String, member: String },

    /// Propagation finished with unresolved naming conflicts and the
    /// tolerate-conflicts policy is off.
    #[error("{count} naming conflict(s) detected")]
    ConflictsDetected { count: usize },
}

impl CoreError {
    /// Whether this error is a per-unit input fault that the pipeline
    /// tolerates (as opposed to an invariant violation that aborts the run).
    pub fn is_unit_fault(&self) -> bool {
        matches!(self, CoreError::MalformedHeader { .. })
    }
}

//! Centralized limits and thresholds for the remap engine.
//!
//! Centralizing these values prevents duplicate definitions with
//! inconsistent values and documents the rationale for each limit.

/// Maximum number of classes any single hierarchy walk may visit.
///
/// Well-formed class files cannot express an inheritance cycle, but the
/// engine runs under an open-world assumption and must survive adversarial
/// or corrupt input. Every upward/downward walk (resolution, assignability,
/// propagation) carries a visited set, so this limit only bounds
/// pathologically wide fan-outs rather than cycles; at 10 000 visited nodes
/// the walk gives up and reports "not found".
pub const MAX_HIERARCHY_WALK: usize = 10_000;

//! Engine policy configuration.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// How renames travel across compiler-synthesized bridge methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BridgeMode {
    /// Bridges are ordinary members; no cross-link projection.
    #[default]
    Off,
    /// A rename landing on either side of a bridge link is projected onto
    /// the other side.
    Enabled,
    /// Like `Enabled`, but only across links whose parameter lists are
    /// byte-identical (covariant-return-only bridges).
    CompatibleOnly,
}

/// Policy flags consumed by the propagator and resolver.
///
/// All flags default to off / empty; hosts deserialize this from whatever
/// configuration format they carry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemapOptions {
    /// Propagate renames into private and static members of related classes
    /// instead of stopping at the access barrier.
    pub propagate_private: bool,

    /// Bridge-link projection mode.
    pub bridge_mode: BridgeMode,

    /// Fully-qualified member names (`pkg/Owner.member`) exempted from the
    /// private/static propagation restriction.
    pub force_propagation: FxHashSet<String>,

    /// Key field lookups by name only, ignoring the field descriptor.
    pub ignore_field_desc: bool,

    /// Report conflicts but finish the run successfully anyway.
    pub tolerate_conflicts: bool,
}

impl RemapOptions {
    pub fn bridges_enabled(&self) -> bool {
        self.bridge_mode != BridgeMode::Off
    }
}

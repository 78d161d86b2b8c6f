//! Bridge-method linkage.
//!
//! A compiler-synthesized bridge adapts an erased or covariant signature to
//! the "real" implementation it delegates to. The target lives in the same
//! class: the scan is deliberately limited to direct siblings and is not
//! broadened to the resolved hierarchy.

use crate::assignable::is_assignable_from;
use crate::graph::ClassGraph;
use crate::types::{MemberId, MemberKind};
use smallvec::SmallVec;

impl ClassGraph {
    /// The sibling method a bridge delegates to, if one can be identified.
    ///
    /// The target must be virtual, not itself a bridge, share the bridge's
    /// name, and have a "bridged" descriptor: same parameter count, each
    /// parameter type assignable to the bridge's corresponding parameter
    /// type, return type assignable to the bridge's return type. Cached on
    /// the bridge member after the first computation.
    pub fn bridge_target(&self, bridge: MemberId) -> Option<MemberId> {
        *self
            .member(bridge)
            .bridge_target
            .get_or_init(|| self.compute_bridge_target(bridge))
    }

    fn compute_bridge_target(&self, bridge: MemberId) -> Option<MemberId> {
        let bm = self.member(bridge);
        if bm.kind() != MemberKind::Method {
            return None;
        }
        let owner = self.class(bm.owner());
        let ctx = self.context_of(bm.owner());

        let bridge_desc = self.interner().resolve(bm.desc());
        let bridge_params: Vec<&str> = remap_common::descriptor::method_params(&bridge_desc).collect();
        let bridge_ret = remap_common::descriptor::method_return(&bridge_desc);

        for &sid in owner.member_ids() {
            if sid == bridge {
                continue;
            }
            let sib = self.member(sid);
            if sib.kind() != MemberKind::Method
                || sib.name() != bm.name()
                || sib.desc() == bm.desc()
                || sib.is_bridge()
                || !sib.is_virtual()
            {
                continue;
            }

            let sib_desc = self.interner().resolve(sib.desc());
            let sib_params: Vec<&str> = remap_common::descriptor::method_params(&sib_desc).collect();
            if sib_params.len() != bridge_params.len() {
                continue;
            }
            let sib_ret = remap_common::descriptor::method_return(&sib_desc);

            let params_ok = sib_params
                .iter()
                .zip(&bridge_params)
                .all(|(&target, &bridge)| is_assignable_from(self, ctx, bridge, target));
            if params_ok && is_assignable_from(self, ctx, bridge_ret, sib_ret) {
                return Some(sid);
            }
        }
        None
    }

    /// Sibling bridges whose computed target is `target`. Used to project a
    /// rename of the real method back onto its bridges.
    pub fn bridges_targeting(&self, target: MemberId) -> SmallVec<[MemberId; 2]> {
        let owner = self.class(self.member(target).owner());
        owner
            .member_ids()
            .iter()
            .copied()
            .filter(|&sid| {
                sid != target
                    && self.member(sid).is_bridge()
                    && self.bridge_target(sid) == Some(target)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/bridge_tests.rs"]
mod tests;

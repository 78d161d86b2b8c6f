//! Name propagation.
//!
//! Each rename-table entry seeds a walk over the frozen graph that assigns
//! the destination name to every member instance occupying the same virtual
//! slot. Seeds are fully independent: visited state is seed-local, the only
//! shared writes are the set-once destination slots, the inherited-mapping
//! records and the conflict tracker, so any number of seeds may run
//! concurrently.
//!
//! The walk is an explicit worklist, not recursion, so adversarially deep
//! hierarchies cannot overflow the stack.

use crate::conflict::{ConflictNote, ConflictSubject};
use crate::graph::ClassGraph;
use crate::member::SetOutcome;
use crate::options::BridgeMode;
use crate::types::{ClassId, MemberId, MemberKey, MemberKind, RenameEntry, RenameTarget};
use remap_common::Atom;
use rustc_hash::FxHashSet;

/// Traversal state of one node visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Walk {
    /// The entry class where the rename is directly declared.
    Seed,
    Up,
    Down,
}

/// One propagation walk: member id, destination, and where to start.
struct SeedTask {
    class: ClassId,
    key: MemberKey,
    dest: Atom,
    /// Internal name of the class the original rename named; carried into
    /// conflict records.
    origin: Atom,
    start: Walk,
}

pub struct Propagator<'g> {
    graph: &'g ClassGraph,
}

impl<'g> Propagator<'g> {
    pub fn new(graph: &'g ClassGraph) -> Propagator<'g> {
        Propagator { graph }
    }

    /// Run a batch of rename-table entries. Entries are independent; batches
    /// of this call may themselves run concurrently.
    pub fn run(&self, entries: &[RenameEntry]) {
        for entry in entries {
            self.apply(entry);
        }
    }

    fn apply(&self, entry: &RenameEntry) {
        let interner = self.graph.interner();
        if entry.new_name.is_empty() {
            tracing::warn!(entry = ?entry.target, "rename entry with empty destination, dropped");
            return;
        }
        let dest = interner.intern(&entry.new_name);

        match &entry.target {
            RenameTarget::Class { name } => {
                let name_atom = interner.intern(name);
                if !self.graph.known_class_name(name_atom) {
                    tracing::warn!(class = %name, "rename of unknown class, dropped");
                    return;
                }
                self.graph.set_class_dest(name_atom, dest, name_atom);
            }
            RenameTarget::Member {
                kind,
                owner,
                name,
                desc,
            } => {
                let desc_atom = match desc {
                    Some(d) => interner.intern(d),
                    None => {
                        let blind_ok = *kind == MemberKind::Field
                            && self.graph.options().ignore_field_desc;
                        if !blind_ok {
                            tracing::warn!(
                                owner = %owner,
                                member = %name,
                                "rename entry without descriptor, dropped"
                            );
                            return;
                        }
                        Atom::NONE
                    }
                };
                let owner_atom = interner.intern(owner);
                let key =
                    self.graph
                        .member_key(*kind, interner.intern(name), desc_atom);

                let mut seeded = false;
                for ctx in self.graph.contexts() {
                    if let Some(class) = ctx.get(owner_atom) {
                        self.run_seed(SeedTask {
                            class,
                            key,
                            dest,
                            origin: owner_atom,
                            start: Walk::Seed,
                        });
                        seeded = true;
                    }
                }
                if !seeded {
                    // Open world: the mapping may reference classes that were
                    // never analyzed. Not an error.
                    tracing::warn!(
                        owner = %owner,
                        member = %name,
                        "rename seed class not in the analyzed set, dropped"
                    );
                }
            }
        }
    }

    fn run_seed(&self, task: SeedTask) {
        // Bridge fan-out spawns follow-up seeds; the (class, key) guard
        // keeps a bridge and its target from ping-ponging forever.
        let mut spawned: FxHashSet<(ClassId, MemberKey)> = FxHashSet::default();
        spawned.insert((task.class, task.key));
        let mut seeds = vec![task];

        while let Some(seed) = seeds.pop() {
            self.walk_seed(&seed, &mut seeds, &mut spawned);
        }
    }

    fn walk_seed(
        &self,
        seed: &SeedTask,
        seeds: &mut Vec<SeedTask>,
        spawned: &mut FxHashSet<(ClassId, MemberKey)>,
    ) {
        let mut up_visited: FxHashSet<ClassId> = FxHashSet::default();
        let mut down_visited: FxHashSet<ClassId> = FxHashSet::default();
        up_visited.insert(seed.class);
        down_visited.insert(seed.class);

        let mut worklist: Vec<(ClassId, Walk)> = vec![(seed.class, seed.start)];
        while let Some((class, walk)) = worklist.pop() {
            self.visit(
                class,
                walk,
                seed,
                &mut up_visited,
                &mut down_visited,
                &mut worklist,
                seeds,
                spawned,
            );
        }
    }

    fn visit(
        &self,
        class: ClassId,
        walk: Walk,
        seed: &SeedTask,
        up_visited: &mut FxHashSet<ClassId>,
        down_visited: &mut FxHashSet<ClassId>,
        worklist: &mut Vec<(ClassId, Walk)>,
        seeds: &mut Vec<SeedTask>,
        spawned: &mut FxHashSet<(ClassId, MemberKey)>,
    ) {
        let graph = self.graph;
        let node = graph.class(class);
        let found = graph.get_member(class, &seed.key);
        let mut is_virtual = false;

        if let Some(mid) = found {
            let member = graph.member(mid);
            is_virtual = member.is_virtual();

            if self.permitted(walk, class, mid) {
                match member.dest.set(seed.dest) {
                    SetOutcome::Fresh | SetOutcome::AlreadySet => {}
                    SetOutcome::Conflict { existing } => {
                        graph.conflicts.record(
                            ConflictSubject::Declared(mid),
                            ConflictNote {
                                kept: existing,
                                proposed: seed.dest,
                                origin: seed.origin,
                            },
                        );
                    }
                }
            }

            // A private member renamed at its declaring class, and a static
            // interface method, never propagate beyond that class.
            if (walk == Walk::Seed && member.access().is_private())
                || (node.is_interface()
                    && member.kind() == MemberKind::Method
                    && member.access().is_static())
            {
                return;
            }

            if graph.options().bridges_enabled() && is_virtual && node.is_input() {
                self.spawn_bridge_seeds(class, mid, seed, seeds, spawned);
            }
        } else if walk == Walk::Down {
            // The runtime may resolve an access through a subclass that does
            // not redeclare the member; the mapping must exist there too.
            graph.record_inherited(class, seed.key, seed.dest, seed.origin);
        }

        // A virtual match partway through a walk restarts a seed-like
        // fan-out: unvisited branches of the hierarchy may share the slot.
        let go_up = matches!(walk, Walk::Seed | Walk::Up) || is_virtual;
        let go_down = matches!(walk, Walk::Seed | Walk::Down) || is_virtual;

        if go_up {
            for parent in node.parents() {
                if up_visited.insert(parent) {
                    worklist.push((parent, Walk::Up));
                }
            }
        }
        if go_down {
            for &child in node.children() {
                if down_visited.insert(child) {
                    worklist.push((child, Walk::Down));
                }
            }
        }
    }

    fn permitted(&self, walk: Walk, class: ClassId, mid: MemberId) -> bool {
        if walk == Walk::Seed {
            return true;
        }
        let member = self.graph.member(mid);
        if !member.access().is_private() && !member.access().is_static() {
            return true;
        }
        let options = self.graph.options();
        if options.propagate_private {
            return true;
        }
        if options.force_propagation.is_empty() {
            return false;
        }
        let owner = self.graph.interner().resolve(self.graph.class(class).name());
        let name = self.graph.interner().resolve(member.name());
        options
            .force_propagation
            .contains(&format!("{owner}.{name}"))
    }

    /// Project the rename across a bridge link, in whichever direction this
    /// member sits on it, as new independent seeds starting `DOWN` from the
    /// bridge's class.
    fn spawn_bridge_seeds(
        &self,
        class: ClassId,
        mid: MemberId,
        seed: &SeedTask,
        seeds: &mut Vec<SeedTask>,
        spawned: &mut FxHashSet<(ClassId, MemberKey)>,
    ) {
        let graph = self.graph;
        let member = graph.member(mid);

        let mut push = |other: MemberId| {
            let key = *graph.member(other).key();
            if spawned.insert((class, key)) {
                tracing::debug!(
                    class = %graph.interner().resolve(graph.class(class).name()),
                    member = %graph.interner().resolve(key.name),
                    "projecting rename across bridge link"
                );
                seeds.push(SeedTask {
                    class,
                    key,
                    dest: seed.dest,
                    origin: seed.origin,
                    start: Walk::Down,
                });
            }
        };

        if member.is_bridge() {
            if let Some(target) = graph.bridge_target(mid) {
                if self.link_allowed(mid, target) {
                    push(target);
                }
            }
        } else {
            for bridge in graph.bridges_targeting(mid) {
                if self.link_allowed(bridge, mid) {
                    push(bridge);
                }
            }
        }
    }

    fn link_allowed(&self, bridge: MemberId, target: MemberId) -> bool {
        match self.graph.options().bridge_mode {
            BridgeMode::Off => false,
            BridgeMode::Enabled => true,
            BridgeMode::CompatibleOnly => {
                // Only covariant-return bridges: parameter lists must match
                // byte for byte.
                let interner = self.graph.interner();
                let bridge_desc = interner.resolve(self.graph.member(bridge).desc());
                let target_desc = interner.resolve(self.graph.member(target).desc());
                param_list(&bridge_desc) == param_list(&target_desc)
            }
        }
    }
}

fn param_list(desc: &str) -> &str {
    desc.split_once(')').map(|(params, _)| params).unwrap_or(desc)
}

#[cfg(test)]
#[path = "tests/propagate_tests.rs"]
mod tests;

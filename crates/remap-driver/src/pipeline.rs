use rayon::prelude::*;
use remap_core::{
    ClassGraph, ClassHeader, Conflict, CoreError, GraphBuilder, Mappings, Propagator, RemapOptions,
    RenameEntry,
};
use thiserror::Error;

/// Rename entries per propagate task. Entries are independent, so the batch
/// size only balances scheduling overhead against parallelism.
const SEED_BATCH: usize = 64;

/// A unit the external decoder could not parse. Carried into the pipeline so
/// the failure is logged in-phase and the unit's contribution dropped.
#[derive(Clone, Debug)]
pub struct UnitError {
    /// Whatever identifies the unit to a human (file name, archive entry).
    pub unit: String,
    pub reason: String,
}

/// What the external decoder hands the pipeline per input unit.
pub type UnitResult = Result<ClassHeader, UnitError>;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("run finished with {} naming conflict(s)", conflicts.len())]
    Conflicts { conflicts: Vec<Conflict> },
}

/// One remap run: construct with the policy options, feed it decoded
/// headers and the rename table.
pub struct Pipeline {
    options: RemapOptions,
}

impl Pipeline {
    pub fn new(options: RemapOptions) -> Pipeline {
        Pipeline { options }
    }

    /// Execute all four phases. The returned output owns the frozen,
    /// fully-propagated graph; reading mappings from it is race-free.
    pub fn run(
        &self,
        units: Vec<UnitResult>,
        renames: &[RenameEntry],
    ) -> Result<RemapOutput, DriverError> {
        let builder = GraphBuilder::new(self.options.clone());

        {
            let _span = tracing::info_span!("analyze", units = units.len()).entered();
            units.into_par_iter().try_for_each(|unit| {
                match unit {
                    Err(err) => {
                        tracing::warn!(
                            unit = %err.unit,
                            reason = %err.reason,
                            "dropping unparseable unit"
                        );
                        Ok(())
                    }
                    Ok(header) => match builder.add_class(header) {
                        Ok(()) => Ok(()),
                        Err(err) if err.is_unit_fault() => {
                            tracing::warn!(%err, "dropping malformed unit");
                            Ok(())
                        }
                        // Invariant violations abort the whole run.
                        Err(err) => Err(err),
                    },
                }
            })?;
        }

        let graph = {
            let _span = tracing::info_span!("merge").entered();
            builder.freeze()
        };
        tracing::debug!(classes = graph.class_count(), "graph frozen");

        {
            let _span = tracing::info_span!("propagate", entries = renames.len()).entered();
            renames
                .par_chunks(SEED_BATCH)
                .for_each(|batch| Propagator::new(&graph).run(batch));
        }

        let conflicts = {
            let _span = tracing::info_span!("report").entered();
            graph.conflict_report()
        };
        if !conflicts.is_empty() && !self.options.tolerate_conflicts {
            return Err(DriverError::Conflicts { conflicts });
        }

        Ok(RemapOutput { graph, conflicts })
    }
}

/// Result of a completed run: the finalized graph plus the (possibly
/// tolerated) conflict report.
pub struct RemapOutput {
    graph: ClassGraph,
    conflicts: Vec<Conflict>,
}

impl std::fmt::Debug for RemapOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemapOutput")
            .field("conflicts", &self.conflicts)
            .finish_non_exhaustive()
    }
}

impl RemapOutput {
    pub fn graph(&self) -> &ClassGraph {
        &self.graph
    }

    /// The total name-mapping functions consumed by the rewrite pipeline.
    pub fn mappings(&self) -> Mappings<'_> {
        self.graph.mappings()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

// src/dag/graph.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, info};

use crate::job::JobRecord;
use crate::types::JobId;
use crate::validate::ValidationOutcome;

pub const CIRCULAR_DEPENDENCY: &str = "Circular dependency detected";

/// Dependency graph of one logical batch, keyed by job id.
///
/// The first record seen for an id is canonical; later records with the same
/// id are remembered only as duplicates and contribute no edges.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    ids: HashSet<JobId>,
    /// Canonical jobs in batch order with their direct dependencies.
    edges: Vec<(JobId, Vec<JobId>)>,
    /// Ids seen more than once, one entry per extra occurrence.
    duplicates: Vec<JobId>,
}

impl DependencyGraph {
    pub fn from_jobs(jobs: &[JobRecord]) -> Self {
        let mut graph = Self::default();

        for job in jobs {
            if graph.ids.insert(job.job_id) {
                graph.edges.push((job.job_id, job.dependency_ids().collect()));
            } else {
                graph.duplicates.push(job.job_id);
            }
        }

        graph
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.ids.contains(&id)
    }

    pub fn job_count(&self) -> usize {
        self.edges.len()
    }

    pub fn duplicates(&self) -> &[JobId] {
        &self.duplicates
    }

    /// Direct dependencies of a job (empty for unknown ids).
    pub fn dependencies_of(&self, id: JobId) -> &[JobId] {
        self.edges
            .iter()
            .find(|(job, _)| *job == id)
            .map(|(_, deps)| deps.as_slice())
            .unwrap_or(&[])
    }

    /// Every `(job, dependency)` pair whose dependency is not in the batch,
    /// in job order then declaration order. Repeated references are kept.
    pub fn missing_references(&self) -> Vec<(JobId, JobId)> {
        self.edges
            .iter()
            .flat_map(|(job, deps)| {
                deps.iter()
                    .filter(|dep| !self.ids.contains(dep))
                    .map(move |dep| (*job, *dep))
            })
            .collect()
    }

    /// Some job on a dependency cycle, or `None` if the graph is acyclic.
    ///
    /// Only the first cycle found is reported. A job that depends on itself
    /// is a cycle of one.
    pub fn find_cycle(&self) -> Option<JobId> {
        // Edge direction: dep -> job, so a valid order runs upstream first.
        let mut graph: DiGraphMap<JobId, ()> = DiGraphMap::new();

        for (job, _) in &self.edges {
            graph.add_node(*job);
        }
        for (job, deps) in &self.edges {
            for dep in deps {
                graph.add_edge(*dep, *job, ());
            }
        }

        toposort(&graph, None).err().map(|cycle| cycle.node_id())
    }

    /// Check ids, references and acyclicity. Produces errors only.
    pub fn validate(&self) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        for id in &self.duplicates {
            outcome = outcome.with_error(format!("Duplicate job ID: {id}"));
        }

        for (job, dep) in self.missing_references() {
            outcome = outcome.with_error(format!("Job {job} depends on non-existent job {dep}"));
        }

        if let Some(node) = self.find_cycle() {
            debug!(job_id = node, "dependency cycle found");
            outcome = outcome.with_error(CIRCULAR_DEPENDENCY);
        }

        info!(
            jobs = self.job_count(),
            errors = outcome.errors().len(),
            "dependency validation complete"
        );
        outcome
    }
}

/// Validate the dependency graph of a batch of jobs.
pub fn validate_dependencies(jobs: &[JobRecord]) -> ValidationOutcome {
    DependencyGraph::from_jobs(jobs).validate()
}

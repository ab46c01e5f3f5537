//! The job dependency DAG: adjacency lists plus in-degree counters that
//! feed the ready frontier.

use crate::{Instance, JobIndex};

pub struct JobGraph {
	/// `dependents[d]` lists every job that depends on job `d`.
	pub dependents: Vec<Vec<JobIndex>>,
	/// Number of not-yet-scheduled dependencies remaining for each job.
	pub remaining_deps: Vec<usize>,
}

impl JobGraph {
	pub fn new(instance: &Instance) -> Self {
		let n = instance.jobs.len();
		let mut dependents = vec![Vec::new(); n];
		let mut remaining_deps = vec![0usize; n];
		for (i, job) in instance.jobs.iter().enumerate() {
			remaining_deps[i] = job.dependencies.len();
			for &d in &job.dependencies {
				dependents[d].push(i);
			}
		}
		JobGraph { dependents, remaining_deps }
	}

	/// Jobs with no dependencies at all, in ascending index order. The
	/// seed for the ready-frontier heap.
	pub fn initially_ready(&self) -> Vec<JobIndex> {
		self.remaining_deps
			.iter()
			.enumerate()
			.filter(|&(_, &count)| count == 0)
			.map(|(i, _)| i)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Job;

	#[test]
	fn test_initially_ready_includes_only_dependency_free_jobs() {
		let instance = Instance::new(
			vec![1],
			vec![
				Job::new(1),
				Job::new(1).with_dependencies([0]),
				Job::new(1),
				Job::new(1).with_dependencies([0, 2]),
			],
		);
		let graph = JobGraph::new(&instance);
		assert_eq!(graph.initially_ready(), vec![0, 2]);
		assert_eq!(graph.remaining_deps, vec![0, 1, 0, 2]);
	}

	#[test]
	fn test_dependents_are_populated() {
		let instance = Instance::new(
			vec![1],
			vec![Job::new(1), Job::new(1).with_dependencies([0]), Job::new(1).with_dependencies([0])],
		);
		let graph = JobGraph::new(&instance);
		assert_eq!(graph.dependents[0], vec![1, 2]);
		assert!(graph.dependents[1].is_empty());
	}
}

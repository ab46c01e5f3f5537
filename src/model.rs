use crate::{JobIndex, Machine, Time};

use std::fmt;

/// How a job may be spread across machines and in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Splitting {
	/// Must run en bloc on a single machine.
	None,
	/// May be interrupted and resumed, but always on one machine.
	#[default]
	Preemption,
	/// May run concurrently on several machines, each fragment of
	/// wall-clock length at least `min_fragment_size`.
	MultipleMachines,
}

/// A job to be scheduled.
///
/// `size` is the processing requirement in unit-machine time: a fragment
/// of wall-clock length `d` on a machine of speed `s` completes `d * s`
/// units of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
	pub size: Time,
	pub delivery_time: Time,
	pub splitting: Splitting,
	pub dependencies: Vec<JobIndex>,
	pub release_time: Time,
	pub pre_assignment: Option<Machine>,
}

impl Job {
	/// A new job of the given size, with no dependencies, no release
	/// delay, no delivery time, default (preemptive) splitting and no
	/// pre-assignment.
	pub fn new(size: Time) -> Self {
		Job {
			size,
			delivery_time: 0,
			splitting: Splitting::default(),
			dependencies: Vec::new(),
			release_time: 0,
			pre_assignment: None,
		}
	}

	pub fn with_release_time(mut self, release_time: Time) -> Self {
		self.release_time = release_time;
		self
	}

	/// Post-processing idle duration that blocks dependents but not the
	/// machine. Also known as "wait time" in some scheduling literature.
	pub fn with_delivery_time(mut self, delivery_time: Time) -> Self {
		self.delivery_time = delivery_time;
		self
	}

	pub fn with_wait_time(self, wait_time: Time) -> Self {
		self.with_delivery_time(wait_time)
	}

	pub fn with_splitting(mut self, splitting: Splitting) -> Self {
		self.splitting = splitting;
		self
	}

	pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = JobIndex>) -> Self {
		self.dependencies = dependencies.into_iter().collect();
		self
	}

	pub fn with_pre_assignment(mut self, machine: Machine) -> Self {
		self.pre_assignment = Some(machine);
		self
	}
}

/// A validated scheduling instance: machines and the jobs to place on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
	pub machine_speeds: Vec<Time>,
	pub jobs: Vec<Job>,
	pub min_fragment_size: Time,
}

impl Instance {
	pub fn new(machine_speeds: Vec<Time>, jobs: Vec<Job>) -> Self {
		Instance {
			machine_speeds,
			jobs,
			min_fragment_size: 0,
		}
	}

	pub fn with_min_fragment_size(mut self, min_fragment_size: Time) -> Self {
		self.min_fragment_size = min_fragment_size;
		self
	}
}

/// One contiguous interval during which a job occupies (or merely waits
/// on) one machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobFragment {
	pub machine: Machine,
	pub start: Time,
	pub end: Time,
	pub is_waiting: bool,
}

/// The fragment lists produced for every job of an instance, indexed the
/// same way as `Instance::jobs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
	pub jobs: Vec<Vec<JobFragment>>,
}

impl Schedule {
	pub fn new(num_jobs: usize) -> Self {
		Schedule {
			jobs: vec![Vec::new(); num_jobs],
		}
	}

	pub fn len(&self) -> usize {
		self.jobs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.jobs.is_empty()
	}
}

impl std::ops::Index<JobIndex> for Schedule {
	type Output = Vec<JobFragment>;
	fn index(&self, job: JobIndex) -> &Self::Output {
		&self.jobs[job]
	}
}

impl std::ops::IndexMut<JobIndex> for Schedule {
	fn index_mut(&mut self, job: JobIndex) -> &mut Self::Output {
		&mut self.jobs[job]
	}
}

impl fmt::Display for Schedule {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.jobs.iter().all(|frags| frags.is_empty()) {
			return write!(f, "(empty schedule)");
		}
		for (job, fragments) in self.jobs.iter().enumerate() {
			for fragment in fragments {
				writeln!(
					f,
					"job {:>4} | machine {:>3} | {:>7} -> {:<7}{}",
					job,
					fragment.machine,
					fragment.start,
					fragment.end,
					if fragment.is_waiting { " (waiting)" } else { "" }
				)?;
			}
		}
		Ok(())
	}
}

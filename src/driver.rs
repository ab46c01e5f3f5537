//! The scheduler driver: validates an instance, drives the ready
//! frontier, and assembles the per-job fragments the planner produces
//! into the final schedule.

use crate::gaps::GapList;
use crate::graph::JobGraph;
use crate::heap::BinaryHeap;
use crate::planner::{self, MachineSet};
use crate::{Instance, JobFragment, JobIndex, Machine, Schedule, ScheduleError, Splitting, Time};

fn validate(instance: &Instance) -> Result<(), ScheduleError> {
	if instance.machine_speeds.is_empty() {
		return Err(ScheduleError::NoMachines);
	}
	for (machine, &speed) in instance.machine_speeds.iter().enumerate() {
		if speed < 0 {
			return Err(ScheduleError::NegativeMachineSpeed { machine, value: speed });
		}
	}
	if instance.min_fragment_size < 0 {
		return Err(ScheduleError::NegativeMinFragmentSize { value: instance.min_fragment_size });
	}

	let num_jobs = instance.jobs.len();
	let num_machines = instance.machine_speeds.len();
	for (job, j) in instance.jobs.iter().enumerate() {
		if j.size < 0 {
			return Err(ScheduleError::Negative { job, field: "size", value: j.size });
		}
		if j.delivery_time < 0 {
			return Err(ScheduleError::Negative { job, field: "deliveryTime", value: j.delivery_time });
		}
		if j.release_time < 0 {
			return Err(ScheduleError::Negative { job, field: "releaseTime", value: j.release_time });
		}
		for &dep in &j.dependencies {
			if dep >= num_jobs {
				return Err(ScheduleError::DependencyOutOfRange { job, dep, num_jobs });
			}
		}
		if let Some(machine) = j.pre_assignment {
			if machine >= num_machines {
				return Err(ScheduleError::MachineOutOfRange { job, machine, num_machines });
			}
		}
	}
	Ok(())
}

/// Picks the candidate machine set and the delivery machine for one job,
/// per the three-way branch in the driver's outer loop: multiple-machines
/// jobs use every machine, pre-assigned jobs are pinned, and everything
/// else is decided by a trial placement on each machine in turn.
fn choose_machines(
	instance: &Instance,
	gaps: &mut [GapList],
	job_index: JobIndex,
	earliest_start: Time,
	is_preemptible: bool,
) -> (MachineSet, Machine) {
	let job = &instance.jobs[job_index];

	if job.splitting == Splitting::MultipleMachines {
		return (MachineSet::All, job.pre_assignment.unwrap_or(0));
	}

	if let Some(machine) = job.pre_assignment {
		return (MachineSet::Single(machine), machine);
	}

	let mut best: Option<(Time, Machine)> = None;
	for machine in 0..instance.machine_speeds.len() {
		let completion = planner::plan(
			gaps,
			&instance.machine_speeds,
			MachineSet::Single(machine),
			job.size,
			is_preemptible,
			instance.min_fragment_size,
			earliest_start,
			false,
			None,
		);
		match best {
			Some((best_completion, _)) if completion >= best_completion => {}
			_ => best = Some((completion, machine)),
		}
	}
	let (_, machine) = best.expect("validate() rejects instances with zero machines");
	(MachineSet::Single(machine), machine)
}

/// Computes a deterministic schedule for `instance`, or the reason it
/// could not produce one: a structural problem with the input, or a
/// cycle discovered in the dependency graph.
pub fn compute_schedule(instance: &Instance) -> Result<Schedule, ScheduleError> {
	validate(instance)?;

	let num_jobs = instance.jobs.len();
	let mut schedule = Schedule::new(num_jobs);
	if num_jobs == 0 {
		return Ok(schedule);
	}

	let graph = JobGraph::new(instance);
	let mut remaining_deps = graph.remaining_deps.clone();
	let mut gaps: Vec<GapList> = instance.machine_speeds.iter().map(|_| GapList::new()).collect();
	// finish_time[j] is the end of j's last fragment (delivery time included
	// when present); tracked explicitly rather than read back off
	// `schedule[j].last()` so that a job with an empty fragment list (size 0,
	// no delivery) still contributes its own earliest_start to dependents.
	let mut finish_time = vec![0 as Time; num_jobs];

	let mut ready = BinaryHeap::new(graph.initially_ready(), |a: &JobIndex, b: &JobIndex| a.cmp(b));
	let mut scheduled = 0usize;

	while let Some(j) = ready.extract_min() {
		scheduled += 1;
		let job = &instance.jobs[j];
		let is_preemptible = job.splitting != Splitting::None;

		let earliest_start = job
			.dependencies
			.iter()
			.fold(job.release_time, |acc, &d| acc.max(finish_time[d]));

		let (candidates, delivery_machine) = choose_machines(instance, &mut gaps, j, earliest_start, is_preemptible);

		let completion = planner::plan(
			&mut gaps,
			&instance.machine_speeds,
			candidates,
			job.size,
			is_preemptible,
			instance.min_fragment_size,
			earliest_start,
			true,
			Some(&mut schedule[j]),
		);

		let mut last_end = completion;
		if job.delivery_time > 0 {
			schedule[j].push(JobFragment {
				machine: delivery_machine,
				start: completion,
				end: completion + job.delivery_time,
				is_waiting: true,
			});
			last_end = completion + job.delivery_time;
		}
		finish_time[j] = last_end;

		for &dependent in &graph.dependents[j] {
			remaining_deps[dependent] -= 1;
			if remaining_deps[dependent] == 0 {
				ready.add(dependent);
			}
		}
	}

	if scheduled < num_jobs {
		return Err(ScheduleError::Cycle);
	}

	Ok(schedule)
}

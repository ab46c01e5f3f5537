//! The fragment planner: for one ready job, simulate its placement on a
//! candidate set of machines and produce the resulting fragments.

use crate::gaps::{GapList, FIRST_REAL_GAP};
use crate::{JobFragment, Machine, Time};

/// The candidate machine set a job may run on, chosen by the driver
/// before calling the planner. Replaces the "iterate all vs. single
/// machine" polymorphism with a plain tagged variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineSet {
	All,
	Single(Machine),
}

impl MachineSet {
	fn indices(&self, num_machines: usize) -> Vec<Machine> {
		match self {
			MachineSet::All => (0..num_machines).collect(),
			MachineSet::Single(m) => vec![*m],
		}
	}
}

struct MachineState {
	index: Machine,
	speed: Time,
	local_gaps: GapList,
	cursor: usize,
	current_fragment_start: Option<Time>,
}

/// `ceil(num / den)`, saturating to `Time::MAX` when `den` is zero and
/// `num` is not (a zero-speed machine can never host non-zero work).
fn div_ceil(num: Time, den: Time) -> Time {
	if num == 0 {
		0
	} else if den == 0 {
		Time::MAX
	} else {
		(num + den - 1) / den
	}
}

fn emit_fragment(m: &mut MachineState, start: Time, end: Time, out: &mut Option<&mut Vec<JobFragment>>) {
	m.local_gaps.consume(&mut m.cursor, start, end);
	if end > start {
		if let Some(out) = out.as_deref_mut() {
			out.push(JobFragment {
				machine: m.index,
				start,
				end,
				is_waiting: false,
			});
		}
	}
}

/// Plans the placement of one job of the given `size` onto `candidates`.
///
/// When `commit` is `true`, the machines' gap lists in `shared_gaps` are
/// updated to reflect the placement and, if `out` is given, the
/// resulting fragments (sorted by `(end, machine)`) are appended to it.
/// When `commit` is `false` this is a pure trial: `shared_gaps` is read
/// but never written, regardless of how many machine-state changes the
/// simulation goes through internally.
///
/// Returns the job's completion time.
#[allow(clippy::too_many_arguments)]
pub fn plan(
	shared_gaps: &mut [GapList],
	machine_speeds: &[Time],
	candidates: MachineSet,
	size: Time,
	is_preemptible: bool,
	min_fragment_size_cfg: Time,
	earliest_start: Time,
	commit: bool,
	mut out: Option<&mut Vec<JobFragment>>,
) -> Time {
	let min_fragment_size = if is_preemptible { size.min(min_fragment_size_cfg) } else { size };

	let candidate_indices = candidates.indices(machine_speeds.len());
	debug_assert!(!candidate_indices.is_empty());

	let mut machines: Vec<MachineState> = candidate_indices
		.iter()
		.map(|&index| MachineState {
			index,
			speed: machine_speeds[index],
			local_gaps: shared_gaps[index].clone(),
			cursor: FIRST_REAL_GAP,
			current_fragment_start: None,
		})
		.collect();

	let mut current_speed: Time = 0;
	let mut last_timestamp = earliest_start;
	let mut remaining_size = size;

	while remaining_size > 0 {
		// Step 1: earliest moment any candidate machine's state could change.
		let mut best: Option<(Time, usize)> = None;
		for (pos, m) in machines.iter_mut().enumerate() {
			let event_time = if m.current_fragment_start.is_some() {
				m.local_gaps.gap_end(m.cursor)
			} else {
				let min_wall_clock = div_ceil(min_fragment_size, m.speed);
				m.local_gaps.next_time_stamp(&mut m.cursor, min_wall_clock, earliest_start)
			};
			match best {
				Some((best_time, _)) if event_time >= best_time => {}
				_ => best = Some((event_time, pos)),
			}
		}
		let (mut event_time, best_pos) = best.expect("candidate machine set is non-empty");

		// Step 2: would the job finish before that state change?
		let mut is_projected_end = false;
		if current_speed > 0 {
			let projected = last_timestamp + div_ceil(remaining_size, current_speed);
			if projected < event_time {
				event_time = projected;
				is_projected_end = true;
			}
		}

		// Step 3: account for work done by all currently-running fragments.
		remaining_size -= (event_time - last_timestamp) * current_speed;

		// Step 4: apply the state change, unless the job ended first.
		if !is_projected_end {
			let m = &mut machines[best_pos];
			if m.current_fragment_start.is_none() {
				let gap_start = m.local_gaps.gap_start(m.cursor);
				let fragment_start = std::cmp::max(earliest_start, gap_start);
				m.current_fragment_start = Some(fragment_start);
				remaining_size -= (event_time - fragment_start) * m.speed;
				current_speed += m.speed;
			} else {
				let fragment_start = m.current_fragment_start.take().unwrap();
				emit_fragment(m, fragment_start, event_time, &mut out);
				current_speed -= m.speed;
			}
		}

		debug_assert!(!is_projected_end || remaining_size <= 0);

		// Step 5.
		last_timestamp = event_time;
	}

	for m in machines.iter_mut() {
		if let Some(fragment_start) = m.current_fragment_start.take() {
			emit_fragment(m, fragment_start, last_timestamp, &mut out);
		}
	}

	if commit {
		if let Some(out) = out.as_deref_mut() {
			out.sort_by_key(|f| (f.end, f.machine));
		}
		for m in &machines {
			shared_gaps[m.index] = m.local_gaps.clone();
		}
	}

	last_timestamp
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fresh_gaps(n: usize) -> Vec<GapList> {
		(0..n).map(|_| GapList::new()).collect()
	}

	#[test]
	fn test_single_machine_non_preemptible_en_bloc() {
		let mut gaps = fresh_gaps(1);
		let mut out = Vec::new();
		let completion = plan(&mut gaps, &[2], MachineSet::Single(0), 6, false, 0, 0, true, Some(&mut out));
		assert_eq!(completion, 3);
		assert_eq!(
			out,
			vec![JobFragment { machine: 0, start: 0, end: 3, is_waiting: false }]
		);
	}

	#[test]
	fn test_zero_size_job_emits_no_fragment() {
		let mut gaps = fresh_gaps(1);
		let mut out = Vec::new();
		let completion = plan(&mut gaps, &[2], MachineSet::Single(0), 0, true, 0, 5, true, Some(&mut out));
		assert_eq!(completion, 5);
		assert!(out.is_empty());
	}

	#[test]
	fn test_dry_run_does_not_mutate_shared_gaps() {
		let mut gaps = fresh_gaps(1);
		let before = gaps[0].clone();
		let completion = plan(&mut gaps, &[2], MachineSet::Single(0), 6, false, 0, 0, false, None);
		assert_eq!(completion, 3);
		assert_eq!(gaps[0], before);
	}

	#[test]
	fn test_multiple_machines_run_concurrently_from_the_start() {
		// both machines are free from t=0, so a MULTIPLE_MACHINES job with no
		// minimum fragment size grabs both immediately; size is chosen to
		// divide evenly by the combined speed so no rounding slack occurs.
		let mut gaps = fresh_gaps(2);
		let mut out = Vec::new();
		let completion = plan(&mut gaps, &[10, 1], MachineSet::All, 33, true, 0, 0, true, Some(&mut out));
		assert_eq!(completion, 3);
		let mut sorted = out.clone();
		sorted.sort_by_key(|f| (f.machine, f.start));
		assert_eq!(
			sorted,
			vec![
				JobFragment { machine: 0, start: 0, end: 3, is_waiting: false },
				JobFragment { machine: 1, start: 0, end: 3, is_waiting: false },
			]
		);
	}

	#[test]
	fn test_single_machine_blocked_gap_forces_split() {
		// machine 0 has a pre-existing busy interval [1, 2); a preemptible
		// job of size 2 at speed 1 must split around it.
		let mut gaps = fresh_gaps(1);
		let mut cursor = FIRST_REAL_GAP;
		gaps[0].consume(&mut cursor, 1, 2);
		let mut out = Vec::new();
		let completion = plan(&mut gaps, &[1], MachineSet::Single(0), 2, true, 0, 0, true, Some(&mut out));
		assert_eq!(completion, 3);
		assert_eq!(
			out,
			vec![
				JobFragment { machine: 0, start: 0, end: 1, is_waiting: false },
				JobFragment { machine: 0, start: 2, end: 3, is_waiting: false },
			]
		);
	}
}

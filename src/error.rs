use crate::Time;

/// Everything that can keep `compute_schedule` from producing a schedule.
///
/// Callers that pattern-match on `.to_string()` rely on the substrings
/// baked into each variant below (`"required"`, `"cycle"`,
/// `"negative"`/`"integer"`, and a generic out-of-range message); callers
/// that want structured discrimination can match on the variant instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ScheduleError {
	#[error("at least one machine is required")]
	NoMachines,

	#[error("dependency graph contains a cycle")]
	Cycle,

	#[error("machine {machine}: speed must be a non-negative integer, got {value}")]
	NegativeMachineSpeed { machine: usize, value: Time },

	#[error("minFragmentSize must be a non-negative integer, got {value}")]
	NegativeMinFragmentSize { value: Time },

	#[error("job {job}: {field} must be a non-negative integer, got {value}")]
	Negative {
		job: usize,
		field: &'static str,
		value: Time,
	},

	#[error("job {job}: dependency index {dep} is out of range (have {num_jobs} jobs)")]
	DependencyOutOfRange {
		job: usize,
		dep: usize,
		num_jobs: usize,
	},

	#[error(
		"job {job}: pre-assignment machine index {machine} is out of range (have {num_machines} machines)"
	)]
	MachineOutOfRange {
		job: usize,
		machine: usize,
		num_machines: usize,
	},
}

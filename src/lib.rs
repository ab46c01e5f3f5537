pub type Time = i64; // timestamps, durations and speeds are all non-negative integers
pub type JobIndex = usize; // jobs are identified by their position in Instance::jobs
pub type Machine = usize; // machines are identified by their position in Instance::machine_speeds

pub mod model;
pub use model::*;

pub mod error;
pub use error::ScheduleError;

pub mod heap;
pub mod gaps;
pub mod graph;
pub mod planner;

pub mod driver;
pub use driver::compute_schedule;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dagsched::{compute_schedule, Instance, Job, Splitting};

/// 200 jobs over 8 machines, arranged in short dependency chains of three,
/// with every fifth job splittable across machines — large enough to
/// exercise the planner's event loop and the trial-placement scan
/// repeatedly without needing external randomness.
fn example_200() -> Instance {
	let machine_speeds: Vec<_> = (1..=8).collect();
	let jobs = (0..200)
		.map(|i| {
			let size = 3 + (i * 7) % 37;
			let release_time = (i * 5) % 50;
			let mut job = Job::new(size).with_release_time(release_time);
			if i % 3 == 0 && i >= 2 {
				job = job.with_dependencies([i - 1, i - 2]);
			}
			if i % 5 == 0 {
				job = job.with_splitting(Splitting::MultipleMachines);
			} else if i % 5 == 1 {
				job = job.with_splitting(Splitting::None);
			}
			job
		})
		.collect();
	Instance::new(machine_speeds, jobs)
}

pub fn benchmark_compute_schedule(c: &mut Criterion) {
	let instance = example_200();
	c.bench_function("compute_schedule_200_jobs", |b| {
		b.iter(|| {
			let schedule = compute_schedule(black_box(&instance)).unwrap();
			assert_eq!(schedule.len(), 200);
		})
	});
}

criterion_group!(benches, benchmark_compute_schedule);
criterion_main!(benches);

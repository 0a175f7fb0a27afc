// SPDX-License-Identifier: Apache-2.0

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use roombuf::{Rooms, Storage};

const ROOMS: usize = Rooms::V1K.volume() * Rooms::V1K.volume();

fn create(c: &mut Criterion) {
	let mut group = c.benchmark_group("create");
	group.bench_function("reserve", |b| b.iter(|| Storage::<u64>::new(ROOMS).unwrap()));
	group.bench_function("filled", |b| b.iter(||
		Storage::filled(ROOMS, 0xdeadbeef_u64).unwrap()
	));
	group.bench_function("strings", |b| b.iter(||
		Storage::filled(Rooms::V16K.volume(), String::from("DEAD_BEEF")).unwrap()
	));
	group.finish();
}

fn assign(c: &mut Criterion) {
	let source = Storage::filled(ROOMS, 0xdeadbeef_u64).unwrap();
	let mut group = c.benchmark_group("assign");
	group.bench_function("copy", |b| b.iter_batched_ref(
		|| Storage::<u64>::new(ROOMS).unwrap(),
		|target| target.assign_from(&source).unwrap(),
		BatchSize::LargeInput
	));
	group.bench_function("move", |b| b.iter_batched(
		|| (Storage::<u64>::new(ROOMS).unwrap(), source.clone()),
		|(mut target, mut source)| {
			target.replace_with(&mut source).unwrap();
			target
		},
		BatchSize::LargeInput
	));
	group.finish();
}

fn resize(c: &mut Criterion) {
	let source = Storage::filled(Rooms::V16K.volume(), 7u32).unwrap();
	c.bench_function("grow_double", |b| b.iter_batched(
		|| source.clone(),
		|mut storage| {
			storage.grow_double().unwrap();
			storage
		},
		BatchSize::SmallInput
	));
}

criterion_group!(benches, create, assign, resize);
criterion_main!(benches);

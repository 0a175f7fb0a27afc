// Copyright 2023 Strixpyrr
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::rc::Rc;
use pretty_assertions::assert_eq;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use roombuf::{Code, DEFAULT_VOLUME, Error, Rooms, Storage};

#[macro_use]
mod common;

#[quickcheck]
fn new_is_empty(capacity: usize) -> TestResult {
	let capacity = common::capacity(capacity);
	let storage = Storage::<u16>::new(capacity).unwrap();
	qc_ensure_eq!(storage.is_init(), capacity > 0, "init");
	qc_ensure_eq!(storage.capacity(), capacity, "capacity");
	qc_assert_eq!(storage.size(), 0, "size")
}

#[quickcheck]
fn resize_keeps_prefix(data: Vec<u32>, capacity: usize) -> TestResult {
	let capacity = common::capacity(capacity);
	let mut storage = Storage::from(data.clone());
	storage.resize(capacity).unwrap();
	let kept = data.len().min(capacity);
	qc_ensure_eq!(storage.capacity(), capacity, "capacity");
	qc_assert_eq!(storage.as_slice(), &data[..kept])
}

#[quickcheck]
fn clone_matches(data: Vec<String>, spare: u8) -> TestResult {
	let mut storage = Storage::new(data.len() + spare as usize).unwrap();
	storage.copy_from(&data).unwrap();
	let copy = storage.clone();
	qc_ensure_eq!(copy.capacity(), storage.capacity(), "capacity");
	qc_assert_eq!(copy, storage)
}

#[quickcheck]
fn shrink_to_fit_tightens(data: Vec<u8>, spare: u8) -> TestResult {
	let mut storage = Storage::new(data.len() + spare as usize).unwrap();
	storage.copy_from(&data).unwrap();
	storage.shrink_to_fit().unwrap();
	if data.is_empty() {
		qc_assert_eq!(storage.capacity(), spare as usize, "empty storage shouldn't shrink")
	} else {
		qc_assert_eq!(storage.capacity(), data.len(), "capacity")
	}
}

#[test]
fn presets() {
	assert_eq!(Storage::<u8>::default().capacity(), DEFAULT_VOLUME);
	for rooms in [Rooms::V64, Rooms::V512, Rooms::V16K] {
		let storage = Storage::<u64>::from_rooms(rooms).unwrap();
		assert_eq!(storage.capacity(), rooms.volume());
	}
}

#[test]
fn assign_insufficient_capacity() {
	let source = Storage::filled(16, 1u8).unwrap();
	let mut target = Storage::filled(8, 2u8).unwrap();
	let error = target.assign_from(&source).unwrap_err();
	assert_eq!(error, Error::InsufficientCapacity { required: 16, capacity: 8 });
	assert_eq!(error.code(), Code::Overflow);
	assert_eq!(target.as_slice(), &[2; 8]);
}

#[test]
fn replace_with_moves_allocation() {
	let mut source = Storage::filled(8, String::from("abc")).unwrap();
	let ptr = source.as_ptr();
	let mut target = Storage::<String>::new(16).unwrap();
	target.replace_with(&mut source).unwrap();
	assert!(!source.is_init());
	assert_eq!(target.capacity(), 8);
	assert_eq!(target.as_ptr(), ptr);
}

#[test]
fn destroys_every_slot() {
	let value = Rc::new(());
	{
		let mut storage = Storage::<Option<Rc<()>>>::new(4).unwrap();
		storage.copy_from(&[Some(value.clone()), Some(value.clone())]).unwrap();
		storage.grow(4).unwrap();
		assert_eq!(Rc::strong_count(&value), 3);
		storage.resize(1).unwrap();
		assert_eq!(Rc::strong_count(&value), 2);
	}
	assert_eq!(Rc::strong_count(&value), 1);
}

#[test]
fn large_allocation_fails() {
	let result = Storage::<u64>::new(usize::MAX / 2);
	assert_eq!(result.unwrap_err().code(), Code::NoResource);
}

// SPDX-License-Identifier: Apache-2.0

//! Contiguous slot storage.
//!
//! A [`Storage`] allocates all of its slots up front and default-constructs
//! every one of them, so the whole allocation is always valid to index. Live
//! elements occupy the front of the allocation, up to the *tail*:
//!
//! ```text
//! after construction   ###########.........#
//!                      ^                    ^
//!                      head, tail           end
//!
//! after two writes     xx#########.........#
//!                      ^ ^                  ^
//!                      | tail               end
//!                      head
//! ```
//!
//! Storage only grows when asked to. Growth reallocates, moves the live range
//! into the new allocation and default-constructs the remaining slots.

use std::{fmt, mem, ptr, slice};
use std::alloc::{handle_alloc_error, Layout};
use std::cmp::min;
use std::mem::MaybeUninit;
use all_asserts::debug_assert_le;
use log::{error, trace, warn};
use crate::{DEFAULT_VOLUME, Error, Result, Rooms};

type Slots<T> = Box<[MaybeUninit<T>]>;

/// Allocates `count` unconstructed slots, reporting allocator failure instead
/// of aborting.
fn allocate<T>(count: usize) -> Result<Slots<T>> {
	let mut slots = Vec::new();
	if let Err(err) = slots.try_reserve_exact(count) {
		error!("failed to allocate {count} slots: {err}");
		return Err(Error::NoResource { requested: count })
	}
	slots.resize_with(count, MaybeUninit::uninit);
	Ok(slots.into_boxed_slice())
}

/// A fixed-capacity, eagerly constructed slot allocation with a live range at
/// its front.
pub struct Storage<T> {
	/// The allocation, `None` when nothing is allocated or after a move.
	head: Option<Slots<T>>,
	/// The live element count.
	tail: usize,
	/// The constructed slot count, from the head.
	built: usize,
}

impl<T> Storage<T> {
	/// Creates an uninitialized storage, owning no allocation.
	pub const fn uninit() -> Self {
		Self {
			head: None,
			tail: 0,
			built: 0,
		}
	}

	/// Returns `true` if the storage owns an allocation.
	#[inline]
	pub fn is_init(&self) -> bool { self.head.is_some() }
	/// Returns the number of allocated slots.
	#[inline]
	pub fn capacity(&self) -> usize { self.head.as_ref().map_or(0, |slots| slots.len()) }
	/// Returns the number of live elements.
	#[inline]
	pub fn size(&self) -> usize { self.tail }
	/// Returns `true` if there are no live elements.
	#[inline]
	pub fn is_empty(&self) -> bool { self.tail == 0 }
	/// Returns `true` if every slot is live.
	#[inline]
	pub fn is_full(&self) -> bool { self.tail == self.capacity() }
	/// Returns `true` if at least one more element fits without growing.
	#[inline]
	pub fn has_rooms(&self) -> bool { self.tail < self.capacity() }
	/// Returns `true` if one more element would not fit without growing.
	#[inline]
	pub fn overflows(&self) -> bool { self.overflow(1) }
	/// Returns `true` if `count` more elements would not fit without growing.
	#[inline]
	pub fn overflow(&self, count: usize) -> bool {
		self.tail.checked_add(count).map_or(true, |end| end > self.capacity())
	}
	/// Returns the number of constructed slots.
	#[cfg(test)]
	#[inline]
	pub(crate) fn built(&self) -> usize { self.built }

	/// Returns the live elements.
	pub fn as_slice(&self) -> &[T] {
		match self.head.as_deref() {
			// SAFETY: the live range lies within the constructed range.
			Some(slots) => unsafe {
				&*(&slots[..self.tail] as *const [MaybeUninit<T>] as *const [T])
			},
			None => &[]
		}
	}

	/// Returns the live elements mutably.
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		let tail = self.tail;
		match self.head.as_deref_mut() {
			// SAFETY: the live range lies within the constructed range.
			Some(slots) => unsafe {
				&mut *(&mut slots[..tail] as *mut [MaybeUninit<T>] as *mut [T])
			},
			None => &mut []
		}
	}

	/// Returns a raw pointer to the head slot, dangling if uninitialized.
	pub fn as_ptr(&self) -> *const T {
		self.as_slice().as_ptr()
	}

	/// Returns a raw mutable pointer to the head slot, dangling if
	/// uninitialized.
	pub fn as_mut_ptr(&mut self) -> *mut T {
		self.as_mut_slice().as_mut_ptr()
	}

	/// Iterates over the live elements.
	pub fn iter(&self) -> slice::Iter<'_, T> { self.as_slice().iter() }

	/// Iterates mutably over the live elements.
	pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> { self.as_mut_slice().iter_mut() }

	/// Returns a reference to the constructed slot at `index`, which may lie past
	/// the live range, or `None` if it isn't constructed.
	pub fn slot(&self, index: usize) -> Option<&T> {
		if index >= self.built { return None }
		let slots = self.head.as_deref()?;
		// SAFETY: slots below `built` are constructed.
		Some(unsafe { slots[index].assume_init_ref() })
	}

	/// Moves the allocation out into a new storage, leaving this one
	/// uninitialized. The returned storage has the same capacity, size, and
	/// contents.
	pub fn take(&mut self) -> Self {
		mem::replace(self, Self::uninit())
	}

	/// Destroys every constructed slot, leaving the capacity allocated but no
	/// slot constructed until the next write.
	pub fn destroy_all(&mut self) {
		// Reset first, so a panicking destructor leaks instead of double-dropping.
		let built = mem::replace(&mut self.built, 0);
		self.tail = 0;
		if let Some(slots) = self.head.as_deref_mut() {
			// SAFETY: slots below `built` were constructed and are dropped once.
			unsafe {
				ptr::drop_in_place(&mut slots[..built] as *mut [MaybeUninit<T>] as *mut [T]);
			}
		}
	}

	/// Truncates the live range to at most `len` elements without destroying
	/// anything.
	pub(crate) fn truncate(&mut self, len: usize) {
		self.tail = min(self.tail, len);
	}

	/// Releases the allocation entirely.
	fn release(&mut self) {
		self.destroy_all();
		self.head = None;
	}

	fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
		self.head.as_deref_mut().unwrap_or_default()
	}

	fn alloc_failed(count: usize) -> ! {
		match Layout::array::<T>(count) {
			Ok(layout) => handle_alloc_error(layout),
			Err(_) => panic!("capacity overflow")
		}
	}

	/// Unwraps an allocating operation's result from a context that cannot
	/// return an error, deferring to the global allocation error handler.
	pub(crate) fn expect_alloc<R>(result: Result<R>) -> R {
		match result {
			Ok(value) => value,
			Err(Error::NoResource { requested }) => Self::alloc_failed(requested),
			Err(error) => panic!("{error}")
		}
	}
}

impl<T: Default + Clone> Storage<T> {
	/// Creates a storage with `capacity` default-constructed slots. A zero
	/// capacity allocates nothing.
	pub fn new(capacity: usize) -> Result<Self> {
		let mut storage = Self::uninit();
		storage.reserve(capacity)?;
		Ok(storage)
	}

	/// Creates a storage with a preset capacity.
	pub fn from_rooms(rooms: Rooms) -> Result<Self> {
		Self::new(rooms.volume())
	}

	/// Creates a storage with `capacity` live copies of `value`.
	pub fn filled(capacity: usize, value: T) -> Result<Self> {
		let mut storage = Self::uninit();
		if capacity > 0 {
			storage.head = Some(allocate(capacity)?);
			for index in 0..capacity {
				storage.construct_at(index, value.clone());
			}
			storage.tail = capacity;
		}
		Ok(storage)
	}

	/// Creates a storage holding exactly the values yielded by `values`.
	pub fn try_from_values(values: impl IntoIterator<Item = T>) -> Result<Self> {
		let values = Vec::from_iter(values);
		let mut storage = Self::uninit();
		if !values.is_empty() {
			storage.head = Some(allocate(values.len())?);
			for (index, value) in values.into_iter().enumerate() {
				storage.construct_at(index, value);
			}
			storage.tail = storage.built;
		}
		Ok(storage)
	}

	/// Copies the storage, with the same capacity and live contents.
	pub fn try_clone(&self) -> Result<Self> {
		let mut storage = Self::new(self.capacity())?;
		storage.extend_tail(self.as_slice());
		Ok(storage)
	}

	/// Copies `other`'s live contents over this storage's. Only takes effect if
	/// this storage's capacity is at least `other`'s, failing otherwise without
	/// modifying either.
	pub fn assign_from(&mut self, other: &Self) -> Result {
		self.check_assign(other)?;
		self.tail = 0;
		self.extend_tail(other.as_slice());
		Ok(())
	}

	/// Takes ownership of `other`'s allocation, destroying and releasing this
	/// storage's first and leaving `other` uninitialized. Only takes effect if
	/// this storage's capacity is at least `other`'s, failing otherwise without
	/// modifying either.
	pub fn replace_with(&mut self, other: &mut Self) -> Result {
		self.check_assign(other)?;
		*self = other.take();
		Ok(())
	}

	/// Overwrites from the head with `values`, making them the live range.
	pub fn copy_from(&mut self, values: &[T]) -> Result {
		let capacity = self.capacity();
		if values.len() > capacity {
			return Err(Error::InsufficientCapacity { required: values.len(), capacity })
		}
		self.tail = 0;
		self.extend_tail(values);
		Ok(())
	}

	/// Overwrites the first `count` slots from the head with copies of `value`,
	/// making them the live range.
	pub fn fill_from(&mut self, value: &T, count: usize) -> Result {
		let capacity = self.capacity();
		if count > capacity {
			return Err(Error::InsufficientCapacity { required: count, capacity })
		}
		self.tail = 0;
		for _ in 0..count {
			self.push_tail(value.clone());
		}
		Ok(())
	}

	/// Reallocates to exactly `capacity` slots, keeping as much of the live range
	/// as fits. Slots past the live range are default-constructed. On failure the
	/// storage is left unchanged.
	pub fn resize(&mut self, capacity: usize) -> Result {
		let Some(mut old) = self.head.take() else {
			return self.reserve(capacity)
		};
		if capacity == 0 {
			self.head = Some(old);
			self.release();
			return Ok(())
		}

		let mut slots = match allocate(capacity) {
			Ok(slots) => slots,
			Err(error) => {
				self.head = Some(old);
				return Err(error)
			}
		};

		let live = min(self.tail, capacity);
		let built = self.built;
		// SAFETY: the first `live` slots are constructed, and are moved out bitwise
		// into a distinct allocation, never to be read from `old` again.
		unsafe {
			ptr::copy_nonoverlapping(old.as_ptr(), slots.as_mut_ptr(), live);
		}
		trace!("resized storage from {} to {capacity} slots", old.len());
		self.head = Some(slots);
		self.tail = live;
		self.built = live;
		// SAFETY: slots between `live` and `built` are still constructed in `old`
		// and weren't moved.
		unsafe {
			ptr::drop_in_place(&mut old[live..built] as *mut [MaybeUninit<T>] as *mut [T]);
		}
		drop(old);
		self.build_to(capacity);
		Ok(())
	}

	/// Grows the capacity by `additional` slots.
	pub fn grow(&mut self, additional: usize) -> Result {
		let capacity = self.capacity().checked_add(additional).ok_or_else(|| {
			error!("capacity overflow growing by {additional} slots");
			Error::NoResource { requested: usize::MAX }
		})?;
		self.resize(capacity)
	}

	/// Doubles the capacity, growing an empty allocation to one slot.
	pub fn grow_double(&mut self) -> Result {
		let capacity = self.capacity();
		self.grow(capacity.max(1))
	}

	/// Reallocates down to exactly the live size. Has no effect if the storage is
	/// empty or has no spare slots.
	pub fn shrink_to_fit(&mut self) -> Result {
		if self.is_empty() || self.capacity() <= self.size() {
			return Ok(())
		}
		self.resize(self.size())
	}

	/// Returns a mutable reference to the slot at `index`, which may lie past the
	/// live range, constructing it if needed. Returns `None` if `index` is beyond
	/// the capacity.
	pub fn slot_mut(&mut self, index: usize) -> Option<&mut T> {
		if index >= self.capacity() { return None }
		self.build_to(index + 1);
		// SAFETY: the slot was constructed above.
		Some(unsafe { self.slots_mut()[index].assume_init_mut() })
	}

	/// Places `value` at `index`, dropping the value there if constructed and
	/// constructing any skipped slots before it.
	///
	/// # Panics
	///
	/// Panics if `index` is beyond the capacity.
	pub(crate) fn construct_at(&mut self, index: usize, value: T) {
		assert!(index < self.capacity(), "slot {index} is beyond the capacity");
		if index < self.built {
			// SAFETY: slots below `built` are constructed.
			unsafe {
				*self.slots_mut()[index].assume_init_mut() = value;
			}
		} else {
			self.build_to(index);
			self.slots_mut()[index].write(value);
			self.built = index + 1;
		}
	}

	/// Places `value` at the tail, advancing it. The storage must have room.
	pub(crate) fn push_tail(&mut self, value: T) {
		let tail = self.tail;
		self.construct_at(tail, value);
		self.tail += 1;
	}

	/// Moves the tail forward by `count` slots, making whatever they hold live.
	/// Unconstructed slots in the way are default-constructed first.
	pub(crate) fn advance_tail(&mut self, count: usize) -> Result {
		let capacity = self.capacity();
		let end = self.tail
					  .checked_add(count)
					  .filter(|&end| end <= capacity)
					  .ok_or_else(|| Error::out_of_range(self.tail.saturating_add(count), capacity))?;
		self.build_to(end);
		self.tail = end;
		Ok(())
	}

	/// Clones `values` to the tail, advancing it. The storage must have room.
	pub(crate) fn extend_tail(&mut self, values: &[T]) {
		debug_assert_le!(values.len(), self.capacity() - self.tail);
		for value in values {
			self.push_tail(value.clone());
		}
	}

	/// Allocates and constructs `capacity` slots in an uninitialized storage.
	fn reserve(&mut self, capacity: usize) -> Result {
		debug_assert!(!self.is_init(), "storage should be uninitialized");
		if capacity == 0 { return Ok(()) }
		self.head = Some(allocate(capacity)?);
		self.tail = 0;
		self.built = 0;
		self.build_to(capacity);
		Ok(())
	}

	/// Default-constructs slots up to `end`.
	fn build_to(&mut self, end: usize) {
		debug_assert_le!(end, self.capacity());
		while self.built < end {
			let index = self.built;
			self.slots_mut()[index].write(T::default());
			self.built += 1;
		}
	}

	fn check_assign(&self, other: &Self) -> Result {
		let (required, capacity) = (other.capacity(), self.capacity());
		if capacity < required {
			warn!("refusing to assign {required} slots to a storage of capacity {capacity}");
			Err(Error::InsufficientCapacity { required, capacity })
		} else {
			Ok(())
		}
	}
}

impl<T> Drop for Storage<T> {
	fn drop(&mut self) {
		self.destroy_all();
	}
}

impl<T: Default + Clone> Default for Storage<T> {
	fn default() -> Self {
		Self::expect_alloc(Self::new(DEFAULT_VOLUME))
	}
}

impl<T: Default + Clone> Clone for Storage<T> {
	fn clone(&self) -> Self {
		Self::expect_alloc(self.try_clone())
	}
}

impl<T: Default + Clone> From<&[T]> for Storage<T> {
	fn from(value: &[T]) -> Self {
		Self::expect_alloc(Self::try_from_values(value.iter().cloned()))
	}
}

impl<T: Default + Clone, const N: usize> From<[T; N]> for Storage<T> {
	fn from(value: [T; N]) -> Self {
		Self::expect_alloc(Self::try_from_values(value))
	}
}

impl<T: Default + Clone> From<Vec<T>> for Storage<T> {
	fn from(value: Vec<T>) -> Self {
		Self::expect_alloc(Self::try_from_values(value))
	}
}

impl<T: Default + Clone> FromIterator<T> for Storage<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::expect_alloc(Self::try_from_values(iter))
	}
}

impl<T> AsRef<[T]> for Storage<T> {
	fn as_ref(&self) -> &[T] { self.as_slice() }
}

impl<T> AsMut<[T]> for Storage<T> {
	fn as_mut(&mut self) -> &mut [T] { self.as_mut_slice() }
}

impl<'a, T> IntoIterator for &'a Storage<T> {
	type Item = &'a T;
	type IntoIter = slice::Iter<'a, T>;
	fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T> IntoIterator for &'a mut Storage<T> {
	type Item = &'a mut T;
	type IntoIter = slice::IterMut<'a, T>;
	fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

impl<T: PartialEq> PartialEq for Storage<T> {
	fn eq(&self, other: &Self) -> bool {
		self.as_slice() == other.as_slice()
	}
}

impl<T: Eq> Eq for Storage<T> { }

impl<T: fmt::Debug> fmt::Debug for Storage<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Storage")
			.field("data", &self.as_slice())
			.field("capacity", &self.capacity())
			.finish_non_exhaustive()
	}
}

// SPDX-License-Identifier: Apache-2.0

mod read;
mod write;

use std::{fmt, mem, slice};
use std::fmt::{Debug, Formatter};
use std::ops::{Add, AddAssign, Deref, Index, IndexMut};
use all_asserts::debug_assert_le;
use crate::{Error, Result, Rooms, Storage};

/// A growable buffer over [`Storage`], with a read cursor independent of the
/// write tail.
///
/// Writes always land at the tail, growing the storage as needed: doubling for
/// single elements, and by the written length for slices. Reads consume from
/// the cursor, which only moves with [`read`](Self::read),
/// [`put_back`](Self::put_back), [`set_position`](Self::set_position), and is
/// reset by clearing or assigning.
///
/// # Indexing
///
/// Index access is checked against the *capacity*, not the size: any allocated
/// slot may be indexed, including default-constructed slots past the tail. The
/// read cursor, on the other hand, is only valid within the live range.
///
/// ```
/// use roombuf::Buffer;
///
/// let mut buf = Buffer::<u8>::new(8)?;
/// buf.append(b"Hello")?;
/// assert_eq!(buf.size(), 5);
/// assert_eq!(buf[7], 0);
/// assert_eq!(buf.read(), b'H');
/// # Ok::<(), roombuf::Error>(())
/// ```
pub struct Buffer<T> {
	storage: Storage<T>,
	read: usize,
}

impl<T> Buffer<T> {
	/// Creates an uninitialized buffer, owning no allocation.
	pub const fn uninit() -> Self {
		Self {
			storage: Storage::uninit(),
			read: 0,
		}
	}

	/// Returns the underlying storage.
	pub fn storage(&self) -> &Storage<T> { &self.storage }

	/// Consumes the buffer, returning its storage.
	pub fn into_storage(self) -> Storage<T> { self.storage }

	/// Returns the live elements mutably.
	pub fn as_mut_slice(&mut self) -> &mut [T] { self.storage.as_mut_slice() }

	/// Iterates mutably over the live elements.
	pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> { self.storage.iter_mut() }

	/// Moves the allocation out into a new buffer, leaving this one
	/// uninitialized. The read cursor moves with it.
	pub fn take(&mut self) -> Self {
		let read = self.read;
		self.read = 0;
		Self {
			storage: self.storage.take(),
			read,
		}
	}

	/// Clears the buffer by moving the tail back to the head and resetting the
	/// read cursor. No element is destroyed; old values stay in their slots until
	/// overwritten.
	pub fn clear(&mut self) {
		self.storage.truncate(0);
		self.read = 0;
	}

	/// Clears the buffer, destroying every constructed slot. The capacity stays
	/// allocated.
	pub fn clear_all(&mut self) {
		self.storage.destroy_all();
		self.read = 0;
	}

	/// Returns a reference to the slot at `index`, or `None` if `index` is beyond
	/// the capacity or the slot isn't constructed.
	pub fn get(&self, index: usize) -> Option<&T> {
		self.storage.slot(index)
	}

	/// Returns a reference to the slot at `index`.
	///
	/// # Panics
	///
	/// Panics if `index` is beyond the capacity.
	pub fn at(&self, index: usize) -> &T {
		&self[index]
	}

	/// Clamps the read cursor into the live range.
	fn sync_read(&mut self) {
		self.read = self.read.min(self.storage.size());
	}

	fn check_invariants(&self) {
		debug_assert_le!(self.read, self.storage.size());
		debug_assert_le!(self.storage.size(), self.storage.capacity());
	}
}

impl<T: Default + Clone> Buffer<T> {
	/// Creates a buffer with `capacity` default-constructed slots.
	pub fn new(capacity: usize) -> Result<Self> {
		Storage::new(capacity).map(Into::into)
	}

	/// Creates a buffer with a preset capacity.
	pub fn from_rooms(rooms: Rooms) -> Result<Self> {
		Self::new(rooms.volume())
	}

	/// Creates a full buffer of `capacity` copies of `value`.
	pub fn filled(capacity: usize, value: T) -> Result<Self> {
		Storage::filled(capacity, value).map(Into::into)
	}

	/// Creates a full buffer holding exactly the values yielded by `values`.
	pub fn try_from_values(values: impl IntoIterator<Item = T>) -> Result<Self> {
		Storage::try_from_values(values).map(Into::into)
	}

	/// Copies the buffer, with the same capacity, live contents and read cursor.
	pub fn try_clone(&self) -> Result<Self> {
		Ok(Self {
			storage: self.storage.try_clone()?,
			read: self.read,
		})
	}

	/// Returns a mutable reference to the slot at `index`, constructing it if
	/// needed, or `None` if `index` is beyond the capacity.
	pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
		self.storage.slot_mut(index)
	}

	/// Extracts a copy of `length` elements from `first`, failing if the range
	/// runs past the size. The new buffer has the same capacity as this one.
	pub fn extract(&self, first: usize, length: usize) -> Result<Self> {
		let size = self.size();
		match first.checked_add(length) {
			Some(end) if end <= size => self.copy_range(first, length),
			Some(end) => Err(Error::out_of_range(end, size)),
			None => Err(Error::out_of_range(usize::MAX, size))
		}
	}

	/// Copies up to `length` elements from `first`, shortening the range to fit
	/// within the size instead of failing.
	pub fn substr(&self, first: usize, length: usize) -> Self {
		let size = self.size();
		let first = first.min(size);
		let length = length.min(size - first);
		Storage::<T>::expect_alloc(self.copy_range(first, length))
	}

	/// Commits `count` slots past the tail to the live range, typically after
	/// writing them through [`IndexMut`] or [`get_mut`](Self::get_mut). Fails
	/// without moving the tail if they'd run past the capacity.
	pub fn update_tail(&mut self, count: usize) -> Result {
		self.storage.advance_tail(count)?;
		self.check_invariants();
		Ok(())
	}

	/// Copies `other`'s live contents and read cursor over this buffer's. Only
	/// takes effect if this buffer's capacity is at least `other`'s, failing
	/// otherwise without modifying either.
	pub fn assign_from(&mut self, other: &Self) -> Result {
		self.storage.assign_from(&other.storage)?;
		self.read = other.read;
		Ok(())
	}

	/// Takes ownership of `other`'s allocation and read cursor, leaving `other`
	/// uninitialized. Only takes effect if this buffer's capacity is at least
	/// `other`'s, failing otherwise without modifying either.
	pub fn replace_with(&mut self, other: &mut Self) -> Result {
		self.storage.replace_with(&mut other.storage)?;
		self.read = mem::take(&mut other.read);
		Ok(())
	}

	/// Reallocates to exactly `capacity` slots, keeping as much of the live range
	/// as fits.
	pub fn resize(&mut self, capacity: usize) -> Result {
		let result = self.storage.resize(capacity);
		self.sync_read();
		result
	}

	/// Grows the capacity by `additional` slots.
	pub fn grow(&mut self, additional: usize) -> Result {
		self.storage.grow(additional)
	}

	/// Reserves capacity for at least `additional` more elements past the tail.
	pub fn reserve(&mut self, additional: usize) -> Result {
		let Some(end) = self.size().checked_add(additional) else {
			return Err(Error::NoResource { requested: usize::MAX })
		};
		match end.checked_sub(self.capacity()) {
			Some(missing) if missing > 0 => self.storage.grow(missing),
			_ => Ok(())
		}
	}

	/// Reallocates down to exactly the live size.
	pub fn shrink_to_fit(&mut self) -> Result {
		self.storage.shrink_to_fit()
	}

	fn copy_range(&self, first: usize, length: usize) -> Result<Self> {
		let mut dest = Self::new(self.capacity())?;
		dest.assign(&self.as_slice()[first..first + length])?;
		Ok(dest)
	}
}

impl<T> From<Storage<T>> for Buffer<T> {
	fn from(storage: Storage<T>) -> Self {
		Self { storage, read: 0 }
	}
}

impl<T> Deref for Buffer<T> {
	type Target = Storage<T>;
	fn deref(&self) -> &Storage<T> { &self.storage }
}

impl<T: Default + Clone> Default for Buffer<T> {
	fn default() -> Self { Storage::default().into() }
}

impl<T: Default + Clone> Clone for Buffer<T> {
	fn clone(&self) -> Self {
		Storage::<T>::expect_alloc(self.try_clone())
	}
}

impl<T: Default + Clone> From<&[T]> for Buffer<T> {
	fn from(value: &[T]) -> Self { Storage::from(value).into() }
}

impl<T: Default + Clone, const N: usize> From<[T; N]> for Buffer<T> {
	fn from(value: [T; N]) -> Self { Storage::from(value).into() }
}

impl<T: Default + Clone> From<Vec<T>> for Buffer<T> {
	fn from(value: Vec<T>) -> Self { Storage::from(value).into() }
}

impl<T: Default + Clone> FromIterator<T> for Buffer<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Storage::from_iter(iter).into()
	}
}

impl<T> Index<usize> for Buffer<T> {
	type Output = T;

	fn index(&self, index: usize) -> &T {
		assert!(index < self.capacity(), "index position is over capacity");
		self.storage
			.slot(index)
			.unwrap_or_else(|| panic!("slot {index} is not constructed"))
	}
}

impl<T: Default + Clone> IndexMut<usize> for Buffer<T> {
	fn index_mut(&mut self, index: usize) -> &mut T {
		match self.storage.slot_mut(index) {
			Some(slot) => slot,
			None => panic!("index position is over capacity")
		}
	}
}

impl<T: Default + Clone> Add<T> for Buffer<T> {
	type Output = Self;

	fn add(mut self, value: T) -> Self {
		self += value;
		self
	}
}

impl<T: Default + Clone> AddAssign<T> for Buffer<T> {
	fn add_assign(&mut self, value: T) {
		Storage::<T>::expect_alloc(self.push_back(value))
	}
}

impl<T: Default + Clone> Extend<T> for Buffer<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			*self += value;
		}
	}
}

impl<'a, T: Default + Clone + 'a> Extend<&'a T> for Buffer<T> {
	fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
		self.extend(iter.into_iter().cloned())
	}
}

impl<T> AsRef<[T]> for Buffer<T> {
	fn as_ref(&self) -> &[T] { self.as_slice() }
}

impl<T> AsMut<[T]> for Buffer<T> {
	fn as_mut(&mut self) -> &mut [T] { self.as_mut_slice() }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
	type Item = &'a T;
	type IntoIter = slice::Iter<'a, T>;
	fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T> IntoIterator for &'a mut Buffer<T> {
	type Item = &'a mut T;
	type IntoIter = slice::IterMut<'a, T>;
	fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

impl<T: PartialEq> PartialEq for Buffer<T> {
	fn eq(&self, other: &Self) -> bool {
		self.as_slice() == other.as_slice()
	}
}

impl<T: Eq> Eq for Buffer<T> { }

impl<T: PartialEq> PartialEq<[T]> for Buffer<T> {
	fn eq(&self, other: &[T]) -> bool { self.as_slice() == other }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Buffer<T> {
	fn eq(&self, other: &[T; N]) -> bool { self.as_slice() == other }
}

impl<T: Debug> Debug for Buffer<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Buffer")
			.field("data", &self.as_slice())
			.field("capacity", &self.capacity())
			.field("position", &self.read)
			.finish()
	}
}

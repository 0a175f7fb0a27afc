// SPDX-License-Identifier: Apache-2.0

use crate::{Buffer, Error, Result};

impl<T> Buffer<T> {
	/// Returns the read cursor position.
	#[inline]
	pub fn position(&self) -> usize { self.read }

	/// Returns the number of live elements after the read cursor.
	#[inline]
	pub fn remaining(&self) -> usize { self.size() - self.read }

	/// Moves the read cursor to `position`, failing without moving it if the
	/// position is past the size.
	pub fn set_position(&mut self, position: usize) -> Result {
		let size = self.size();
		if position > size {
			return Err(Error::out_of_range(position, size))
		}
		self.read = position;
		Ok(())
	}

	/// Moves the read cursor back by one. At the start, fails with
	/// [`Error::Underflow`] and leaves the cursor at zero.
	pub fn put_back(&mut self) -> Result {
		if self.read > 0 {
			self.read -= 1;
			Ok(())
		} else {
			Err(Error::Underflow)
		}
	}
}

impl<T: Clone> Buffer<T> {
	/// Reads the element at the read cursor, advancing it.
	///
	/// # Panics
	///
	/// Panics if the cursor is at the end of the live range.
	pub fn read(&mut self) -> T {
		match self.try_read() {
			Ok(value) => value,
			Err(_) => panic!("point to no valid data")
		}
	}

	/// Reads the element at the read cursor, advancing it, or fails if the cursor
	/// is at the end of the live range.
	pub fn try_read(&mut self) -> Result<T> {
		let position = self.read;
		let value = self.as_slice()
						.get(position)
						.cloned()
						.ok_or_else(|| Error::out_of_range(position + 1, self.size()))?;
		self.read += 1;
		self.check_invariants();
		Ok(value)
	}
}

// SPDX-License-Identifier: Apache-2.0

use log::trace;
use crate::{Buffer, Result};

impl<T: Default + Clone> Buffer<T> {
	/// Appends `values` at the tail. If they don't fit, the storage first grows
	/// by `values.len()` slots.
	pub fn append(&mut self, values: &[T]) -> Result {
		let count = values.len();
		if self.storage.overflow(count) {
			trace!("growing buffer by {count} slots to append");
			self.storage.grow(count)?;
		}
		self.storage.extend_tail(values);
		self.check_invariants();
		Ok(())
	}

	/// Appends the live contents of `other` at the tail.
	pub fn append_buffer(&mut self, other: &Self) -> Result {
		self.append(other.as_slice())
	}

	/// Replaces the contents with `values`, growing by `values.len()` slots first
	/// if they don't fit. The read cursor is reset.
	pub fn assign(&mut self, values: &[T]) -> Result {
		let count = values.len();
		if self.capacity() < count {
			self.storage.grow(count)?;
		}
		self.clear();
		self.storage.extend_tail(values);
		self.check_invariants();
		Ok(())
	}

	/// Replaces the contents with the live contents of `other`.
	pub fn assign_buffer(&mut self, other: &Self) -> Result {
		self.assign(other.as_slice())
	}

	/// Pushes one `value` to the tail, doubling the capacity first if full.
	pub fn push_back(&mut self, value: T) -> Result {
		if self.storage.is_full() {
			self.storage.grow_double()?;
		}
		self.storage.push_tail(value);
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;
	use crate::Buffer;

	const SEQUENCE: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

	#[test]
	fn append_slice() {
		let mut buf = Buffer::<u8>::new(16).unwrap();
		buf.append(b"Hello").unwrap();
		assert_eq!(buf[0], b'H');
		assert_eq!(buf[2], b'l');
		assert_eq!(buf[4], b'o');
		assert_eq!(buf.capacity(), 16);
	}

	#[test]
	fn append_buffer() {
		let source = Buffer::from(SEQUENCE);
		let mut buf = Buffer::<u8>::new(24).unwrap();
		buf.append_buffer(&source).unwrap();
		assert_eq!(buf, SEQUENCE);
		buf.append(b"Hello").unwrap();
		assert_eq!(buf.size(), 13);
		assert_eq!(buf[8], b'H');
		assert_eq!(buf[10], b'l');
		assert_eq!(buf[12], b'o');
	}

	#[test]
	fn append_grows_by_count() {
		let mut buf = Buffer::from(SEQUENCE);
		buf.append(b"abc").unwrap();
		assert_eq!(buf.capacity(), 11);
		assert_eq!(&buf.as_slice()[8..], b"abc");
	}

	#[test]
	fn append_keeps_cursor() {
		let mut buf = Buffer::from(SEQUENCE);
		buf.set_position(3).unwrap();
		buf.append(b"abc").unwrap();
		assert_eq!(buf.position(), 3);
	}

	#[test]
	fn assign_slice() {
		let mut buf = Buffer::<u8>::new(8).unwrap();
		buf.assign(b"Hello").unwrap();
		assert_eq!(buf.size(), 5);
		assert_eq!(buf[0], b'H');
		assert_eq!(buf[2], b'l');
		assert_eq!(buf[4], b'o');
	}

	#[test]
	fn assign_buffer() {
		let source = Buffer::from(SEQUENCE);
		let mut buf = Buffer::<u8>::new(8).unwrap();
		buf.assign_buffer(&source).unwrap();
		assert_eq!(buf, source);
		assert_eq!(buf.size(), source.size());
	}

	#[test]
	fn assign_overwrites_and_resets_cursor() {
		let mut buf = Buffer::<u8>::new(4).unwrap();
		buf.assign(b"Hello world!!").unwrap();
		buf.read();
		buf.read();
		buf.assign(b"abc").unwrap();
		assert_eq!(buf, *b"abc");
		assert_eq!(buf.position(), 0);
		assert_eq!(buf.capacity(), 17);
	}

	#[test]
	fn push_back_doubles() {
		let mut buf = Buffer::<u8>::from([0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
		assert_eq!(buf.capacity(), 10);
		buf.push_back(10).unwrap();
		assert_eq!(buf.capacity(), 20);
		assert_eq!(buf.size(), 11);
		assert_eq!(buf[10], 10);
	}

	#[test]
	fn push_back_into_uninit() {
		let mut buf = Buffer::<u8>::new(0).unwrap();
		assert!(!buf.is_init());
		buf.push_back(1).unwrap();
		assert_eq!(buf.capacity(), 1);
		assert_eq!(buf, [1]);
	}
}

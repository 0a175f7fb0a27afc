// SPDX-License-Identifier: Apache-2.0

use std::result;
use amplify_derive::Display;
use simdutf8::compat;
use thiserror::Error;

pub type Result<T = ()> = result::Result<T, Error>;

/// A storage or buffer error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
	/// The allocator could not satisfy a request for `requested` slots.
	#[error("failed to allocate {requested} slots")]
	NoResource {
		requested: usize
	},
	/// A position or range end fell outside the valid limit.
	#[error("position {index} is out of range (limit {limit})")]
	OutOfRange {
		index: usize,
		limit: usize,
	},
	/// The read cursor is already at the start of the buffer.
	#[error("read position is already at the start")]
	Underflow,
	/// The destination cannot hold the source without reallocating.
	#[error("{required} slots required, but the capacity is {capacity}")]
	InsufficientCapacity {
		required: usize,
		capacity: usize,
	},
	/// The contents are not valid UTF-8 past `valid_up_to`.
	#[error("invalid UTF-8 byte sequence from index {valid_up_to}")]
	Utf8 {
		valid_up_to: usize
	},
}

/// Numeric return codes shared with other components.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Hash)]
#[repr(i64)]
pub enum Code {
	#[display("ok")]
	Ok = 0,
	#[display("failure")]
	Failure = -1,
	#[display("timeout")]
	Timeout = -10000,
	#[display("no resource")]
	NoResource = -10001,
	#[display("no data")]
	NoData = -10002,
	#[display("out of range")]
	OutOfRange = -10100,
	#[display("underflow")]
	Underflow = -10101,
	#[display("overflow")]
	Overflow = -10102,
	#[display("under index")]
	UnderIndex = -10103,
	#[display("over index")]
	OverIndex = -10104,
}

impl Error {
	/// Returns the numeric code for this error.
	pub fn code(&self) -> Code {
		match self {
			Self::NoResource { .. } => Code::NoResource,
			Self::OutOfRange { .. } => Code::OutOfRange,
			Self::Underflow => Code::Underflow,
			Self::InsufficientCapacity { .. } => Code::Overflow,
			Self::Utf8 { .. } => Code::Failure,
		}
	}

	pub fn is_no_resource(&self) -> bool {
		matches!(self, Self::NoResource { .. })
	}

	pub fn is_out_of_range(&self) -> bool {
		matches!(self, Self::OutOfRange { .. })
	}

	pub fn is_underflow(&self) -> bool {
		matches!(self, Self::Underflow)
	}

	pub(crate) fn out_of_range(index: usize, limit: usize) -> Self {
		Self::OutOfRange { index, limit }
	}
}

impl Code {
	/// Returns the raw return code.
	pub fn value(self) -> i64 { self as i64 }

	/// Returns `true` if the code is [`Ok`](Self::Ok).
	pub fn is_ok(self) -> bool {
		matches!(self, Self::Ok)
	}
}

impl From<Code> for i64 {
	fn from(value: Code) -> Self { value.value() }
}

impl<T> From<&Result<T>> for Code {
	fn from(value: &Result<T>) -> Self {
		match value {
			Ok(_) => Self::Ok,
			Err(error) => error.code(),
		}
	}
}

impl From<compat::Utf8Error> for Error {
	fn from(value: compat::Utf8Error) -> Self {
		Self::Utf8 { valid_up_to: value.valid_up_to() }
	}
}

#[cfg(test)]
mod test {
	use super::{Code, Error, Result};

	#[test]
	fn codes() {
		assert_eq!(Error::out_of_range(9, 8).code(), Code::OutOfRange);
		assert_eq!(Error::Underflow.code().value(), -10101);
		assert_eq!(Error::NoResource { requested: 1 }.code().value(), -10001);
		assert_eq!(i64::from(Code::Ok), 0);
	}

	#[test]
	fn code_from_result() {
		let ok: Result<u8> = Ok(1);
		let err: Result<u8> = Err(Error::Underflow);
		assert!(Code::from(&ok).is_ok());
		assert_eq!(Code::from(&err), Code::Underflow);
	}

	#[test]
	fn display() {
		assert_eq!(
			Error::out_of_range(14, 13).to_string(),
			"position 14 is out of range (limit 13)"
		);
		assert_eq!(Code::OutOfRange.to_string(), "out of range");
	}
}
